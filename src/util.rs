//! Small shared helpers.

use serde_json::{Map, Value};

/// Copy every entry of `from` onto `to`, overwriting existing keys.
///
/// Callers use this to merge a validated, normalized options object onto
/// their own configuration after a successful check.
pub fn mixin(from: &Map<String, Value>, to: &mut Map<String, Value>) {
    for (key, value) in from {
        to.insert(key.clone(), value.clone());
    }
}

/// Serialize a candidate value for a diagnostic message.
pub(crate) fn describe_value(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(missing)".to_string(),
    }
}

/// The option closest to `given` by Levenshtein distance, for "did you mean"
/// rendering. Ties go to the earliest option.
pub fn closest_option<'a>(given: &str, options: &'a [String]) -> Option<&'a String> {
    options
        .iter()
        .min_by_key(|option| strsim::levenshtein(given, option))
}
