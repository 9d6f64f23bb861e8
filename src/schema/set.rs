//! Enumeration matching by canonical serialization.

use serde_json::{Map, Value};

use super::Schema;
use crate::diagnostics::DiagnosticSink;
use crate::path::Path;
use crate::util::describe_value;

/// Matches a value against a fixed set of literals.
///
/// Options are canonicalized once at construction; a match stores a clone of
/// the stored instance, not the caller's value, so structurally equal
/// literals are interchangeable and callers must not rely on identity.
pub struct SetSchema {
    /// Canonical serialization paired with the stored instance, in
    /// first-occurrence order.
    options: Vec<(String, Value)>,
}

impl SetSchema {
    pub fn new(options: &[Value]) -> Self {
        let mut canonical: Vec<(String, Value)> = Vec::with_capacity(options.len());
        for option in options {
            let key = option.to_string();
            if !canonical.iter().any(|(existing, _)| *existing == key) {
                canonical.push((key, option.clone()));
            }
        }
        SetSchema { options: canonical }
    }
}

impl Schema for SetSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        let candidate = describe_value(value);
        if let Some((_, stored)) = self.options.iter().find(|(option, _)| *option == candidate) {
            out.insert(key.to_string(), stored.clone());
            return true;
        }
        diagnostics.warn(format!("illegal value {} for {}", candidate, path));
        if diagnostics.supports_suggestions() {
            let all: Vec<String> = self.options.iter().map(|(option, _)| option.clone()).collect();
            diagnostics.did_you_mean(&candidate, &all);
        }
        false
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push("(".to_string());
        for (i, (option, _)) in self.options.iter().enumerate() {
            if i > 0 {
                buf.push("|".to_string());
            }
            buf.push(option.clone());
        }
        buf.push(")".to_string());
    }
}
