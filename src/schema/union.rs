//! Ordered alternatives with buffered diagnostics.

use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::diagnostics::{CollectingSink, DiagnosticSink};
use crate::path::Path;
use crate::render::render_example;

/// Tries a list of alternatives in order against the same value; the first
/// that accepts wins.
///
/// Each alternative writes its diagnostics into a buffer so that trying
/// alternative 2 after alternative 1 fails does not pollute the caller's
/// output with irrelevant noise. On total failure only the first
/// alternative's buffered diagnostics are surfaced, after a single top-level
/// message naming the union's rendered example.
pub struct UnionSchema {
    options: Vec<SchemaRef>,
}

impl UnionSchema {
    pub fn new(options: Vec<SchemaRef>) -> Self {
        UnionSchema { options }
    }
}

impl Schema for UnionSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        let mut buffered = CollectingSink::new();
        for (index, option) in self.options.iter().enumerate() {
            let mark = buffered.len();
            // A failed attempt leaves out untouched, so alternatives may
            // share the real accumulator.
            if option.check(key, value, out, &mut buffered, path) {
                buffered.replay_into(mark, diagnostics);
                return true;
            }
            // Keep only the first alternative's rejection story.
            if index != 0 {
                buffered.truncate(mark);
            }
        }
        diagnostics.warn(format!(
            "could not match any of {} for {}",
            render_example(self),
            path
        ));
        buffered.replay_into(0, diagnostics);
        false
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push("(".to_string());
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                buf.push("|".to_string());
            }
            option.example(buf);
        }
        buf.push(")".to_string());
    }
}
