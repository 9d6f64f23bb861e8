//! Sequence validation.

use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::diagnostics::DiagnosticSink;
use crate::path::Path;
use crate::util::describe_value;

/// Placeholder key elements are checked under in the scratch accumulator.
const ELEMENT_KEY: &str = "_";

/// Applies one delegate schema to every element of an array, in ascending
/// index order. The first failing element aborts the whole check; on success
/// the output is a newly built array independent of the input's storage.
pub struct ArraySchema {
    delegate: SchemaRef,
}

impl ArraySchema {
    pub fn new(delegate: SchemaRef) -> Self {
        ArraySchema { delegate }
    }
}

impl Schema for ArraySchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        let Some(Value::Array(elements)) = value else {
            diagnostics.error(format!(
                "expected an array, not {} for {}",
                describe_value(value),
                path
            ));
            return false;
        };
        let mut accepted = Vec::with_capacity(elements.len());
        let mut capture = Map::new();
        let mut scope = path.scope();
        for (index, element) in elements.iter().enumerate() {
            scope.set_index(index);
            if !self
                .delegate
                .check(ELEMENT_KEY, Some(element), &mut capture, diagnostics, &mut scope)
            {
                return false;
            }
            // An xform may drop its output; keep the slot as null so the
            // indices line up.
            accepted.push(capture.remove(ELEMENT_KEY).unwrap_or(Value::Null));
        }
        out.insert(key.to_string(), Value::Array(accepted));
        true
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push("[".to_string());
        self.delegate.example(buf);
        buf.push(",...".to_string());
        buf.push("]".to_string());
    }
}
