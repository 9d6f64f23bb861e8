//! Post-acceptance value rewriting.

use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::descriptor::XformFn;
use crate::diagnostics::DiagnosticSink;
use crate::path::Path;

/// Delegates first; only an accepted value is rewritten. A rejection
/// propagates untouched and the transform never runs. Invisible in rendered
/// examples.
pub struct XformSchema {
    delegate: SchemaRef,
    xform: XformFn,
}

impl XformSchema {
    pub fn new(delegate: SchemaRef, xform: XformFn) -> Self {
        XformSchema { delegate, xform }
    }
}

impl Schema for XformSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        if !self.delegate.check(key, value, out, diagnostics, path) {
            return false;
        }
        if let Some(accepted) = out.remove(key) {
            let xform = self.xform.as_ref();
            // A None result drops the entry from the output entirely
            if let Some(rewritten) = xform(accepted) {
                out.insert(key.to_string(), rewritten);
            }
        }
        true
    }

    fn example(&self, buf: &mut Vec<String>) {
        self.delegate.example(buf);
    }
}
