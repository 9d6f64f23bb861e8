//! Optional and defaulted values.

use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::descriptor::DefaultFactory;
use crate::diagnostics::DiagnosticSink;
use crate::path::Path;

/// Delegates to an inner schema, substituting a computed default when the
/// input is absent. With no factory this is `optional`: absence succeeds
/// without producing output. A present value delegates fully; no defaulting
/// occurs.
pub struct DefaultSchema {
    delegate: SchemaRef,
    factory: Option<DefaultFactory>,
}

impl DefaultSchema {
    pub fn optional(delegate: SchemaRef) -> Self {
        DefaultSchema {
            delegate,
            factory: None,
        }
    }

    pub fn with_factory(delegate: SchemaRef, factory: DefaultFactory) -> Self {
        DefaultSchema {
            delegate,
            factory: Some(factory),
        }
    }
}

impl Schema for DefaultSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        match value {
            None => {
                // Called fresh every time: a default may be a mutable
                // container that must not be shared across checks.
                if let Some(factory) = self.factory.as_deref() {
                    out.insert(key.to_string(), factory());
                }
                true
            }
            Some(_) => self.delegate.check(key, value, out, diagnostics, path),
        }
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push("optional".to_string());
        self.delegate.example(buf);
    }
}
