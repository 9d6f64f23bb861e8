//! Keyed-structure validation.

use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::diagnostics::DiagnosticSink;
use crate::path::Path;
use crate::util::describe_value;

/// Validates a keyed structure: declared properties each get their own
/// delegate, undeclared ones are routed to an optional catch-all or rejected.
///
/// All-or-nothing: any single failure aborts the whole check and no partial
/// output is retained for the caller.
pub struct ObjectSchema {
    /// Declared properties in declaration order.
    properties: Vec<(String, SchemaRef)>,
    catch_all: Option<SchemaRef>,
}

impl ObjectSchema {
    pub fn new(properties: Vec<(String, SchemaRef)>, catch_all: Option<SchemaRef>) -> Self {
        ObjectSchema {
            properties,
            catch_all,
        }
    }

    fn declared(&self, name: &str) -> bool {
        self.properties.iter().any(|(property, _)| property == name)
    }
}

impl Schema for ObjectSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        let Some(Value::Object(fields)) = value else {
            diagnostics.error(format!(
                "expected an object, not {} for {}",
                describe_value(value),
                path
            ));
            return false;
        };
        let mut assembled = Map::new();
        let mut scope = path.scope();

        // Undeclared keys go to the catch-all; a missing or rejecting
        // catch-all sinks the whole check.
        for (name, field) in fields {
            if self.declared(name) {
                continue;
            }
            let accepted = match &self.catch_all {
                Some(delegate) => {
                    scope.set_key(name);
                    delegate.check(name, Some(field), &mut assembled, diagnostics, &mut scope)
                }
                None => false,
            };
            if !accepted {
                // Report at the object's own path, not the key's
                scope.reset();
                diagnostics.error(format!("unknown property {} for {}", name, &*scope));
                if diagnostics.supports_suggestions() {
                    let declared: Vec<String> = self
                        .properties
                        .iter()
                        .map(|(property, _)| property.clone())
                        .collect();
                    diagnostics.did_you_mean(name, &declared);
                }
                return false;
            }
        }

        // Every declared property runs, supplied or not, so optionals and
        // defaults see the absence.
        for (name, delegate) in &self.properties {
            scope.set_key(name);
            if !delegate.check(name, fields.get(name), &mut assembled, diagnostics, &mut scope) {
                return false;
            }
        }

        drop(scope);
        out.insert(key.to_string(), Value::Object(assembled));
        true
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push("{".to_string());
        let mut saw_one = false;
        for (name, delegate) in &self.properties {
            if saw_one {
                buf.push(",".to_string());
            }
            saw_one = true;
            buf.push(Value::String(name.clone()).to_string());
            buf.push(":".to_string());
            delegate.example(buf);
        }
        if let Some(delegate) = &self.catch_all {
            if saw_one {
                buf.push(",".to_string());
            }
            buf.push("*".to_string());
            buf.push(":".to_string());
            delegate.example(buf);
        }
        buf.push("}".to_string());
    }
}
