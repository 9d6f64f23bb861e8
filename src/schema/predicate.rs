//! Named primitive and regex-backed predicates.

use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use super::{Schema, SchemaRef};
use crate::descriptor::Primitive;
use crate::diagnostics::DiagnosticSink;
use crate::errors::DescriptorError;
use crate::path::Path;
use crate::util::describe_value;

/// Wraps a named test over a single value.
pub struct PredicateSchema {
    name: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl PredicateSchema {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        PredicateSchema {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl Schema for PredicateSchema {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool {
        if let Some(present) = value {
            if (self.predicate)(present) {
                out.insert(key.to_string(), present.clone());
                return true;
            }
        }
        diagnostics.error(format!(
            "expected {}, not {} for {}",
            self.name,
            describe_value(value),
            path
        ));
        false
    }

    fn example(&self, buf: &mut Vec<String>) {
        buf.push(self.name.clone());
    }
}

/// The schema for a named primitive.
pub fn for_primitive(primitive: Primitive) -> SchemaRef {
    let predicate: fn(&Value) -> bool = match primitive {
        Primitive::String => |v| v.is_string(),
        Primitive::Number => |v| v.is_number(),
        Primitive::Boolean => |v| v.is_boolean(),
        // JSON values cannot carry functions; the name stays in the grammar
        // but matches nothing.
        Primitive::Function => |_| false,
        // typeof semantics: null and arrays count as objects.
        Primitive::Object => |v| v.is_object() || v.is_array() || v.is_null(),
        Primitive::Uint32 => is_uint32,
        Primitive::Int32 => is_int32,
    };
    Arc::new(PredicateSchema::new(primitive.name(), predicate))
}

/// The schema for a regex string matcher (unanchored `is_match` semantics).
pub fn for_regex(pattern: &str) -> Result<SchemaRef, DescriptorError> {
    let regex = Regex::new(pattern).map_err(|source| DescriptorError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;
    let name = format!("/{}/", pattern);
    Ok(Arc::new(PredicateSchema::new(name, move |v| {
        v.as_str().is_some_and(|s| regex.is_match(s))
    })))
}

/// A number equal to its own unsigned 32-bit truncation. This is a range
/// check, not a coercion: integral floats like `3.0` qualify.
fn is_uint32(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return u <= u64::from(u32::MAX);
            }
            n.as_f64()
                .is_some_and(|f| f >= 0.0 && f <= f64::from(u32::MAX) && f.fract() == 0.0)
        }
        _ => false,
    }
}

/// A number equal to its own signed 32-bit truncation.
fn is_int32(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX);
            }
            n.as_f64().is_some_and(|f| {
                f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) && f.fract() == 0.0
            })
        }
        _ => false,
    }
}
