//! The type-descriptor grammar.
//!
//! A [`TypeDescriptor`] is the declarative input language: a compact,
//! JSON-compatible description of an expected value shape. Descriptors are
//! immutable; [`crate::schema::compile`] turns one into a reusable
//! [`crate::schema::Schema`] without mutating it, and compiling the same
//! descriptor twice yields behaviorally equivalent schemas.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::DescriptorError;
use crate::schema::SchemaRef;

/// A zero-argument factory producing a default value.
///
/// Called fresh on every check that needs it, never memoized, so a default
/// may be a mutable container without being shared across validations.
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// A pure rewrite applied to an accepted value. Returning `None` drops the
/// entry from the output entirely.
pub type XformFn = Arc<dyn Fn(Value) -> Option<Value> + Send + Sync>;

/// A named primitive test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Function,
    Object,
    Uint32,
    Int32,
}

impl Primitive {
    /// Parse a primitive name from the wire format.
    pub fn from_name(name: &str) -> Option<Primitive> {
        match name {
            "string" => Some(Primitive::String),
            "number" => Some(Primitive::Number),
            "boolean" => Some(Primitive::Boolean),
            "function" => Some(Primitive::Function),
            "object" => Some(Primitive::Object),
            "uint32" => Some(Primitive::Uint32),
            "int32" => Some(Primitive::Int32),
            _ => None,
        }
    }

    /// The name used in descriptors and rendered examples.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Function => "function",
            Primitive::Object => "object",
            Primitive::Uint32 => "uint32",
            Primitive::Int32 => "int32",
        }
    }
}

/// A declarative description of an expected value shape.
#[derive(Clone)]
pub enum TypeDescriptor {
    /// A named primitive test.
    Primitive(Primitive),
    /// A string matcher; the pattern is compiled along with the descriptor.
    Regex(String),
    /// A fixed set of literal values, matched by canonical serialization.
    Enumeration(Vec<Value>),
    /// Delegate first, then rewrite the accepted value.
    Xform {
        delegate: Box<TypeDescriptor>,
        xform: XformFn,
    },
    /// The first alternative that matches wins.
    Union(Vec<TypeDescriptor>),
    /// Every element must match the delegate.
    Array(Box<TypeDescriptor>),
    /// Declared properties plus an optional catch-all for the rest.
    Object {
        properties: Vec<(String, TypeDescriptor)>,
        does_not_understand: Option<Box<TypeDescriptor>>,
    },
    /// An absent value succeeds without producing output.
    Optional(Box<TypeDescriptor>),
    /// An absent value takes a freshly produced default.
    Default {
        delegate: Box<TypeDescriptor>,
        default_value: DefaultFactory,
    },
    /// A hand-built schema embedded where a descriptor is expected.
    Precompiled(SchemaRef),
}

impl TypeDescriptor {
    pub fn regex(pattern: impl Into<String>) -> Self {
        TypeDescriptor::Regex(pattern.into())
    }

    pub fn array(delegate: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(delegate))
    }

    pub fn optional(delegate: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(delegate))
    }

    pub fn object(properties: Vec<(String, TypeDescriptor)>) -> Self {
        TypeDescriptor::Object {
            properties,
            does_not_understand: None,
        }
    }

    pub fn object_with_catch_all(
        properties: Vec<(String, TypeDescriptor)>,
        catch_all: TypeDescriptor,
    ) -> Self {
        TypeDescriptor::Object {
            properties,
            does_not_understand: Some(Box::new(catch_all)),
        }
    }

    pub fn default_to(
        delegate: TypeDescriptor,
        factory: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        TypeDescriptor::Default {
            delegate: Box::new(delegate),
            default_value: Arc::new(factory),
        }
    }

    pub fn xform(
        delegate: TypeDescriptor,
        xform: impl Fn(Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        TypeDescriptor::Xform {
            delegate: Box::new(delegate),
            xform: Arc::new(xform),
        }
    }

    pub fn precompiled(schema: SchemaRef) -> Self {
        TypeDescriptor::Precompiled(schema)
    }

    /// Parse the JSON-expressible subset of the descriptor grammar.
    ///
    /// This is the wire format external callers author by hand: primitive
    /// names, enumerations, and the tagged `regex`/`union`/`Array`/`Object`/
    /// `optional` combinators. `default` and `xform` descriptors need host
    /// functions and must be constructed with the builders instead.
    pub fn from_value(value: &Value) -> Result<TypeDescriptor, DescriptorError> {
        match value {
            Value::String(name) => Primitive::from_name(name)
                .map(TypeDescriptor::Primitive)
                .ok_or_else(|| DescriptorError::UnknownPrimitive { name: name.clone() }),
            Value::Array(options) => Ok(TypeDescriptor::Enumeration(options.clone())),
            Value::Object(fields) => Self::from_tagged(fields, value),
            _ => Err(bad_shape(value)),
        }
    }

    fn from_tagged(
        fields: &Map<String, Value>,
        whole: &Value,
    ) -> Result<TypeDescriptor, DescriptorError> {
        let Some(tag) = fields.get("type").and_then(Value::as_str) else {
            return Err(bad_shape(whole));
        };
        if fields.contains_key("xform") {
            return Err(DescriptorError::NeedsFunction {
                tag: "xform".to_string(),
            });
        }
        match tag {
            "regex" => {
                let pattern = require_field(fields, tag, "pattern")?
                    .as_str()
                    .ok_or_else(|| bad_shape(whole))?;
                Ok(TypeDescriptor::Regex(pattern.to_string()))
            }
            "union" => {
                let options = require_field(fields, tag, "options")?
                    .as_array()
                    .ok_or_else(|| bad_shape(whole))?;
                let parsed = options
                    .iter()
                    .map(TypeDescriptor::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::Union(parsed))
            }
            "Array" => {
                let delegate = require_field(fields, tag, "delegate")?;
                Ok(TypeDescriptor::array(TypeDescriptor::from_value(delegate)?))
            }
            "Object" => {
                let properties = require_field(fields, tag, "properties")?
                    .as_object()
                    .ok_or_else(|| bad_shape(whole))?;
                let mut parsed = Vec::with_capacity(properties.len());
                for (name, descriptor) in properties {
                    parsed.push((name.clone(), TypeDescriptor::from_value(descriptor)?));
                }
                let does_not_understand = match fields.get("doesNotUnderstand") {
                    Some(descriptor) => {
                        Some(Box::new(TypeDescriptor::from_value(descriptor)?))
                    }
                    None => None,
                };
                Ok(TypeDescriptor::Object {
                    properties: parsed,
                    does_not_understand,
                })
            }
            "optional" => {
                let delegate = require_field(fields, tag, "delegate")?;
                Ok(TypeDescriptor::optional(TypeDescriptor::from_value(
                    delegate,
                )?))
            }
            "default" => Err(DescriptorError::NeedsFunction {
                tag: "default".to_string(),
            }),
            _ => Err(bad_shape(whole)),
        }
    }
}

fn bad_shape(value: &Value) -> DescriptorError {
    DescriptorError::BadShape {
        descriptor: value.to_string(),
    }
}

fn require_field<'a>(
    fields: &'a Map<String, Value>,
    tag: &str,
    field: &str,
) -> Result<&'a Value, DescriptorError> {
    fields.get(field).ok_or_else(|| DescriptorError::MissingField {
        tag: tag.to_string(),
        field: field.to_string(),
    })
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => f.debug_tuple("Primitive").field(p).finish(),
            TypeDescriptor::Regex(pattern) => f.debug_tuple("Regex").field(pattern).finish(),
            TypeDescriptor::Enumeration(options) => {
                f.debug_tuple("Enumeration").field(options).finish()
            }
            TypeDescriptor::Xform { delegate, .. } => f
                .debug_struct("Xform")
                .field("delegate", delegate)
                .finish_non_exhaustive(),
            TypeDescriptor::Union(options) => f.debug_tuple("Union").field(options).finish(),
            TypeDescriptor::Array(delegate) => f.debug_tuple("Array").field(delegate).finish(),
            TypeDescriptor::Object {
                properties,
                does_not_understand,
            } => f
                .debug_struct("Object")
                .field("properties", properties)
                .field("does_not_understand", does_not_understand)
                .finish(),
            TypeDescriptor::Optional(delegate) => {
                f.debug_tuple("Optional").field(delegate).finish()
            }
            TypeDescriptor::Default { delegate, .. } => f
                .debug_struct("Default")
                .field("delegate", delegate)
                .finish_non_exhaustive(),
            TypeDescriptor::Precompiled(_) => f.write_str("Precompiled(..)"),
        }
    }
}
