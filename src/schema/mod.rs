//! Schema compilation and the combinator seam.
//!
//! [`compile`] is the composition root: the single recursive entry point
//! that turns a [`TypeDescriptor`] into one of the combinator schemas in the
//! submodules. Everything a compiled schema captures is derived from the
//! descriptor at compile time; candidate values never leak into it, so a
//! [`SchemaRef`] is immutable and freely shared across validations.

pub mod array;
pub mod default;
pub mod object;
pub mod predicate;
pub mod set;
pub mod union;
pub mod xform;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::descriptor::TypeDescriptor;
use crate::diagnostics::DiagnosticSink;
use crate::errors::DescriptorError;
use crate::path::Path;

pub use array::ArraySchema;
pub use default::DefaultSchema;
pub use object::ObjectSchema;
pub use predicate::PredicateSchema;
pub use set::SetSchema;
pub use union::UnionSchema;
pub use xform::XformSchema;

/// A compiled, reusable validator and example renderer.
///
/// `check` either returns true having written exactly one entry, `out[key]`,
/// with the accepted normalized value, or returns false having emitted at
/// least one diagnostic and leaving `out` without an entry for `key`. Nested
/// failures leave no partial side effects in ancestor accumulators.
///
/// `example` appends rendering tokens for [`crate::render::render_example`];
/// it is pure and emits no diagnostics.
pub trait Schema: Send + Sync {
    fn check(
        &self,
        key: &str,
        value: Option<&Value>,
        out: &mut Map<String, Value>,
        diagnostics: &mut dyn DiagnosticSink,
        path: &mut Path,
    ) -> bool;

    fn example(&self, buf: &mut Vec<String>);
}

impl std::fmt::Debug for dyn Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Schema")
    }
}

/// Shared handle to a compiled schema.
pub type SchemaRef = Arc<dyn Schema>;

/// Compile a type descriptor into a reusable schema.
///
/// Compilation is pure, eager, and recursive: nested descriptors compile
/// before the parent schema is ever exercised. A [`TypeDescriptor::Precompiled`]
/// returns its embedded schema unchanged. The only compile-time failure left
/// by the closed descriptor grammar is an invalid regex pattern.
pub fn compile(descriptor: &TypeDescriptor) -> Result<SchemaRef, DescriptorError> {
    Ok(match descriptor {
        TypeDescriptor::Primitive(primitive) => predicate::for_primitive(*primitive),
        TypeDescriptor::Regex(pattern) => predicate::for_regex(pattern)?,
        TypeDescriptor::Enumeration(options) => Arc::new(SetSchema::new(options)),
        TypeDescriptor::Xform { delegate, xform } => {
            Arc::new(XformSchema::new(compile(delegate)?, xform.clone()))
        }
        TypeDescriptor::Union(options) => {
            let mut compiled = Vec::with_capacity(options.len());
            for option in options {
                compiled.push(compile(option)?);
            }
            Arc::new(UnionSchema::new(compiled))
        }
        TypeDescriptor::Array(delegate) => Arc::new(ArraySchema::new(compile(delegate)?)),
        TypeDescriptor::Object {
            properties,
            does_not_understand,
        } => {
            let mut compiled = Vec::with_capacity(properties.len());
            for (name, property) in properties {
                compiled.push((name.clone(), compile(property)?));
            }
            let catch_all = match does_not_understand {
                Some(delegate) => Some(compile(delegate)?),
                None => None,
            };
            Arc::new(ObjectSchema::new(compiled, catch_all))
        }
        TypeDescriptor::Optional(delegate) => {
            Arc::new(DefaultSchema::optional(compile(delegate)?))
        }
        TypeDescriptor::Default {
            delegate,
            default_value,
        } => Arc::new(DefaultSchema::with_factory(
            compile(delegate)?,
            default_value.clone(),
        )),
        TypeDescriptor::Precompiled(schema) => schema.clone(),
    })
}
