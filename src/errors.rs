//! Descriptor compilation errors.

use miette::Diagnostic;
use thiserror::Error;

/// Error constructing or compiling a type descriptor.
///
/// These are programmer errors: a malformed descriptor fails fast rather than
/// producing a schema that could silently misbehave. Data errors never take
/// this channel; they go through the diagnostics sink.
#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("bad type descriptor {descriptor}")]
    #[diagnostic(
        code(caulk::descriptor::bad_shape),
        help("see the descriptor grammar in the crate docs")
    )]
    BadShape { descriptor: String },

    #[error("unknown primitive type `{name}`")]
    #[diagnostic(
        code(caulk::descriptor::unknown_primitive),
        help("recognized primitives: string, number, boolean, function, object, uint32, int32")
    )]
    UnknownPrimitive { name: String },

    #[error("invalid regex pattern `{pattern}`")]
    #[diagnostic(code(caulk::descriptor::invalid_regex))]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("descriptor tag `{tag}` is missing required field `{field}`")]
    #[diagnostic(code(caulk::descriptor::missing_field))]
    MissingField { tag: String, field: String },

    #[error("descriptor tag `{tag}` needs a host function and cannot be expressed as data")]
    #[diagnostic(
        code(caulk::descriptor::needs_function),
        help("construct `default` and `xform` descriptors with the TypeDescriptor builders")
    )]
    NeedsFunction { tag: String },
}
