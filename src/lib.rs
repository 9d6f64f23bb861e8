//! Caulk - declarative schema validation for tool configuration.
//!
//! A compact, data-driven *type descriptor* compiles into a reusable
//! [`Schema`]: a validator that checks a JSON-compatible candidate value,
//! producing a normalized output and structured diagnostics, and a renderer
//! that pretty-prints an example of a conforming value.
//!
//! Malformed descriptors fail fast with a [`DescriptorError`]; non-conforming
//! data never raises an error, it is reported through a [`DiagnosticSink`]
//! and signaled with a boolean return.
//!
//! ```
//! use caulk::{compile, CollectingSink, Path, Primitive, Schema, TypeDescriptor};
//! use serde_json::{json, Map};
//!
//! let descriptor = TypeDescriptor::object(vec![
//!     ("level".to_string(), TypeDescriptor::Enumeration(vec![json!("quiet"), json!("loud")])),
//!     ("retries".to_string(), TypeDescriptor::default_to(
//!         TypeDescriptor::Primitive(Primitive::Uint32),
//!         || json!(3),
//!     )),
//! ]);
//! let schema = compile(&descriptor)?;
//!
//! let mut out = Map::new();
//! let mut sink = CollectingSink::new();
//! let mut path = Path::new();
//! let candidate = json!({"level": "quiet"});
//! assert!(schema.check("options", Some(&candidate), &mut out, &mut sink, &mut path));
//! assert_eq!(out["options"], json!({"level": "quiet", "retries": 3}));
//! # Ok::<(), caulk::DescriptorError>(())
//! ```

pub mod descriptor;
pub mod diagnostics;
pub mod errors;
pub mod path;
pub mod render;
pub mod schema;
pub mod util;

pub use descriptor::{DefaultFactory, Primitive, TypeDescriptor, XformFn};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use errors::DescriptorError;
pub use path::{Path, PathSegment};
pub use render::render_example;
pub use schema::{compile, Schema, SchemaRef};
pub use util::mixin;
