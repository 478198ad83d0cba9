//! OpenAPI DTO adapter
//!
//! Lets a schema-validation library's type definitions feed a web
//! framework's request-validation and API-documentation pipeline:
//!
//! - [`Schema`] pairs a validator's JSON-Schema-like structural tree with
//!   optionally attached human-authored documentation ([`SchemaMeta`]).
//! - [`translate`] flattens the schema into per-field OpenAPI metadata,
//!   normalizing nullable unions down to the OpenAPI 3.0 `nullable` flag.
//! - [`SchemaHolder`] is the registration record the framework consumes:
//!   its [`metadata_factory`](SchemaHolder::metadata_factory) hook feeds the
//!   documentation builder, its schema feeds the request pipeline.
//! - [`transform`] is the pipeline step: pass-through for foreign parameter
//!   types, full structured rejection for invalid holder-typed payloads.
//! - [`apply_schema_meta`] injects schema-level description/example into the
//!   generated document after the framework builds it, with [`collect`]
//!   gathering the holders out of a namespace of exports.
//!
//! # Example
//!
//! ```
//! use openapi_dto::{translate, FieldDoc, Schema, SchemaMeta};
//! use serde_json::json;
//!
//! let schema = Schema::new(json!({
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string" },
//!         "nickname": { "anyOf": [{ "type": "string" }, { "type": "null" }] }
//!     },
//!     "required": ["name"]
//! }))
//! .with_meta(SchemaMeta::new().property("name", FieldDoc::new().description("Full name")))
//! .unwrap();
//!
//! let fields = translate(&schema).unwrap();
//! assert_eq!(fields["name"]["required"], json!(true));
//! assert_eq!(fields["name"]["description"], json!("Full name"));
//! assert_eq!(fields["nickname"]["nullable"], json!(true));
//! ```

mod document;
mod error;
mod holder;
mod loader;
mod meta;
mod pipe;
mod schema;
mod translate;

pub use document::apply_schema_meta;
pub use error::{FieldError, LoadError, MetaError, Rejection, TranslateError, ValidateError};
pub use holder::{collect, SchemaHolder};
pub use loader::{is_url, load_json, load_json_auto, load_json_str};
pub use meta::{ExternalDocs, FieldDoc, SchemaMeta};
pub use pipe::transform;
pub use schema::{json_type_name, Schema, BASE_KEY, KIND_KEY};
pub use translate::{normalize_nullable, translate};

#[cfg(feature = "remote")]
pub use loader::load_json_url;
