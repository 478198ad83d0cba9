//! Schema holders: the registration records a host framework consumes.
//!
//! Where a reflection-based framework would scan for a class with a static
//! metadata hook, a Rust host gets an explicit record: the holder carries the
//! schema and exposes [`SchemaHolder::metadata_factory`] as the documentation
//! hook. The schema itself stays behind an accessor for code that knows to
//! look for it (the request pipeline, the collector).

use std::any::Any;

use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::schema::Schema;
use crate::translate::translate;

/// A named wrapper exposing one schema to the host framework.
///
/// Holders are independent: each owns its schema for its whole lifetime and
/// shares no state with other holders.
#[derive(Debug, Clone)]
pub struct SchemaHolder {
    name: String,
    schema: Schema,
}

impl SchemaHolder {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// The name the generated document files this schema under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped schema, for the request pipeline and the collector.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The documentation hook the host framework invokes at startup.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError` if the schema's structural description cannot
    /// be produced.
    pub fn metadata_factory(&self) -> Result<Map<String, Value>, TranslateError> {
        translate(&self.schema)
    }
}

/// Select the schema holders out of an arbitrary namespace of exported values.
///
/// Entries that are not holders are skipped. Output order matches input
/// order; duplicates are kept.
pub fn collect<'a, I>(namespace: I) -> Vec<&'a SchemaHolder>
where
    I: IntoIterator<Item = &'a dyn Any>,
{
    namespace
        .into_iter()
        .filter_map(|entry| entry.downcast_ref::<SchemaHolder>())
        .collect()
}
