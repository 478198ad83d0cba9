//! Post-processing of generated documents with schema-level metadata.
//!
//! The per-field layer is folded in by [`translate`](crate::translate) when
//! the framework calls the holder's metadata hook. Schema-level description
//! and example have no per-field slot, so they are written into the aggregate
//! document after the framework builds it.

use serde_json::Value;
use tracing::warn;

use crate::holder::SchemaHolder;

/// Apply schema-level metadata to a generated document, in place.
///
/// For each holder with an attached metadata record, resolves
/// `components.schemas[<holder name>]` and sets its `example` and
/// `description` from the record. Missing document structure and missing
/// entries are warned about and skipped; remaining holders are still
/// processed.
pub fn apply_schema_meta(document: &mut Value, holders: &[&SchemaHolder]) {
    let Some(schemas) = document
        .get_mut("components")
        .and_then(|c| c.get_mut("schemas"))
        .and_then(Value::as_object_mut)
    else {
        warn!("document has no components.schemas, nothing to apply");
        return;
    };

    for holder in holders {
        let Some(meta) = holder.schema().meta() else {
            continue;
        };

        let Some(entry) = schemas.get_mut(holder.name()).and_then(Value::as_object_mut) else {
            warn!(schema = %holder.name(), "schema entry not found in document");
            continue;
        };

        if let Some(example) = &meta.example {
            entry.insert("example".to_string(), example.clone());
        }
        match meta.description.as_deref() {
            Some(description) if !description.is_empty() => {
                entry.insert(
                    "description".to_string(),
                    Value::String(description.to_string()),
                );
            }
            _ => {}
        }
    }
}
