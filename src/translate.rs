//! Schema-to-documentation translation: flat per-field OpenAPI metadata.

use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::meta::FieldDoc;
use crate::schema::Schema;

/// Translate a schema into per-field documentation metadata.
///
/// Returns one entry per declared field, keyed by field name, in declaration
/// order (the order drives field ordering in the generated documentation).
/// Each entry is the field's structural node, nullable-normalized, plus a
/// `required` boolean and any attached per-field documentation.
///
/// Pure and uncached: the same schema and attachment always produce the same
/// mapping, recomputed on every call.
///
/// # Errors
///
/// Returns `TranslateError` if the structural description cannot be produced.
pub fn translate(schema: &Schema) -> Result<Map<String, Value>, TranslateError> {
    let mut described = schema.describe()?;

    // The dialect marker is schema-level, not per-field data.
    if let Some(root) = described.as_object_mut() {
        root.remove("$schema");
    }

    let empty = Map::new();
    let properties = described
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = described
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let docs = schema.meta().map(|meta| &meta.properties);

    let mut result = Map::new();
    for (name, node) in properties {
        let mut entry = match normalize_nullable(node) {
            Value::Object(map) => map,
            // Boolean schemas and other degenerate nodes still get an entry.
            _ => Map::new(),
        };
        entry.insert(
            "required".to_string(),
            Value::Bool(required.contains(&name.as_str())),
        );
        if let Some(doc) = docs.and_then(|d| d.get(name)) {
            merge_field_doc(&mut entry, doc);
        }
        result.insert(name.clone(), Value::Object(entry));
    }

    Ok(result)
}

/// Rewrite an `anyOf`-with-null union into the `nullable` flag form.
///
/// Draft JSON Schema spells "string or null" as
/// `{ "anyOf": [{ "type": "string" }, { "type": "null" }] }`; the OpenAPI 3.0
/// dialect has no nullable unions and wants
/// `{ "type": "string", "nullable": true }` instead. Nodes without an `anyOf`
/// list, and unions without a null member, are returned unchanged.
///
/// A single surviving member that carries a `const` keeps the union form:
/// flattening would lose the literal-value constraint.
pub fn normalize_nullable(node: &Value) -> Value {
    let Some(map) = node.as_object() else {
        return node.clone();
    };
    let Some(any_of) = map.get("anyOf").and_then(Value::as_array) else {
        return node.clone();
    };

    let is_null = |member: &Value| member.get("type").and_then(Value::as_str) == Some("null");

    if !any_of.iter().any(is_null) {
        // A non-nullable union stays a union.
        return node.clone();
    }

    let rest: Vec<Value> = any_of
        .iter()
        .filter(|member| !is_null(member))
        .cloned()
        .collect();

    if rest.is_empty() {
        let mut only_null = Map::new();
        only_null.insert("type".to_string(), Value::String("null".to_string()));
        return Value::Object(only_null);
    }

    if rest.len() == 1 && rest[0].get("const").is_none() {
        // Flatten the single non-null member onto a nullable flag.
        let mut flat = rest[0].as_object().cloned().unwrap_or_default();
        flat.insert("nullable".to_string(), Value::Bool(true));
        return Value::Object(flat);
    }

    let mut union = Map::new();
    union.insert("anyOf".to_string(), Value::Array(rest));
    union.insert("nullable".to_string(), Value::Bool(true));
    Value::Object(union)
}

/// Fold attached per-field documentation into a metadata entry.
///
/// Documentation keys are additive siblings: a key the structural node
/// already carries is left alone, and structural keys (`type`, `required`,
/// `nullable`, ...) are never touched. Falsy documentation flags
/// (`deprecated: false`) are omitted from the output.
fn merge_field_doc(entry: &mut Map<String, Value>, doc: &FieldDoc) {
    if let Some(description) = &doc.description {
        entry
            .entry("description")
            .or_insert_with(|| Value::String(description.clone()));
    }
    if let Some(example) = &doc.example {
        entry.entry("example").or_insert_with(|| example.clone());
    }
    if doc.deprecated == Some(true) {
        entry.entry("deprecated").or_insert(Value::Bool(true));
    }
    if let Some(docs) = &doc.external_docs {
        let mut external = Map::new();
        external.insert("url".to_string(), Value::String(docs.url.clone()));
        if let Some(description) = &docs.description {
            external.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        entry
            .entry("externalDocs")
            .or_insert(Value::Object(external));
    }
}
