//! Schema values: structural description with fallback resolution, validation.
//!
//! A [`Schema`] pairs the validation library's raw structural tree with an
//! optionally attached [`SchemaMeta`]. The raw tree is JSON-Schema-like but
//! may contain node kinds the documentation dialect cannot represent, marked
//! with `x-kind`; [`Schema::describe`] resolves those down to plain schema
//! nodes.

use serde_json::{Map, Value};

use crate::error::{FieldError, MetaError, TranslateError, ValidateError};
use crate::meta::SchemaMeta;

/// Extension key marking a node kind the documentation dialect cannot represent.
pub const KIND_KEY: &str = "x-kind";

/// Extension key holding the closest plain-schema approximation of a refined node.
pub const BASE_KEY: &str = "x-base";

/// Node kinds whose description falls back to the `x-base` shape.
const BASE_FALLBACK_KINDS: &[&str] = &["predicate", "morph", "default"];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validator schema plus its optional attached documentation.
///
/// The source tree is immutable after construction; the one-time metadata
/// attachment happens through [`Schema::with_meta`], which consumes and
/// returns the schema so call sites can chain.
#[derive(Debug, Clone)]
pub struct Schema {
    source: Value,
    meta: Option<SchemaMeta>,
}

impl Schema {
    /// Wrap a raw structural tree.
    pub fn new(source: Value) -> Self {
        Self { source, meta: None }
    }

    /// Attach human-authored documentation.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::UnknownField` if `meta.properties` names a field
    /// the schema does not declare. Checked here, at the earliest point the
    /// schema and the metadata meet.
    pub fn with_meta(self, meta: SchemaMeta) -> Result<Self, MetaError> {
        let known = self.field_names();
        for field in meta.properties.keys() {
            if !known.iter().any(|k| k == field) {
                return Err(MetaError::UnknownField {
                    field: field.clone(),
                    known,
                });
            }
        }
        Ok(Self {
            meta: Some(meta),
            ..self
        })
    }

    /// The attached documentation, if any.
    pub fn meta(&self) -> Option<&SchemaMeta> {
        self.meta.as_ref()
    }

    /// The raw structural tree as authored.
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.source
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The schema's structural description with fallback rules applied:
    ///
    /// - `x-kind: date` becomes `{ "type": "string", "format": "date-time" }`
    ///   on top of the node's base shape.
    /// - `x-kind: predicate | morph | default` falls back to the node's
    ///   `x-base` shape; the refinement is dropped, the underlying type kept.
    ///
    /// Recomputed on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError` for unknown kinds or refinement nodes without
    /// a base shape.
    pub fn describe(&self) -> Result<Value, TranslateError> {
        describe_node(&self.source, "")
    }

    /// Validate a payload against the described schema.
    ///
    /// Collects every failure, not just the first. On success returns the
    /// accepted value.
    ///
    /// # Errors
    ///
    /// `ValidateError::Invalid` carries one `FieldError` per failing field;
    /// `ValidateError::InvalidSchema` means the description does not compile
    /// as a JSON Schema.
    pub fn validate(&self, payload: &Value) -> Result<Value, ValidateError> {
        let described = self.describe()?;
        let validator = jsonschema::validator_for(&described).map_err(|e| {
            ValidateError::InvalidSchema {
                message: e.to_string(),
            }
        })?;

        let errors: Vec<FieldError> = validator
            .iter_errors(payload)
            .map(|e| FieldError {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(payload.clone())
        } else {
            Err(ValidateError::Invalid { errors })
        }
    }
}

// --- Fallback resolution ---

fn describe_node(node: &Value, path: &str) -> Result<Value, TranslateError> {
    match node {
        Value::Object(map) => describe_object(map, path),
        Value::Array(arr) => {
            let mut result = Vec::with_capacity(arr.len());
            for (i, item) in arr.iter().enumerate() {
                result.push(describe_node(item, &format!("{}/{}", path, i))?);
            }
            Ok(Value::Array(result))
        }
        other => Ok(other.clone()),
    }
}

fn describe_object(map: &Map<String, Value>, path: &str) -> Result<Value, TranslateError> {
    if let Some(kind) = map.get(KIND_KEY) {
        let Some(kind) = kind.as_str() else {
            return Err(TranslateError::Description {
                path: path.to_string(),
                message: format!(
                    "{} must be a string, got {}",
                    KIND_KEY,
                    json_type_name(kind)
                ),
            });
        };
        return describe_fallback(map, kind, path);
    }

    let mut result = Map::new();
    for (key, value) in map {
        let child_path = format!("{}/{}", path, key);
        match key.as_str() {
            // Keyed containers: member names are data, not schema keywords,
            // so the container map itself is never kind-checked.
            "properties" | "$defs" | "definitions" => {
                result.insert(key.clone(), describe_members(value, &child_path)?);
            }
            _ => {
                result.insert(key.clone(), describe_node(value, &child_path)?);
            }
        }
    }
    Ok(Value::Object(result))
}

fn describe_members(value: &Value, path: &str) -> Result<Value, TranslateError> {
    let Some(members) = value.as_object() else {
        return Ok(value.clone());
    };

    let mut result = Map::new();
    for (name, node) in members {
        result.insert(name.clone(), describe_node(node, &format!("{}/{}", path, name))?);
    }
    Ok(Value::Object(result))
}

fn describe_fallback(
    map: &Map<String, Value>,
    kind: &str,
    path: &str,
) -> Result<Value, TranslateError> {
    match kind {
        "date" => {
            // Base shape (when given) plus the node's own keys, pinned to the
            // string/date-time representation.
            let mut result = match map.get(BASE_KEY) {
                Some(base) => {
                    let described = describe_node(base, &format!("{}/{}", path, BASE_KEY))?;
                    described.as_object().cloned().unwrap_or_default()
                }
                None => Map::new(),
            };
            for (key, value) in map {
                if key != KIND_KEY && key != BASE_KEY {
                    result.insert(
                        key.clone(),
                        describe_node(value, &format!("{}/{}", path, key))?,
                    );
                }
            }
            result.insert("type".to_string(), Value::String("string".to_string()));
            result.insert(
                "format".to_string(),
                Value::String("date-time".to_string()),
            );
            Ok(Value::Object(result))
        }
        kind if BASE_FALLBACK_KINDS.contains(&kind) => {
            let Some(base) = map.get(BASE_KEY) else {
                return Err(TranslateError::Description {
                    path: path.to_string(),
                    message: format!("\"{}\" node carries no {}", kind, BASE_KEY),
                });
            };
            describe_node(base, &format!("{}/{}", path, BASE_KEY))
        }
        other => Err(TranslateError::UnknownKind {
            path: path.to_string(),
            kind: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_passes_plain_schemas_through() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        }));
        assert_eq!(schema.describe().unwrap(), *schema.source());
    }

    #[test]
    fn describe_resolves_date_kind() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "createdAt": { "x-kind": "date" }
            }
        }));
        let described = schema.describe().unwrap();
        assert_eq!(
            described["properties"]["createdAt"],
            json!({ "type": "string", "format": "date-time" })
        );
    }

    #[test]
    fn describe_date_kind_keeps_sibling_keys() {
        let schema = Schema::new(json!({
            "properties": {
                "createdAt": { "x-kind": "date", "description": "creation time" }
            }
        }));
        let described = schema.describe().unwrap();
        assert_eq!(
            described["properties"]["createdAt"],
            json!({
                "description": "creation time",
                "type": "string",
                "format": "date-time"
            })
        );
    }

    #[test]
    fn describe_drops_refinement_keeps_base() {
        for kind in ["predicate", "morph", "default"] {
            let schema = Schema::new(json!({
                "properties": {
                    "age": {
                        "x-kind": kind,
                        "x-base": { "type": "number", "exclusiveMinimum": 0 }
                    }
                }
            }));
            let described = schema.describe().unwrap();
            assert_eq!(
                described["properties"]["age"],
                json!({ "type": "number", "exclusiveMinimum": 0 })
            );
        }
    }

    #[test]
    fn describe_resolves_nested_fallbacks() {
        let schema = Schema::new(json!({
            "properties": {
                "timestamps": {
                    "type": "array",
                    "items": { "x-kind": "date" }
                }
            }
        }));
        let described = schema.describe().unwrap();
        assert_eq!(
            described["properties"]["timestamps"]["items"]["format"],
            "date-time"
        );
    }

    #[test]
    fn describe_refinement_without_base_errors() {
        let schema = Schema::new(json!({
            "properties": {
                "age": { "x-kind": "morph" }
            }
        }));
        let result = schema.describe();
        assert!(matches!(result, Err(TranslateError::Description { .. })));
    }

    #[test]
    fn describe_unknown_kind_errors() {
        let schema = Schema::new(json!({
            "properties": {
                "blob": { "x-kind": "binary" }
            }
        }));
        let result = schema.describe();
        assert!(matches!(
            result,
            Err(TranslateError::UnknownKind { kind, .. }) if kind == "binary"
        ));
    }

    #[test]
    fn describe_ignores_kind_shaped_field_names() {
        // A *field* named "x-kind" lives under "properties"; only nodes in
        // schema position are kind-checked.
        let schema = Schema::new(json!({
            "properties": {
                "x-kind": { "type": "string" }
            }
        }));
        let described = schema.describe().unwrap();
        assert_eq!(described["properties"]["x-kind"], json!({ "type": "string" }));
    }

    #[test]
    fn with_meta_accepts_known_fields() {
        let schema = Schema::new(json!({
            "properties": { "name": { "type": "string" } }
        }));
        let meta = SchemaMeta::new().property("name", crate::meta::FieldDoc::new());
        assert!(schema.with_meta(meta).is_ok());
    }

    #[test]
    fn with_meta_rejects_unknown_fields() {
        let schema = Schema::new(json!({
            "properties": { "name": { "type": "string" } }
        }));
        let meta = SchemaMeta::new().property("nickname", crate::meta::FieldDoc::new());
        let result = schema.with_meta(meta);
        assert!(matches!(
            result,
            Err(MetaError::UnknownField { field, .. }) if field == "nickname"
        ));
    }

    #[test]
    fn field_names_preserve_declaration_order() {
        let schema = Schema::new(json!({
            "properties": {
                "zeta": {},
                "alpha": {},
                "mid": {}
            }
        }));
        assert_eq!(schema.field_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn validate_accepts_conforming_payload() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        }));
        let payload = json!({ "name": "test" });
        assert_eq!(schema.validate(&payload).unwrap(), payload);
    }

    #[test]
    fn validate_collects_every_failure() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name", "age"]
        }));
        let result = schema.validate(&json!({}));
        match result {
            Err(ValidateError::Invalid { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected 2 validation errors, got {:?}", other),
        }
    }

    #[test]
    fn validate_resolves_fallbacks_first() {
        let schema = Schema::new(json!({
            "type": "object",
            "properties": {
                "createdAt": { "x-kind": "date" }
            }
        }));
        // The raw node is not a valid schema; the described one requires a string.
        assert!(schema.validate(&json!({ "createdAt": "2024-01-01T00:00:00Z" })).is_ok());
        assert!(schema.validate(&json!({ "createdAt": 42 })).is_err());
    }
}
