//! Example payload synthesis from JSON Schema.
//!
//! Generation policy: a declared `default` is used verbatim instead of a
//! generated value (determinism over realism). Where no default exists, any
//! value satisfying the declared type/format/enum constraints is produced,
//! randomness permitted. All declared properties are emitted, which subsumes
//! the `required` guarantee and keeps REST bodies maximally realistic.

use crate::error::CollectionGenError;
use crate::schema::JsonSchema;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde_json::{Map, Value};

/// Generates an example JSON value from a JSON Schema document.
///
/// Kept behind a trait so deterministic test doubles can replace randomized
/// generation in unit tests.
pub trait Synthesizer {
    /// Produce a single example value conforming to `schema_json`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` when the document is not valid JSON or declares
    /// a malformed/unsupported `type` (e.g. a union type array).
    fn synthesize(&self, schema_json: &str) -> Result<Value, CollectionGenError>;
}

/// Default synthesizer: random values within declared constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaSynthesizer;

impl Synthesizer for SchemaSynthesizer {
    fn synthesize(&self, schema_json: &str) -> Result<Value, CollectionGenError> {
        let schema: JsonSchema = serde_json::from_str(schema_json)
            .map_err(|e| CollectionGenError::SchemaError(format!("not valid JSON Schema: {e}")))?;
        generate(&schema)
    }
}

/// Recursively generate a value for one schema node.
fn generate(schema: &JsonSchema) -> Result<Value, CollectionGenError> {
    // Declared defaults win verbatim, including `"default": null`.
    if let Some(default_value) = schema.default.value() {
        return Ok(default_value.clone());
    }

    if let Some(ref enum_values) = schema.r#enum
        && !enum_values.is_empty()
    {
        let index: usize = rand::thread_rng().gen_range(0..enum_values.len());
        return Ok(enum_values[index].clone());
    }

    match declared_type(schema)? {
        Some("object") => generate_object(schema),
        Some("array") => generate_array(schema),
        Some("string") => Ok(Value::String(generate_string(schema.format.as_deref()))),
        Some("integer") => generate_integer(schema),
        Some("number") => generate_number(schema),
        Some("boolean") => Ok(Value::Bool(rand::thread_rng().r#gen())),
        Some("null") => Ok(Value::Null),
        Some(other) => Err(CollectionGenError::SchemaError(format!(
            "unsupported type '{other}'"
        ))),
        // No type declared: infer from structural keywords; a bare `{}`
        // schema constrains nothing, and null satisfies it.
        None if schema.properties.is_some() => generate_object(schema),
        None if schema.items.is_some() => generate_array(schema),
        None => Ok(Value::Null),
    }
}

/// The declared `type`, validated. `None` means the key was absent.
fn declared_type(schema: &JsonSchema) -> Result<Option<&str>, CollectionGenError> {
    match schema.r#type {
        None => Ok(None),
        Some(ref v) => v.as_str().map(Some).ok_or_else(|| {
            CollectionGenError::SchemaError(format!("malformed type declaration: {v}"))
        }),
    }
}

fn generate_object(schema: &JsonSchema) -> Result<Value, CollectionGenError> {
    let mut object: Map<String, Value> = Map::new();
    if let Some(ref properties) = schema.properties {
        for (key, property_schema) in properties {
            object.insert(key.clone(), generate(property_schema)?);
        }
    }
    Ok(Value::Object(object))
}

/// Ceiling on generated array lengths, whatever `minItems` asks for.
const MAX_GENERATED_ITEMS: u64 = 10;

fn generate_array(schema: &JsonSchema) -> Result<Value, CollectionGenError> {
    let Some(ref items_schema) = schema.items else {
        return Ok(Value::Array(Vec::new()));
    };
    // One element unless minItems asks for more (or for none), capped so a
    // pathological minItems cannot stall generation.
    let count: u64 = schema.min_items.unwrap_or(1).min(MAX_GENERATED_ITEMS);
    let mut elements: Vec<Value> = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for _ in 0..count {
        elements.push(generate(items_schema)?);
    }
    Ok(Value::Array(elements))
}

/// Exemplar strings for well-known formats; random alphanumeric otherwise.
fn generate_string(format: Option<&str>) -> String {
    match format.map(str::to_lowercase).as_deref() {
        Some("uuid" | "uuid1" | "uuid4" | "uuid7") => uuid::Uuid::new_v4().to_string(),
        Some("date-time") => "2024-01-01T00:00:00Z".to_string(),
        Some("date") => "2024-01-01".to_string(),
        Some("time") => "00:00:00Z".to_string(),
        Some("email") => "user@example.com".to_string(),
        Some("uri" | "url") => "https://example.com/resource".to_string(),
        Some("hostname") => "example.com".to_string(),
        Some("ipv4") => "192.0.2.1".to_string(),
        _ => rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect(),
    }
}

fn generate_integer(schema: &JsonSchema) -> Result<Value, CollectionGenError> {
    // An absent bound is derived from the declared one, so a schema with
    // only `"maximum": -5` (any integer <= -5) stays satisfiable.
    let declared_minimum: Option<i64> = bound_i64(schema.minimum.as_ref());
    let declared_maximum: Option<i64> = bound_i64(schema.maximum.as_ref());
    let minimum: i64 =
        declared_minimum.unwrap_or_else(|| declared_maximum.unwrap_or(100).saturating_sub(100));
    let maximum: i64 = declared_maximum.unwrap_or_else(|| minimum.saturating_add(100));
    if minimum > maximum {
        return Err(CollectionGenError::SchemaError(format!(
            "minimum {minimum} exceeds maximum {maximum}"
        )));
    }
    let value: i64 = rand::thread_rng().gen_range(minimum..=maximum);
    Ok(Value::from(value))
}

fn generate_number(schema: &JsonSchema) -> Result<Value, CollectionGenError> {
    let declared_minimum: Option<f64> = bound_f64(schema.minimum.as_ref());
    let declared_maximum: Option<f64> = bound_f64(schema.maximum.as_ref());
    let minimum: f64 =
        declared_minimum.unwrap_or_else(|| declared_maximum.unwrap_or(100.0) - 100.0);
    let maximum: f64 = declared_maximum.unwrap_or_else(|| minimum + 100.0);
    if minimum > maximum {
        return Err(CollectionGenError::SchemaError(format!(
            "minimum {minimum} exceeds maximum {maximum}"
        )));
    }
    let value: f64 = rand::thread_rng().gen_range(minimum..=maximum);
    Ok(Value::from(value))
}

fn bound_i64(bound: Option<&Value>) -> Option<i64> {
    bound.and_then(Value::as_i64)
}

fn bound_f64(bound: Option<&Value>) -> Option<f64> {
    bound.and_then(|v| v.as_f64().or_else(|| v.as_i64().map(|i| i as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesize(schema_json: &str) -> Value {
        SchemaSynthesizer.synthesize(schema_json).unwrap()
    }

    #[test]
    fn declared_default_wins_over_generation() {
        let schema_json: &str = r#"{
            "type": "object",
            "properties": {"id": {"type": "string", "default": "abc"}},
            "required": ["id"]
        }"#;
        // Run repeatedly: the default must be deterministic, never random.
        for _ in 0..10 {
            let actual: Value = synthesize(schema_json);
            assert_eq!(serde_json::json!("abc"), actual["id"]);
        }
    }

    #[test]
    fn null_default_is_used_verbatim() {
        let actual: Value = synthesize(r#"{"type": "string", "default": null}"#);
        assert_eq!(Value::Null, actual);
    }

    #[test]
    fn required_properties_are_always_present() {
        let schema_json: &str = r#"{
            "type": "object",
            "properties": {
                "qty": {"type": "integer"},
                "note": {"type": "string"}
            },
            "required": ["qty"]
        }"#;
        let actual: Value = synthesize(schema_json);
        assert!(actual["qty"].is_i64());
        assert!(actual["note"].is_string());
    }

    #[test]
    fn enum_value_is_drawn_from_declared_set() {
        let schema_json: &str = r#"{"type": "string", "enum": ["red", "green", "blue"]}"#;
        for _ in 0..10 {
            let actual: Value = synthesize(schema_json);
            let s: &str = actual.as_str().unwrap();
            assert!(matches!(s, "red" | "green" | "blue"));
        }
    }

    #[test]
    fn integer_respects_declared_bounds() {
        let schema_json: &str = r#"{"type": "integer", "minimum": 5, "maximum": 9}"#;
        for _ in 0..20 {
            let actual: i64 = synthesize(schema_json).as_i64().unwrap();
            assert!((5..=9).contains(&actual));
        }
    }

    #[test]
    fn number_respects_declared_bounds() {
        let schema_json: &str = r#"{"type": "number", "minimum": 0.5, "maximum": 1.5}"#;
        for _ in 0..20 {
            let actual: f64 = synthesize(schema_json).as_f64().unwrap();
            assert!((0.5..=1.5).contains(&actual));
        }
    }

    #[test]
    fn uuid_format_yields_parseable_uuid() {
        let actual: Value = synthesize(r#"{"type": "string", "format": "uuid"}"#);
        uuid::Uuid::parse_str(actual.as_str().unwrap()).unwrap();
    }

    #[test]
    fn nested_objects_and_arrays_generate_recursively() {
        let schema_json: &str = r#"{
            "type": "object",
            "properties": {
                "lines": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"sku": {"type": "string"}},
                        "required": ["sku"]
                    }
                }
            },
            "required": ["lines"]
        }"#;
        let actual: Value = synthesize(schema_json);
        let lines = actual["lines"].as_array().unwrap();
        assert!(!lines.is_empty());
        assert!(lines[0]["sku"].is_string());
    }

    #[test]
    fn min_items_zero_yields_empty_array() {
        let schema_json: &str =
            r#"{"type": "array", "items": {"type": "integer"}, "minItems": 0}"#;
        let actual: Value = synthesize(schema_json);
        assert_eq!(Some(0), actual.as_array().map(Vec::len));
    }

    #[test]
    fn invalid_json_is_a_schema_error() {
        let err = SchemaSynthesizer.synthesize("{not json").unwrap_err();
        assert!(matches!(err, CollectionGenError::SchemaError(_)));
    }

    #[test]
    fn union_type_array_is_a_schema_error() {
        let err = SchemaSynthesizer
            .synthesize(r#"{"type": ["string", "null"]}"#)
            .unwrap_err();
        assert!(matches!(err, CollectionGenError::SchemaError(_)));
    }

    #[test]
    fn conflicting_bounds_are_a_schema_error() {
        let err = SchemaSynthesizer
            .synthesize(r#"{"type": "integer", "minimum": 10, "maximum": 1}"#)
            .unwrap_err();
        assert!(matches!(err, CollectionGenError::SchemaError(_)));
    }

    #[test]
    fn negative_maximum_without_minimum_is_satisfiable() {
        for _ in 0..10 {
            let actual: i64 = synthesize(r#"{"type": "integer", "maximum": -5}"#)
                .as_i64()
                .unwrap();
            assert!(actual <= -5);
        }
    }

    #[test]
    fn negative_number_maximum_without_minimum_is_satisfiable() {
        for _ in 0..10 {
            let actual: f64 = synthesize(r#"{"type": "number", "maximum": -0.5}"#)
                .as_f64()
                .unwrap();
            assert!(actual <= -0.5);
        }
    }

    #[test]
    fn minimum_without_maximum_is_respected() {
        for _ in 0..10 {
            let actual: i64 = synthesize(r#"{"type": "integer", "minimum": 900}"#)
                .as_i64()
                .unwrap();
            assert!(actual >= 900);
        }
    }

    #[test]
    fn huge_min_items_is_capped() {
        let schema_json: &str =
            r#"{"type": "array", "items": {"type": "integer"}, "minItems": 10000000000}"#;
        let actual: Value = synthesize(schema_json);
        assert_eq!(
            Some(usize::try_from(MAX_GENERATED_ITEMS).unwrap()),
            actual.as_array().map(Vec::len)
        );
    }

    /// Recursive structural conformance check: type, required, enum
    /// membership, bounds, minItems.
    fn assert_conforms(schema: &Value, value: &Value) {
        if let Some(enum_values) = schema.get("enum").and_then(Value::as_array) {
            assert!(enum_values.contains(value), "{value} not in {enum_values:?}");
            return;
        }
        match schema.get("type").and_then(Value::as_str) {
            Some("object") => {
                let object = value.as_object().unwrap();
                if let Some(required) = schema.get("required").and_then(Value::as_array) {
                    for key in required {
                        assert!(object.contains_key(key.as_str().unwrap()));
                    }
                }
                if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                    for (key, property_schema) in properties {
                        assert_conforms(property_schema, &object[key]);
                    }
                }
            }
            Some("array") => {
                let elements = value.as_array().unwrap();
                if let Some(min_items) = schema.get("minItems").and_then(Value::as_u64) {
                    assert!(elements.len() as u64 >= min_items);
                }
                if let Some(items_schema) = schema.get("items") {
                    for element in elements {
                        assert_conforms(items_schema, element);
                    }
                }
            }
            Some("string") => assert!(value.is_string()),
            Some("boolean") => assert!(value.is_boolean()),
            Some("integer" | "number") => {
                let n: f64 = value.as_f64().unwrap();
                if let Some(minimum) = schema.get("minimum").and_then(Value::as_f64) {
                    assert!(n >= minimum);
                }
                if let Some(maximum) = schema.get("maximum").and_then(Value::as_f64) {
                    assert!(n <= maximum);
                }
                if schema["type"] == "integer" {
                    assert!(value.is_i64());
                }
            }
            Some("null") => assert!(value.is_null()),
            other => panic!("unexpected type in test schema: {other:?}"),
        }
    }

    #[test]
    fn generated_payload_conforms_to_multi_feature_schema() {
        let schema: Value = serde_json::json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "default": "abc"},
                "status": {"type": "string", "enum": ["new", "shipped", "closed"]},
                "qty": {"type": "integer", "minimum": 1, "maximum": 50},
                "weight": {"type": "number", "maximum": -2.5},
                "lines": {
                    "type": "array",
                    "minItems": 2,
                    "items": {
                        "type": "object",
                        "properties": {
                            "sku": {"type": "string"},
                            "count": {"type": "integer", "minimum": 0}
                        },
                        "required": ["sku", "count"]
                    }
                }
            },
            "required": ["id", "status", "qty", "weight", "lines"]
        });
        let schema_json: String = schema.to_string();
        for _ in 0..10 {
            let payload: Value = synthesize(&schema_json);
            assert_conforms(&schema, &payload);
            assert_eq!(serde_json::json!("abc"), payload["id"]);
        }
    }
}
