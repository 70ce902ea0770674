use serde::Deserialize;
use std::collections::BTreeMap;

/// Wraps the JSON Schema `default` keyword to preserve `null`.
/// Serde deserializes `Option<Value>` with JSON null as `None`; we need to
/// distinguish absent key from `"default": null`.
#[derive(Debug, Default)]
pub enum DefaultKeyword {
    /// Key "default" was absent from the schema.
    #[default]
    Absent,
    /// Key "default" was present; the value may be `Value::Null`.
    Present(serde_json::Value),
}

impl DefaultKeyword {
    /// The declared default, if the key was present.
    #[must_use]
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Absent => None,
            Self::Present(v) => Some(v),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultKeyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        Ok(DefaultKeyword::Present(v))
    }
}

/// Root or nested JSON Schema object.
///
/// Only the schema fields used by the payload synthesizer are modeled.
/// Extra keys in the JSON are ignored via serde's default behavior.
/// Uses `BTreeMap` for deterministic property ordering (alphabetical by key).
#[derive(Debug, Deserialize)]
pub struct JsonSchema {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub r#type: Option<serde_json::Value>,

    #[serde(default)]
    pub properties: Option<BTreeMap<String, Box<JsonSchema>>>,

    #[serde(default)]
    pub required: Option<Vec<String>>,

    #[serde(default)]
    pub r#enum: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    pub items: Option<Box<JsonSchema>>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub minimum: Option<serde_json::Value>,

    #[serde(default)]
    pub maximum: Option<serde_json::Value>,

    #[serde(default, rename = "minItems")]
    pub min_items: Option<u64>,

    #[serde(default)]
    pub default: DefaultKeyword,
}

impl JsonSchema {
    /// The declared `type`, when it is a single string.
    ///
    /// A `type` array (union type) or non-string value yields `None`; the
    /// synthesizer reports those as malformed rather than guessing.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.r#type.as_ref().and_then(serde_json::Value::as_str)
    }
}
