//! Postman Collection v2.1.0 document model and assembly.
//!
//! Field names and shapes match what the Postman import format expects:
//! `info`, `item`, optional `variable` and `auth` blocks. The broker host is
//! left templated via `{{SolaceProtocol}}`/`{{SolaceHost}}`/`{{SolacePort}}`
//! placeholders, substituted by Postman at request-send time from the
//! collection variables.

use crate::error::CollectionGenError;
use serde::Serialize;
use serde_json::Value;

const POSTMAN_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
const COLLECTION_VERSION: &str = "0.1.0";

/// Broker endpoint spec of the form `protocol://host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub protocol: String,
    pub host: String,
    pub port: String,
}

impl HostSpec {
    /// Parse `protocol://host:port`. Any other shape is a hard
    /// `ConfigError`; malformed input is never silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the scheme separator, host, or numeric
    /// port is missing.
    pub fn parse(spec: &str) -> Result<Self, CollectionGenError> {
        let (protocol, rest) = spec.split_once("://").ok_or_else(|| {
            CollectionGenError::ConfigError(format!(
                "host spec '{spec}' must be of the form protocol://host:port"
            ))
        })?;
        let (host, port) = rest.split_once(':').ok_or_else(|| {
            CollectionGenError::ConfigError(format!("host spec '{spec}' is missing a port"))
        })?;
        if protocol.is_empty() || host.is_empty() {
            return Err(CollectionGenError::ConfigError(format!(
                "host spec '{spec}' has an empty protocol or host"
            )));
        }
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CollectionGenError::ConfigError(format!(
                "host spec '{spec}' has a non-numeric port '{port}'"
            )));
        }
        Ok(Self {
            protocol: protocol.to_string(),
            host: host.to_string(),
            port: port.to_string(),
        })
    }
}

/// Basic-auth credential spec of the form `username:password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parse `username:password`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the separator or username is missing.
    pub fn parse(spec: &str) -> Result<Self, CollectionGenError> {
        let (username, password) = spec.split_once(':').ok_or_else(|| {
            CollectionGenError::ConfigError(format!(
                "credential spec '{spec}' must be of the form username:password"
            ))
        })?;
        if username.is_empty() {
            return Err(CollectionGenError::ConfigError(format!(
                "credential spec '{spec}' has an empty username"
            )));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Info {
    pub name: String,
    pub description: String,
    pub schema: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct Script {
    pub exec: Vec<String>,
    #[serde(rename = "type")]
    pub script_type: String,
}

#[derive(Debug, Serialize)]
pub struct ItemEvent {
    pub listen: String,
    pub script: Script,
}

#[derive(Debug, Serialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct Url {
    pub raw: String,
    pub protocol: String,
    pub host: Vec<String>,
    pub port: String,
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct Request {
    pub header: Vec<Header>,
    pub url: Url,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// Per-request auth override; always null so the collection-level auth
    /// applies.
    pub auth: Option<Auth>,
}

/// One request item. Immutable after creation; owned by the collection.
#[derive(Debug, Serialize)]
pub struct CollectionItem {
    pub name: String,
    pub event: Vec<ItemEvent>,
    pub request: Request,
    pub response: Vec<Value>,
}

impl CollectionItem {
    /// Shape one POST request from a resolved path and an optional payload.
    ///
    /// The URL stays templated; substitution happens in the consuming tool.
    /// A missing payload (event with no schema reference) omits the body —
    /// a valid state, not a failure. Pure data shaping, no I/O.
    #[must_use]
    pub fn build(event_name: &str, resolved_path: &[String], payload: Option<&Value>) -> Self {
        let raw_url: String = format!(
            "{{{{SolaceProtocol}}}}://{{{{SolaceHost}}}}:{{{{SolacePort}}}}/{}",
            resolved_path.join("/")
        );
        let body: Option<Body> = payload.map(|value| Body {
            mode: "raw".to_string(),
            raw: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        });
        Self {
            name: event_name.to_string(),
            event: vec![ItemEvent {
                listen: "test".to_string(),
                script: Script {
                    exec: vec![
                        "//Check status".to_string(),
                        "tests[\"Expected status code - \" + responseCode.code + \" CREATED\"] \
                         = responseCode.code === 200;"
                            .to_string(),
                    ],
                    script_type: "text/javascript".to_string(),
                },
            }],
            request: Request {
                header: vec![Header {
                    key: "Content-Type".to_string(),
                    value: "application/json".to_string(),
                }],
                url: Url {
                    raw: raw_url,
                    protocol: "{{SolaceProtocol}}".to_string(),
                    host: vec!["{{SolaceHost}}".to_string()],
                    port: "{{SolacePort}}".to_string(),
                    path: resolved_path.to_vec(),
                },
                method: "POST".to_string(),
                body,
                auth: None,
            },
            response: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub variable_type: String,
}

fn string_variable(key: &str, value: &str) -> Variable {
    Variable {
        key: key.to_string(),
        value: value.to_string(),
        variable_type: "string".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub basic: Vec<Variable>,
}

/// The full collection document. Constructed empty, items appended in source
/// event order, then serialized and discarded.
#[derive(Debug, Serialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<CollectionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<Vec<Variable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

impl Collection {
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            info: Info {
                name: name.to_string(),
                description: description.to_string(),
                schema: POSTMAN_SCHEMA_URL.to_string(),
                version: COLLECTION_VERSION.to_string(),
            },
            item: Vec::new(),
            variable: None,
            auth: None,
        }
    }

    /// Append an item, preserving the order items are produced in.
    pub fn push(&mut self, item: CollectionItem) {
        self.item.push(item);
    }

    /// Attach the broker endpoint as collection variables.
    pub fn set_host(&mut self, host: &HostSpec) {
        self.variable = Some(vec![
            string_variable("SolaceHost", &host.host),
            string_variable("SolacePort", &host.port),
            string_variable("SolaceProtocol", &host.protocol),
        ]);
    }

    /// Attach collection-level basic auth.
    pub fn set_auth(&mut self, credentials: &Credentials) {
        self.auth = Some(Auth {
            auth_type: "basic".to_string(),
            basic: vec![
                string_variable("username", &credentials.username),
                string_variable("password", &credentials.password),
            ],
        });
    }

    /// Serialize the collection as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `JsonError` if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, CollectionGenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
