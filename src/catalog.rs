//! Catalog lookups against the Event Portal REST API.
//!
//! The loosely-typed metadata the catalog returns is mapped to explicit
//! typed records at this boundary; unexpected shapes are rejected here
//! rather than propagated through the pipeline. The [`Catalog`] trait keeps
//! the collaborator injectable so pipeline tests run against an in-memory
//! stub instead of the network.

use crate::address::AddressLevel;
use crate::error::CollectionGenError;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const DEFAULT_BASE_URL: &str = "https://api.solace.cloud";

/// A specific version of an application, with the events it consumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationVersion {
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub declared_consumed_event_version_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address_levels: Vec<AddressLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDescriptor {
    #[serde(default)]
    pub address: Option<Address>,
}

/// A specific version of an event: its schema reference (nullable) and its
/// delivery address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVersion {
    pub event_id: String,
    #[serde(default)]
    pub schema_version_id: Option<String>,
    #[serde(default)]
    pub delivery_descriptor: Option<DeliveryDescriptor>,
}

impl EventVersion {
    /// The address levels, empty when the event declares no address.
    #[must_use]
    pub fn address_levels(&self) -> &[AddressLevel] {
        self.delivery_descriptor
            .as_ref()
            .and_then(|descriptor| descriptor.address.as_ref())
            .map_or(&[], |address| address.address_levels.as_slice())
    }
}

/// A specific revision of a JSON Schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaVersion {
    #[serde(default)]
    pub content: Option<String>,
}

/// The five lookups the generation pipeline needs.
///
/// Implemented over HTTP by [`EventPortalClient`]; tests substitute an
/// in-memory stub.
pub trait Catalog {
    /// Ids of applications matching `name`, in catalog order.
    fn application_ids(&self, name: &str) -> Result<Vec<String>, CollectionGenError>;

    /// The version object for `application_id` whose version label equals
    /// `version`, or `None` when no such version exists.
    fn application_version(
        &self,
        application_id: &str,
        version: &str,
    ) -> Result<Option<ApplicationVersion>, CollectionGenError>;

    /// The event-version object for `event_version_id`.
    fn event_version(&self, event_version_id: &str) -> Result<EventVersion, CollectionGenError>;

    /// The human-readable name of the event with `event_id`.
    fn event_name(&self, event_id: &str) -> Result<String, CollectionGenError>;

    /// The schema-version object for `schema_version_id`.
    fn schema_version(
        &self,
        schema_version_id: &str,
    ) -> Result<SchemaVersion, CollectionGenError>;
}

/// Responses wrap their payload in a `data` member.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct IdOnly {
    id: String,
}

#[derive(Debug, Deserialize)]
struct NameOnly {
    name: String,
}

/// Blocking HTTP client for the Event Portal REST API v2.
///
/// One lookup per call, no retries, no pagination. Bearer-token auth.
pub struct EventPortalClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl EventPortalClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a non-default catalog (e.g. a regional cluster
    /// or a test server).
    #[must_use]
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CollectionGenError> {
        let url: String = format!("{}/api/v2/architecture/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .map_err(|e| CollectionGenError::HttpError(format!("GET {url}: {e}")))?;

        let status = response.status();
        let body: String = response
            .text()
            .map_err(|e| CollectionGenError::HttpError(format!("GET {url}: {e}")))?;
        if !status.is_success() {
            return Err(CollectionGenError::HttpError(format!(
                "GET {url}: HTTP {status}: {body}"
            )));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            CollectionGenError::LookupError(format!("unexpected response shape from {url}: {e}"))
        })?;
        Ok(envelope.data)
    }
}

impl Catalog for EventPortalClient {
    fn application_ids(&self, name: &str) -> Result<Vec<String>, CollectionGenError> {
        let applications: Vec<IdOnly> = self.get("applications", &[("name", name)])?;
        Ok(applications.into_iter().map(|a| a.id).collect())
    }

    fn application_version(
        &self,
        application_id: &str,
        version: &str,
    ) -> Result<Option<ApplicationVersion>, CollectionGenError> {
        let versions: Vec<ApplicationVersion> = self.get(
            "applicationVersions",
            &[("applicationIds", application_id)],
        )?;
        Ok(versions.into_iter().find(|v| v.version == version))
    }

    fn event_version(&self, event_version_id: &str) -> Result<EventVersion, CollectionGenError> {
        self.get(&format!("eventVersions/{event_version_id}"), &[])
    }

    fn event_name(&self, event_id: &str) -> Result<String, CollectionGenError> {
        let event: NameOnly = self.get(&format!("events/{event_id}"), &[])?;
        Ok(event.name)
    }

    fn schema_version(
        &self,
        schema_version_id: &str,
    ) -> Result<SchemaVersion, CollectionGenError> {
        self.get(&format!("schemaVersions/{schema_version_id}"), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_version_maps_nested_address_levels() {
        let json: &str = r#"{
            "eventId": "evt-1",
            "schemaVersionId": "sv-1",
            "deliveryDescriptor": {
                "address": {
                    "addressLevels": [
                        {"name": "orders", "addressLevelType": "literal"},
                        {"name": "orderId", "addressLevelType": "variable"}
                    ]
                }
            }
        }"#;
        let event_version: EventVersion = serde_json::from_str(json).unwrap();
        assert_eq!("evt-1", event_version.event_id);
        assert_eq!(Some("sv-1"), event_version.schema_version_id.as_deref());
        assert_eq!(2, event_version.address_levels().len());
    }

    #[test]
    fn event_version_tolerates_missing_address() {
        let json: &str = r#"{"eventId": "evt-1", "schemaVersionId": null}"#;
        let event_version: EventVersion = serde_json::from_str(json).unwrap();
        assert!(event_version.schema_version_id.is_none());
        assert!(event_version.address_levels().is_empty());
    }

    #[test]
    fn application_version_defaults_missing_lists() {
        let json: &str = r#"{"version": "1.0.0"}"#;
        let application_version: ApplicationVersion = serde_json::from_str(json).unwrap();
        assert!(application_version
            .declared_consumed_event_version_ids
            .is_empty());
        assert_eq!("", application_version.description);
    }

    #[test]
    fn envelope_unwraps_data_member() {
        let json: &str = r#"{"data": [{"id": "app-1"}, {"id": "app-2"}]}"#;
        let envelope: Envelope<Vec<IdOnly>> = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = envelope.data.into_iter().map(|a| a.id).collect();
        assert_eq!(vec!["app-1".to_string(), "app-2".to_string()], ids);
    }
}
