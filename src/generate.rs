//! The generation pipeline: application lookup, version lookup, then a
//! strictly sequential loop over declared consumed events.
//!
//! Item order in the final collection always matches the order of the
//! source event list. A failure on one event (bad schema, failed lookup) is
//! recorded as a skip and does not abort the run; lookup failures for the
//! application or version itself are fatal.

use crate::catalog::{Catalog, EventVersion};
use crate::error::CollectionGenError;
use crate::postman::{Collection, CollectionItem, Credentials, HostSpec};
use crate::synth::Synthesizer;
use crate::{address, postman};

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub application_name: String,
    pub application_version: String,
    /// Broker endpoint; emitted as collection variables when present.
    pub host: Option<HostSpec>,
    /// Basic-auth credentials; emitted as a collection auth block when present.
    pub credentials: Option<Credentials>,
}

/// One event that could not be turned into a request item.
#[derive(Debug)]
pub struct SkippedEvent {
    pub event_version_id: String,
    pub reason: String,
}

/// The assembled collection plus any per-event skips.
#[derive(Debug)]
pub struct GenerationReport {
    pub collection: Collection,
    pub skipped: Vec<SkippedEvent>,
}

/// Run the full pipeline against `catalog`, synthesizing request bodies
/// with `synthesizer`.
///
/// # Errors
///
/// - `LookupError` when no application matches the name, or the application
///   has no version with the given label.
/// - `EmptyResultError` when the version declares no consumed events
///   (a successful no-op for the caller, exit code 0).
/// - `HttpError` / `LookupError` from the catalog for the initial lookups.
pub fn generate_collection(
    catalog: &dyn Catalog,
    synthesizer: &dyn Synthesizer,
    options: &GenerateOptions,
) -> Result<GenerationReport, CollectionGenError> {
    let application_ids: Vec<String> = catalog.application_ids(&options.application_name)?;
    // First match wins when several applications share the name.
    let Some(application_id) = application_ids.first() else {
        return Err(CollectionGenError::LookupError(format!(
            "no application found with name: {}",
            options.application_name
        )));
    };

    let application_version = catalog
        .application_version(application_id, &options.application_version)?
        .ok_or_else(|| {
            CollectionGenError::LookupError(format!(
                "no application version found with name: {}",
                options.application_version
            ))
        })?;

    if application_version
        .declared_consumed_event_version_ids
        .is_empty()
    {
        return Err(CollectionGenError::EmptyResultError(format!(
            "nothing to do: no declared consumed event versions for application version {}",
            options.application_version
        )));
    }

    let mut collection: Collection =
        Collection::new(&options.application_name, &application_version.description);
    let mut skipped: Vec<SkippedEvent> = Vec::new();

    for event_version_id in &application_version.declared_consumed_event_version_ids {
        match build_item(catalog, synthesizer, event_version_id) {
            Ok(item) => collection.push(item),
            // One bad event must not abort the whole collection.
            Err(error) => skipped.push(SkippedEvent {
                event_version_id: event_version_id.clone(),
                reason: error.to_string(),
            }),
        }
    }

    if let Some(ref host) = options.host {
        collection.set_host(host);
    }
    if let Some(ref credentials) = options.credentials {
        collection.set_auth(credentials);
    }

    Ok(GenerationReport {
        collection,
        skipped,
    })
}

/// Build one request item: event lookup, optional schema lookup, synthesis,
/// assembly.
fn build_item(
    catalog: &dyn Catalog,
    synthesizer: &dyn Synthesizer,
    event_version_id: &str,
) -> Result<CollectionItem, CollectionGenError> {
    let event_version: EventVersion = catalog.event_version(event_version_id)?;
    let event_name: String = catalog.event_name(&event_version.event_id)?;
    let resolved_path: Vec<String> = address::resolve_path(event_version.address_levels());

    // No schema reference is a valid state: the item simply has no body.
    let payload: Option<serde_json::Value> = match event_version.schema_version_id {
        Some(ref schema_version_id) => {
            let schema_version = catalog.schema_version(schema_version_id)?;
            match schema_version.content {
                Some(ref content) => Some(synthesizer.synthesize(content)?),
                None => None,
            }
        }
        None => None,
    };

    Ok(postman::CollectionItem::build(
        &event_name,
        &resolved_path,
        payload.as_ref(),
    ))
}
