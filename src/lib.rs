//! Generate a Postman collection from an Event Portal application's
//! declared consumed events.
//!
//! Per consumed event: the event's address descriptor is resolved into URL
//! path segments (template levels rendered as `:name`), its JSON Schema is
//! fetched, an example payload conforming to that schema is synthesized,
//! and one POST request item is assembled. The items are bundled into a
//! Postman Collection v2.1.0 document with host/port/protocol variables and
//! a basic-auth block.
//!
//! ## Example (stubbed collaborators)
//!
//! ```no_run
//! use ep2postman::{
//!     Credentials, EventPortalClient, GenerateOptions, HostSpec, SchemaSynthesizer,
//!     generate_collection,
//! };
//!
//! let catalog = EventPortalClient::new("<token>".to_string());
//! let options = GenerateOptions {
//!     application_name: "OrderService".to_string(),
//!     application_version: "1.0.0".to_string(),
//!     host: Some(HostSpec::parse("http://localhost:9000")?),
//!     credentials: Some(Credentials::parse("default:default")?),
//! };
//! let report = generate_collection(&catalog, &SchemaSynthesizer, &options)?;
//! println!("{}", report.collection.to_pretty_json()?);
//! # Ok::<(), ep2postman::CollectionGenError>(())
//! ```
//!
//! ## Crate layout
//!
//! - [`address`] — address descriptors and the path resolver
//! - [`schema`] — typed JSON Schema model
//! - [`synth`] — schema-conformant payload synthesis
//! - [`postman`] — collection document model and assembly
//! - [`catalog`] — catalog lookups (trait + HTTP client)
//! - [`generate`] — the sequential pipeline

pub mod address;
pub mod catalog;
mod error;
pub mod generate;
pub mod postman;
pub mod schema;
pub mod synth;

pub use address::{AddressLevel, AddressLevelKind, resolve_path};
pub use catalog::{Catalog, EventPortalClient};
pub use error::CollectionGenError;
pub use generate::{GenerateOptions, GenerationReport, SkippedEvent, generate_collection};
pub use postman::{Collection, CollectionItem, Credentials, HostSpec};
pub use synth::{SchemaSynthesizer, Synthesizer};

use std::io::Write;
use std::path::Path;

/// Serialize `collection` as pretty-printed JSON to `writer`.
///
/// The writer can be any type implementing `Write`, such as `File`,
/// `Vec<u8>`, or `Cursor<Vec<u8>>`, enabling easy unit testing without file
/// system interaction.
///
/// # Errors
///
/// Returns `JsonError` if serialization fails or `IoError` if writing to
/// the writer fails.
pub fn write_collection<W: Write>(
    collection: &Collection,
    writer: &mut W,
) -> Result<(), CollectionGenError> {
    let json: String = collection.to_pretty_json()?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Serialize `collection` as pretty-printed JSON to a file.
///
/// # Errors
///
/// Returns `JsonError` if serialization fails or `IoError` if creating or
/// writing the output file fails.
pub fn write_collection_to_file(
    collection: &Collection,
    output_path: impl AsRef<Path>,
) -> Result<(), CollectionGenError> {
    let mut output_file: std::fs::File = std::fs::File::create(output_path)?;
    write_collection(collection, &mut output_file)
}
