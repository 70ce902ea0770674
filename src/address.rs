//! Address descriptors and path resolution.
//!
//! An event's delivery address is an ordered sequence of levels, each either
//! a fixed literal segment or a named template variable. Resolution renders
//! the sequence as URL path segments, marking variables with a `:` prefix
//! (the consumer convention for substitutable segments).

use serde::Deserialize;

/// Whether an address level is a fixed segment or a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressLevelKind {
    Literal,
    Variable,
}

/// One level of an event's delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressLevel {
    pub name: String,
    #[serde(rename = "addressLevelType")]
    pub kind: AddressLevelKind,
}

impl AddressLevel {
    #[must_use]
    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AddressLevelKind::Literal,
        }
    }

    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AddressLevelKind::Variable,
        }
    }
}

/// Resolve an address descriptor into URL path segments.
///
/// Literal levels pass through unchanged; variable levels are prefixed with
/// `:`. Output order and length exactly match the input — path hierarchy is
/// significant and is never reordered, sorted, or deduplicated. An empty
/// input yields an empty path; rejecting semantically empty addresses is the
/// caller's concern.
#[must_use]
pub fn resolve_path(levels: &[AddressLevel]) -> Vec<String> {
    levels
        .iter()
        .map(|level| match level.kind {
            AddressLevelKind::Literal => level.name.clone(),
            AddressLevelKind::Variable => format!(":{}", level.name),
        })
        .collect()
}
