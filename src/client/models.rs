//! Wire types for the TFE JSON:API surface
//!
//! Only the fields the audit reads are modeled; everything else in the
//! responses is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single JSON:API resource: `{ "id": ..., "attributes": {...} }`
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct Resource<A> {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<A>,
}

/// Envelope for single-resource responses: `{ "data": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct Document<A> {
    pub data: Resource<A>,
}

/// Envelope for list responses: `{ "data": [...], "meta": ..., "links": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListDocument<A> {
    #[serde(default = "Vec::new")]
    pub data: Vec<Resource<A>>,

    #[serde(default)]
    pub meta: Option<Meta>,

    #[serde(default)]
    pub links: Option<Links>,
}

impl<A> ListDocument<A> {
    /// Total item count across all pages, if the server reported one.
    pub fn total_count(&self) -> Option<u64> {
        self.meta
            .as_ref()
            .and_then(|m| m.pagination.as_ref())
            .and_then(|p| p.total_count)
    }

    /// Whether the server advertises a further page.
    pub fn has_next_page(&self) -> bool {
        self.links
            .as_ref()
            .map(|l| l.next.is_some())
            .unwrap_or(false)
    }
}

/// Response metadata carrying pagination counts
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `meta.pagination` block from list responses
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(rename = "total-count", default)]
    pub total_count: Option<u64>,

    #[serde(rename = "next-page", default)]
    pub next_page: Option<u64>,
}

/// `links` block from list responses
#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// Attributes read from an organization resource
#[derive(Debug, Clone, Deserialize)]
pub struct OrgAttributes {
    #[serde(rename = "created-at", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Attributes read from a workspace resource (presence is all that matters)
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceAttributes {
    #[serde(default)]
    pub name: Option<String>,
}

/// An organization selected for auditing: identifier plus best-effort
/// creation timestamp. Built before dispatch, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRef {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrgRef {
    pub fn new(id: impl Into<String>, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            created_at,
        }
    }
}

impl From<Resource<OrgAttributes>> for OrgRef {
    fn from(resource: Resource<OrgAttributes>) -> Self {
        let created_at = resource.attributes.and_then(|a| a.created_at);
        OrgRef {
            id: resource.id,
            created_at,
        }
    }
}
