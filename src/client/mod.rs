//! TFE API client

use async_trait::async_trait;

use crate::error::Result;

pub mod models;
pub mod pagination;
pub mod retry;
pub mod tfe;

pub use models::{Document, ListDocument, OrgAttributes, OrgRef, WorkspaceAttributes};
pub use pagination::{PAGE_SIZE, list_all_orgs};
pub use retry::RetryPolicy;
pub use tfe::TfeClient;

/// Read-only TFE API operations the audit needs.
///
/// Implemented by [`TfeClient`] for real runs and by test doubles in unit
/// tests of the prober and dispatcher.
#[async_trait]
pub trait TfeApi: Send + Sync {
    /// Fetch one page of the instance-wide organization listing.
    async fn list_organizations(&self, page_number: u64) -> Result<ListDocument<OrgAttributes>>;

    /// Fetch a single organization by name.
    async fn get_organization(&self, org_id: &str) -> Result<Document<OrgAttributes>>;

    /// Fetch one page of an organization's workspace listing.
    async fn list_workspaces(
        &self,
        org_id: &str,
        page_number: u64,
        page_size: u64,
    ) -> Result<ListDocument<WorkspaceAttributes>>;
}
