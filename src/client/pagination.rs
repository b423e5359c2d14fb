//! Full pagination walk over the organization listing
//!
//! Pages through `GET /organizations` until the server stops advertising a
//! next page. A failed page is logged and the walk returns whatever was
//! collected so far, so one bad page does not lose already-fetched
//! organizations.

use log::{error, info};

use super::models::OrgRef;
use super::TfeApi;

/// Page size for listing walks. 100 is the maximum TFE permits.
pub const PAGE_SIZE: u64 = 100;

/// Fetch every organization on the instance.
///
/// Returns the complete set in server order, or a partial set if a page
/// request fails mid-walk.
pub async fn list_all_orgs<C: TfeApi + ?Sized>(client: &C) -> Vec<OrgRef> {
    let mut orgs: Vec<OrgRef> = Vec::new();
    let mut page_number: u64 = 1;

    loop {
        let page = match client.list_organizations(page_number).await {
            Ok(page) => page,
            Err(err) => {
                error!("Error listing orgs on page {}: {}", page_number, err);
                break;
            }
        };

        if page.data.is_empty() {
            break;
        }

        info!(
            "Retrieved {} orgs from page {}",
            page.data.len(),
            page_number
        );

        let has_next = page.has_next_page();
        orgs.extend(page.data.into_iter().map(OrgRef::from));

        if !has_next {
            break;
        }
        page_number += 1;
    }

    orgs
}
