//! Driving port for the enriched application listing.

use async_trait::async_trait;

use crate::domain::{ApplicationFilter, EnrichedApplication, Error, Page};

/// Application read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationQuery: Send + Sync {
    /// List matching applications in creation order, joined with student,
    /// course and university names. Dangling references are reported per
    /// row rather than failing the listing.
    async fn list(
        &self,
        filter: ApplicationFilter,
        page: Page,
    ) -> Result<Vec<EnrichedApplication>, Error>;
}
