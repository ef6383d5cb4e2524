//! Funding repository interface

use async_trait::async_trait;

use super::model::Funding;
use crate::shared::{DomainResult, PaginatedResult, PaginationParams};

#[async_trait]
pub trait FundingRepository: Send + Sync {
    async fn create(&self, funding: Funding) -> DomainResult<()>;

    /// Newest first
    async fn find_page(&self, pagination: PaginationParams) -> DomainResult<PaginatedResult<Funding>>;

    /// Sum of all amounts; 0 when nothing has been recorded
    async fn total_amount(&self) -> DomainResult<i64>;
}
