//! Donation request repository interface

use async_trait::async_trait;

use super::model::{
    DonationRequest, DonationRequestFilter, DonationRequestPatch, DonationStatus, StatusChange,
};
use crate::shared::{DeleteSummary, DomainResult, PaginatedResult, PaginationParams, UpdateSummary};

#[async_trait]
pub trait DonationRequestRepository: Send + Sync {
    /// Save a new request
    async fn create(&self, request: DonationRequest) -> DomainResult<()>;

    /// Find request by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DonationRequest>>;

    /// One page of matching requests, newest first. `total` counts the whole
    /// matching set, independent of the page window.
    async fn find_page(
        &self,
        filter: &DonationRequestFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<DonationRequest>>;

    /// Every matching request, newest first
    async fn find_all(&self, filter: &DonationRequestFilter) -> DomainResult<Vec<DonationRequest>>;

    async fn update(&self, id: &str, patch: &DonationRequestPatch) -> DomainResult<UpdateSummary>;

    /// Apply a status change. With `expected`, the write only lands while the
    /// stored status still equals it; otherwise the summary is unmatched.
    async fn set_status(
        &self,
        id: &str,
        change: &StatusChange,
        expected: Option<DonationStatus>,
    ) -> DomainResult<UpdateSummary>;

    async fn delete(&self, id: &str) -> DomainResult<DeleteSummary>;

    async fn count(&self) -> DomainResult<u64>;
}
