//! Repository access for the domain layer
//!
//! `RepositoryProvider` hands out the per-aggregate repositories that share
//! one store handle.

use async_trait::async_trait;

use super::donation_request::DonationRequestRepository;
use super::funding::FundingRepository;
use super::user::UserRepository;
use crate::shared::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("a@b.c").await?;
///     let total = repos.donation_requests().count().await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn donation_requests(&self) -> &dyn DonationRequestRepository;
    fn fundings(&self) -> &dyn FundingRepository;

    /// Round-trip to the backing store
    async fn ping(&self) -> DomainResult<()>;
}
