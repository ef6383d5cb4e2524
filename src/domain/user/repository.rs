//! User repository interface

use async_trait::async_trait;

use super::model::{DonorSearch, ProfileUpdate, User, UserRole, UserStatus};
use crate::shared::{DomainResult, UpdateSummary};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with `DomainError::Conflict` when the email is already taken;
    /// the check and the insert are a single atomic step.
    async fn create(&self, user: User) -> DomainResult<()>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// All users, newest first, optionally narrowed to one status
    async fn list(&self, status: Option<UserStatus>) -> DomainResult<Vec<User>>;

    /// Active donors matching the search filters, newest first
    async fn search_donors(&self, search: &DonorSearch) -> DomainResult<Vec<User>>;

    async fn update_profile(&self, email: &str, update: &ProfileUpdate)
        -> DomainResult<UpdateSummary>;

    async fn set_status(&self, id: &str, status: UserStatus) -> DomainResult<UpdateSummary>;

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<UpdateSummary>;

    async fn count(&self) -> DomainResult<u64>;
}
