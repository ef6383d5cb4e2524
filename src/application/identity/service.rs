//! User management service, application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, DonorSearch, NewUser, ProfileUpdate, RepositoryProvider, User,
    UserRole, UserStatus,
};
use crate::shared::{new_record_id, parse_record_id, UpdateSummary};

/// Outcome of a registration attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Created(User),
    /// The email was already taken; nothing was written.
    AlreadyExists,
}

/// User service: registration, profiles, moderation and donor search.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user as an active donor.
    ///
    /// Idempotent by email: the unique index decides, so two concurrent
    /// registrations for one address yield one `Created` and one
    /// `AlreadyExists`.
    pub async fn register(&self, input: NewUser) -> DomainResult<Registration> {
        let user = User::register(new_record_id(), input);

        match self.repos.users().create(user.clone()).await {
            Ok(()) => {
                info!(user_id = %user.id, email = %user.email, "New user registered");
                Ok(Registration::Created(user))
            }
            Err(DomainError::Conflict(_)) => Ok(Registration::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_profile(&self, email: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", email))
    }

    /// All users, newest first, optionally narrowed to one status.
    pub async fn list_users(&self, status: Option<UserStatus>) -> DomainResult<Vec<User>> {
        self.repos.users().list(status).await
    }

    /// Active donors matching every supplied criterion.
    pub async fn search_donors(&self, search: &DonorSearch) -> DomainResult<Vec<User>> {
        self.repos.users().search_donors(search).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Merge profile fields. Identity, role and status are not reachable
    /// through this path.
    pub async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> DomainResult<UpdateSummary> {
        self.repos.users().update_profile(email, update).await
    }

    pub async fn set_status(&self, id: &str, status: UserStatus) -> DomainResult<UpdateSummary> {
        let id = parse_record_id(id)?;
        let summary = self.repos.users().set_status(&id, status).await?;
        if summary.modified > 0 {
            info!(user_id = %id, status = %status, "User status changed");
        }
        Ok(summary)
    }

    pub async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<UpdateSummary> {
        let id = parse_record_id(id)?;
        let summary = self.repos.users().set_role(&id, role).await?;
        if summary.modified > 0 {
            info!(user_id = %id, role = %role, "User role changed");
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BloodGroup;
    use crate::infrastructure::InMemoryStorage;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryStorage::new()))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Rahim".into(),
            email: email.into(),
            avatar: None,
            blood_group: Some(BloodGroup::BPositive),
            district: Some("Dhaka".into()),
            upazila: Some("Savar".into()),
        }
    }

    #[tokio::test]
    async fn register_twice_keeps_one_record() {
        let svc = service();

        let first = svc.register(new_user("r@example.com")).await.unwrap();
        assert!(matches!(first, Registration::Created(_)));

        let second = svc.register(new_user("r@example.com")).await.unwrap();
        assert_eq!(second, Registration::AlreadyExists);

        assert_eq!(svc.list_users(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn registered_user_is_active_donor() {
        let svc = service();
        let Registration::Created(user) = svc.register(new_user("r@example.com")).await.unwrap()
        else {
            panic!("expected a new user");
        };

        assert_eq!(user.role, UserRole::Donor);
        assert_eq!(user.status, UserStatus::Active);

        let stored = svc.get_profile("r@example.com").await.unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.upazila.as_deref(), Some("Savar"));
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let err = service().get_profile("ghost@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn profile_update_keeps_identity() {
        let svc = service();
        let Registration::Created(user) = svc.register(new_user("r@example.com")).await.unwrap()
        else {
            panic!("expected a new user");
        };

        let summary = svc
            .update_profile(
                "r@example.com",
                &ProfileUpdate {
                    name: Some("Karim".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::matched(true));

        let stored = svc.get_profile("r@example.com").await.unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.email, "r@example.com");
        assert_eq!(stored.name, "Karim");
        assert_eq!(stored.role, UserRole::Donor);
    }

    #[tokio::test]
    async fn moderation_by_id() {
        let svc = service();
        let Registration::Created(user) = svc.register(new_user("r@example.com")).await.unwrap()
        else {
            panic!("expected a new user");
        };

        let blocked = svc.set_status(&user.id, UserStatus::Blocked).await.unwrap();
        assert_eq!(blocked, UpdateSummary::matched(true));
        let again = svc.set_status(&user.id, UserStatus::Blocked).await.unwrap();
        assert_eq!(again, UpdateSummary::matched(false));

        svc.set_role(&user.id, UserRole::Admin).await.unwrap();
        let stored = svc.get_profile("r@example.com").await.unwrap();
        assert_eq!(stored.status, UserStatus::Blocked);
        assert_eq!(stored.role, UserRole::Admin);

        // blocked users drop out of donor search
        let found = svc.search_donors(&DonorSearch::default()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let err = service()
            .set_role("not-an-id", UserRole::Volunteer)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_id_matches_nothing() {
        let summary = service()
            .set_status(&new_record_id(), UserStatus::Blocked)
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::unmatched());
    }
}
