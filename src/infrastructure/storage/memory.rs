//! In-memory storage implementation

use std::cmp::Reverse;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    DonationRequest, DonationRequestFilter, DonationRequestPatch, DonationRequestRepository,
    DonationStatus, DonorSearch, Funding, FundingRepository, ProfileUpdate, RepositoryProvider, StatusChange,
    User, UserRepository, UserRole, UserStatus,
};
use crate::shared::{
    DeleteSummary, DomainError, DomainResult, PaginatedResult, PaginationParams, UpdateSummary,
};

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryStorage {
    users: InMemoryUserRepository,
    donation_requests: InMemoryDonationRequestRepository,
    fundings: InMemoryFundingRepository,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryStorage {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn donation_requests(&self) -> &dyn DonationRequestRepository {
        &self.donation_requests
    }

    fn fundings(&self) -> &dyn FundingRepository {
        &self.fundings
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// Newest first, id as tiebreak, the same order the SQL repositories use.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, String)) {
    items.sort_by_key(|item| Reverse(key(item)));
}

fn page_of<T>(mut items: Vec<T>, pagination: PaginationParams) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let start = (pagination.offset() as usize).min(items.len());
    let end = start
        .saturating_add(pagination.limit as usize)
        .min(items.len());
    let window: Vec<T> = items.drain(start..end).collect();
    PaginatedResult::new(window, total, pagination.page, pagination.limit)
}

// ── Users ──────────────────────────────────────────────────────

#[derive(Default)]
struct InMemoryUserRepository {
    users: DashMap<String, User>,
    /// email -> id
    emails: DashMap<String, String>,
}

impl InMemoryUserRepository {
    fn modify_by_id(&self, id: &str, f: impl FnOnce(&mut User) -> bool) -> UpdateSummary {
        match self.users.get_mut(id) {
            Some(mut user) => UpdateSummary::matched(f(&mut user)),
            None => UpdateSummary::unmatched(),
        }
    }

    fn sorted(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| keep(u.value()))
            .map(|u| u.value().clone())
            .collect();
        newest_first(&mut users, |u| (u.created_at, u.id.clone()));
        users
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> DomainResult<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Email '{}' already registered",
                user.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user);
                Ok(())
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .emails
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|u| u.clone())))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn list(&self, status: Option<UserStatus>) -> DomainResult<Vec<User>> {
        Ok(self.sorted(|u| status.map_or(true, |s| u.status == s)))
    }

    async fn search_donors(&self, search: &DonorSearch) -> DomainResult<Vec<User>> {
        Ok(self.sorted(|u| u.matches_donor_search(search)))
    }

    async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> DomainResult<UpdateSummary> {
        let Some(id) = self.emails.get(email).map(|id| id.value().clone()) else {
            return Ok(UpdateSummary::unmatched());
        };
        Ok(self.modify_by_id(&id, |u| u.apply_profile_update(update)))
    }

    async fn set_status(&self, id: &str, status: UserStatus) -> DomainResult<UpdateSummary> {
        Ok(self.modify_by_id(id, |u| u.set_status(status)))
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<UpdateSummary> {
        Ok(self.modify_by_id(id, |u| u.set_role(role)))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

// ── Donation requests ──────────────────────────────────────────

#[derive(Default)]
struct InMemoryDonationRequestRepository {
    requests: DashMap<String, DonationRequest>,
}

impl InMemoryDonationRequestRepository {
    fn modify(&self, id: &str, f: impl FnOnce(&mut DonationRequest) -> bool) -> UpdateSummary {
        match self.requests.get_mut(id) {
            Some(mut request) => UpdateSummary::matched(f(&mut request)),
            None => UpdateSummary::unmatched(),
        }
    }
}

#[async_trait]
impl DonationRequestRepository for InMemoryDonationRequestRepository {
    async fn create(&self, request: DonationRequest) -> DomainResult<()> {
        match self.requests.entry(request.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Donation request '{}' already exists",
                request.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(request);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DonationRequest>> {
        Ok(self.requests.get(id).map(|r| r.clone()))
    }

    async fn find_page(
        &self,
        filter: &DonationRequestFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<DonationRequest>> {
        let matching = self.find_all(filter).await?;
        Ok(page_of(matching, pagination))
    }

    async fn find_all(&self, filter: &DonationRequestFilter) -> DomainResult<Vec<DonationRequest>> {
        let mut matching: Vec<DonationRequest> = self
            .requests
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        newest_first(&mut matching, |r| (r.created_at, r.id.clone()));
        Ok(matching)
    }

    async fn update(&self, id: &str, patch: &DonationRequestPatch) -> DomainResult<UpdateSummary> {
        Ok(self.modify(id, |r| r.apply_patch(patch)))
    }

    async fn set_status(
        &self,
        id: &str,
        change: &StatusChange,
        expected: Option<DonationStatus>,
    ) -> DomainResult<UpdateSummary> {
        match self.requests.get_mut(id) {
            Some(request) if expected.is_some_and(|s| s != request.status) => {
                Ok(UpdateSummary::unmatched())
            }
            Some(mut request) => Ok(UpdateSummary::matched(
                request.apply_status_change(change),
            )),
            None => Ok(UpdateSummary::unmatched()),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<DeleteSummary> {
        let deleted = u64::from(self.requests.remove(id).is_some());
        Ok(DeleteSummary { deleted })
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.requests.len() as u64)
    }
}

// ── Fundings ───────────────────────────────────────────────────

#[derive(Default)]
struct InMemoryFundingRepository {
    fundings: DashMap<String, Funding>,
}

#[async_trait]
impl FundingRepository for InMemoryFundingRepository {
    async fn create(&self, funding: Funding) -> DomainResult<()> {
        self.fundings.insert(funding.id.clone(), funding);
        Ok(())
    }

    async fn find_page(&self, pagination: PaginationParams) -> DomainResult<PaginatedResult<Funding>> {
        let mut all: Vec<Funding> = self.fundings.iter().map(|f| f.value().clone()).collect();
        newest_first(&mut all, |f| (f.created_at, f.id.clone()));
        Ok(page_of(all, pagination))
    }

    async fn total_amount(&self) -> DomainResult<i64> {
        self.fundings
            .iter()
            .try_fold(0i64, |total, f| total.checked_add(f.amount))
            .ok_or_else(|| DomainError::Storage("Funding total overflows i64".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, User};

    fn user(id: &str, email: &str) -> User {
        User::register(
            id,
            NewUser {
                name: "Test".into(),
                email: email.into(),
                avatar: None,
                blood_group: None,
                district: None,
                upazila: None,
            },
        )
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let storage = InMemoryStorage::new();
        storage.users().create(user("1", "a@example.com")).await.unwrap();
        let err = storage
            .users()
            .create(user("2", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(storage.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_user_matches_nothing() {
        let storage = InMemoryStorage::new();
        let summary = storage
            .users()
            .set_status("missing", UserStatus::Blocked)
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::unmatched());
    }

    #[tokio::test]
    async fn status_write_only_lands_on_the_expected_status() {
        let storage = InMemoryStorage::new();
        let request = DonationRequest::open(
            "r1",
            crate::domain::NewDonationRequest {
                requester_name: None,
                requester_email: "o@example.com".into(),
                recipient_name: "Recipient".into(),
                recipient_district: None,
                recipient_upazila: None,
                hospital_name: None,
                full_address: None,
                blood_group: crate::domain::BloodGroup::BPositive,
                donation_date: None,
                donation_time: None,
                request_message: None,
            },
        );
        storage.donation_requests().create(request).await.unwrap();

        let done = StatusChange::to(DonationStatus::Done);
        let stale = storage
            .donation_requests()
            .set_status("r1", &done, Some(DonationStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(stale, UpdateSummary::unmatched());

        let fresh = storage
            .donation_requests()
            .set_status("r1", &done, Some(DonationStatus::Pending))
            .await
            .unwrap();
        assert_eq!(fresh, UpdateSummary::matched(true));
    }

    #[tokio::test]
    async fn overflowing_funding_total_is_an_error() {
        let storage = InMemoryStorage::new();
        for id in ["f1", "f2"] {
            storage
                .fundings()
                .create(Funding::record(
                    id,
                    crate::domain::NewFunding {
                        funder_name: "Nadia".into(),
                        funder_email: "nadia@example.com".into(),
                        amount: i64::MAX,
                    },
                ))
                .await
                .unwrap();
        }
        let err = storage.fundings().total_amount().await.unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn page_window_past_the_end_is_empty() {
        let page = page_of(vec![1, 2, 3], PaginationParams::new(3, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }
}
