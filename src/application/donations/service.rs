//! Donation request service: creation guard, listings and the status
//! state machine

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, DonationRequest, DonationRequestFilter, DonationRequestPatch,
    DonationStatus, NewDonationRequest, RepositoryProvider, StatusChange, TransitionPolicy,
};
use crate::shared::{
    new_record_id, parse_record_id, validate_pagination, DeleteSummary, PaginatedResult,
    UpdateSummary,
};

/// Tunables for listing and transition behaviour
#[derive(Debug, Clone, Copy)]
pub struct DonationSettings {
    pub policy: TransitionPolicy,
    pub recent_limit: u64,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for DonationSettings {
    fn default() -> Self {
        Self {
            policy: TransitionPolicy::Permissive,
            recent_limit: 3,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

pub struct DonationRequestService {
    repos: Arc<dyn RepositoryProvider>,
    settings: DonationSettings,
}

impl DonationRequestService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: DonationSettings) -> Self {
        Self { repos, settings }
    }

    /// Open a request on behalf of `requester_email`.
    ///
    /// The requester must exist and be active. Status starts at `pending`
    /// and `createdAt` is stamped here regardless of input.
    pub async fn create(&self, input: NewDonationRequest) -> DomainResult<DonationRequest> {
        let requester = self
            .repos
            .users()
            .find_by_email(&input.requester_email)
            .await?;

        match requester {
            Some(user) if user.is_active() => {}
            Some(_) => {
                warn!(email = %input.requester_email, "Blocked user tried to create a donation request");
                return Err(DomainError::Forbidden(
                    "Blocked users cannot create requests".into(),
                ));
            }
            None => {
                return Err(DomainError::Forbidden(
                    "Requester is not a registered user".into(),
                ));
            }
        }

        let request = DonationRequest::open(new_record_id(), input);
        self.repos.donation_requests().create(request.clone()).await?;

        info!(
            request_id = %request.id,
            requester = %request.requester_email,
            blood_group = %request.blood_group,
            "Donation request created"
        );
        Ok(request)
    }

    /// Filtered page, newest first, with the total of the whole match set.
    pub async fn list(
        &self,
        filter: &DonationRequestFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> DomainResult<PaginatedResult<DonationRequest>> {
        let pagination = validate_pagination(
            page,
            limit,
            self.settings.default_page_size,
            self.settings.max_page_size,
        )?;
        self.repos
            .donation_requests()
            .find_page(filter, pagination)
            .await
    }

    /// The requester's latest few requests.
    pub async fn recent(&self, email: &str) -> DomainResult<Vec<DonationRequest>> {
        let filter = DonationRequestFilter {
            requester_email: Some(email.to_string()),
            status: None,
        };
        let pagination = validate_pagination(
            Some(1),
            Some(self.settings.recent_limit),
            self.settings.recent_limit,
            self.settings.recent_limit,
        )?;
        let page = self
            .repos
            .donation_requests()
            .find_page(&filter, pagination)
            .await?;
        Ok(page.items)
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<DonationRequest> {
        let id = parse_record_id(id)?;
        self.repos
            .donation_requests()
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("DonationRequest", "id", id))
    }

    /// Merge detail fields. Status, requester and donor fields only move
    /// through [`Self::set_status`].
    pub async fn update(
        &self,
        id: &str,
        patch: &DonationRequestPatch,
    ) -> DomainResult<UpdateSummary> {
        let id = parse_record_id(id)?;
        self.repos.donation_requests().update(&id, patch).await
    }

    pub async fn delete(&self, id: &str) -> DomainResult<DeleteSummary> {
        let id = parse_record_id(id)?;
        let summary = self.repos.donation_requests().delete(&id).await?;
        if summary.deleted > 0 {
            info!(request_id = %id, "Donation request deleted");
        }
        Ok(summary)
    }

    /// Move a request to a new status under the configured policy.
    pub async fn set_status(&self, id: &str, change: &StatusChange) -> DomainResult<UpdateSummary> {
        let id = parse_record_id(id)?;
        let repo = self.repos.donation_requests();

        let Some(current) = repo.find_by_id(&id).await? else {
            return Ok(UpdateSummary::unmatched());
        };
        self.settings.policy.check(current.status, change.status)?;

        // Under the strict policy the edge was checked against `current`, so
        // the write must only land while that status still holds.
        let expected = match self.settings.policy {
            TransitionPolicy::Strict => Some(current.status),
            TransitionPolicy::Permissive => None,
        };
        let summary = repo.set_status(&id, change, expected).await?;
        if expected.is_some() && summary.matched == 0 && repo.find_by_id(&id).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Donation request {} changed status concurrently, retry",
                id
            )));
        }
        if summary.modified > 0 {
            info!(
                request_id = %id,
                from = %current.status,
                to = %change.status,
                "Donation request status changed"
            );
        }
        Ok(summary)
    }

    /// Every request, newest first, optionally narrowed to one status.
    pub async fn admin_list(
        &self,
        status: Option<DonationStatus>,
    ) -> DomainResult<Vec<DonationRequest>> {
        let filter = DonationRequestFilter {
            requester_email: None,
            status,
        };
        self.repos.donation_requests().find_all(&filter).await
    }
}
