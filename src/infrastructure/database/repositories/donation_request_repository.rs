//! SeaORM implementation of DonationRequestRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use tracing::debug;

use super::changed_columns;
use crate::domain::{
    BloodGroup, DomainError, DomainResult, DonationRequest, DonationRequestFilter,
    DonationRequestPatch, DonationRequestRepository, DonationStatus, StatusChange,
};
use crate::infrastructure::database::entities::donation_request;
use crate::shared::{DeleteSummary, PaginatedResult, PaginationParams, UpdateSummary};

pub struct SeaOrmDonationRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmDonationRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(s: donation_request::DonationStatus) -> DonationStatus {
    match s {
        donation_request::DonationStatus::Pending => DonationStatus::Pending,
        donation_request::DonationStatus::InProgress => DonationStatus::InProgress,
        donation_request::DonationStatus::Done => DonationStatus::Done,
        donation_request::DonationStatus::Canceled => DonationStatus::Canceled,
    }
}

fn domain_status_to_entity(s: DonationStatus) -> donation_request::DonationStatus {
    match s {
        DonationStatus::Pending => donation_request::DonationStatus::Pending,
        DonationStatus::InProgress => donation_request::DonationStatus::InProgress,
        DonationStatus::Done => donation_request::DonationStatus::Done,
        DonationStatus::Canceled => donation_request::DonationStatus::Canceled,
    }
}

fn model_to_domain(m: donation_request::Model) -> DomainResult<DonationRequest> {
    let blood_group = m.blood_group.parse::<BloodGroup>().map_err(|_| {
        DomainError::Storage(format!(
            "Corrupt blood group in donation request {}: '{}'",
            m.id, m.blood_group
        ))
    })?;

    Ok(DonationRequest {
        id: m.id,
        requester_name: m.requester_name,
        requester_email: m.requester_email,
        recipient_name: m.recipient_name,
        recipient_district: m.recipient_district,
        recipient_upazila: m.recipient_upazila,
        hospital_name: m.hospital_name,
        full_address: m.full_address,
        blood_group,
        donation_date: m.donation_date,
        donation_time: m.donation_time,
        request_message: m.request_message,
        status: entity_status_to_domain(m.status),
        donor_name: m.donor_name,
        donor_email: m.donor_email,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(r: DonationRequest) -> donation_request::ActiveModel {
    donation_request::ActiveModel {
        id: Set(r.id),
        requester_name: Set(r.requester_name),
        requester_email: Set(r.requester_email),
        recipient_name: Set(r.recipient_name),
        recipient_district: Set(r.recipient_district),
        recipient_upazila: Set(r.recipient_upazila),
        hospital_name: Set(r.hospital_name),
        full_address: Set(r.full_address),
        blood_group: Set(r.blood_group.as_str().to_string()),
        donation_date: Set(r.donation_date),
        donation_time: Set(r.donation_time),
        request_message: Set(r.request_message),
        status: Set(domain_status_to_entity(r.status)),
        donor_name: Set(r.donor_name),
        donor_email: Set(r.donor_email),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

fn filtered(filter: &DonationRequestFilter) -> Select<donation_request::Entity> {
    let mut query = donation_request::Entity::find();
    if let Some(ref email) = filter.requester_email {
        query = query.filter(donation_request::Column::RequesterEmail.eq(email.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(donation_request::Column::Status.eq(domain_status_to_entity(status)));
    }
    query
}

fn newest_first(query: Select<donation_request::Entity>) -> Select<donation_request::Entity> {
    query
        .order_by_desc(donation_request::Column::CreatedAt)
        .order_by_desc(donation_request::Column::Id)
}

fn models_to_domain(models: Vec<donation_request::Model>) -> DomainResult<Vec<DonationRequest>> {
    models.into_iter().map(model_to_domain).collect()
}

impl SeaOrmDonationRequestRepository {
    /// Load, mutate through the domain model, then UPDATE only the columns
    /// the mutation touched. With `expected_status` the row must still hold
    /// that status when the UPDATE runs, otherwise nothing is matched.
    async fn modify(
        &self,
        id: &str,
        expected_status: Option<DonationStatus>,
        f: impl FnOnce(&mut DonationRequest) -> bool + Send,
    ) -> DomainResult<UpdateSummary> {
        let Some(existing) = donation_request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
        else {
            return Ok(UpdateSummary::unmatched());
        };

        let before = model_to_domain(existing)?;
        if expected_status.is_some_and(|s| s != before.status) {
            return Ok(UpdateSummary::unmatched());
        }

        let mut after = before.clone();
        if !f(&mut after) {
            return Ok(UpdateSummary::matched(false));
        }

        let changes = changed_columns(&domain_to_active(before), &domain_to_active(after));
        let mut update = donation_request::Entity::update_many()
            .set(changes)
            .filter(donation_request::Column::Id.eq(id));
        if let Some(status) = expected_status {
            update = update
                .filter(donation_request::Column::Status.eq(domain_status_to_entity(status)));
        }

        let result = update.exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Ok(UpdateSummary::unmatched());
        }
        Ok(UpdateSummary::matched(true))
    }
}

// ── DonationRequestRepository impl ──────────────────────────────

#[async_trait]
impl DonationRequestRepository for SeaOrmDonationRequestRepository {
    async fn create(&self, request: DonationRequest) -> DomainResult<()> {
        debug!("Saving donation request: {}", request.id);
        domain_to_active(request).insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DonationRequest>> {
        donation_request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_page(
        &self,
        filter: &DonationRequestFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<DonationRequest>> {
        let query = filtered(filter);

        // Count total
        let total = query.clone().count(&self.db).await?;

        // Paginate
        let models = newest_first(query)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&self.db)
            .await?;

        Ok(PaginatedResult::new(
            models_to_domain(models)?,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn find_all(&self, filter: &DonationRequestFilter) -> DomainResult<Vec<DonationRequest>> {
        let models = newest_first(filtered(filter)).all(&self.db).await?;
        models_to_domain(models)
    }

    async fn update(&self, id: &str, patch: &DonationRequestPatch) -> DomainResult<UpdateSummary> {
        debug!("Updating donation request: {}", id);
        self.modify(id, None, |r| r.apply_patch(patch)).await
    }

    async fn set_status(
        &self,
        id: &str,
        change: &StatusChange,
        expected: Option<DonationStatus>,
    ) -> DomainResult<UpdateSummary> {
        debug!("Setting donation request {} status to {}", id, change.status);
        self.modify(id, expected, |r| r.apply_status_change(change))
            .await
    }

    async fn delete(&self, id: &str) -> DomainResult<DeleteSummary> {
        let result = donation_request::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(DeleteSummary {
            deleted: result.rows_affected,
        })
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(donation_request::Entity::find().count(&self.db).await?)
    }
}
