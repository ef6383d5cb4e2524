//! Donation request DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    BloodGroup, DomainResult, DonationRequest, DonationRequestFilter, DonationRequestPatch,
    DonationStatus, NewDonationRequest, StatusChange,
};
use crate::shared::PaginatedResult;

/// Donation request API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub requester_name: Option<String>,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: Option<String>,
    pub recipient_upazila: Option<String>,
    pub hospital_name: Option<String>,
    pub full_address: Option<String>,
    pub blood_group: String,
    /// YYYY-MM-DD
    pub donation_date: Option<NaiveDate>,
    pub donation_time: Option<String>,
    pub request_message: Option<String>,
    /// pending | inprogress | done | canceled
    pub status: String,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DonationRequest> for DonationRequestDto {
    fn from(r: DonationRequest) -> Self {
        Self {
            id: r.id,
            requester_name: r.requester_name,
            requester_email: r.requester_email,
            recipient_name: r.recipient_name,
            recipient_district: r.recipient_district,
            recipient_upazila: r.recipient_upazila,
            hospital_name: r.hospital_name,
            full_address: r.full_address,
            blood_group: r.blood_group.as_str().to_string(),
            donation_date: r.donation_date,
            donation_time: r.donation_time,
            request_message: r.request_message,
            status: r.status.as_str().to_string(),
            donor_name: r.donor_name,
            donor_email: r.donor_email,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Create body. `status` and `createdAt` are server-set and not accepted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    #[validate(length(max = 100))]
    pub requester_name: Option<String>,
    #[validate(email)]
    pub requester_email: String,
    #[validate(length(min = 1, max = 100))]
    pub recipient_name: String,
    #[validate(length(max = 100))]
    pub recipient_district: Option<String>,
    #[validate(length(max = 100))]
    pub recipient_upazila: Option<String>,
    #[validate(length(max = 200))]
    pub hospital_name: Option<String>,
    #[validate(length(max = 500))]
    pub full_address: Option<String>,
    pub blood_group: String,
    pub donation_date: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub donation_time: Option<String>,
    #[validate(length(max = 2000))]
    pub request_message: Option<String>,
}

impl CreateDonationRequest {
    pub fn into_domain(self) -> DomainResult<NewDonationRequest> {
        Ok(NewDonationRequest {
            blood_group: self.blood_group.parse()?,
            requester_name: self.requester_name,
            requester_email: self.requester_email,
            recipient_name: self.recipient_name,
            recipient_district: self.recipient_district,
            recipient_upazila: self.recipient_upazila,
            hospital_name: self.hospital_name,
            full_address: self.full_address,
            donation_date: self.donation_date,
            donation_time: self.donation_time,
            request_message: self.request_message,
        })
    }
}

/// Generic update body. Only request details are accepted; status,
/// requester and donor fields are dropped if sent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationRequest {
    #[validate(length(min = 1, max = 100))]
    pub recipient_name: Option<String>,
    #[validate(length(max = 100))]
    pub recipient_district: Option<String>,
    #[validate(length(max = 100))]
    pub recipient_upazila: Option<String>,
    #[validate(length(max = 200))]
    pub hospital_name: Option<String>,
    #[validate(length(max = 500))]
    pub full_address: Option<String>,
    pub blood_group: Option<String>,
    pub donation_date: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub donation_time: Option<String>,
    #[validate(length(max = 2000))]
    pub request_message: Option<String>,
}

impl UpdateDonationRequest {
    pub fn into_domain(self) -> DomainResult<DonationRequestPatch> {
        Ok(DonationRequestPatch {
            blood_group: self
                .blood_group
                .as_deref()
                .map(|g| g.parse::<BloodGroup>())
                .transpose()?,
            recipient_name: self.recipient_name,
            recipient_district: self.recipient_district,
            recipient_upazila: self.recipient_upazila,
            hospital_name: self.hospital_name,
            full_address: self.full_address,
            donation_date: self.donation_date,
            donation_time: self.donation_time,
            request_message: self.request_message,
        })
    }
}

/// Status transition body. Donor fields are only recorded when the target
/// is `inprogress`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: String,
    #[validate(length(max = 100))]
    pub donor_name: Option<String>,
    #[validate(email)]
    pub donor_email: Option<String>,
}

impl StatusUpdateRequest {
    pub fn into_domain(self) -> DomainResult<StatusChange> {
        Ok(StatusChange {
            status: self.status.parse::<DonationStatus>()?,
            donor_name: self.donor_name,
            donor_email: self.donor_email,
        })
    }
}

/// Paginated listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListDonationRequestsParams {
    pub requester_email: Option<String>,
    /// pending | inprogress | done | canceled | all
    pub status: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 10)
    pub limit: Option<u64>,
}

impl ListDonationRequestsParams {
    pub fn filter(&self) -> DomainResult<DonationRequestFilter> {
        Ok(DonationRequestFilter {
            requester_email: self.requester_email.clone().filter(|e| !e.is_empty()),
            status: DonationStatus::parse_filter(self.status.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentParams {
    /// Requester email
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusFilterParams {
    /// pending | inprogress | done | canceled | all
    pub status: Option<String>,
}

/// `{total, page, limit, requests}` envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DonationRequestPage {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub requests: Vec<DonationRequestDto>,
}

impl From<PaginatedResult<DonationRequest>> for DonationRequestPage {
    fn from(result: PaginatedResult<DonationRequest>) -> Self {
        let result = result.map(DonationRequestDto::from);
        Self {
            total: result.total,
            page: result.page,
            limit: result.limit,
            requests: result.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn create_body_ignores_status_and_created_at() {
        let body: CreateDonationRequest = serde_json::from_value(serde_json::json!({
            "requesterEmail": "r@example.com",
            "recipientName": "Patient",
            "bloodGroup": "b-",
            "donationDate": "2025-03-01",
            "status": "done",
            "createdAt": "1999-01-01T00:00:00Z"
        }))
        .unwrap();

        let input = body.into_domain().unwrap();
        assert_eq!(input.blood_group, BloodGroup::BNegative);
        assert_eq!(input.donation_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn update_body_cannot_carry_status() {
        let body: UpdateDonationRequest = serde_json::from_value(serde_json::json!({
            "status": "done",
            "requesterEmail": "someone@example.com",
            "donorEmail": "d@example.com",
            "hospitalName": "DMCH"
        }))
        .unwrap();

        let patch = body.into_domain().unwrap();
        assert_eq!(patch.hospital_name.as_deref(), Some("DMCH"));
        assert!(patch.blood_group.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let body = StatusUpdateRequest {
            status: "archived".into(),
            donor_name: None,
            donor_email: None,
        };
        assert!(matches!(body.into_domain(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn all_means_no_status_filter() {
        let params = ListDonationRequestsParams {
            requester_email: Some("r@example.com".into()),
            status: Some("all".into()),
            page: None,
            limit: None,
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.requester_email.as_deref(), Some("r@example.com"));
        assert!(filter.status.is_none());
    }
}
