//! Funding DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Funding, NewFunding};
use crate::shared::PaginatedResult;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundingDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub funder_name: String,
    pub funder_email: String,
    /// Minor currency units
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Funding> for FundingDto {
    fn from(f: Funding) -> Self {
        Self {
            id: f.id,
            funder_name: f.funder_name,
            funder_email: f.funder_email,
            amount: f.amount,
            created_at: f.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundingRequest {
    #[validate(length(min = 1, max = 100))]
    pub funder_name: String,
    #[validate(email)]
    pub funder_email: String,
    /// Positive amount in minor currency units, at most 1 000 000 000
    #[validate(range(min = 1, max = 1000000000))]
    pub amount: i64,
}

impl From<CreateFundingRequest> for NewFunding {
    fn from(r: CreateFundingRequest) -> Self {
        Self {
            funder_name: r.funder_name,
            funder_email: r.funder_email,
            amount: r.amount,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFundingsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// `{total, page, limit, fundings}` envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FundingPage {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub fundings: Vec<FundingDto>,
}

impl From<PaginatedResult<Funding>> for FundingPage {
    fn from(result: PaginatedResult<Funding>) -> Self {
        let result = result.map(FundingDto::from);
        Self {
            total: result.total,
            page: result.page,
            limit: result.limit,
            fundings: result.items,
        }
    }
}
