//! Admin API handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::dto::StatsResponse;
use crate::application::{DonationRequestService, ReportingService};
use crate::domain::DonationStatus;
use crate::interfaces::http::common::{ApiResult, MessageResponse, OrFailWith};
use crate::interfaces::http::modules::donation_requests::{DonationRequestDto, StatusFilterParams};

/// Admin handler state.
#[derive(Clone)]
pub struct AdminState {
    pub reporting_service: Arc<ReportingService>,
    pub donation_service: Arc<DonationRequestService>,
}

#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Platform totals", body = StatsResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn admin_stats(State(state): State<AdminState>) -> ApiResult<Json<StatsResponse>> {
    let stats = state
        .reporting_service
        .stats()
        .await
        .or_fail_with("Failed to fetch admin stats")?;
    Ok(Json(stats.into()))
}

#[utoipa::path(
    get,
    path = "/admin/donation-requests",
    tag = "Admin",
    params(StatusFilterParams),
    responses(
        (status = 200, description = "Every request, newest first", body = Vec<DonationRequestDto>),
        (status = 400, description = "Unknown status", body = MessageResponse)
    )
)]
pub async fn admin_list_requests(
    State(state): State<AdminState>,
    Query(params): Query<StatusFilterParams>,
) -> ApiResult<Json<Vec<DonationRequestDto>>> {
    let status = DonationStatus::parse_filter(params.status.as_deref())?;
    let requests = state
        .donation_service
        .admin_list(status)
        .await
        .or_fail_with("Failed to fetch donation requests")?;
    Ok(Json(requests.into_iter().map(DonationRequestDto::from).collect()))
}
