//! Donation request API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateDonationRequest, DonationRequestDto, DonationRequestPage, ListDonationRequestsParams,
    RecentParams, StatusUpdateRequest, UpdateDonationRequest,
};
use crate::application::DonationRequestService;
use crate::interfaces::http::common::{
    ApiResult, DeleteResponse, InsertResponse, MessageResponse, OrFailWith, UpdateResponse,
    ValidatedJson,
};

/// Donation request handler state
#[derive(Clone)]
pub struct DonationRequestHandlerState {
    pub donation_service: Arc<DonationRequestService>,
}

#[utoipa::path(
    post,
    path = "/donation-requests",
    tag = "Donation Requests",
    request_body = CreateDonationRequest,
    responses(
        (status = 201, description = "Request created", body = InsertResponse),
        (status = 403, description = "Requester missing or blocked", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    )
)]
pub async fn create_request(
    State(state): State<DonationRequestHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateDonationRequest>,
) -> ApiResult<(StatusCode, Json<InsertResponse>)> {
    let input = request.into_domain()?;
    let created = state
        .donation_service
        .create(input)
        .await
        .or_fail_with("Failed to create donation request")?;
    Ok((StatusCode::CREATED, Json(InsertResponse::new(created.id))))
}

#[utoipa::path(
    get,
    path = "/donation-requests",
    tag = "Donation Requests",
    params(ListDonationRequestsParams),
    responses(
        (status = 200, description = "One page, newest first", body = DonationRequestPage),
        (status = 400, description = "Bad query", body = MessageResponse)
    )
)]
pub async fn list_requests(
    State(state): State<DonationRequestHandlerState>,
    params: Result<Query<ListDonationRequestsParams>, QueryRejection>,
) -> ApiResult<Json<DonationRequestPage>> {
    let Query(params) = params?;
    let filter = params.filter()?;
    let page = state
        .donation_service
        .list(&filter, params.page, params.limit)
        .await
        .or_fail_with("Failed to fetch donation requests")?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/donation-requests/recent",
    tag = "Donation Requests",
    params(RecentParams),
    responses(
        (status = 200, description = "Latest requests of one requester", body = Vec<DonationRequestDto>),
        (status = 400, description = "Missing email", body = MessageResponse)
    )
)]
pub async fn recent_requests(
    State(state): State<DonationRequestHandlerState>,
    params: Result<Query<RecentParams>, QueryRejection>,
) -> ApiResult<Json<Vec<DonationRequestDto>>> {
    let Query(params) = params?;
    let requests = state
        .donation_service
        .recent(&params.email)
        .await
        .or_fail_with("Failed to fetch recent requests")?;
    Ok(Json(requests.into_iter().map(DonationRequestDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/donation-requests/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ID")),
    responses(
        (status = 200, description = "Donation request", body = DonationRequestDto),
        (status = 400, description = "Malformed id", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_request(
    State(state): State<DonationRequestHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DonationRequestDto>> {
    let request = state
        .donation_service
        .get_by_id(&id)
        .await
        .or_fail_with("Failed to fetch donation request")?;
    Ok(Json(request.into()))
}

#[utoipa::path(
    patch,
    path = "/donation-requests/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ID")),
    request_body = UpdateDonationRequest,
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn update_request(
    State(state): State<DonationRequestHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDonationRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let patch = request.into_domain()?;
    let summary = state
        .donation_service
        .update(&id, &patch)
        .await
        .or_fail_with("Failed to update donation request")?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    patch,
    path = "/donation-requests/status/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id, unknown status or illegal transition", body = MessageResponse)
    )
)]
pub async fn update_status(
    State(state): State<DonationRequestHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let change = request.into_domain()?;
    let summary = state
        .donation_service
        .set_status(&id, &change)
        .await
        .or_fail_with("Failed to update status")?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    delete,
    path = "/donation-requests/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ID")),
    responses(
        (status = 200, description = "Delete summary", body = DeleteResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn delete_request(
    State(state): State<DonationRequestHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let summary = state
        .donation_service
        .delete(&id)
        .await
        .or_fail_with("Failed to delete donation request")?;
    Ok(Json(summary.into()))
}
