//! Funding API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateFundingRequest, FundingPage, ListFundingsParams};
use crate::application::FundingService;
use crate::interfaces::http::common::{
    ApiResult, InsertResponse, MessageResponse, OrFailWith, ValidatedJson,
};

#[derive(Clone)]
pub struct FundingHandlerState {
    pub funding_service: Arc<FundingService>,
}

#[utoipa::path(
    post,
    path = "/fundings",
    tag = "Fundings",
    request_body = CreateFundingRequest,
    responses(
        (status = 201, description = "Funding recorded", body = InsertResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    )
)]
pub async fn create_funding(
    State(state): State<FundingHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateFundingRequest>,
) -> ApiResult<(StatusCode, Json<InsertResponse>)> {
    let funding = state
        .funding_service
        .record(request.into())
        .await
        .or_fail_with("Failed to record funding")?;
    Ok((StatusCode::CREATED, Json(InsertResponse::new(funding.id))))
}

#[utoipa::path(
    get,
    path = "/fundings",
    tag = "Fundings",
    params(ListFundingsParams),
    responses(
        (status = 200, description = "One page, newest first", body = FundingPage),
        (status = 400, description = "Bad query", body = MessageResponse)
    )
)]
pub async fn list_fundings(
    State(state): State<FundingHandlerState>,
    params: Result<Query<ListFundingsParams>, QueryRejection>,
) -> ApiResult<Json<FundingPage>> {
    let Query(params) = params?;
    let page = state
        .funding_service
        .list(params.page, params.limit)
        .await
        .or_fail_with("Failed to fetch fundings")?;
    Ok(Json(page.into()))
}
