//! User API handlers
//!
//! Registration, profile and moderation endpoints plus donor search.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    DonorSearchParams, ListUsersParams, RegisterRequest, UpdateProfileRequest, UserDto,
};
use crate::application::identity::{Registration, UserService};
use crate::domain::{UserRole, UserStatus};
use crate::interfaces::http::common::{
    ApiResult, InsertResponse, MessageResponse, OrFailWith, UpdateResponse, ValidatedJson,
};

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = InsertResponse),
        (status = 200, description = "Email already registered", body = MessageResponse),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    )
)]
pub async fn register(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Response> {
    let input = request.into_domain()?;

    match state
        .user_service
        .register(input)
        .await
        .or_fail_with("Registration failed")?
    {
        Registration::Created(user) => {
            Ok((StatusCode::CREATED, Json(InsertResponse::new(user.id))).into_response())
        }
        Registration::AlreadyExists => {
            Ok(Json(MessageResponse::new("user already exists")).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "All users, newest first", body = Vec<UserDto>),
        (status = 400, description = "Unknown status", body = MessageResponse)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let status = UserStatus::parse_filter(params.status.as_deref())?;
    let users = state
        .user_service
        .list_users(status)
        .await
        .or_fail_with("Failed to fetch users")?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 404, description = "Not found", body = MessageResponse)
    )
)]
pub async fn get_profile(
    State(state): State<UserHandlerState>,
    Path(email): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let user = state
        .user_service
        .get_profile(&email)
        .await
        .or_fail_with("Failed to fetch profile")?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    patch,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    )
)]
pub async fn update_profile(
    State(state): State<UserHandlerState>,
    Path(email): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let update = request.into_domain()?;
    let summary = state
        .user_service
        .update_profile(&email, &update)
        .await
        .or_fail_with("Profile update failed")?;
    Ok(Json(summary.into()))
}

async fn change_status(
    state: &UserHandlerState,
    id: &str,
    status: UserStatus,
) -> ApiResult<Json<UpdateResponse>> {
    let summary = state
        .user_service
        .set_status(id, status)
        .await
        .or_fail_with("Failed to update user status")?;
    Ok(Json(summary.into()))
}

async fn change_role(
    state: &UserHandlerState,
    id: &str,
    role: UserRole,
) -> ApiResult<Json<UpdateResponse>> {
    let summary = state
        .user_service
        .set_role(id, role)
        .await
        .or_fail_with("Failed to update user role")?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    patch,
    path = "/users/block/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn block_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResponse>> {
    change_status(&state, &id, UserStatus::Blocked).await
}

#[utoipa::path(
    patch,
    path = "/users/unblock/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn unblock_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResponse>> {
    change_status(&state, &id, UserStatus::Active).await
}

#[utoipa::path(
    patch,
    path = "/users/make-volunteer/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn make_volunteer(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResponse>> {
    change_role(&state, &id, UserRole::Volunteer).await
}

#[utoipa::path(
    patch,
    path = "/users/make-admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update summary", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn make_admin(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResponse>> {
    change_role(&state, &id, UserRole::Admin).await
}

#[utoipa::path(
    get,
    path = "/search-donors",
    tag = "Users",
    params(DonorSearchParams),
    responses(
        (status = 200, description = "Active donors matching every given field", body = Vec<UserDto>),
        (status = 400, description = "Unknown blood group", body = MessageResponse)
    )
)]
pub async fn search_donors(
    State(state): State<UserHandlerState>,
    Query(params): Query<DonorSearchParams>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let search = params.into_domain()?;
    let donors = state
        .user_service
        .search_donors(&search)
        .await
        .or_fail_with("Failed to search donors")?;
    Ok(Json(donors.into_iter().map(UserDto::from).collect()))
}
