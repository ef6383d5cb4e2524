//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    DonationRequestService, DonationSettings, FundingService, ReportingService, UserService,
};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    DeleteResponse, InsertResponse, MessageResponse, UpdateResponse,
};
use crate::interfaces::http::modules::{
    admin, donation_requests, fundings, health, metrics, request_id, users,
};

/// Unified state for every route. Each handler keeps its own narrow
/// `State<T>` extractor, derived through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub user_service: Arc<UserService>,
    pub donation_service: Arc<DonationRequestService>,
    pub funding_service: Arc<FundingService>,
    pub reporting_service: Arc<ReportingService>,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    /// Wire every application service over one repository provider.
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: DonationSettings) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repos.clone())),
            donation_service: Arc::new(DonationRequestService::new(repos.clone(), settings)),
            funding_service: Arc::new(FundingService::new(
                repos.clone(),
                settings.default_page_size,
                settings.max_page_size,
            )),
            reporting_service: Arc::new(ReportingService::new(repos.clone())),
            started_at: Arc::new(Instant::now()),
            repos,
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<ApiState> for donation_requests::DonationRequestHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        donation_requests::DonationRequestHandlerState {
            donation_service: Arc::clone(&s.donation_service),
        }
    }
}

impl FromRef<ApiState> for admin::AdminState {
    fn from_ref(s: &ApiState) -> Self {
        admin::AdminState {
            reporting_service: Arc::clone(&s.reporting_service),
            donation_service: Arc::clone(&s.donation_service),
        }
    }
}

impl FromRef<ApiState> for fundings::FundingHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        fundings::FundingHandlerState {
            funding_service: Arc::clone(&s.funding_service),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Blood Donation API", description = "Donor registry and blood request coordination"),
    paths(
        // Health
        health::root,
        health::health_check,
        // Users
        users::register,
        users::list_users,
        users::get_profile,
        users::update_profile,
        users::block_user,
        users::unblock_user,
        users::make_volunteer,
        users::make_admin,
        users::search_donors,
        // Donation requests
        donation_requests::create_request,
        donation_requests::list_requests,
        donation_requests::recent_requests,
        donation_requests::get_request,
        donation_requests::update_request,
        donation_requests::update_status,
        donation_requests::delete_request,
        // Admin
        admin::admin_stats,
        admin::admin_list_requests,
        // Fundings
        fundings::create_funding,
        fundings::list_fundings,
    ),
    components(
        schemas(
            // Common
            MessageResponse,
            InsertResponse,
            UpdateResponse,
            DeleteResponse,
            // Users
            users::UserDto,
            users::RegisterRequest,
            users::UpdateProfileRequest,
            // Donation requests
            donation_requests::DonationRequestDto,
            donation_requests::CreateDonationRequest,
            donation_requests::UpdateDonationRequest,
            donation_requests::StatusUpdateRequest,
            donation_requests::DonationRequestPage,
            // Admin
            admin::StatsResponse,
            // Fundings
            fundings::FundingDto,
            fundings::CreateFundingRequest,
            fundings::FundingPage,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and store health"),
        (name = "Users", description = "Registration, profiles, moderation and donor search"),
        (name = "Donation Requests", description = "Blood request lifecycle"),
        (name = "Admin", description = "Dashboard totals and unrestricted listings"),
        (name = "Fundings", description = "Platform contributions"),
    )
)]
pub struct ApiDoc;

/// Build the full HTTP surface.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(state: ApiState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::register))
        .route(
            "/users/{email}",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/users/block/{id}", patch(users::block_user))
        .route("/users/unblock/{id}", patch(users::unblock_user))
        .route("/users/make-volunteer/{id}", patch(users::make_volunteer))
        .route("/users/make-admin/{id}", patch(users::make_admin))
        .route("/search-donors", get(users::search_donors));

    let donation_routes = Router::new()
        .route(
            "/donation-requests",
            get(donation_requests::list_requests).post(donation_requests::create_request),
        )
        .route(
            "/donation-requests/recent",
            get(donation_requests::recent_requests),
        )
        .route(
            "/donation-requests/status/{id}",
            patch(donation_requests::update_status),
        )
        .route(
            "/donation-requests/{id}",
            get(donation_requests::get_request)
                .patch(donation_requests::update_request)
                .delete(donation_requests::delete_request),
        );

    let admin_routes = Router::new()
        .route("/admin-stats", get(admin::admin_stats))
        .route(
            "/admin/donation-requests",
            get(admin::admin_list_requests),
        );

    let funding_routes = Router::new().route(
        "/fundings",
        get(fundings::list_fundings).post(fundings::create_funding),
    );

    let api_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(user_routes)
        .merge(donation_routes)
        .merge(admin_routes)
        .merge(funding_routes)
        // route_layer: runs after routing so MatchedPath is available
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new().merge(swagger_routes).merge(api_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
