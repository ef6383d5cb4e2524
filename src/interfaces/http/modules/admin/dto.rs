//! Admin API data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::PlatformStats;

/// Platform totals for the admin dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Registered users, any role or status.
    pub total_users: u64,
    /// Donation requests in every status.
    pub total_requests: u64,
    /// Sum of all funding amounts in minor currency units.
    pub total_funding: i64,
}

impl From<PlatformStats> for StatsResponse {
    fn from(s: PlatformStats) -> Self {
        Self {
            total_users: s.total_users,
            total_requests: s.total_requests,
            total_funding: s.total_funding,
        }
    }
}
