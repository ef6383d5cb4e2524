//! Funding domain entity

use chrono::{DateTime, Utc};

/// Largest single contribution accepted, in minor units. Keeps the running
/// total far inside `i64`.
pub const MAX_FUNDING_AMOUNT: i64 = 1_000_000_000;

/// A single contribution. Amounts are integer minor currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct Funding {
    pub id: String,
    pub funder_name: String,
    pub funder_email: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Funding {
    pub fn record(id: impl Into<String>, input: NewFunding) -> Self {
        Self {
            id: id.into(),
            funder_name: input.funder_name,
            funder_email: input.funder_email,
            amount: input.amount,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFunding {
    pub funder_name: String,
    pub funder_email: String,
    pub amount: i64,
}
