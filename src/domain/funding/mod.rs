//! Funding aggregate: money contributed to the platform

pub mod model;
pub mod repository;

pub use model::{Funding, NewFunding, MAX_FUNDING_AMOUNT};
pub use repository::FundingRepository;
