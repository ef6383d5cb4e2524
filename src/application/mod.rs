//! Application services
//!
//! The only layer where business rules run. Every service holds an
//! `Arc<dyn RepositoryProvider>` and stays independent of the store.

pub mod donations;
pub mod funding;
pub mod identity;
pub mod reporting;

pub use donations::{DonationRequestService, DonationSettings};
pub use funding::FundingService;
pub use identity::{Registration, UserService};
pub use reporting::{PlatformStats, ReportingService};
