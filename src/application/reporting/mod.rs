//! Read-side aggregates for the admin dashboard

pub mod service;

pub use service::{PlatformStats, ReportingService};
