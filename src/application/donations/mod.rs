//! Donation request lifecycle

pub mod service;

pub use service::{DonationRequestService, DonationSettings};
