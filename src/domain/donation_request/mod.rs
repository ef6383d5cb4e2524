//! Donation request aggregate
//!
//! Contains the DonationRequest entity, its status state machine, write
//! inputs, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    DonationRequest, DonationRequestFilter, DonationRequestPatch, DonationStatus,
    NewDonationRequest, StatusChange, TransitionPolicy,
};
pub use repository::DonationRequestRepository;
