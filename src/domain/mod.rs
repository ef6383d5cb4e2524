pub mod blood_group;
pub mod donation_request;
pub mod funding;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use blood_group::BloodGroup;
pub use donation_request::{
    DonationRequest, DonationRequestFilter, DonationRequestPatch, DonationRequestRepository,
    DonationStatus, NewDonationRequest, StatusChange, TransitionPolicy,
};
pub use funding::{Funding, FundingRepository, NewFunding, MAX_FUNDING_AMOUNT};
pub use repositories::RepositoryProvider;
pub use user::{DonorSearch, NewUser, ProfileUpdate, User, UserRepository, UserRole, UserStatus};

pub use crate::shared::{DomainError, DomainResult};
