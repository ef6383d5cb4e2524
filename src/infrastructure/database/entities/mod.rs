//! Database entities module

pub mod donation_request;
pub mod funding;
pub mod user;

pub use donation_request::Entity as DonationRequest;
pub use funding::Entity as Funding;
pub use user::Entity as User;
