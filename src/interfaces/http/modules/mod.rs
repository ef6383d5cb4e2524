pub mod admin;
pub mod donation_requests;
pub mod fundings;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod users;
