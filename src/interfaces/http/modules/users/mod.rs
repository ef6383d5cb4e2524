//! Users module: registration, profiles, moderation and donor search

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
