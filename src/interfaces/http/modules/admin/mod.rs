//! Admin module: dashboard totals and the unrestricted request listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
