//! Liveness and health endpoints

pub mod handlers;

pub use handlers::*;
