//! Identity module: registration, profiles and moderation
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases.

pub mod service;

pub use service::{Registration, UserService};
