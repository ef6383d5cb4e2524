//! # Blood Donation Service
//!
//! REST backend for a blood-donation coordination platform: donor
//! registry, donation request lifecycle and admin reporting.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, value types, the request status machine and
//!   repository traits
//! - **application**: services where every business rule runs
//! - **infrastructure**: SeaORM/SQLite persistence and an in-memory store
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **shared**: error taxonomy, pagination, validation, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
