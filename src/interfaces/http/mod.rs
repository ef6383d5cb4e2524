//! HTTP REST API
//!
//! - `common`: response envelopes, error mapping, validated JSON extractor
//! - `modules`: per-resource DTOs and handlers, plus request-id and metrics
//!   middleware
//! - `router`: route table, shared state and Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
