//! User aggregate
//!
//! Contains the User entity, its write inputs, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{DonorSearch, NewUser, ProfileUpdate, User, UserRole, UserStatus};
pub use repository::UserRepository;
