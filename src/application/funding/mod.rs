pub mod service;

pub use service::FundingService;
