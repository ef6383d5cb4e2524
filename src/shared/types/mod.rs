pub mod errors;
pub mod pagination;
pub mod write_result;

pub use errors::*;
pub use pagination::*;
pub use write_result::*;
