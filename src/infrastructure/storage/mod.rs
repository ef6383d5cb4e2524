//! Non-SQL storage backends

mod memory;

pub use memory::InMemoryStorage;
