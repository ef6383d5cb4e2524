//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

use sea_orm::{ActiveModelTrait, EntityTrait, Iterable};

pub mod donation_request_repository;
pub mod funding_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

/// Only the columns whose value differs between `before` and `after` are
/// `Set`; the rest stay `NotSet` so an UPDATE leaves them to whoever else
/// is writing the row.
pub(crate) fn changed_columns<A>(before: &A, after: &A) -> A
where
    A: ActiveModelTrait,
{
    let mut changes = <A as ActiveModelTrait>::default();
    for col in <<A::Entity as EntityTrait>::Column as Iterable>::iter() {
        if let Some(value) = after.get(col).into_value() {
            if before.get(col).into_value().as_ref() != Some(&value) {
                changes.set(col, value);
            }
        }
    }
    changes
}
