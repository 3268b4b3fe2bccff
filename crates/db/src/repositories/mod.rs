//! Repository implementations for data access.
//!
//! The repositories are the persistence-coupled halves of the lifecycle
//! managers: they load entities, call the pure decision functions in
//! `voltra_core::lifecycle`, and persist the resulting effect records.

pub mod account;
pub mod card;

pub use account::AccountRepository;
pub use card::CardRepository;

use sea_orm::DbErr;
use voltra_core::lifecycle::LifecycleError;

/// Maps a database error into the lifecycle taxonomy.
pub(crate) fn map_db(err: DbErr) -> LifecycleError {
    LifecycleError::Database(err.to_string())
}
