//! Person storage. The trait is the only seam between the service and a backend.

mod memory;
mod postgres;

pub use memory::MemoryPersonStore;
pub use postgres::{ensure_database_exists, PgPersonStore};

use crate::error::AppError;
use crate::model::{NewPerson, Person};
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All people ordered by last name ascending, then id.
    async fn list_by_last_name(&self) -> Result<Vec<Person>, AppError>;

    async fn get(&self, person_id: i64) -> Result<Option<Person>, AppError>;

    /// Insert unless a person with the same (fname, lname) exists. `None` means the pair is taken.
    async fn insert_if_absent(
        &self,
        new: &NewPerson,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError>;

    /// Overwrite first name and timestamp. `None` when the id is unknown.
    async fn update_first_name(
        &self,
        person_id: i64,
        fname: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Option<Person>, AppError>;

    /// Remove by id, returning the removed row.
    async fn delete(&self, person_id: i64) -> Result<Option<Person>, AppError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}
