//! Persistence: users, entries and bookmarks in SQLite

mod sqlite;
mod tables;

pub use sqlite::Database;

use crate::error::DbError;
use crate::models::{Entry, NewEntry};

/// The slice of persistence the response assembler needs
pub trait EntryStore: Send + Sync {
    fn create_entry(&self, entry: NewEntry) -> Result<Entry, DbError>;
}

impl EntryStore for Database {
    fn create_entry(&self, entry: NewEntry) -> Result<Entry, DbError> {
        Database::create_entry(self, entry)
    }
}
