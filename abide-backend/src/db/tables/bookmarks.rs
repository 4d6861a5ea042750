//! Bookmark database operations

use rusqlite::ErrorCode;

use super::super::sqlite::{current_time, parse_timestamp, timestamp};
use super::super::Database;
use super::entries::RawEntry;
use crate::error::DbError;
use crate::models::{Bookmark, BookmarkWithEntry};

impl Database {
    /// Bookmark an entry for a user. Each (user, entry) pair is bookmarked once.
    pub fn create_bookmark(&self, user_id: i64, entry_id: i64) -> Result<Bookmark, DbError> {
        let conn = self.conn.lock();

        let entry_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM entries WHERE id = ?1)",
            [entry_id],
            |row| row.get(0),
        )?;
        if !entry_exists {
            return Err(DbError::NotFound("entry"));
        }

        let now = current_time();
        let inserted = conn.execute(
            "INSERT INTO bookmarks (user_id, entry_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, entry_id, timestamp(now)],
        );

        match inserted {
            Ok(_) => Ok(Bookmark {
                id: conn.last_insert_rowid(),
                user_id,
                entry_id,
                created_at: now,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                // UNIQUE(user_id, entry_id) or the user foreign key
                let user_exists: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                    [user_id],
                    |row| row.get(0),
                )?;
                if user_exists {
                    Err(DbError::AlreadyBookmarked)
                } else {
                    Err(DbError::NotFound("user"))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// A user's bookmarks with their entries, newest bookmark first
    pub fn list_bookmarks(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookmarkWithEntry>, DbError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT b.id, b.created_at,
                    e.id, e.user_id, e.entry_type, e.topic, e.input_text, e.response_json, e.created_at
             FROM bookmarks b
             JOIN entries e ON e.id = b.entry_id
             WHERE b.user_id = ?1
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt.query_map(rusqlite::params![user_id, limit, offset], |row| {
            let id: i64 = row.get(0)?;
            let bookmarked_at: String = row.get(1)?;
            Ok((id, bookmarked_at, RawEntry::from_row_at(row, 2)?))
        })?;

        let mut bookmarks = Vec::new();
        for row in rows {
            let (id, bookmarked_at, raw) = row?;
            bookmarks.push(BookmarkWithEntry {
                id,
                entry: raw.into_entry()?,
                bookmarked_at: parse_timestamp(&bookmarked_at),
            });
        }
        Ok(bookmarks)
    }

    /// Remove a bookmark owned by `user_id`
    pub fn remove_bookmark(&self, bookmark_id: i64, user_id: i64) -> Result<(), DbError> {
        let conn = self.conn.lock();
        let deleted = conn.execute(
            "DELETE FROM bookmarks WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![bookmark_id, user_id],
        )?;
        if deleted == 0 {
            return Err(DbError::NotFound("bookmark"));
        }
        Ok(())
    }
}
