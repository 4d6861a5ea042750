//! User database operations

use rusqlite::{ErrorCode, OptionalExtension};

use super::super::sqlite::{current_time, parse_timestamp, timestamp};
use super::super::Database;
use crate::error::DbError;
use crate::models::User;

impl Database {
    pub fn create_user(&self, email: Option<&str>) -> Result<User, DbError> {
        let conn = self.conn.lock();
        let now = current_time();

        match conn.execute(
            "INSERT INTO users (email, is_active, created_at) VALUES (?1, 1, ?2)",
            rusqlite::params![email, timestamp(now)],
        ) {
            Ok(_) => {}
            // only the email column is UNIQUE
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(DbError::EmailTaken);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.map(|s| s.to_string()),
            is_active: true,
            created_at: now,
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>, DbError> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                "SELECT id, email, is_active, created_at FROM users WHERE id = ?1",
                [id],
                |row| {
                    let created_at: String = row.get(3)?;
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        is_active: row.get::<_, i32>(2)? != 0,
                        created_at: parse_timestamp(&created_at),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Delete a user together with their entries and bookmarks
    pub fn delete_user(&self, id: i64) -> Result<(), DbError> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(DbError::NotFound("user"));
        }
        Ok(())
    }
}
