//! Entry database operations

use rusqlite::OptionalExtension;

use super::super::sqlite::{current_time, parse_timestamp, timestamp};
use super::super::Database;
use crate::error::DbError;
use crate::models::{Entry, EntryType, NewEntry};

const ENTRY_COLUMNS: &str = "id, user_id, entry_type, topic, input_text, response_json, created_at";

impl Database {
    /// Insert an entry. Entries are never updated afterwards.
    pub fn create_entry(&self, entry: NewEntry) -> Result<Entry, DbError> {
        let conn = self.conn.lock();

        if let Some(user_id) = entry.user_id {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                [user_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(DbError::NotFound("user"));
            }
        }

        let now = current_time();
        let response_json = serde_json::to_string(&entry.response)?;
        conn.execute(
            "INSERT INTO entries (user_id, entry_type, topic, input_text, response_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                entry.user_id,
                entry.entry_type.as_str(),
                &entry.topic,
                &entry.input_text,
                &response_json,
                timestamp(now),
            ],
        )?;

        Ok(Entry {
            id: conn.last_insert_rowid(),
            user_id: entry.user_id,
            entry_type: entry.entry_type,
            topic: entry.topic,
            input_text: entry.input_text,
            response: entry.response,
            created_at: now,
        })
    }

    pub fn get_entry(&self, id: i64) -> Result<Option<Entry>, DbError> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM entries WHERE id = ?1", ENTRY_COLUMNS);
        let raw = conn.query_row(&sql, [id], RawEntry::from_row).optional()?;
        raw.map(RawEntry::into_entry).transpose()
    }

    /// A user's entries, newest first
    pub fn list_entries(
        &self,
        user_id: i64,
        entry_type: Option<EntryType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, DbError> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM entries
             WHERE user_id = ?1 AND (?2 IS NULL OR entry_type = ?2)
             ORDER BY created_at DESC, id DESC
             LIMIT ?3 OFFSET ?4",
            ENTRY_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params![user_id, entry_type.map(|t| t.as_str()), limit, offset],
            RawEntry::from_row,
        )?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }
}

/// Row as stored, before the JSON payload and type tag are decoded
pub(super) struct RawEntry {
    id: i64,
    user_id: Option<i64>,
    entry_type: String,
    topic: String,
    input_text: Option<String>,
    response_json: String,
    created_at: String,
}

impl RawEntry {
    /// Reads the seven entry columns starting at `offset`
    pub(super) fn from_row_at(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            user_id: row.get(offset + 1)?,
            entry_type: row.get(offset + 2)?,
            topic: row.get(offset + 3)?,
            input_text: row.get(offset + 4)?,
            response_json: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
        })
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    pub(super) fn into_entry(self) -> Result<Entry, DbError> {
        // The CHECK constraint keeps unknown types out
        let entry_type = EntryType::from_str(&self.entry_type).unwrap_or(EntryType::Feel);
        Ok(Entry {
            id: self.id,
            user_id: self.user_id,
            entry_type,
            topic: self.topic,
            input_text: self.input_text,
            response: serde_json::from_str(&self.response_json)?,
            created_at: parse_timestamp(&self.created_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::error::DbError;
    use crate::models::{EntryType, NewEntry};
    use serde_json::json;

    fn new_entry(user_id: Option<i64>, entry_type: EntryType, topic: &str) -> NewEntry {
        NewEntry {
            user_id,
            entry_type,
            topic: topic.to_string(),
            input_text: Some(format!("feeling {}", topic)),
            response: json!({"topic": topic, "verses": []}),
        }
    }

    #[test]
    fn test_create_and_get_entry() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user(None).unwrap();
        let entry = db
            .create_entry(new_entry(Some(user.id), EntryType::Feel, "peace"))
            .unwrap();

        let loaded = db.get_entry(entry.id).unwrap().unwrap();
        assert_eq!(loaded.topic, "peace");
        assert_eq!(loaded.entry_type, EntryType::Feel);
        assert_eq!(loaded.response["topic"], "peace");
        assert_eq!(loaded.created_at, entry.created_at);
        assert!(db.get_entry(entry.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_unknown_user_rejected() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.create_entry(new_entry(Some(7), EntryType::Feel, "hope")),
            Err(DbError::NotFound("user"))
        ));
    }

    #[test]
    fn test_list_newest_first_with_filter_and_paging() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user(None).unwrap();
        let other = db.create_user(None).unwrap();
        for topic in ["peace", "hope", "comfort"] {
            db.create_entry(new_entry(Some(user.id), EntryType::Feel, topic)).unwrap();
        }
        db.create_entry(new_entry(Some(user.id), EntryType::Devotion, "love")).unwrap();
        db.create_entry(new_entry(Some(other.id), EntryType::Feel, "strength")).unwrap();

        let all = db.list_entries(user.id, None, 20, 0).unwrap();
        let topics: Vec<_> = all.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, vec!["love", "comfort", "hope", "peace"]);

        let feelings = db.list_entries(user.id, Some(EntryType::Feel), 20, 0).unwrap();
        assert_eq!(feelings.len(), 3);

        let page = db.list_entries(user.id, None, 2, 1).unwrap();
        let topics: Vec<_> = page.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, vec!["comfort", "hope"]);
    }

    #[test]
    fn test_deleting_user_cascades_to_entries() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user(None).unwrap();
        let entry = db
            .create_entry(new_entry(Some(user.id), EntryType::Devotion, "peace"))
            .unwrap();
        db.delete_user(user.id).unwrap();
        assert!(db.get_entry(entry.id).unwrap().is_none());
    }
}
