use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which operation produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Feel,
    Devotion,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feel => "feel",
            Self::Devotion => "devotion",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "feel" => Some(Self::Feel),
            "devotion" => Some(Self::Devotion),
            _ => None,
        }
    }
}

/// A persisted interaction. Written once, never updated.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: i64,
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub topic: String,
    pub input_text: Option<String>,
    pub response: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insert request for an entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: Option<i64>,
    pub entry_type: EntryType,
    pub topic: String,
    pub input_text: Option<String>,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub entry_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A bookmark joined with the entry it points at
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkWithEntry {
    pub id: i64,
    pub entry: Entry,
    pub bookmarked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
