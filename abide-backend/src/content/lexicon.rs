//! Ordered keyword tables
//!
//! A table maps labels to trigger phrases. Order is significant: lookups
//! return the first label (in declared order) with any phrase contained in
//! the input, so overlapping phrases resolve by position, not specificity.

use serde::Deserialize;

use crate::classify::CrisisCategory;
use crate::models::Topic;

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Vec<(K, Vec<String>)>")]
pub struct KeywordTable<K> {
    entries: Vec<(K, Vec<String>)>,
}

impl<K> From<Vec<(K, Vec<String>)>> for KeywordTable<K> {
    fn from(entries: Vec<(K, Vec<String>)>) -> Self {
        // Phrases are stored lowercased so matching only folds the input
        let entries = entries
            .into_iter()
            .map(|(label, phrases)| {
                let phrases = phrases
                    .into_iter()
                    .map(|p| p.trim().to_lowercase())
                    .filter(|p| !p.is_empty())
                    .collect();
                (label, phrases)
            })
            .collect();
        Self { entries }
    }
}

impl<K: Copy> KeywordTable<K> {
    /// First label whose phrase list matches `text` (case-insensitive substring)
    pub fn first_match(&self, text: &str) -> Option<K> {
        if text.trim().is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| lowered.contains(p.as_str())))
            .map(|(label, _)| *label)
    }

    pub fn labels(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn phrases(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        self.entries
            .iter()
            .flat_map(|(label, phrases)| phrases.iter().map(move |p| (*label, p.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Both classifier lexicons, as loaded from `lexicon.ron`
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub crisis: KeywordTable<CrisisCategory>,
    pub feeling: KeywordTable<Topic>,
}
