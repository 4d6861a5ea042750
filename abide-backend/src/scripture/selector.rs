//! Verse pools and random sampling

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::Verse;

#[derive(Debug, Clone, Deserialize)]
pub struct VersePool {
    pub key: String,
    pub verses: Vec<Verse>,
}

/// Raw layout of `verses.ron`
#[derive(Debug, Deserialize)]
pub struct VerseFile {
    pub pools: Vec<VersePool>,
    pub common: Vec<Verse>,
}

/// Static per-topic verse pools with a global fallback pool
#[derive(Debug, Clone)]
pub struct VerseSelector {
    pools: Vec<VersePool>,
    common: Vec<Verse>,
}

impl TryFrom<VerseFile> for VerseSelector {
    type Error = ConfigError;

    fn try_from(file: VerseFile) -> Result<Self, Self::Error> {
        // Sampling picks distinct positions, so a pool must not repeat a passage
        let named = file.pools.iter().map(|p| (p.key.as_str(), &p.verses));
        for (key, verses) in named.chain(std::iter::once(("common", &file.common))) {
            for (i, verse) in verses.iter().enumerate() {
                if verses[..i].iter().any(|v| v.same_passage(verse)) {
                    return Err(ConfigError::Content(format!(
                        "duplicate verse {} ({}) in pool '{}'",
                        verse.reference, verse.translation, key
                    )));
                }
            }
        }
        if file.common.is_empty() {
            return Err(ConfigError::Content("common verse pool is empty".to_string()));
        }

        Ok(Self {
            pools: file.pools,
            common: file.common,
        })
    }
}

impl VerseSelector {
    /// Up to `count` distinct verses for `topic`
    pub fn sample(&self, topic: &str, count: usize) -> Vec<Verse> {
        self.sample_with(topic, count, &mut rand::thread_rng())
    }

    /// Pools smaller than or equal to `count` are returned whole, in stored
    /// order. Larger pools are sampled without replacement. Unmatched topics
    /// draw from the common pool.
    pub fn sample_with<R: Rng + ?Sized>(&self, topic: &str, count: usize, rng: &mut R) -> Vec<Verse> {
        if count == 0 {
            return Vec::new();
        }

        match self.find_pool(topic) {
            Some(pool) if pool.verses.len() <= count => pool.verses.clone(),
            Some(pool) => pool.verses.choose_multiple(rng, count).cloned().collect(),
            None => {
                log::debug!("No verse pool for topic '{}', using common verses", topic);
                self.common
                    .choose_multiple(rng, count.min(self.common.len()))
                    .cloned()
                    .collect()
            }
        }
    }

    /// First pool whose key contains `topic`, or which has a verse whose text does
    fn find_pool(&self, topic: &str) -> Option<&VersePool> {
        let topic = topic.trim().to_lowercase();
        if topic.is_empty() {
            return None;
        }
        self.pools.iter().find(|pool| {
            pool.key.to_lowercase().contains(&topic)
                || pool.verses.iter().any(|v| v.text.to_lowercase().contains(&topic))
        })
    }

    /// Exact reference lookup across all pools, in the given translation
    pub fn find_reference(&self, reference: &str, translation: &str) -> Option<&Verse> {
        let wanted = reference.trim();
        let translation = translation.trim();
        self.pools
            .iter()
            .flat_map(|p| p.verses.iter())
            .chain(self.common.iter())
            .find(|v| {
                v.reference.eq_ignore_ascii_case(wanted)
                    && v.translation.eq_ignore_ascii_case(translation)
            })
    }

    /// Keyword search: whole pools whose key contains the query, then
    /// individual verses whose text does. Deduplicated, at most `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Verse> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let by_key = self
            .pools
            .iter()
            .filter(|p| p.key.to_lowercase().contains(&query))
            .flat_map(|p| p.verses.iter());
        let by_text = self
            .pools
            .iter()
            .flat_map(|p| p.verses.iter())
            .filter(|v| v.text.to_lowercase().contains(&query));

        let mut results: Vec<Verse> = Vec::new();
        for verse in by_key.chain(by_text) {
            if results.len() >= limit {
                break;
            }
            if !results.iter().any(|r| r.same_passage(verse)) {
                results.push(verse.clone());
            }
        }
        results
    }

    /// Pool keys in file order
    pub fn pool_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.pools.iter().map(|p| p.key.as_str())
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn verse_count(&self) -> usize {
        self.pools.iter().map(|p| p.verses.len()).sum::<usize>() + self.common.len()
    }
}
