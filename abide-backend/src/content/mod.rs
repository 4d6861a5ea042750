//! Static content loaded from RON files
//!
//! Lexicons, crisis bundles, verse pools, templates and fallback videos all
//! live under the config directory and are loaded once at startup into an
//! immutable [`ContentLibrary`].

mod lexicon;
mod templates;

pub use lexicon::{KeywordTable, Lexicon};
pub use templates::TemplateStore;

use templates::TemplateFile;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::classify::crisis::{CrisisCatalog, CrisisFile};
use crate::error::ConfigError;
use crate::scripture::{VerseFile, VerseSelector};
use crate::video::{FallbackFile, FallbackVideos};

#[derive(Debug, Clone)]
pub struct ContentLibrary {
    pub lexicon: Lexicon,
    pub crisis: CrisisCatalog,
    pub verses: VerseSelector,
    pub templates: TemplateStore,
    pub videos: FallbackVideos,
}

impl ContentLibrary {
    /// Load and validate every content file in `config_dir`
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let lexicon: Lexicon = read_ron(config_dir, "lexicon.ron")?;
        log::info!(
            "[content] Loaded {} crisis phrases across {} categories and {} feeling topics",
            lexicon.crisis.phrases().count(),
            lexicon.crisis.len(),
            lexicon.feeling.len()
        );
        log::debug!(
            "[content] Crisis screening order: {:?}",
            lexicon.crisis.labels().collect::<Vec<_>>()
        );

        let crisis = CrisisCatalog::from(read_ron::<CrisisFile>(config_dir, "crisis.ron")?);

        let verses = VerseSelector::try_from(read_ron::<VerseFile>(config_dir, "verses.ron")?)?;
        log::info!(
            "[content] Loaded {} verses across {} pools",
            verses.verse_count(),
            verses.pool_count()
        );

        let templates =
            TemplateStore::try_from(read_ron::<TemplateFile>(config_dir, "templates.ron")?)?;
        log::info!(
            "[content] Loaded {} devotion templates",
            templates.devotion_topics().len()
        );

        let videos = FallbackVideos::try_from(read_ron::<FallbackFile>(config_dir, "videos.ron")?)?;

        Ok(Self {
            lexicon,
            crisis,
            verses,
            templates,
            videos,
        })
    }
}

fn read_ron<T: DeserializeOwned>(config_dir: &Path, file_name: &str) -> Result<T, ConfigError> {
    let path = config_dir.join(file_name);
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    ron::from_str(&content).map_err(|e| ConfigError::Parse {
        path,
        message: e.to_string(),
    })
}
