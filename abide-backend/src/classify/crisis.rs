//! Crisis screening
//!
//! Detection is a first-match scan over the crisis lexicon. Substring
//! matching produces false positives ("a stroke of luck") and misses
//! paraphrases; both are accepted limitations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::content::KeywordTable;
use crate::models::Verse;

/// Safety-critical input category. Order of the lexicon decides priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    Suicide,
    SelfHarm,
    Abuse,
    MedicalCrisis,
    MentalHealthCrisis,
}

impl CrisisCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suicide => "suicide",
            Self::SelfHarm => "self_harm",
            Self::Abuse => "abuse",
            Self::MedicalCrisis => "medical_crisis",
            Self::MentalHealthCrisis => "mental_health_crisis",
        }
    }
}

impl std::fmt::Display for CrisisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category safety content
#[derive(Debug, Clone, Deserialize)]
pub struct CrisisBundle {
    pub category: CrisisCategory,
    pub message: String,
    pub prayer: String,
    pub resources: Vec<String>,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

/// Content used for categories without a bundle of their own
#[derive(Debug, Clone, Deserialize)]
pub struct GenericBundle {
    pub message: String,
    pub prayer: String,
    pub resources: Vec<String>,
}

/// Raw layout of `crisis.ron`
#[derive(Debug, Deserialize)]
pub struct CrisisFile {
    pub bundles: Vec<CrisisBundle>,
    pub general_verses: Vec<Verse>,
    pub fallback: GenericBundle,
}

#[derive(Debug, Clone)]
pub struct CrisisCatalog {
    bundles: HashMap<CrisisCategory, CrisisBundle>,
    general_verses: Vec<Verse>,
    fallback: GenericBundle,
}

impl From<CrisisFile> for CrisisCatalog {
    fn from(file: CrisisFile) -> Self {
        Self {
            bundles: file.bundles.into_iter().map(|b| (b.category, b)).collect(),
            general_verses: file.general_verses,
            fallback: file.fallback,
        }
    }
}

/// Fully assembled safety response for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisResponse {
    pub category: CrisisCategory,
    pub message: String,
    pub prayer: String,
    pub resources: Vec<String>,
    pub verses: Vec<Verse>,
}

impl CrisisCatalog {
    pub fn general_verses(&self) -> &[Verse] {
        &self.general_verses
    }

    /// Fixed safety bundle for `category`. Always carries at least the general verses.
    pub fn respond(&self, category: CrisisCategory) -> CrisisResponse {
        let (message, prayer, resources, verses) = match self.bundles.get(&category) {
            Some(bundle) => (
                bundle.message.clone(),
                bundle.prayer.clone(),
                bundle.resources.clone(),
                bundle.verses.as_slice(),
            ),
            None => (
                self.fallback.message.clone(),
                self.fallback.prayer.clone(),
                self.fallback.resources.clone(),
                &[][..],
            ),
        };

        let verses = if verses.is_empty() {
            self.general_verses().to_vec()
        } else {
            verses.to_vec()
        };

        CrisisResponse {
            category,
            message,
            prayer,
            resources,
            verses,
        }
    }
}

/// First crisis category (in lexicon order) with a phrase contained in `text`
pub fn detect(lexicon: &KeywordTable<CrisisCategory>, text: &str) -> Option<CrisisCategory> {
    let category = lexicon.first_match(text);
    if let Some(c) = category {
        log::warn!("[CRISIS] Detected {} language in input", c);
    }
    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLibrary;
    use std::path::Path;

    fn library() -> ContentLibrary {
        ContentLibrary::load(Path::new("../config")).unwrap()
    }

    #[test]
    fn test_detects_owning_category() {
        let lib = library();
        let lexicon = &lib.lexicon.crisis;
        assert_eq!(detect(lexicon, "I want to kill myself"), Some(CrisisCategory::Suicide));
        assert_eq!(detect(lexicon, "I want to END MY LIFE"), Some(CrisisCategory::Suicide));
        assert_eq!(detect(lexicon, "sometimes I cut myself"), Some(CrisisCategory::SelfHarm));
        assert_eq!(detect(lexicon, "I am being abused at home"), Some(CrisisCategory::Abuse));
        assert_eq!(detect(lexicon, "I have chest pain"), Some(CrisisCategory::MedicalCrisis));
        assert_eq!(
            detect(lexicon, "I keep Hearing Voices"),
            Some(CrisisCategory::MentalHealthCrisis)
        );
    }

    #[test]
    fn test_every_configured_phrase_detects_its_category() {
        let lib = library();
        let lexicon = &lib.lexicon.crisis;
        for (category, phrase) in lexicon.phrases() {
            let text = format!("lately {} and more", phrase.to_uppercase());
            let detected = detect(lexicon, &text).unwrap();
            // An earlier category may share the phrase; it must never be a later one
            let position = |c| lexicon.labels().position(|l| l == c).unwrap();
            assert!(position(detected) <= position(category), "{}", phrase);
        }
    }

    #[test]
    fn test_no_crisis_language() {
        let lib = library();
        assert_eq!(detect(&lib.lexicon.crisis, "I feel anxious about an exam"), None);
        assert_eq!(detect(&lib.lexicon.crisis, ""), None);
    }

    #[test]
    fn test_first_category_wins_on_overlap() {
        let lib = library();
        assert_eq!(
            detect(&lib.lexicon.crisis, "I want to die and I hurt myself"),
            Some(CrisisCategory::Suicide)
        );
    }

    #[test]
    fn test_respond_uses_dedicated_verses() {
        let lib = library();
        let response = lib.crisis.respond(CrisisCategory::Suicide);
        assert_eq!(response.verses.len(), 2);
        assert_eq!(response.verses[0].reference, "Psalm 34:18");
        assert!(response.resources.iter().any(|r| r.starts_with("988")));
        assert!(!response.prayer.is_empty());
    }

    #[test]
    fn test_respond_falls_back_to_general_verses() {
        let lib = library();
        let response = lib.crisis.respond(CrisisCategory::MedicalCrisis);
        assert_eq!(response.verses, lib.crisis.general_verses().to_vec());
        assert_eq!(response.resources[0], "911 - Emergency Services");
    }

    #[test]
    fn test_category_without_bundle_gets_generic_content() {
        let catalog: CrisisCatalog = ron::from_str::<CrisisFile>(
            r#"(
                bundles: [],
                general_verses: [(reference: "Isaiah 41:10", text: "Fear thou not", translation: "KJV")],
                fallback: (message: "call 911", prayer: "Amen.", resources: ["911"]),
            )"#,
        )
        .unwrap()
        .into();
        let response = catalog.respond(CrisisCategory::Abuse);
        assert_eq!(response.message, "call 911");
        assert_eq!(response.verses.len(), 1);
        assert_eq!(response.category, CrisisCategory::Abuse);
    }
}
