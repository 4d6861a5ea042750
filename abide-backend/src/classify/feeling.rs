//! Keyword topic classification for free-text feelings

use crate::content::KeywordTable;
use crate::models::Topic;

/// Topic used when no keyword matches, including for empty input
pub const DEFAULT_TOPIC: Topic = Topic::Comfort;

/// Classify `text` into a topic. Deterministic: first lexicon entry with a
/// matching phrase wins, else [`DEFAULT_TOPIC`].
pub fn classify(lexicon: &KeywordTable<Topic>, text: &str) -> Topic {
    lexicon.first_match(text).unwrap_or(DEFAULT_TOPIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLibrary;
    use std::path::Path;

    fn lexicon() -> KeywordTable<Topic> {
        ContentLibrary::load(Path::new("../config")).unwrap().lexicon.feeling
    }

    #[test]
    fn test_classifies_by_keyword() {
        let lexicon = lexicon();
        assert_eq!(classify(&lexicon, "I am so lonely and isolated"), Topic::Loneliness);
        assert_eq!(classify(&lexicon, "I feel anxious about an exam"), Topic::Anxiety);
        assert_eq!(classify(&lexicon, "Feeling very CALM tonight"), Topic::Peace);
        assert_eq!(classify(&lexicon, "so thankful for my family"), Topic::Gratitude);
        assert_eq!(classify(&lexicon, "completely exhausted"), Topic::Overwhelmed);
    }

    #[test]
    fn test_overlap_resolved_by_lexicon_order() {
        let lexicon = lexicon();
        // "stressed" is listed under both anxiety and overwhelmed
        assert_eq!(classify(&lexicon, "stressed and overwhelmed"), Topic::Anxiety);
        // substring matching: "hopeless" contains "hope"
        assert_eq!(classify(&lexicon, "I feel hopeless"), Topic::Hope);
    }

    #[test]
    fn test_default_topic() {
        let lexicon = lexicon();
        assert_eq!(classify(&lexicon, ""), Topic::Comfort);
        assert_eq!(classify(&lexicon, "just an ordinary tuesday"), Topic::Comfort);
    }

    #[test]
    fn test_small_fixture_lexicon() {
        let lexicon = KeywordTable::from(vec![(Topic::Forgiveness, vec!["sorry".to_string()])]);
        assert_eq!(classify(&lexicon, "I'm sorry"), Topic::Forgiveness);
        assert_eq!(classify(&lexicon, "I am so lonely"), DEFAULT_TOPIC);
    }
}
