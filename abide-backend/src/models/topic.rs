use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Emotional/thematic category driving verse and template selection.
///
/// The set is fixed at compile time; content files can only reference these.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Topic {
    Peace,
    Hope,
    Comfort,
    Strength,
    Love,
    Gratitude,
    Anxiety,
    Loneliness,
    Forgiveness,
    Overwhelmed,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_round_trips_through_str() {
        for topic in Topic::iter() {
            assert_eq!(Topic::from_str(topic.as_str()).unwrap(), topic);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Topic::from_str("Peace").unwrap(), Topic::Peace);
        assert_eq!(Topic::from_str("LONELINESS").unwrap(), Topic::Loneliness);
        assert!(Topic::from_str("joy").is_err());
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Topic::Gratitude).unwrap(), "\"gratitude\"");
    }
}
