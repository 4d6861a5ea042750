use serde::{Deserialize, Serialize};

/// A single scripture passage. Identified by reference + translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub reference: String,
    pub text: String,
    pub translation: String,
}

impl Verse {
    pub fn same_passage(&self, other: &Verse) -> bool {
        self.reference == other.reference && self.translation == other.translation
    }
}
