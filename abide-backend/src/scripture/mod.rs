//! Scripture content: verse provider selection and the static verse store

mod selector;

pub use selector::{VerseFile, VerseSelector};

use crate::error::ConfigError;

/// Available verse providers. Only public domain translations ship today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptureProvider {
    PublicDomain,
}

impl ScriptureProvider {
    /// Resolve the configured provider name. Licensed providers are known but
    /// not available, and any other name is rejected rather than substituted.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "public_domain" => Ok(Self::PublicDomain),
            "esv" => Err(ConfigError::Unsupported(
                "ESV provider (requires licensing)".to_string(),
            )),
            "niv" => Err(ConfigError::Unsupported(
                "NIV provider (requires licensing)".to_string(),
            )),
            other => Err(ConfigError::Unsupported(format!("Bible provider '{}'", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicDomain => "public_domain",
        }
    }

    pub fn translations(&self) -> &'static [&'static str] {
        match self {
            Self::PublicDomain => &["KJV", "WEB"],
        }
    }

    pub fn is_translation_licensed(&self, translation: &str) -> bool {
        self.translations()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(translation.trim()))
    }
}
