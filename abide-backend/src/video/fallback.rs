//! Static fallback videos per theme

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::VideoDescriptor;

#[derive(Debug, Clone, Deserialize)]
pub struct ThemedVideo {
    pub theme: String,
    pub video: VideoDescriptor,
}

/// Raw layout of `videos.ron`
#[derive(Debug, Deserialize)]
pub struct FallbackFile {
    pub default_theme: String,
    pub fallbacks: Vec<ThemedVideo>,
}

#[derive(Debug, Clone)]
pub struct FallbackVideos {
    fallbacks: Vec<ThemedVideo>,
    default_index: usize,
}

impl TryFrom<FallbackFile> for FallbackVideos {
    type Error = ConfigError;

    fn try_from(file: FallbackFile) -> Result<Self, Self::Error> {
        let default_index = file
            .fallbacks
            .iter()
            .position(|f| f.theme.eq_ignore_ascii_case(&file.default_theme))
            .ok_or_else(|| {
                ConfigError::Content(format!(
                    "default fallback video theme '{}' is not defined",
                    file.default_theme
                ))
            })?;
        Ok(Self {
            fallbacks: file.fallbacks,
            default_index,
        })
    }
}

impl FallbackVideos {
    /// Fallback for `theme` (case-insensitive), else the default theme's
    pub fn for_theme(&self, theme: &str) -> &VideoDescriptor {
        let theme = theme.trim();
        self.fallbacks
            .iter()
            .find(|f| f.theme.eq_ignore_ascii_case(theme))
            .map(|f| &f.video)
            .unwrap_or(&self.fallbacks[self.default_index].video)
    }
}
