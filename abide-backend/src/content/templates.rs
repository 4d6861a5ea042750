//! Reflection/prayer templates for feelings and devotions

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::models::Topic;

#[derive(Debug, Clone, Deserialize)]
pub struct FeelingTemplate {
    pub topic: Topic,
    pub reflection: String,
    pub prayer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevotionTemplate {
    pub topic: Topic,
    pub opening_prayer: String,
    pub reflection: String,
    pub action_steps: Vec<String>,
    pub closing_prayer: String,
}

/// Raw layout of `templates.ron`
#[derive(Debug, Deserialize)]
pub struct TemplateFile {
    pub default_feeling: Topic,
    pub default_devotion: Topic,
    pub feeling: Vec<FeelingTemplate>,
    pub devotion: Vec<DevotionTemplate>,
}

/// Pure lookup over templates with a default-topic fallback
#[derive(Debug, Clone)]
pub struct TemplateStore {
    feeling: HashMap<Topic, FeelingTemplate>,
    devotion: HashMap<Topic, DevotionTemplate>,
    /// Devotion topics in file order, used for random theme selection
    devotion_order: Vec<Topic>,
    default_feeling: Topic,
    default_devotion: Topic,
}

impl TryFrom<TemplateFile> for TemplateStore {
    type Error = ConfigError;

    fn try_from(file: TemplateFile) -> Result<Self, Self::Error> {
        let devotion_order: Vec<Topic> = file.devotion.iter().map(|t| t.topic).collect();
        let feeling: HashMap<_, _> = file.feeling.into_iter().map(|t| (t.topic, t)).collect();
        let devotion: HashMap<_, _> = file.devotion.into_iter().map(|t| (t.topic, t)).collect();

        if !feeling.contains_key(&file.default_feeling) {
            return Err(ConfigError::Content(format!(
                "default feeling template '{}' is not defined",
                file.default_feeling
            )));
        }
        if !devotion.contains_key(&file.default_devotion) {
            return Err(ConfigError::Content(format!(
                "default devotion template '{}' is not defined",
                file.default_devotion
            )));
        }
        if devotion_order.len() != devotion.len() {
            return Err(ConfigError::Content("duplicate devotion template topic".to_string()));
        }

        Ok(Self {
            feeling,
            devotion,
            devotion_order,
            default_feeling: file.default_feeling,
            default_devotion: file.default_devotion,
        })
    }
}

impl TemplateStore {
    pub fn feeling_template(&self, topic: Option<Topic>) -> &FeelingTemplate {
        topic
            .and_then(|t| self.feeling.get(&t))
            .unwrap_or_else(|| &self.feeling[&self.default_feeling])
    }

    pub fn devotion_template(&self, topic: Option<Topic>) -> &DevotionTemplate {
        topic
            .and_then(|t| self.devotion.get(&t))
            .unwrap_or_else(|| &self.devotion[&self.default_devotion])
    }

    /// Themes that have their own devotion template
    pub fn devotion_topics(&self) -> &[Topic] {
        &self.devotion_order
    }

    pub fn default_feeling(&self) -> Topic {
        self.default_feeling
    }

    pub fn default_devotion(&self) -> Topic {
        self.default_devotion
    }
}
