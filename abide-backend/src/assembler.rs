//! Response assembly for `/feel` and `/devotion`
//!
//! Crisis screening always runs before classification. Crisis responses are
//! never persisted; every other response is written before it is returned
//! when the caller supplied a user id.

use rand::seq::SliceRandom;
use std::str::FromStr;
use std::sync::Arc;

use crate::classify::{crisis, feeling, CrisisCategory};
use crate::config::VideoConfig;
use crate::content::ContentLibrary;
use crate::db::EntryStore;
use crate::error::AppError;
use crate::models::{
    DevotionPlan, DevotionReply, DevotionRequest, DevotionResponse, EntryType, FeelingRequest,
    FeelingResponse, NewEntry, Topic, CRISIS_TOPIC,
};
use crate::video::VideoSelector;

const FEELING_VERSES: usize = 2;
const DEVOTION_VERSES: usize = 3;

pub struct ResponseAssembler {
    content: Arc<ContentLibrary>,
    videos: VideoSelector,
    max_video_duration: u32,
    min_video_duration: u32,
}

impl ResponseAssembler {
    pub fn new(content: Arc<ContentLibrary>, videos: VideoSelector, config: &VideoConfig) -> Self {
        Self {
            content,
            videos,
            max_video_duration: config.max_duration,
            min_video_duration: config.min_duration,
        }
    }

    /// Safety response if `text` contains crisis language
    pub fn screen(&self, text: &str) -> Option<FeelingResponse> {
        crisis::detect(&self.content.lexicon.crisis, text).map(|c| self.crisis_response(c))
    }

    fn crisis_response(&self, category: CrisisCategory) -> FeelingResponse {
        let bundle = self.content.crisis.respond(category);
        FeelingResponse {
            verses: bundle.verses.clone(),
            reflection: String::new(),
            prayer: bundle.prayer,
            topic: CRISIS_TOPIC.to_string(),
            crisis_detected: true,
            crisis_type: Some(category),
            message: Some(bundle.message),
            supportive_verses: Some(bundle.verses),
            resources: Some(bundle.resources),
        }
    }

    pub fn process_feeling(&self, text: &str) -> FeelingResponse {
        if let Some(response) = self.screen(text) {
            return response;
        }

        let topic = feeling::classify(&self.content.lexicon.feeling, text);
        let verses = self.content.verses.sample(topic.as_str(), FEELING_VERSES);
        let template = self.content.templates.feeling_template(Some(topic));

        FeelingResponse {
            verses,
            reflection: template.reflection.clone(),
            prayer: template.prayer.clone(),
            topic: topic.to_string(),
            crisis_detected: false,
            crisis_type: None,
            message: None,
            supportive_verses: None,
            resources: None,
        }
    }

    /// Theme precedence: explicit theme, then the topic of `text`, then a
    /// random theme that has its own devotion template.
    pub async fn generate_devotion(&self, theme: Option<&str>, text: Option<&str>) -> DevotionResponse {
        let theme = match (normalize(theme), normalize(text)) {
            (Some(theme), _) => theme,
            (None, Some(text)) => feeling::classify(&self.content.lexicon.feeling, &text).to_string(),
            (None, None) => self.random_theme().to_string(),
        };

        let scriptures = self.content.verses.sample(&theme, DEVOTION_VERSES);
        let template = self
            .content
            .templates
            .devotion_template(Topic::from_str(&theme).ok());
        let selection = self
            .videos
            .select(&theme, self.max_video_duration, self.min_video_duration)
            .await;
        log::debug!("[devotion] '{}' video from {:?}", theme, selection.source);

        DevotionResponse {
            plan: DevotionPlan {
                opening_prayer: template.opening_prayer.clone(),
                scriptures,
                reflection: template.reflection.clone(),
                action_steps: template.action_steps.clone(),
                closing_prayer: template.closing_prayer.clone(),
            },
            video: selection.video,
            theme,
        }
    }

    fn random_theme(&self) -> Topic {
        let templates = &self.content.templates;
        templates
            .devotion_topics()
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_else(|| templates.default_devotion())
    }

    /// `/feel`: assemble, then persist for known users
    pub fn feel(&self, req: &FeelingRequest, store: &dyn EntryStore) -> Result<FeelingResponse, AppError> {
        let response = self.process_feeling(&req.text);

        if let Some(user_id) = req.user_id {
            if !response.crisis_detected {
                store.create_entry(NewEntry {
                    user_id: Some(user_id),
                    entry_type: EntryType::Feel,
                    topic: response.topic.clone(),
                    input_text: normalize_text(Some(&req.text)),
                    response: serde_json::to_value(&response)?,
                })?;
            }
        }

        Ok(response)
    }

    /// `/devotion`: screen any text, assemble, then persist for known users
    pub async fn devote(
        &self,
        req: &DevotionRequest,
        store: &dyn EntryStore,
    ) -> Result<DevotionReply, AppError> {
        if let Some(crisis) = req.text.as_deref().and_then(|t| self.screen(t)) {
            return Ok(DevotionReply::Crisis(crisis));
        }

        let response = self
            .generate_devotion(req.theme.as_deref(), req.text.as_deref())
            .await;

        if let Some(user_id) = req.user_id {
            store.create_entry(NewEntry {
                user_id: Some(user_id),
                entry_type: EntryType::Devotion,
                topic: response.theme.clone(),
                input_text: normalize_text(req.text.as_deref()),
                response: serde_json::to_value(&response)?,
            })?;
        }

        Ok(DevotionReply::Plan(response))
    }
}

/// Trimmed and lowercased; blank is treated as absent
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn normalize_text(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(|v| v.to_string())
}
