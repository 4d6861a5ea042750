//! Request and response bodies for the feel/devotion endpoints

use serde::{Deserialize, Serialize};

use super::{Verse, VideoDescriptor};
use crate::classify::CrisisCategory;

/// Topic label reported for crisis responses
pub const CRISIS_TOPIC: &str = "crisis_support";

#[derive(Debug, Clone, Deserialize)]
pub struct FeelingRequest {
    #[serde(default)]
    pub text: String,
    pub user_id: Option<i64>,
}

/// Response envelope for `/feel`. Crisis responses reuse it with an empty
/// reflection and the safety fields filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeelingResponse {
    pub verses: Vec<Verse>,
    pub reflection: String,
    pub prayer: String,
    pub topic: String,
    pub crisis_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_type: Option<CrisisCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supportive_verses: Option<Vec<Verse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevotionRequest {
    pub theme: Option<String>,
    pub text: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevotionPlan {
    pub opening_prayer: String,
    pub scriptures: Vec<Verse>,
    pub reflection: String,
    pub action_steps: Vec<String>,
    pub closing_prayer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevotionResponse {
    pub plan: DevotionPlan,
    pub video: VideoDescriptor,
    pub theme: String,
}

/// What `/devotion` answers with: a plan, or a safety response when the
/// accompanying text carries crisis language.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DevotionReply {
    Plan(DevotionResponse),
    Crisis(FeelingResponse),
}
