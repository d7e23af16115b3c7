//! The nine-dimension analysis vector consumed by hit-probability estimation.
//!
//! Produced by an external content-analysis collaborator and carried over the
//! API as JSON. Every score field is optional; an absent score reads as the
//! 1-10 midpoint (5), so a partially filled or entirely empty vector is
//! neutral rather than invalid. Categorical tags deserialize unknown values
//! into explicit fallback variants instead of failing.

use serde::{Deserialize, Serialize};

/// Midpoint of the 1–10 dimension scale, used when a score is absent.
pub(crate) const NEUTRAL_SCORE: u8 = 5;

/// How a piece of content opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    Curiosity,
    Controversy,
    Surprise,
    Emotion,
    Standard,
    #[serde(other)]
    Unknown,
}

/// The call-to-action style, where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaType {
    CommentPrompt,
    ShareRequest,
    SaveReminder,
    Generic,
    #[serde(other)]
    Unknown,
}

/// Primary emotional trigger identified in the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Surprise,
    Anticipation,
    Anger,
    Fear,
    Sadness,
    Neutral,
    #[serde(other)]
    Unknown,
}

/// A bare 1–10 dimension with no categorical tags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionScore {
    pub score: Option<u8>,
}

impl DimensionScore {
    pub(crate) fn value(self) -> f64 {
        f64::from(self.score.unwrap_or(NEUTRAL_SCORE))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookFactor {
    pub score: Option<u8>,
    #[serde(rename = "type")]
    pub hook_type: Option<HookType>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaFactor {
    pub score: Option<u8>,
    #[serde(rename = "type")]
    pub cta_type: Option<CtaType>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreFactor {
    pub score: Option<u8>,
    pub category: Option<String>,
    /// Set when the genre is currently trend-aligned.
    pub trending: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionFactor {
    pub score: Option<u8>,
    pub primary: Option<Emotion>,
    pub intensity: Option<u8>,
}

/// Nine named analysis dimensions, each a 1–10 score plus categorical tags.
///
/// `Default` yields the fully neutral vector: every score at the midpoint,
/// no bonus-qualifying tags set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisVector {
    pub hook: HookFactor,
    pub cta: CtaFactor,
    pub duration: DimensionScore,
    pub genre: GenreFactor,
    pub emotion: EmotionFactor,
    pub color_tone: DimensionScore,
    pub composition: DimensionScore,
    pub text_overlay: DimensionScore,
    pub music_style: DimensionScore,
}

pub(crate) fn score_or_neutral(score: Option<u8>) -> f64 {
    f64::from(score.unwrap_or(NEUTRAL_SCORE))
}
