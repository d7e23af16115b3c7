//! Hit-probability estimation from an analysis vector and posting time.
//!
//! Six weighted sub-scores (hook, CTA, timing, genre, emotion, visual)
//! each independently capped, summed around a 50-point baseline, and clamped
//! to [0, 100]. The caps sum to exactly 100 (25+15+10+20+15+15), so a fully
//! maxed vector lands on 100.0 and the fully neutral vector on 50.0.
//!
//! This is a total computation: absent scores read as the midpoint, an
//! absent timestamp reads as neutral timing, and nothing here can fail.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::Serialize;

use crate::analysis::{score_or_neutral, AnalysisVector, CtaType, Emotion, HookType};
use crate::round::round1;

const PEAK_HOURS: [u32; 8] = [6, 7, 8, 12, 13, 19, 20, 21];
const SECONDARY_HOURS: [u32; 9] = [9, 10, 11, 14, 15, 16, 17, 18, 22];

/// Per-dimension terms plus the final probability.
#[derive(Debug, Clone, Serialize)]
pub struct HitBreakdown {
    pub hook: f64,
    pub cta: f64,
    pub timing: f64,
    pub genre: f64,
    pub emotion: f64,
    pub visual: f64,
    /// Final probability in [0, 100], 1-decimal rounded.
    pub probability: f64,
}

impl HitBreakdown {
    /// Score each dimension and combine.
    #[must_use]
    pub fn compute(vector: &AnalysisVector, published_at: Option<DateTime<Utc>>) -> Self {
        let hook = hook_term(vector);
        let cta = cta_term(vector);
        let timing = timing_term(published_at);
        let genre = genre_term(vector);
        let emotion = emotion_term(vector);
        let visual = visual_term(vector);

        // The 50-point baseline is added and then subtracted; it cancels
        // today but the documented arithmetic is kept as-is.
        let probability =
            (50.0 + hook + cta + timing + genre + emotion + visual - 50.0).clamp(0.0, 100.0);

        HitBreakdown {
            hook,
            cta,
            timing,
            genre,
            emotion,
            visual,
            probability: round1(probability),
        }
    }
}

/// Estimate the hit probability in [0, 100], 1-decimal rounded.
#[must_use]
pub fn hit_probability(vector: &AnalysisVector, published_at: Option<DateTime<Utc>>) -> f64 {
    HitBreakdown::compute(vector, published_at).probability
}

/// Hook strength: `score * 2.5`, +5 for curiosity/controversy/surprise, cap 25.
fn hook_term(vector: &AnalysisVector) -> f64 {
    let mut term = score_or_neutral(vector.hook.score) * 2.5;
    if matches!(
        vector.hook.hook_type,
        Some(HookType::Curiosity | HookType::Controversy | HookType::Surprise)
    ) {
        term += 5.0;
    }
    term.min(25.0)
}

/// CTA strength: `score * 1.5`, +3 for engagement-driving CTA types, cap 15.
fn cta_term(vector: &AnalysisVector) -> f64 {
    let mut term = score_or_neutral(vector.cta.score) * 1.5;
    if matches!(
        vector.cta.cta_type,
        Some(CtaType::CommentPrompt | CtaType::ShareRequest | CtaType::SaveReminder)
    ) {
        term += 3.0;
    }
    term.min(15.0)
}

/// Posting-time quality from hour-of-day and weekday alone, cap 10.
///
/// Peak hours score 8, secondary hours 6, the rest 4; weekends add 2.
/// Without a timestamp the term is the neutral 5.
fn timing_term(published_at: Option<DateTime<Utc>>) -> f64 {
    let Some(published_at) = published_at else {
        return 5.0;
    };

    let hour = published_at.hour();
    let mut term: f64 = if PEAK_HOURS.contains(&hour) {
        8.0
    } else if SECONDARY_HOURS.contains(&hour) {
        6.0
    } else {
        4.0
    };

    if matches!(published_at.weekday(), Weekday::Sat | Weekday::Sun) {
        term += 2.0;
    }

    term.min(10.0)
}

/// Genre/trend alignment: `score * 2`, +5 when trend-flagged, cap 20.
fn genre_term(vector: &AnalysisVector) -> f64 {
    let mut term = score_or_neutral(vector.genre.score) * 2.0;
    if vector.genre.trending {
        term += 5.0;
    }
    term.min(20.0)
}

/// Emotional resonance: `score * 1.5`, +3 for high-engagement emotions or
/// +2 for anger/fear (never both), cap 15.
fn emotion_term(vector: &AnalysisVector) -> f64 {
    let mut term = score_or_neutral(vector.emotion.score) * 1.5;
    match vector.emotion.primary {
        Some(Emotion::Joy | Emotion::Surprise | Emotion::Anticipation) => term += 3.0,
        Some(Emotion::Anger | Emotion::Fear) => term += 2.0,
        _ => {}
    }
    term.min(15.0)
}

/// Visual quality: `(composition + color_tone) * 0.75`, cap 15.
fn visual_term(vector: &AnalysisVector) -> f64 {
    ((vector.composition.value() + vector.color_tone.value()) * 0.75).min(15.0)
}
