//! Scoring core for CREAFT.
//!
//! Pure, synchronous heuristics over collected content: the duration codec,
//! the viral potential score, the time-decayed buzz score, trending pattern
//! aggregation, and the hit-probability estimator. Every function here is a
//! total function of its inputs (plus, where noted, a caller-supplied clock
//! instant): no I/O, no shared state, no errors surfaced to callers.
//! Malformed or missing input degrades to zero/neutral values.

pub mod analysis;
pub mod buzz;
pub mod duration;
pub mod hit;
pub mod patterns;
pub mod viral;

mod round;

pub use analysis::{
    AnalysisVector, CtaFactor, CtaType, DimensionScore, Emotion, EmotionFactor, GenreFactor,
    HookFactor, HookType,
};
pub use buzz::{buzz_score, completion_rate, engagement_rate, recency_factor, view_rate};
pub use duration::{format_duration, parse_duration};
pub use hit::{hit_probability, HitBreakdown};
pub use patterns::{analyze_trending_patterns, TrendingSummary};
pub use viral::{viral_score, ViralPotential, ViralStatus};
