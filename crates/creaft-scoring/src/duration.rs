//! Codec for the platform's compact duration encoding.
//!
//! The encoding is `PT#H#M#S` with every component optional and no
//! separators (`PT1H30M`, `PT45S`, `PT0S`). Parsing is deliberately lenient:
//! a code with no recognizable components decodes to 0 seconds rather than
//! failing, so a corrupt duration never poisons a collection batch.

use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Decode a compact duration code into seconds.
///
/// Missing components count as zero; malformed input decodes to 0.
#[must_use]
pub fn parse_duration(code: &str) -> i64 {
    let Some(caps) = DURATION_RE.captures(code) else {
        return 0;
    };
    let component = |index: usize| -> i64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };
    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// Render seconds as `H:MM:SS` (one hour or more) or `M:SS`.
///
/// Minutes and seconds are zero-padded to two digits; hours are not padded.
/// Negative input renders as `0:00`.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let total = seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
