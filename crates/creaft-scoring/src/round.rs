//! Decimal rounding helpers shared across the scoring modules.

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(2.4367) - 2.44).abs() < f64::EPSILON);
        assert!((round2(0.0) - 0.0).abs() < f64::EPSILON);
        // 2.405_f64 sits just below the exact half, so it rounds down.
        assert!((round2(2.405) - 2.4).abs() < f64::EPSILON);
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert!((round1(62.25) - 62.3).abs() < f64::EPSILON);
    }
}
