//! Shared numeric helpers for the scoring pipelines.

/// Round to two decimals — the precision every published score uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
