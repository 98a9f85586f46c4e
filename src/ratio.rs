//! Percentage helper shared by the gap analysis and projection summaries

/// `part` as a percentage of `whole`; None unless `whole` is positive
pub fn pct_of(part: f64, whole: f64) -> Option<f64> {
    if whole > 0.0 {
        Some(part / whole * 100.0)
    } else {
        None
    }
}

/// `part / whole`; None unless `whole` is positive
pub fn multiple_of(part: f64, whole: f64) -> Option<f64> {
    if whole > 0.0 {
        Some(part / whole)
    } else {
        None
    }
}
