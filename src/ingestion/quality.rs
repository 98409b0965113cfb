//! Data-completeness quality score.
//!
//! The score only ever boosts relevance; it never filters a record out.

use crate::ingestion::types::RawToolRecord;

pub const MAX_QUALITY_SCORE: f64 = 100.0;

const LOGO_POINTS: f64 = 20.0;
const SCREENSHOT_POINTS: f64 = 30.0;
const DESCRIPTION_POINTS: f64 = 10.0;
const SCRAPED_TEXT_POINTS: f64 = 40.0;

const MIN_URL_LEN: usize = 5;
const MIN_DESCRIPTION_LEN: usize = 50;
const MIN_SCRAPED_TEXT_LEN: usize = 200;

/// Marker left behind by scrapes that never completed.
const SCRAPE_PLACEHOLDER: &str = "attempting...";

/// Completeness signals for a single tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualitySignals<'a> {
    pub logo_url: Option<&'a str>,
    pub screenshot_url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub scraped_text: Option<&'a str>,
}

impl<'a> From<&'a RawToolRecord> for QualitySignals<'a> {
    fn from(raw: &'a RawToolRecord) -> Self {
        Self {
            logo_url: raw.logo_url.as_deref(),
            screenshot_url: raw.screenshot_url.as_deref(),
            description: raw.description.as_deref(),
            scraped_text: raw.scraped_text.as_deref(),
        }
    }
}

/// Sum the completeness points for `signals`. Always within [0, 100].
pub fn compute_quality_score(signals: &QualitySignals<'_>) -> f64 {
    let longer_than = |value: Option<&str>, min: usize| {
        value.map(|v| v.chars().count() > min).unwrap_or(false)
    };

    let mut score = 0.0;

    if longer_than(signals.logo_url, MIN_URL_LEN) {
        score += LOGO_POINTS;
    }
    if longer_than(signals.screenshot_url, MIN_URL_LEN) {
        score += SCREENSHOT_POINTS;
    }
    if longer_than(signals.description, MIN_DESCRIPTION_LEN) {
        score += DESCRIPTION_POINTS;
    }
    if let Some(text) = signals.scraped_text {
        if text.chars().count() > MIN_SCRAPED_TEXT_LEN
            && !text.to_lowercase().contains(SCRAPE_PLACEHOLDER)
        {
            score += SCRAPED_TEXT_POINTS;
        }
    }

    score
}

/// Clamp a supplied score into [0, 100]; NaN and infinities become 0.
pub fn normalize_quality_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_QUALITY_SCORE)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signals_score_zero() {
        assert_eq!(compute_quality_score(&QualitySignals::default()), 0.0);
    }

    #[test]
    fn test_full_signals_score_hundred() {
        let description = "d".repeat(51);
        let scraped = "s".repeat(201);
        let signals = QualitySignals {
            logo_url: Some("https://x.io/logo.png"),
            screenshot_url: Some("https://x.io/shot.png"),
            description: Some(&description),
            scraped_text: Some(&scraped),
        };

        assert_eq!(compute_quality_score(&signals), 100.0);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let description = "d".repeat(50);
        let scraped = "s".repeat(200);
        let signals = QualitySignals {
            logo_url: Some("a.png"),
            screenshot_url: Some("b.png"),
            description: Some(&description),
            scraped_text: Some(&scraped),
        };

        assert_eq!(compute_quality_score(&signals), 0.0);
    }

    #[test]
    fn test_placeholder_scrape_earns_nothing() {
        let scraped = format!("Attempting... {}", "x".repeat(300));
        let signals = QualitySignals {
            scraped_text: Some(&scraped),
            ..Default::default()
        };

        assert_eq!(compute_quality_score(&signals), 0.0);
    }

    #[test]
    fn test_normalize_quality_score() {
        assert_eq!(normalize_quality_score(-5.0), 0.0);
        assert_eq!(normalize_quality_score(150.0), 100.0);
        assert_eq!(normalize_quality_score(42.5), 42.5);
        assert_eq!(normalize_quality_score(f64::NAN), 0.0);
        assert_eq!(normalize_quality_score(f64::INFINITY), 0.0);
    }
}
