/// Text class for a missing score
pub const NO_SCORE_CLASS: &str = "text-gray-500";

/// Background class for a missing score
pub const NO_SCORE_BG_CLASS: &str = "bg-gray-100";

/// Evaluation score bands on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreTier {
    Poor,
    Average,
    Good,
    Excellent,
}

impl ScoreTier {
    /// Band for `score`. Absent, zero and NaN scores have no band.
    pub fn from_score(score: Option<f64>) -> Option<Self> {
        let score = score.filter(|s| *s != 0.0 && !s.is_nan())?;
        Some(if score >= 8.0 {
            ScoreTier::Excellent
        } else if score >= 6.0 {
            ScoreTier::Good
        } else if score >= 4.0 {
            ScoreTier::Average
        } else {
            ScoreTier::Poor
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Poor => "poor",
            ScoreTier::Average => "average",
            ScoreTier::Good => "good",
            ScoreTier::Excellent => "excellent",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            ScoreTier::Poor => "score-poor",
            ScoreTier::Average => "score-average",
            ScoreTier::Good => "score-good",
            ScoreTier::Excellent => "score-excellent",
        }
    }

    pub fn bg_class(&self) -> &'static str {
        match self {
            ScoreTier::Poor => "score-bg-poor",
            ScoreTier::Average => "score-bg-average",
            ScoreTier::Good => "score-bg-good",
            ScoreTier::Excellent => "score-bg-excellent",
        }
    }
}

pub fn score_color(score: Option<f64>) -> &'static str {
    ScoreTier::from_score(score)
        .map(|tier| tier.text_class())
        .unwrap_or(NO_SCORE_CLASS)
}

pub fn score_bg_color(score: Option<f64>) -> &'static str {
    ScoreTier::from_score(score)
        .map(|tier| tier.bg_class())
        .unwrap_or(NO_SCORE_BG_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_zero_scores() {
        assert_eq!(score_color(None), NO_SCORE_CLASS);
        assert_eq!(score_color(Some(0.0)), NO_SCORE_CLASS);
        assert_eq!(score_color(Some(f64::NAN)), NO_SCORE_CLASS);
        assert_eq!(score_bg_color(None), NO_SCORE_BG_CLASS);
        assert_eq!(score_bg_color(Some(0.0)), NO_SCORE_BG_CLASS);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(score_color(Some(8.0)), "score-excellent");
        assert_eq!(score_color(Some(10.0)), "score-excellent");
        assert_eq!(score_color(Some(7.9)), "score-good");
        assert_eq!(score_color(Some(6.0)), "score-good");
        assert_eq!(score_color(Some(5.0)), "score-average");
        assert_eq!(score_color(Some(4.0)), "score-average");
        assert_eq!(score_color(Some(3.5)), "score-poor");
        assert_eq!(score_color(Some(-1.0)), "score-poor");
    }

    #[test]
    fn test_background_classes() {
        assert_eq!(score_bg_color(Some(9.0)), "score-bg-excellent");
        assert_eq!(score_bg_color(Some(6.5)), "score-bg-good");
        assert_eq!(score_bg_color(Some(4.2)), "score-bg-average");
        assert_eq!(score_bg_color(Some(1.0)), "score-bg-poor");
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(ScoreTier::Excellent > ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(Some(4.0)).map(|t| t.as_str()), Some("average"));
    }
}
