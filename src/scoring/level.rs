//! Readiness levels derived from the overall score.

use serde::Serialize;

/// Readiness tier derived from an overall composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessLevel {
    /// 0-30
    Dormant,
    /// 31-60
    Aware,
    /// 61-85
    Rise,
    /// 86-100
    Ready,
}

impl ReadinessLevel {
    /// Level for a score. Upper bounds are inclusive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() || score <= 30.0 {
            Self::Dormant
        } else if score <= 60.0 {
            Self::Aware
        } else if score <= 85.0 {
            Self::Rise
        } else {
            Self::Ready
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dormant => "AI Dormant",
            Self::Aware => "AI Aware",
            Self::Rise => "AI Rise",
            Self::Ready => "AI Ready",
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Dormant => "Little or no groundwork for AI adoption yet",
            Self::Aware => "Aware of AI opportunities, foundations still forming",
            Self::Rise => "Foundations in place, scaling AI initiatives",
            Self::Ready => "Organization is positioned to adopt AI at scale",
        }
    }

    /// Inclusive score range as `(low, high)`.
    #[must_use]
    pub const fn range(&self) -> (u8, u8) {
        match self {
            Self::Dormant => (0, 30),
            Self::Aware => (31, 60),
            Self::Rise => (61, 85),
            Self::Ready => (86, 100),
        }
    }
}

impl std::fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(ReadinessLevel::from_score(0.0), ReadinessLevel::Dormant);
        assert_eq!(ReadinessLevel::from_score(30.0), ReadinessLevel::Dormant);
        assert_eq!(ReadinessLevel::from_score(30.1), ReadinessLevel::Aware);
        assert_eq!(ReadinessLevel::from_score(60.0), ReadinessLevel::Aware);
        assert_eq!(ReadinessLevel::from_score(85.0), ReadinessLevel::Rise);
        assert_eq!(ReadinessLevel::from_score(85.5), ReadinessLevel::Ready);
        assert_eq!(ReadinessLevel::from_score(100.0), ReadinessLevel::Ready);
    }

    #[test]
    fn test_nan_is_dormant() {
        assert_eq!(ReadinessLevel::from_score(f64::NAN), ReadinessLevel::Dormant);
    }

    #[test]
    fn test_label() {
        assert_eq!(ReadinessLevel::Rise.to_string(), "AI Rise");
        assert_eq!(ReadinessLevel::Ready.range(), (86, 100));
    }
}
