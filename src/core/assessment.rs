use serde::{Deserialize, Serialize};

use crate::core::format::{format_fixed, format_percent};
use crate::core::{HealthClass, NdviSummary};

/// Concern share above which stress is called out as significant.
pub const SEVERE_CONCERN_PCT: f64 = 15.0;
/// Concern share above which the field gets a mild warning.
pub const MILD_CONCERN_PCT: f64 = 5.0;
/// Healthy plus very-healthy share above which the field reads as strong.
pub const STRONG_HEALTH_PCT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Good,
    Warn,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerIcon {
    Alert,
    TrendingUp,
}

impl Tone {
    #[must_use]
    pub fn icon(self) -> BannerIcon {
        match self {
            Tone::Warn => BannerIcon::Alert,
            Tone::Good | Tone::Neutral => BannerIcon::TrendingUp,
        }
    }
}

/// Plain-language verdict shown in the card banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub text: String,
    pub tone: Tone,
}

impl Assessment {
    /// First matching rule wins: severe concern, mild concern, strong health,
    /// then the neutral fallback.
    #[must_use]
    pub fn derive(summary: &NdviSummary) -> Self {
        let concern = summary.concern_zone_pct();
        let combined_good = summary.class_pct().get(HealthClass::Healthy)
            + summary.class_pct().get(HealthClass::VeryHealthy);

        if concern > SEVERE_CONCERN_PCT {
            return Self {
                text: format!(
                    "Significant stress detected. {} of the field is severely stressed and needs attention.",
                    format_percent(concern)
                ),
                tone: Tone::Warn,
            };
        }
        if concern > MILD_CONCERN_PCT {
            return Self {
                text: format!(
                    "Mostly healthy with some concern areas. {} of vegetation is severely stressed.",
                    format_percent(concern)
                ),
                tone: Tone::Warn,
            };
        }
        if combined_good > STRONG_HEALTH_PCT {
            return Self {
                text: format!(
                    "Field is in strong shape. {} of vegetation is healthy or better, with minimal concern zones.",
                    format_percent(combined_good)
                ),
                tone: Tone::Good,
            };
        }
        Self {
            text: format!(
                "Field health is moderate. Mean NDVI of {} with {} in concern zones.",
                format_fixed(summary.mean(), 2),
                format_percent(concern)
            ),
            tone: Tone::Neutral,
        }
    }
}
