use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Vegetation health buckets, declared worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthClass {
    #[serde(rename = "Severely Stressed")]
    SeverelyStressed,
    Stressed,
    Moderate,
    Healthy,
    #[serde(rename = "Very Healthy")]
    VeryHealthy,
}

impl HealthClass {
    /// Stacked-bar order, left to right.
    pub const WORST_TO_BEST: [HealthClass; 5] = [
        HealthClass::SeverelyStressed,
        HealthClass::Stressed,
        HealthClass::Moderate,
        HealthClass::Healthy,
        HealthClass::VeryHealthy,
    ];

    /// Legend order.
    pub const BEST_TO_WORST: [HealthClass; 5] = [
        HealthClass::VeryHealthy,
        HealthClass::Healthy,
        HealthClass::Moderate,
        HealthClass::Stressed,
        HealthClass::SeverelyStressed,
    ];

    /// Key used by the statistics pipeline in `class_pct`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            HealthClass::SeverelyStressed => "Severely Stressed",
            HealthClass::Stressed => "Stressed",
            HealthClass::Moderate => "Moderate",
            HealthClass::Healthy => "Healthy",
            HealthClass::VeryHealthy => "Very Healthy",
        }
    }

    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            HealthClass::SeverelyStressed => "Severe",
            other => other.key(),
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::WORST_TO_BEST
            .into_iter()
            .find(|class| class.key() == key)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Percentage of analyzed area per health class. Absent classes read as 0.
///
/// Values are kept literally: they are not renormalized when their sum drifts
/// away from 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassPercentages {
    slots: [f64; 5],
}

impl ClassPercentages {
    #[must_use]
    pub fn get(&self, class: HealthClass) -> f64 {
        self.slots[class.slot()]
    }

    pub fn set(&mut self, class: HealthClass, percent: f64) {
        self.slots[class.slot()] = percent;
    }

    #[must_use]
    pub fn with(mut self, class: HealthClass, percent: f64) -> Self {
        self.set(class, percent);
        self
    }

    /// Worst-to-best `(class, percent)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (HealthClass, f64)> + '_ {
        HealthClass::WORST_TO_BEST
            .into_iter()
            .map(|class| (class, self.get(class)))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.slots.iter().sum()
    }

    fn from_keyed(map: &IndexMap<String, f64>) -> ChartResult<Self> {
        let mut out = Self::default();
        for (key, percent) in map {
            let class = HealthClass::from_key(key).ok_or_else(|| {
                ChartError::InvalidSummary(format!("unknown health class `{key}` in class_pct"))
            })?;
            out.set(class, *percent);
        }
        Ok(out)
    }

    fn to_keyed(self) -> IndexMap<String, f64> {
        self.iter()
            .map(|(class, percent)| (class.key().to_owned(), percent))
            .collect()
    }
}

/// Unvalidated summary exactly as the statistics pipeline writes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawNdviSummary {
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    #[serde(default)]
    pub class_pct: IndexMap<String, f64>,
    pub concern_zone_pct: f64,
}

/// Validated NDVI statistics snapshot for one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNdviSummary", into = "RawNdviSummary")]
pub struct NdviSummary {
    count: u64,
    mean: f64,
    median: f64,
    std: f64,
    min: f64,
    max: f64,
    p10: f64,
    p25: f64,
    p75: f64,
    p90: f64,
    class_pct: ClassPercentages,
    concern_zone_pct: f64,
}

impl NdviSummary {
    /// The only way to obtain a summary.
    ///
    /// Checks that every statistic is finite, `std >= 0`, the percentiles are
    /// ordered `min <= p10 <= p25 <= median <= p75 <= p90 <= max`, and every
    /// percentage (per class and concern zone) lies in `[0, 100]`.
    pub fn new(raw: RawNdviSummary) -> ChartResult<Self> {
        let statistics = [
            ("mean", raw.mean),
            ("median", raw.median),
            ("std", raw.std),
            ("min", raw.min),
            ("max", raw.max),
            ("p10", raw.p10),
            ("p25", raw.p25),
            ("p75", raw.p75),
            ("p90", raw.p90),
            ("concern_zone_pct", raw.concern_zone_pct),
        ];
        if let Some((name, _)) = statistics.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ChartError::InvalidSummary(format!("`{name}` must be finite")));
        }
        if raw.std < 0.0 {
            return Err(ChartError::InvalidSummary(format!(
                "`std` must be >= 0, got {}",
                raw.std
            )));
        }

        let ordered = [
            ("min", raw.min),
            ("p10", raw.p10),
            ("p25", raw.p25),
            ("median", raw.median),
            ("p75", raw.p75),
            ("p90", raw.p90),
            ("max", raw.max),
        ];
        if let Some(pair) = ordered.windows(2).find(|pair| pair[0].1 > pair[1].1) {
            return Err(ChartError::InvalidSummary(format!(
                "percentiles out of order: {}={} exceeds {}={}",
                pair[0].0, pair[0].1, pair[1].0, pair[1].1
            )));
        }

        let class_pct = ClassPercentages::from_keyed(&raw.class_pct)?;
        for (class, percent) in class_pct.iter() {
            ensure_percentage(class.key(), percent)?;
        }
        ensure_percentage("concern_zone_pct", raw.concern_zone_pct)?;

        Ok(Self {
            count: raw.count,
            mean: raw.mean,
            median: raw.median,
            std: raw.std,
            min: raw.min,
            max: raw.max,
            p10: raw.p10,
            p25: raw.p25,
            p75: raw.p75,
            p90: raw.p90,
            class_pct,
            concern_zone_pct: raw.concern_zone_pct,
        })
    }

    /// Parses and validates a summary document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: RawNdviSummary = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidSummary(format!("failed to read summary fields: {e}"))
        })?;
        Self::new(raw)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize summary: {e}")))
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn median(&self) -> f64 {
        self.median
    }

    #[must_use]
    pub fn std(&self) -> f64 {
        self.std
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn p10(&self) -> f64 {
        self.p10
    }

    #[must_use]
    pub fn p25(&self) -> f64 {
        self.p25
    }

    #[must_use]
    pub fn p75(&self) -> f64 {
        self.p75
    }

    #[must_use]
    pub fn p90(&self) -> f64 {
        self.p90
    }

    #[must_use]
    pub fn class_pct(&self) -> &ClassPercentages {
        &self.class_pct
    }

    #[must_use]
    pub fn concern_zone_pct(&self) -> f64 {
        self.concern_zone_pct
    }

    /// `p75 - p25`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

impl TryFrom<RawNdviSummary> for NdviSummary {
    type Error = ChartError;

    fn try_from(raw: RawNdviSummary) -> ChartResult<Self> {
        Self::new(raw)
    }
}

impl From<NdviSummary> for RawNdviSummary {
    fn from(summary: NdviSummary) -> Self {
        Self {
            count: summary.count,
            mean: summary.mean,
            median: summary.median,
            std: summary.std,
            min: summary.min,
            max: summary.max,
            p10: summary.p10,
            p25: summary.p25,
            p75: summary.p75,
            p90: summary.p90,
            class_pct: summary.class_pct.to_keyed(),
            concern_zone_pct: summary.concern_zone_pct,
        }
    }
}

fn ensure_percentage(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ChartError::InvalidSummary(format!(
            "`{name}` must be a percentage in [0, 100], got {value}"
        )))
    }
}
