//! Admin upload boundary for `ndvi_statistics.json` documents.
//!
//! Syntax errors, missing fields and invalid statistics are reported here,
//! so the card only ever receives a validated [`NdviSummary`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::{format_count, format_fixed, format_percent, parse_captured_at};
use crate::core::{NdviSummary, RawNdviSummary};
use crate::error::{ChartError, ChartResult};

use super::{CONCERN_CARD_WARN_PCT, StatHighlight};

/// Headline numbers shown under the upload field before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UploadPreview {
    pub count: u64,
    pub mean: f64,
    pub concern_zone_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewField {
    pub label: String,
    pub value: String,
    pub highlight: Option<StatHighlight>,
}

impl UploadPreview {
    #[must_use]
    pub fn from_summary(summary: &NdviSummary) -> Self {
        Self {
            count: summary.count(),
            mean: summary.mean(),
            concern_zone_pct: summary.concern_zone_pct(),
        }
    }

    /// Pixels, mean NDVI and concern share, in display order.
    #[must_use]
    pub fn fields(&self) -> [PreviewField; 3] {
        [
            PreviewField {
                label: "Pixels".to_owned(),
                value: format_count(self.count),
                highlight: None,
            },
            PreviewField {
                label: "Mean NDVI".to_owned(),
                value: format_fixed(self.mean, 3),
                highlight: None,
            },
            PreviewField {
                label: "Concern".to_owned(),
                value: format_percent(self.concern_zone_pct),
                highlight: (self.concern_zone_pct > CONCERN_CARD_WARN_PCT)
                    .then_some(StatHighlight::Warn),
            },
        ]
    }
}

/// Validated upload ready to be stored as a card deliverable.
#[derive(Debug, Clone, PartialEq)]
pub struct NdviUpload {
    pub summary: NdviSummary,
    pub captured_on: Option<NaiveDate>,
    pub preview: UploadPreview,
}

/// Parses the uploaded document and optional capture timestamp.
///
/// A blank `captured_at` counts as absent.
pub fn parse_ndvi_upload(json: &str, captured_at: Option<&str>) -> ChartResult<NdviUpload> {
    let document: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        ChartError::InvalidJson(format!(
            "could not parse JSON; make sure this is ndvi_statistics.json ({e})"
        ))
    })?;
    let raw: RawNdviSummary = serde_json::from_value(document).map_err(|e| {
        ChartError::InvalidSummary(format!("failed to read summary fields: {e}"))
    })?;
    let summary = NdviSummary::new(raw)?;

    let captured_on = match captured_at.map(str::trim) {
        Some(value) if !value.is_empty() => Some(parse_captured_at(value)?),
        _ => None,
    };
    let preview = UploadPreview::from_summary(&summary);
    debug!(
        count = preview.count,
        mean = preview.mean,
        concern_zone_pct = preview.concern_zone_pct,
        captured_on = ?captured_on,
        "parse ndvi upload"
    );

    Ok(NdviUpload {
        summary,
        captured_on,
        preview,
    })
}
