use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{NdviCardView, SparklineChart, SparklineSnapshot};

pub const SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;
pub const NDVI_CARD_VIEW_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SparklineSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviCardViewJsonContractV1 {
    pub schema_version: u32,
    pub view: NdviCardView,
}

impl SparklineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SparklineSnapshotJsonContractV1 {
            schema_version: SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SparklineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SparklineSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl NdviCardView {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize card view: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = NdviCardViewJsonContractV1 {
            schema_version: NDVI_CARD_VIEW_JSON_SCHEMA_V1,
            view: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize card view contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(view) = serde_json::from_str::<NdviCardView>(input) {
            return Ok(view);
        }
        let payload: NdviCardViewJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse card view json payload: {e}"))
        })?;
        if payload.schema_version != NDVI_CARD_VIEW_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported card view schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view)
    }
}

impl<R: Renderer> SparklineChart<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
