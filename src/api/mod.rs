mod json_contract;
mod layout_helpers;
mod ndvi_card;
mod ndvi_card_chart;
mod ndvi_card_config;
mod ndvi_card_layout;
pub mod ndvi_upload;
mod sparkline;
mod sparkline_config;
mod sparkline_snapshot;

pub use json_contract::{
    NDVI_CARD_VIEW_JSON_SCHEMA_V1, NdviCardViewJsonContractV1, SPARKLINE_SNAPSHOT_JSON_SCHEMA_V1,
    SparklineSnapshotJsonContractV1,
};
pub use ndvi_card::{
    Banner, BarSegment, CARD_TITLE, CLASS_SUM_TOLERANCE_PCT, CONCERN_CARD_WARN_PCT, CardHeader,
    DISTRIBUTION_HEADING, EMPTY_DETAIL, EMPTY_TITLE, EmptyState, FOOTER_TEXT,
    INLINE_LABEL_MIN_PCT, LegendEntry, NdviCardModel, NdviCardView, PercentileTrack,
    SegmentLabel, StatCard, StatHighlight, TRACK_AXIS_CAPTION, TRACK_HEADING, TrackCallout,
    build_ndvi_card,
};
pub use ndvi_card_chart::NdviCard;
pub use ndvi_card_config::{
    BannerStyle, HealthClassStyle, NdviCardConfig, NdviPalette, StatCardStyle,
};
pub use ndvi_card_layout::{NdviCardLayout, SegmentHitBox, layout_ndvi_card, render_ndvi_card};
pub use ndvi_upload::{NdviUpload, PreviewField, UploadPreview, parse_ndvi_upload};
pub use sparkline::{
    SparklineChart, SparklineLayout, TooltipLayout, layout_sparkline, render_sparkline,
    tooltip_layout,
};
pub use sparkline_config::{SparklineConfig, SparklineStyle, TooltipStyle};
pub use sparkline_snapshot::SparklineSnapshot;
