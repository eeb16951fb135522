//! Causal partitioning of forecast timelines.
//!
//! For each (season, model) pair the prediction record is split into four
//! consecutive windows keyed off the model's forecast boundary dates: the
//! stretch before its first reference date, the span actually covered by
//! reference dates, the lookahead tail reaching past the last reference
//! date, and the remainder of the season. The dashboard renders each window
//! with a different visual treatment, so the split happens here rather than
//! client-side.

mod boundary;
mod ground_truth;
mod partition;

pub use boundary::{DateRange, ForecastBoundaries, PartitionKind};
pub use ground_truth::{SeasonGroundTruth, season_ground_truth};
pub use partition::{
    ModelTimeline, PartitionGrid, PredictionSummary, SeasonTimeline, TimelineEntry,
    build_season_timeline,
};
