//! Normalized in-memory tables for the epidemic-forecast dashboard pipeline.
//!
//! Ingestion adapters (see `hygeia-io`) parse vendor CSV files into the row
//! types defined here; the season generator, timeline partitioner, and
//! evaluation aggregator only ever see these normalized tables. All tables are
//! value objects built once per pipeline run and never mutated afterwards.

mod error;
mod extent;
mod ground_truth;
mod metric;
mod nowcast;
mod prediction;
mod quantiles;
mod reference;
mod scores;
mod week;

pub use error::DataError;
pub use extent::DateExtent;
pub use ground_truth::{
    Admissions, GroundTruthRow, GroundTruthTable, GroundTruthValue, ReportedAdmissions,
};
pub use metric::Metric;
pub use nowcast::{NowcastRow, NowcastTrend};
pub use prediction::{PredictionRow, PredictionTable};
pub use quantiles::{QuantileLevel, QuantileSet};
pub use reference::{LocationInfo, RiskThresholds, pad_location_code};
pub use scores::{COVERAGE_LEVELS, CoverageRow, CoverageTable, ScoreRow, ScoreTable};
pub use week::{next_saturday_on_or_after, next_sunday_on_or_after, saturdays};
