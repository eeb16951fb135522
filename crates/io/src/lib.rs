//! # hygeia-io
//!
//! Read forecast submissions, surveillance data, and evaluation scores from
//! the data repository's CSV layouts, and write the two JSON documents the
//! dashboard serves. Bridges external file formats into Hygeia's normalized
//! row tables.

mod error;
mod ground_truth;
mod output;
mod paths;
mod predictions;
mod read;
mod reference;
mod scores;

pub use error::IoError;
pub use ground_truth::{HistoricalSnapshots, read_ground_truth, read_historical_snapshots};
pub use output::{
    AppDataCore, AppDataEvaluations, AuxiliaryData, DynamicPeriodOption, LocationOption, MainData,
    Metadata, NowcastTrends, Precalculated, SeasonOption, SeasonsMetadata, nowcast_trend_map,
    write_core_document, write_evaluations_document,
};
pub use paths::DataPaths;
pub use predictions::{SubmissionData, read_predictions};
pub use reference::{read_locations, read_thresholds};
pub use scores::{
    CoverageScores, read_coverage_scores, read_evaluation_scores, read_mape_scores, read_wis_scores,
};
