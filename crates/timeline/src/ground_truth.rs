//! Season-scoped ground-truth views.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hygeia_data::{GroundTruthTable, ReportedAdmissions, saturdays};
use hygeia_seasons::Season;

/// date → location → reported observation, for one season.
pub type SeasonGroundTruth = BTreeMap<NaiveDate, BTreeMap<String, ReportedAdmissions>>;

/// Collects the reported observations falling inside one season.
///
/// Every Saturday of the season appears as a key so the chart's date axis is
/// complete even where nothing was reported yet; locations appear under a
/// date only where an observation was actually reported.
pub fn season_ground_truth(
    season: &Season,
    ground_truth: &GroundTruthTable,
    locations: &[String],
) -> SeasonGroundTruth {
    let mut out = SeasonGroundTruth::new();
    for saturday in saturdays(season.start(), season.end()) {
        let per_location = out.entry(saturday).or_default();
        for location in locations {
            if let Some(value) = ground_truth.get(saturday, location)
                && let Some(reported) = value.reported()
            {
                per_location.insert(location.clone(), reported);
            }
        }
    }
    out
}
