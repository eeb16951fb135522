//! Process command: run the full preprocessing pipeline.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hygeia_data::{DateExtent, GroundTruthTable};
use hygeia_evaluate::evaluate;
use hygeia_io::{
    AppDataCore, AppDataEvaluations, AuxiliaryData, LocationOption, MainData, Metadata,
    nowcast_trend_map, read_evaluation_scores, read_ground_truth, read_historical_snapshots,
    read_locations, read_predictions, read_thresholds, write_core_document,
    write_evaluations_document,
};
use hygeia_seasons::{generate_seasons, trailing_periods};
use hygeia_timeline::{build_season_timeline, season_ground_truth};

use crate::cli::ProcessArgs;
use crate::config::HygeiaConfig;
use crate::convert;

/// Run the full preprocessing pipeline.
pub fn run(args: ProcessArgs) -> Result<()> {
    let _cmd = info_span!("process").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: HygeiaConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let paths = convert::build_data_paths(
        &config.data,
        args.data_dir,
        args.core_output,
        args.evaluations_output,
    );
    let models = &config.models.names;
    let nowcast_models = &config.models.nowcast;

    // 2. Reference data
    let locations = read_locations(&paths.locations_file()).context("failed to read locations")?;
    let thresholds =
        read_thresholds(&paths.thresholds_file()).context("failed to read thresholds")?;
    let location_codes: Vec<String> = locations.iter().map(|info| info.code.clone()).collect();
    info!(
        locations = locations.len(),
        thresholds = thresholds.len(),
        "reference data loaded"
    );

    // 3. Surveillance data, forecast submissions, and evaluation scores
    let ground_truth_rows = read_ground_truth(&paths.ground_truth_file())
        .context("failed to read ground-truth surveillance data")?;
    let submissions = read_predictions(&paths, models, nowcast_models)
        .context("failed to read forecast submissions")?;
    let (scores, coverage) =
        read_evaluation_scores(&paths, models).context("failed to read evaluation scores")?;

    // 4. Densify the surveillance grid over the combined date extent
    let mut ground_truth = GroundTruthTable::from_rows(ground_truth_rows);
    let extent = DateExtent::from_tables(&ground_truth, &submissions.predictions)
        .context("no dated rows to partition")?;
    let filled = ground_truth.densify(extent, &location_codes);
    info!(
        earliest = %extent.earliest,
        latest = %extent.latest,
        filled,
        "densified surveillance grid"
    );

    // 5. Partition the extent into seasons and dynamic periods
    let seasons = generate_seasons(extent);
    let periods = trailing_periods(submissions.predictions.latest_reference_date());
    info!(
        seasons = seasons.len(),
        periods = periods.len(),
        "partitioned date extent"
    );

    // 6. Per-season timeline and surveillance views
    let mut ground_truth_data = BTreeMap::new();
    let mut prediction_data = BTreeMap::new();
    for season in &seasons {
        prediction_data.insert(
            season.time_value(),
            build_season_timeline(
                season,
                &submissions.predictions,
                &ground_truth,
                models,
                &location_codes,
            ),
        );
        ground_truth_data.insert(
            season.time_value(),
            season_ground_truth(season, &ground_truth, &location_codes),
        );
    }

    // 7. Aggregate evaluation scores over every window
    let summary = evaluate(&seasons, &periods, &scores, &coverage);
    info!(
        iqr_windows = summary.iqr.len(),
        state_map_windows = summary.state_map.len(),
        coverage_windows = summary.coverage.len(),
        "aggregated evaluation scores"
    );

    // 8. Historical surveillance snapshots
    let snapshots = read_historical_snapshots(&paths.historical_snapshot_dir())
        .context("failed to read historical snapshots")?;
    info!(snapshots = snapshots.len(), "historical snapshots loaded");

    // 9. Assemble and write both documents
    let core = AppDataCore {
        metadata: Metadata::build(&seasons, &periods, models),
        main_data: MainData {
            nowcast_trends: nowcast_trend_map(&submissions.nowcasts),
            historical_data_map: snapshots,
            ground_truth_data,
            prediction_data,
        },
        auxiliary: AuxiliaryData {
            locations: locations.iter().map(LocationOption::from_info).collect(),
            thresholds,
        },
    };
    write_core_document(paths.core_output(), &core)
        .with_context(|| format!("failed to write {}", paths.core_output().display()))?;

    let evaluations = AppDataEvaluations::from_summary(summary);
    write_evaluations_document(paths.evaluations_output(), &evaluations)
        .with_context(|| format!("failed to write {}", paths.evaluations_output().display()))?;

    info!("pipeline complete");
    Ok(())
}
