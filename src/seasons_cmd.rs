//! Seasons command: inspect the partitioning derived from the data extent.

use anyhow::{Context, Result};
use tracing::info_span;

use hygeia_data::{DateExtent, GroundTruthTable};
use hygeia_io::{read_ground_truth, read_predictions};
use hygeia_seasons::{generate_seasons, trailing_periods};

use crate::cli::SeasonsArgs;
use crate::config::HygeiaConfig;
use crate::convert;

/// Print the season and dynamic-period partitioning without writing output.
pub fn run(args: SeasonsArgs) -> Result<()> {
    let _cmd = info_span!("seasons").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: HygeiaConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let paths = convert::build_data_paths(&config.data, args.data_dir, None, None);

    // 2. Read just enough to establish the date extent
    let ground_truth = GroundTruthTable::from_rows(
        read_ground_truth(&paths.ground_truth_file())
            .context("failed to read ground-truth surveillance data")?,
    );
    let submissions = read_predictions(&paths, &config.models.names, &[])
        .context("failed to read forecast submissions")?;

    let extent = DateExtent::from_tables(&ground_truth, &submissions.predictions)
        .context("no dated rows to partition")?;

    // 3. Partition and print
    let seasons = generate_seasons(extent);
    let periods = trailing_periods(submissions.predictions.latest_reference_date());

    println!("Data extent: {} .. {}", extent.earliest, extent.latest);
    println!();
    println!("Seasons:");
    for season in &seasons {
        println!(
            "  [{}] {:<24} {} .. {}",
            season.index(),
            season.display_label(),
            season.start(),
            season.end()
        );
    }
    println!();
    println!("Dynamic periods:");
    for period in &periods {
        println!(
            "  [{}] {:<13} {} .. {}  displayed from {}",
            period.index(),
            period.display_name(),
            period.start(),
            period.end(),
            period.display_start()
        );
    }

    Ok(())
}
