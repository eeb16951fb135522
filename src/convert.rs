//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::PathBuf;

use hygeia_io::DataPaths;

use crate::config::DataToml;

/// Builds a [`DataPaths`] from the TOML data layout.
///
/// Command-line overrides take precedence over the config file; output paths
/// left unset in both fall back to the [`DataPaths`] defaults under the data
/// root.
pub fn build_data_paths(
    data: &DataToml,
    dir_override: Option<PathBuf>,
    core_override: Option<PathBuf>,
    evaluations_override: Option<PathBuf>,
) -> DataPaths {
    let root = dir_override.unwrap_or_else(|| data.dir.clone());
    let mut paths = DataPaths::new(root);
    if let Some(path) = core_override.or_else(|| data.core_output.clone()) {
        paths = paths.with_core_output(path);
    }
    if let Some(path) = evaluations_override.or_else(|| data.evaluations_output.clone()) {
        paths = paths.with_evaluations_output(path);
    }
    paths
}
