use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Hygeia configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HygeiaConfig {
    /// Model roster settings.
    #[serde(default)]
    pub models: ModelsToml,

    /// Data repository layout settings.
    #[serde(default)]
    pub data: DataToml,
}

/// The model roster. Defaults match the dashboard's current lineup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsToml {
    /// Models whose submissions are processed, in dashboard display order.
    #[serde(default = "default_model_names")]
    pub names: Vec<String>,

    /// Subset of `names` that file same-week rate-change nowcasts.
    #[serde(default = "default_nowcast_models")]
    pub nowcast: Vec<String>,
}

impl Default for ModelsToml {
    fn default() -> Self {
        Self {
            names: default_model_names(),
            nowcast: default_nowcast_models(),
        }
    }
}

fn default_model_names() -> Vec<String> {
    [
        "MOBS-GLEAM_FLUH",
        "MIGHTE-Nsemble",
        "MIGHTE-Joint",
        "NU_UCSD-GLEAM_AI_FLUH",
        "CEPH-Rtrend_fluH",
        "NEU_ISI-FluBcast",
        "NEU_ISI-AdaptiveEnsemble",
        "FluSight-ensemble",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_nowcast_models() -> Vec<String> {
    [
        "MOBS-GLEAM_FLUH",
        "MIGHTE-Nsemble",
        "CEPH-Rtrend_fluH",
        "FluSight-ensemble",
        "NU_UCSD-GLEAM_AI_FLUH",
        "MIGHTE-Joint",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    /// Root of the data repository checkout.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Core document path. Defaults to `app_data_core.json` under `dir`.
    #[serde(default)]
    pub core_output: Option<PathBuf>,

    /// Evaluations document path. Defaults to `app_data_evaluations.json`
    /// under `dir`.
    #[serde(default)]
    pub evaluations_output: Option<PathBuf>,
}

impl Default for DataToml {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            core_output: None,
            evaluations_output: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("public/data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: HygeiaConfig = toml::from_str("").unwrap();
        assert_eq!(config.models.names.len(), 8);
        assert_eq!(config.models.nowcast.len(), 6);
        assert_eq!(config.data.dir, PathBuf::from("public/data"));
        assert!(config.data.core_output.is_none());
    }

    #[test]
    fn nowcast_models_are_a_subset_of_the_roster() {
        let config = HygeiaConfig::default();
        for model in &config.models.nowcast {
            assert!(config.models.names.contains(model), "unknown model {model}");
        }
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: HygeiaConfig = toml::from_str(
            "[models]\nnames = [\"only-model\"]\n\n[data]\ndir = \"fixtures\"\n",
        )
        .unwrap();
        assert_eq!(config.models.names, vec!["only-model".to_string()]);
        assert_eq!(config.models.nowcast.len(), 6);
        assert_eq!(config.data.dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<HygeiaConfig>("[data]\ndirectory = \"x\"\n").is_err());
        assert!(toml::from_str::<HygeiaConfig>("mystery = 1\n").is_err());
    }
}
