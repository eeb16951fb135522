//! Boxplot summaries of per-location average scores.
//!
//! For every metric/model bucket in a window the dashboard offers any
//! combination of forecast horizons; the spread across locations is
//! precomputed here for each combination so the client never touches raw
//! scores.

use std::collections::BTreeMap;

use hygeia_data::Metric;
use hygeia_stats::{BoxplotStats, boxplot_stats};

use crate::aggregate::{StateMapWindow, SumCount};

/// metric → model → horizon key → boxplot, for one window. Horizon keys are
/// the ascending comma-joined combination, e.g. `"1"` or `"0,2,3"`.
pub type WindowIqr = BTreeMap<Metric, BTreeMap<String, BTreeMap<String, BoxplotStats>>>;

/// Every non-empty subset of `horizons`, each in ascending order.
pub fn horizon_subsets(horizons: &[u8]) -> Vec<Vec<u8>> {
    let mut subsets = Vec::with_capacity((1usize << horizons.len()) - 1);
    for mask in 1u32..(1 << horizons.len()) {
        let subset: Vec<u8> = horizons
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &h)| h)
            .collect();
        subsets.push(subset);
    }
    subsets
}

/// Computes boxplot summaries for one window's state-map aggregates.
///
/// Coverage is excluded: its scores are binary hit rates whose spread across
/// locations carries no signal. Horizon combinations are derived per model,
/// so a model that only ever forecast horizons 0 and 1 gets exactly the
/// three combinations of those.
pub fn window_iqr(state_map: &StateMapWindow) -> WindowIqr {
    let mut out = WindowIqr::new();
    for (&metric, models) in state_map {
        if metric.is_coverage() {
            continue;
        }
        for (model, locations) in models {
            let mut horizons: Vec<u8> = locations
                .values()
                .flat_map(|by_horizon| by_horizon.keys().copied())
                .collect();
            horizons.sort_unstable();
            horizons.dedup();

            for subset in horizon_subsets(&horizons) {
                // Per-location average over the combined horizons: sums and
                // counts merge first so every score keeps equal weight.
                let mut averages = Vec::new();
                for by_horizon in locations.values() {
                    let mut total = SumCount::default();
                    for horizon in &subset {
                        if let Some(aggregate) = by_horizon.get(horizon) {
                            total.merge(*aggregate);
                        }
                    }
                    if let Some(mean) = total.mean() {
                        averages.push(mean);
                    }
                }

                if let Some(stats) = boxplot_stats(&averages) {
                    let key = subset
                        .iter()
                        .map(u8::to_string)
                        .collect::<Vec<_>>()
                        .join(",");
                    out.entry(metric)
                        .or_default()
                        .entry(model.clone())
                        .or_default()
                        .insert(key, stats);
                }
            }
        }
    }
    out
}
