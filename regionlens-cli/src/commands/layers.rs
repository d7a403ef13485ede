//! Layers command - show the overlay catalog and toggle entries.

use std::collections::BTreeSet;

use regionlens::engine::MapEngine;
use regionlens::layers::ReconcileReport;

use super::common::{print_report, GlobalOptions};
use crate::error::CliError;

/// Arguments for the layers command.
pub struct LayersArgs {
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    /// Print the style sources and layers as JSON
    pub json: bool,
}

/// Run the layers command.
///
/// Applies the configured initial overlays, then each `--enable` and
/// `--disable` in turn, and prints the resulting panel state.
pub fn run(global: &GlobalOptions, args: LayersArgs) -> Result<(), CliError> {
    let runner = global.runner("layers")?;
    let client = runner.create_client(None, Vec::new())?;

    let mut total = client.on_load().unwrap_or_default();
    for key in &args.enable {
        merge(&mut total, client.set_layer(key, true));
    }
    for key in &args.disable {
        merge(&mut total, client.set_layer(key, false));
    }

    print_report(&total);
    println!();

    let engine = client.engine();
    let catalog = runner.config().catalog();
    println!("{:<20} {:<8} {}", "KEY", "ENABLED", "LAYER");
    for toggle in client.layer_toggles() {
        let layer = catalog
            .get(&toggle.key)
            .map(|d| d.layer.id.as_str())
            .unwrap_or_default();
        let state = if engine.has_layer(layer) { "on" } else { "off" };
        println!("{:<20} {:<8} {}", toggle.key, state, layer);
    }

    if args.json {
        let attached: Vec<_> = catalog
            .definitions()
            .iter()
            .filter(|d| engine.has_layer(&d.layer.id))
            .collect();
        let sources: serde_json::Map<String, serde_json::Value> = attached
            .iter()
            .filter_map(|d| {
                serde_json::to_value(&d.source)
                    .ok()
                    .map(|v| (d.source_id.clone(), v))
            })
            .collect();
        let layers: Vec<_> = attached.iter().map(|d| &d.layer).collect();
        let style = serde_json::json!({
            "glyphs": runner.config().glyph_url(),
            "sources": sources,
            "layers": layers,
        });
        let text = serde_json::to_string_pretty(&style)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        println!();
        println!("{}", text);
    }

    if total.is_clean() {
        Ok(())
    } else {
        Err(CliError::InvalidArgument(format!(
            "{} layer change(s) failed",
            total.failures.len()
        )))
    }
}

/// Every toggle call reconciles the whole panel, so a key is listed as
/// unchanged once, and only if no call in the run changed it.
fn merge(total: &mut ReconcileReport, report: ReconcileReport) {
    total.merge(report);
    let changed: BTreeSet<String> = total
        .attached
        .iter()
        .chain(&total.detached)
        .cloned()
        .collect();
    let mut seen = BTreeSet::new();
    total
        .unchanged
        .retain(|key| !changed.contains(key) && seen.insert(key.clone()));
}
