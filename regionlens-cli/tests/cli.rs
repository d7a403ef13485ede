//! Integration tests for the regionlens binary.
//!
//! Every test points `--config` at a temporary file so nothing touches
//! ~/.regionlens. Commands that would reach the geocoder are not run here.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const COUNTIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {"namelsad": "Santa Fe County"},
      "geometry": {"type": "Polygon", "coordinates": [[
        [-106.25, 35.2], [-105.7, 35.2], [-105.7, 36.0], [-106.25, 36.0], [-106.25, 35.2]
      ]]}
    }
  ]
}"#;

/// Temp config whose log file also lives in the temp dir.
fn setup(extra: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.ini");
    let log = temp.path().join("logs").join("regionlens.log");
    fs::write(
        &config,
        format!("[logging]\nfile = {}\n\n{}", log.display(), extra),
    )
    .unwrap();
    (temp, config)
}

fn regionlens(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_regionlens"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run regionlens")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_config_path_reports_override() {
    let (_temp, config) = setup("");
    let output = regionlens(&config, &["config", "path"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), config.display().to_string());
}

#[test]
fn test_config_init_then_show() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("config.ini");

    let output = regionlens(&config, &["config", "init"]);
    assert!(output.status.success());
    assert!(config.exists());

    let output = regionlens(&config, &["config", "show"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[servers]"));
    assert!(text.contains("min_length = 3"));
    assert!(text.contains("(catalog defaults)"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_temp, config) = setup("[search]\nlimit = 0\n");
    let output = regionlens(&config, &["layers"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("search.limit"));
}

#[test]
fn test_layers_lists_defaults_and_toggles() {
    let (temp, config) = setup("");
    let output = regionlens(
        &config,
        &["layers", "--enable", "us-states", "--disable", "carto-light"],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("+ us-states"));
    assert!(text.contains("- carto-light"));
    assert!(text
        .lines()
        .any(|l| l.starts_with("us-counties ") && l.contains(" on ")));
    assert!(temp.path().join("logs").join("regionlens.log").exists());
}

#[test]
fn test_layers_unknown_key_fails() {
    let (_temp, config) = setup("");
    let output = regionlens(&config, &["layers", "--enable", "us-rivers"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("! us-rivers"));
}

#[test]
fn test_locate_with_features_file() {
    let (temp, config) = setup("");
    let features = temp.path().join("counties.geojson");
    fs::write(&features, COUNTIES).unwrap();

    let output = regionlens(
        &config,
        &[
            "locate",
            "--lon",
            "-105.94",
            "--lat",
            "35.69",
            "--features",
            features.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("Region: Santa Fe County"));
}

#[test]
fn test_locate_outside_features_reports_no_match() {
    let (temp, config) = setup("");
    let features = temp.path().join("counties.geojson");
    fs::write(&features, COUNTIES).unwrap();

    let output = regionlens(
        &config,
        &[
            "locate",
            "--lon",
            "-90.0",
            "--lat",
            "40.0",
            "--features",
            features.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("No region found"));
}

#[test]
fn test_locate_rejects_out_of_range_coordinates() {
    let (_temp, config) = setup("");
    let output = regionlens(&config, &["locate", "--lon", "-200", "--lat", "35"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_home_prints_bounds() {
    let (_temp, config) = setup("[map]\nhome_bounds = -10, 40, 5, 52\n");
    let output = regionlens(&config, &["home"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Home bounds: [-10.000000, 40.000000, 5.000000, 52.000000]"));
}
