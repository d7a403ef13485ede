//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use regionlens::geocode::GeocodeCandidate;
use regionlens::geometry::Position;
use regionlens::layers::ReconcileReport;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Options accepted by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file overriding ~/.regionlens/config.ini
    pub config: Option<PathBuf>,
    /// Mirror log output to stderr
    pub verbose: bool,
}

impl GlobalOptions {
    /// Load config, start logging and log the command name.
    pub fn runner(&self, command: &str) -> Result<CliRunner, CliError> {
        let runner = CliRunner::new(self.config.clone(), self.verbose)?;
        runner.log_startup(command);
        Ok(runner)
    }
}

/// Build a position from CLI coordinates, rejecting out-of-range values.
pub fn position_arg(lon: f64, lat: f64) -> Result<Position, CliError> {
    let position = Position::new(lon, lat);
    if !position.is_valid() {
        return Err(CliError::InvalidArgument(format!(
            "coordinates out of range: lon={}, lat={}",
            lon, lat
        )));
    }
    Ok(position)
}

/// Print a numbered candidate list, or a note when it is empty.
pub fn print_candidates(candidates: &[GeocodeCandidate]) {
    if candidates.is_empty() {
        println!("No results.");
        return;
    }
    for (i, candidate) in candidates.iter().enumerate() {
        println!("{:>2}. {}", i + 1, candidate.label);
        println!("    point: {}", candidate.point);
        if let Some(bbox) = candidate.bounding_box {
            println!("    bbox:  {}", bbox);
        }
    }
}

/// Print a reconcile summary with one line per failure.
pub fn print_report(report: &ReconcileReport) {
    println!("Layers: {}", report);
    for key in &report.attached {
        println!("  + {}", key);
    }
    for key in &report.detached {
        println!("  - {}", key);
    }
    for source in &report.released {
        println!("  x {} (stray source removed)", source);
    }
    for failure in &report.failures {
        println!("  ! {}", failure);
    }
}
