//! Home command - show the reset view.

use regionlens::engine::CameraState;

use super::common::GlobalOptions;
use crate::error::CliError;

/// Run the home command.
pub fn run(global: &GlobalOptions) -> Result<(), CliError> {
    let runner = global.runner("home")?;
    let client = runner.create_client(None, Vec::new())?;

    client.home().press();

    let bounds = client.home().bounds();
    println!("Home bounds: {}", bounds);
    println!("  center: {}", bounds.center());
    if let Some(CameraState::Fitted { options, .. }) = client.engine().camera() {
        println!("  padding: {}px", options.padding);
        println!("  max zoom: {}", options.max_zoom);
        println!("  duration: {}ms", options.duration.as_millis());
    }

    Ok(())
}
