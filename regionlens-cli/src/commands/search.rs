//! Search and suggest commands - query the configured Nominatim server.

use regionlens::controls::SearchOutcome;
use regionlens::engine::CameraState;
use tracing::info;

use super::common::{print_candidates, GlobalOptions};
use crate::error::CliError;

/// Arguments for the search command.
pub struct SearchArgs {
    pub query: String,
    /// 1-based index of the result to move the camera to
    pub select: Option<usize>,
    /// Print the backend records as JSON instead of a list
    pub json: bool,
}

/// Run the search command.
pub fn run_search(global: &GlobalOptions, args: SearchArgs) -> Result<(), CliError> {
    let runner = global.runner("search")?;
    let client = runner.create_client(None, Vec::new())?;

    let outcome = runner.block_on(client.search().submit(&args.query))?;
    let candidates = match outcome {
        SearchOutcome::Delivered(candidates) => candidates,
        SearchOutcome::Failed(e) => return Err(e.into()),
        SearchOutcome::Skipped => {
            return Err(CliError::InvalidArgument("search query is empty".to_string()))
        }
        SearchOutcome::Superseded | SearchOutcome::Stale => Vec::new(),
    };
    info!(query = %args.query, results = candidates.len(), "Search complete");

    if args.json {
        let raw: Vec<_> = candidates.iter().map(|c| &c.raw).collect();
        let text = serde_json::to_string_pretty(&raw)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        println!("{}", text);
    } else {
        print_candidates(&candidates);
    }

    if let Some(index) = args.select {
        let candidate = index
            .checked_sub(1)
            .and_then(|i| candidates.get(i))
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "--select {} is out of range (1-{})",
                    index,
                    candidates.len()
                ))
            })?;

        client.search().select(candidate);
        println!();
        match client.engine().camera() {
            Some(CameraState::Fitted { viewport, .. }) => {
                println!("Camera fitted to {}", viewport)
            }
            Some(CameraState::Centered { center, zoom }) => {
                println!("Camera centered on {} at zoom {}", center, zoom)
            }
            None => {}
        }
    }

    Ok(())
}

/// Arguments for the suggest command.
pub struct SuggestArgs {
    pub query: String,
}

/// Run the suggest command.
///
/// Goes through the same debounce and minimum-length gate as typing in the
/// search box.
pub fn run_suggest(global: &GlobalOptions, args: SuggestArgs) -> Result<(), CliError> {
    let runner = global.runner("suggest")?;
    let client = runner.create_client(None, Vec::new())?;
    let policy = *client.search().policy();

    match runner.block_on(client.search().input(&args.query))? {
        SearchOutcome::Delivered(candidates) => print_candidates(&candidates),
        SearchOutcome::Failed(e) => return Err(e.into()),
        SearchOutcome::Skipped => println!(
            "Query too short: suggestions start at {} characters.",
            policy.min_length
        ),
        SearchOutcome::Superseded | SearchOutcome::Stale => println!("No results."),
    }

    Ok(())
}
