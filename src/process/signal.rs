use std::thread;

use signal_hook::{consts::SIGTERM, iterator::Signals};

use super::ProcessError;
use crate::highlight::SyntaxHighlighter;

// The listener thread never touches command state; exiting with code 0
// releases everything the session owns.
pub fn spawn_term_listener() -> Result<(), ProcessError> {
    let mut signals =
        Signals::new([SIGTERM]).map_err(|e| ProcessError::SignalError(e.to_string()))?;
    let highlighter = SyntaxHighlighter::new();

    thread::spawn(move || {
        if signals.forever().next().is_some() {
            println!(
                "\n{}",
                highlighter.highlight_warning("received termination request, shutting down")
            );
            std::process::exit(0);
        }
    });

    Ok(())
}
