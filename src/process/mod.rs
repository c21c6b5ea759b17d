use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::{ChildOutcome, ProcessExecutor};

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    SpawnFailed(std::io::Error),
    WaitFailed(std::io::Error),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "empty command line"),
            ProcessError::SpawnFailed(e) => write!(f, "failed to create process: {}", e),
            ProcessError::WaitFailed(e) => write!(f, "failed to wait for child: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
