use std::env;

use super::{leading_token, Command, CommandError};
use crate::core::state::ShellState;

// Recognized only when the leading token is exactly "pwd"
#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn matches(&self, line: &str) -> bool {
        leading_token(line) == Some("pwd")
    }

    fn execute(&self, _line: &str, _state: &mut ShellState) -> Result<(), CommandError> {
        let dir = env::current_dir()
            .map_err(|e| CommandError::ExecutionError(format!("pwd: {}", e)))?;
        println!("{}", dir.display());
        Ok(())
    }
}
