use std::{env, path::PathBuf};

use super::{leading_token, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    // No argument means $HOME, one argument is taken as-is, anything more
    // is a usage error.
    pub(crate) fn target(args: &[&str]) -> Result<PathBuf, CommandError> {
        match args {
            [] => env::var("HOME")
                .map(PathBuf::from)
                .map_err(|_| CommandError::ExecutionError("cd: HOME not set".to_string())),
            [path] => Ok(PathBuf::from(path)),
            _ => Err(CommandError::InvalidArguments(
                "cd: usage: cd [directory]".to_string(),
            )),
        }
    }
}

impl Command for CdCommand {
    fn matches(&self, line: &str) -> bool {
        leading_token(line) == Some("cd")
    }

    fn execute(&self, line: &str, _state: &mut ShellState) -> Result<(), CommandError> {
        let args: Vec<&str> = line.split_whitespace().skip(1).collect();
        let target = Self::target(&args)?;

        env::set_current_dir(&target).map_err(|e| {
            CommandError::ExecutionError(format!("cd: {}: {}", target.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ExternalCommandCatalog;

    fn test_state() -> ShellState {
        ShellState::new(ExternalCommandCatalog::empty())
    }

    #[test]
    fn test_matches_exact_token() {
        let cmd = CdCommand::new();
        assert!(cmd.matches("cd"));
        assert!(cmd.matches("cd /tmp"));
        assert!(!cmd.matches("cdx"));
        assert!(!cmd.matches("echo cd"));
    }

    #[test]
    fn test_target_without_args_reads_home() -> Result<(), CommandError> {
        if let Ok(home) = env::var("HOME") {
            assert_eq!(CdCommand::target(&[])?, PathBuf::from(home));
        }
        Ok(())
    }

    #[test]
    fn test_target_single_arg() -> Result<(), CommandError> {
        assert_eq!(CdCommand::target(&["/tmp"])?, PathBuf::from("/tmp"));
        Ok(())
    }

    #[test]
    fn test_target_rejects_extra_args() {
        let result = CdCommand::target(&["one", "two"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_execute_changes_directory_and_noop_roundtrip() -> Result<(), CommandError> {
        let cmd = CdCommand::new();
        let mut state = test_state();

        let temp_dir = env::temp_dir();
        cmd.execute(&format!("cd {}", temp_dir.display()), &mut state)?;
        let reached = env::current_dir()?;

        // cd into the directory we are already in keeps the location stable
        cmd.execute(&format!("cd {}", reached.display()), &mut state)?;
        assert_eq!(env::current_dir()?, reached);
        Ok(())
    }

    #[test]
    fn test_execute_invalid_path_fails() {
        let cmd = CdCommand::new();
        let mut state = test_state();

        let result = cmd.execute("cd /path/that/does/not/exist", &mut state);
        assert!(matches!(result, Err(CommandError::ExecutionError(_))));
    }
}
