use std::env;

use super::{Command, CommandError};
use crate::core::state::ShellState;

const STATUS_QUERY_PREFIX: &str = "echo $?";
const PID_QUERY_PREFIX: &str = "echo $$";
const LOCATION_QUERY_PREFIX: &str = "echo $SHELL";
const ECHO_PREFIX: &str = "echo ";

// "echo $?": prints the exit status of the previous command
#[derive(Clone)]
pub struct StatusQueryCommand;

impl Default for StatusQueryCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusQueryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusQueryCommand {
    fn matches(&self, line: &str) -> bool {
        line.starts_with(STATUS_QUERY_PREFIX)
    }

    fn execute(&self, _line: &str, state: &mut ShellState) -> Result<(), CommandError> {
        println!("{}", state.last_status());
        Ok(())
    }
}

// "echo $$": prints the interpreter's own process id
#[derive(Clone)]
pub struct PidQueryCommand;

impl Default for PidQueryCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PidQueryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PidQueryCommand {
    fn matches(&self, line: &str) -> bool {
        line.starts_with(PID_QUERY_PREFIX)
    }

    fn execute(&self, _line: &str, _state: &mut ShellState) -> Result<(), CommandError> {
        println!("{}", unsafe { libc::getpid() });
        Ok(())
    }
}

// "echo $SHELL": prints the working directory through a direct lookup,
// never by running another program
#[derive(Clone)]
pub struct LocationQueryCommand;

impl Default for LocationQueryCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationQueryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LocationQueryCommand {
    fn matches(&self, line: &str) -> bool {
        line.starts_with(LOCATION_QUERY_PREFIX)
    }

    fn execute(&self, _line: &str, _state: &mut ShellState) -> Result<(), CommandError> {
        let dir = env::current_dir().map_err(|e| {
            CommandError::ExecutionError(format!("failed to read working directory: {}", e))
        })?;
        println!("{}", dir.display());
        Ok(())
    }
}

// The trailing space is part of the prefix, so bare "echo" never reaches
// this handler.
#[derive(Clone)]
pub struct EchoCommand;

impl Default for EchoCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }

    // Leading whitespace is stripped, the rest is verbatim
    pub(crate) fn body(line: &str) -> Option<&str> {
        line.strip_prefix(ECHO_PREFIX).map(str::trim_start)
    }
}

impl Command for EchoCommand {
    fn matches(&self, line: &str) -> bool {
        line.starts_with(ECHO_PREFIX)
    }

    fn execute(&self, line: &str, _state: &mut ShellState) -> Result<(), CommandError> {
        match Self::body(line) {
            Some(text) => {
                println!("{}", text);
                Ok(())
            }
            None => Err(CommandError::Unhandled(line.to_string())),
        }
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
    fn test_query_prefix_matching() {
        let status = StatusQueryCommand::new();
        let pid = PidQueryCommand::new();
        let location = LocationQueryCommand::new();

        assert!(status.matches("echo $?"));
        assert!(!status.matches("echo $$"));
        assert!(pid.matches("echo $$"));
        assert!(!pid.matches("echo $?"));
        assert!(location.matches("echo $SHELL"));
        assert!(!location.matches("echo $SH"));
    }

    #[test]
    fn test_query_forms_never_fail() {
        let mut state = test_state();
        state.set_last_status(42);

        assert!(StatusQueryCommand::new().execute("echo $?", &mut state).is_ok());
        assert!(PidQueryCommand::new().execute("echo $$", &mut state).is_ok());
        assert!(LocationQueryCommand::new()
            .execute("echo $SHELL", &mut state)
            .is_ok());
    }

    #[test]
    fn test_echo_requires_trailing_space() {
        let echo = EchoCommand::new();
        assert!(echo.matches("echo hello"));
        assert!(echo.matches("echo "));
        assert!(!echo.matches("echo"));
        assert!(!echo.matches("echoes"));
    }

    #[test]
    fn test_echo_body_strips_leading_whitespace_once() {
        assert_eq!(EchoCommand::body("echo hello"), Some("hello"));
        assert_eq!(EchoCommand::body("echo    hello world"), Some("hello world"));
        assert_eq!(EchoCommand::body("echo \thello"), Some("hello"));
        // Trailing text is verbatim
        assert_eq!(EchoCommand::body("echo hello  "), Some("hello  "));
        assert_eq!(EchoCommand::body("echo "), Some(""));
        assert_eq!(EchoCommand::body("echo"), None);
    }

    #[test]
    fn test_echo_execute_succeeds_once_matched() {
        let mut state = test_state();
        let echo = EchoCommand::new();

        assert!(echo.execute("echo hello", &mut state).is_ok());
        assert!(echo.execute("echo ", &mut state).is_ok());
    }
}
