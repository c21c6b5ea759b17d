mod cd;
mod echo;
mod exit;
mod pwd;

pub use cd::CdCommand;
pub use echo::{EchoCommand, LocationQueryCommand, PidQueryCommand, StatusQueryCommand};
pub use exit::ExitCommand;
pub use pwd::PwdCommand;

use crate::core::state::ShellState;

#[derive(Debug)]
pub enum CommandError {
    Unhandled(String),
    InvalidArguments(String),
    ExecutionError(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unhandled(line) => write!(f, "no matching builtin form: {}", line),
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

pub(crate) fn leading_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

// A sub-handler decides against the raw line, not just the leading token,
// because some forms are recognized by a longer literal prefix
// ("echo $?" vs. plain "echo ").
pub trait Command {
    fn matches(&self, line: &str) -> bool;
    fn execute(&self, line: &str, state: &mut ShellState) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    StatusQuery(StatusQueryCommand),
    PidQuery(PidQueryCommand),
    LocationQuery(LocationQueryCommand),
    Echo(EchoCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn matches(&self, line: &str) -> bool {
        match self {
            CommandType::StatusQuery(cmd) => cmd.matches(line),
            CommandType::PidQuery(cmd) => cmd.matches(line),
            CommandType::LocationQuery(cmd) => cmd.matches(line),
            CommandType::Echo(cmd) => cmd.matches(line),
            CommandType::Cd(cmd) => cmd.matches(line),
            CommandType::Pwd(cmd) => cmd.matches(line),
            CommandType::Exit(cmd) => cmd.matches(line),
        }
    }

    fn execute(&self, line: &str, state: &mut ShellState) -> Result<(), CommandError> {
        match self {
            CommandType::StatusQuery(cmd) => cmd.execute(line, state),
            CommandType::PidQuery(cmd) => cmd.execute(line, state),
            CommandType::LocationQuery(cmd) => cmd.execute(line, state),
            CommandType::Echo(cmd) => cmd.execute(line, state),
            CommandType::Cd(cmd) => cmd.execute(line, state),
            CommandType::Pwd(cmd) => cmd.execute(line, state),
            CommandType::Exit(cmd) => cmd.execute(line, state),
        }
    }
}

// Fixed priority order: the longer echo prefixes must come before plain
// echo, which must come before the token-matched builtins.
pub struct BuiltinDispatcher {
    commands: Vec<CommandType>,
}

impl Default for BuiltinDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinDispatcher {
    pub fn new() -> Self {
        BuiltinDispatcher {
            commands: vec![
                CommandType::StatusQuery(StatusQueryCommand::new()),
                CommandType::PidQuery(PidQueryCommand::new()),
                CommandType::LocationQuery(LocationQueryCommand::new()),
                CommandType::Echo(EchoCommand::new()),
                CommandType::Cd(CdCommand::new()),
                CommandType::Pwd(PwdCommand::new()),
                CommandType::Exit(ExitCommand::new()),
            ],
        }
    }

    pub fn dispatch(&self, line: &str, state: &mut ShellState) -> Result<(), CommandError> {
        for command in &self.commands {
            if command.matches(line) {
                return command.execute(line, state);
            }
        }
        Err(CommandError::Unhandled(line.to_string()))
    }
}
