use std::io::ErrorKind;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

use super::ProcessError;
use crate::core::state::ShellState;
use crate::flags::Flags;
use crate::highlight::SyntaxHighlighter;

const NOT_FOUND_STATUS: i32 = 127;
const SIGNAL_STATUS_BASE: i32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    ExitedNormally(i32),
    KilledBySignal(i32),
}

impl ChildOutcome {
    pub fn decode(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildOutcome::ExitedNormally(code),
            // A waited-for unix child either exited or died to a signal
            None => ChildOutcome::KilledBySignal(status.signal().unwrap_or(0)),
        }
    }

    pub fn shell_status(&self) -> i32 {
        match self {
            ChildOutcome::ExitedNormally(code) => *code,
            ChildOutcome::KilledBySignal(signo) => SIGNAL_STATUS_BASE + signo,
        }
    }
}

#[derive(Clone)]
pub struct ProcessExecutor {
    quiet_mode: bool,
    highlighter: SyntaxHighlighter,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    // An unloadable program image reports the OS error and yields 127;
    // any other spawn error never ran a child and surfaces as SpawnFailed.
    pub fn execute(&self, line: &str, state: &mut ShellState) -> Result<i32, ProcessError> {
        let argv: Vec<&str> = line.split_whitespace().collect();
        let Some((program, args)) = argv.split_first() else {
            return Err(ProcessError::EmptyCommand);
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                eprintln!(
                    "{}",
                    self.highlighter
                        .highlight_error(&format!("failed to execute {}: {}", program, e))
                );
                return Ok(NOT_FOUND_STATUS);
            }
            Err(e) => return Err(ProcessError::SpawnFailed(e)),
        };

        let pid = child.id();
        state.record_child(pid);

        let status = child.wait().map_err(ProcessError::WaitFailed)?;
        let outcome = ChildOutcome::decode(status);
        self.report(pid, outcome);

        Ok(outcome.shell_status())
    }

    fn report(&self, pid: u32, outcome: ChildOutcome) {
        if self.quiet_mode {
            return;
        }

        match outcome {
            ChildOutcome::ExitedNormally(code) => {
                println!(
                    "{}",
                    self.highlighter
                        .highlight_info(&format!("child [{}] exited with status {}", pid, code))
                );
            }
            ChildOutcome::KilledBySignal(signo) => {
                println!(
                    "{}",
                    self.highlighter.highlight_warning(&format!(
                        "child [{}] terminated by signal {}",
                        pid, signo
                    ))
                );
            }
        }
    }
}
