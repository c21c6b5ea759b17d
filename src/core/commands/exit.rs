use super::{leading_token, Command, CommandError};
use crate::core::state::ShellState;
use crate::highlight::SyntaxHighlighter;

const BAD_ARGUMENT_CODE: i32 = 2;

// The only builtin that ends the session. A malformed argument still
// terminates, with code 2.
#[derive(Clone)]
pub struct ExitCommand {
    highlighter: SyntaxHighlighter,
}

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self {
            highlighter: SyntaxHighlighter::new(),
        }
    }

    // None means the argument did not parse fully as an integer in 0..=255
    pub(crate) fn parse_code(tail: &str) -> Option<i32> {
        let tail = tail.trim();
        if tail.is_empty() {
            return Some(0);
        }
        tail.parse::<u8>().ok().map(i32::from)
    }
}

impl Command for ExitCommand {
    fn matches(&self, line: &str) -> bool {
        leading_token(line) == Some("exit")
    }

    fn execute(&self, line: &str, state: &mut ShellState) -> Result<(), CommandError> {
        let tail = line.trim_start().strip_prefix("exit").unwrap_or("");
        let code = match Self::parse_code(tail) {
            Some(code) => code,
            None => {
                eprintln!(
                    "{}",
                    self.highlighter
                        .highlight_warning("exit: numeric argument required")
                );
                BAD_ARGUMENT_CODE
            }
        };

        state.teardown();
        println!("{}", self.highlighter.highlight_success("Goodbye!"));
        std::process::exit(code);
    }
}
