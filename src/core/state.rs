use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::catalog::ExternalCommandCatalog;

pub const DEFAULT_PROMPT: &str = "venule";
pub const MAX_PROMPT_LEN: usize = 64;

#[derive(Debug)]
pub enum StateError {
    EmptyPrompt,
    PromptTooLong(usize),
    PromptContainsNul,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::EmptyPrompt => write!(f, "prompt must not be empty"),
            StateError::PromptTooLong(len) => {
                write!(f, "prompt too long: {} bytes (max {})", len, MAX_PROMPT_LEN)
            }
            StateError::PromptContainsNul => write!(f, "prompt must not contain NUL bytes"),
        }
    }
}

impl std::error::Error for StateError {}

// Owned by the shell loop and passed by reference through every dispatch
// boundary. The prompt sits behind an Arc<Mutex> so signal handlers can
// hold a non-owning view of it.
pub struct ShellState {
    prompt: Arc<Mutex<String>>,
    last_status: i32,
    last_child: Option<u32>,
    catalog: ExternalCommandCatalog,
}

impl ShellState {
    pub fn new(catalog: ExternalCommandCatalog) -> Self {
        ShellState {
            prompt: Arc::new(Mutex::new(DEFAULT_PROMPT.to_string())),
            last_status: 0,
            last_child: None,
            catalog,
        }
    }

    pub fn prompt(&self) -> String {
        self.prompt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Handlers only read through this handle
    pub fn prompt_handle(&self) -> Arc<Mutex<String>> {
        Arc::clone(&self.prompt)
    }

    pub fn set_prompt(&mut self, value: &str) -> Result<(), StateError> {
        if value.is_empty() {
            return Err(StateError::EmptyPrompt);
        }
        if value.contains('\0') {
            return Err(StateError::PromptContainsNul);
        }
        if value.len() > MAX_PROMPT_LEN {
            return Err(StateError::PromptTooLong(value.len()));
        }

        *self.prompt.lock().unwrap_or_else(PoisonError::into_inner) = value.to_string();
        Ok(())
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: i32) {
        self.last_status = status;
    }

    pub fn last_child(&self) -> Option<u32> {
        self.last_child
    }

    pub fn record_child(&mut self, pid: u32) {
        self.last_child = Some(pid);
    }

    pub fn catalog(&self) -> &ExternalCommandCatalog {
        &self.catalog
    }

    pub fn teardown(&mut self) {
        self.catalog.release();
        self.last_child = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> ShellState {
        ShellState::new(ExternalCommandCatalog::from_names(vec!["ls".to_string()]))
    }

    #[test]
    fn test_initial_state() {
        let state = test_state();
        assert_eq!(state.prompt(), DEFAULT_PROMPT);
        assert_eq!(state.last_status(), 0);
        assert_eq!(state.last_child(), None);
    }

    #[test]
    fn test_set_prompt() -> Result<(), StateError> {
        let mut state = test_state();
        state.set_prompt("myshell")?;
        assert_eq!(state.prompt(), "myshell");
        Ok(())
    }

    #[test]
    fn test_prompt_handle_sees_updates() -> Result<(), StateError> {
        let mut state = test_state();
        let handle = state.prompt_handle();
        state.set_prompt("renamed")?;

        let seen = handle.lock().unwrap_or_else(PoisonError::into_inner).clone();
        assert_eq!(seen, "renamed");
        Ok(())
    }

    #[test]
    fn test_prompt_validation() {
        let mut state = test_state();

        assert!(matches!(state.set_prompt(""), Err(StateError::EmptyPrompt)));
        assert!(matches!(
            state.set_prompt("has\0nul"),
            Err(StateError::PromptContainsNul)
        ));
        assert!(matches!(
            state.set_prompt(&"x".repeat(MAX_PROMPT_LEN + 1)),
            Err(StateError::PromptTooLong(_))
        ));

        // Rejected values leave the prompt untouched
        assert_eq!(state.prompt(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_prompt_at_length_bound() -> Result<(), StateError> {
        let mut state = test_state();
        let value = "p".repeat(MAX_PROMPT_LEN);
        state.set_prompt(&value)?;
        assert_eq!(state.prompt(), value);
        Ok(())
    }

    #[test]
    fn test_status_and_child_updates() {
        let mut state = test_state();
        state.set_last_status(127);
        state.record_child(4242);

        assert_eq!(state.last_status(), 127);
        assert_eq!(state.last_child(), Some(4242));
    }

    #[test]
    fn test_teardown_releases_catalog() {
        let mut state = test_state();
        state.record_child(1);
        state.teardown();

        assert!(state.catalog().is_empty());
        assert_eq!(state.last_child(), None);
    }
}
