use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::PoisonError;

use rustyline::{config::Configurer, history::FileHistory, Editor};

use crate::{
    core::{
        catalog::{CatalogError, ExternalCommandCatalog, DEFAULT_CATALOG_FILE},
        classify::{classify, CommandCategory},
        commands::BuiltinDispatcher,
        state::ShellState,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
    process::{signal, ProcessExecutor},
};

const HISTORY_FILE: &str = ".venule_history";
const PROMPT_DIRECTIVE: &str = "PS1=";
const NOT_FOUND_STATUS: i32 = 127;
const GENERAL_FAILURE_STATUS: i32 = 1;

pub struct Shell {
    editor: Editor<ShellCompleter, FileHistory>,
    state: ShellState,
    dispatcher: BuiltinDispatcher,
    executor: ProcessExecutor,
    highlighter: SyntaxHighlighter,
    flags: Flags,
}

pub(crate) fn render_prompt(name: &str) -> String {
    format!("[{}]$ ", name)
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let highlighter = SyntaxHighlighter::new();
        let catalog = Self::load_catalog(&flags, &highlighter)?;

        let mut completer = ShellCompleter::new();
        completer.update_catalog(catalog.names());

        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        let state = ShellState::new(catalog);

        // An interactive interrupt re-displays the prompt; the handler
        // holds a non-owning view of the prompt text.
        let prompt_handle = state.prompt_handle();
        ctrlc::set_handler(move || {
            let name = prompt_handle
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            print!("\n{}", highlighter.highlight_prompt(&render_prompt(&name)));
            let _ = std::io::stdout().flush();
        })?;
        signal::spawn_term_listener()?;

        let executor = ProcessExecutor::new(&flags);

        Ok(Shell {
            editor,
            state,
            dispatcher: BuiltinDispatcher::new(),
            executor,
            highlighter,
            flags,
        })
    }

    fn load_catalog(
        flags: &Flags,
        highlighter: &SyntaxHighlighter,
    ) -> Result<ExternalCommandCatalog, ShellError> {
        let path = flags
            .get_value("catalog")
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATALOG_FILE);

        match ExternalCommandCatalog::load(Path::new(path)) {
            Ok(catalog) => Ok(catalog),
            Err(CatalogError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                if !flags.is_set("quiet") {
                    eprintln!(
                        "{}",
                        highlighter.highlight_warning(&format!(
                            "warning: could not load external commands from {}",
                            path
                        ))
                    );
                }
                Ok(ExternalCommandCatalog::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }
        self.load_history();

        loop {
            let prompt = render_prompt(&self.state.prompt());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    execute_line(
                        &line,
                        &mut self.state,
                        &self.dispatcher,
                        &self.executor,
                        &self.highlighter,
                    );
                }
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("{}", self.highlighter.highlight_success("Goodbye!"));
                    break;
                }
                Err(e) => {
                    eprintln!(
                        "{}",
                        self.highlighter.highlight_error(&format!("read error: {}", e))
                    );
                    continue;
                }
            }
        }

        self.save_history();
        self.state.teardown();
        Ok(())
    }

    fn print_banner(&self) {
        print!("\x1b[2J\x1b[H");
        println!(
            "{}",
            self.highlighter
                .highlight_success(&format!("venule {}", env!("CARGO_PKG_VERSION")))
        );
        println!(
            "{}",
            self.highlighter
                .highlight_hint("type 'exit' to quit, 'PS1=<name>' to change the prompt")
        );
        if !self.state.catalog().is_empty() {
            println!(
                "{}",
                self.highlighter.highlight_success(&format!(
                    "loaded {} external commands",
                    self.state.catalog().len()
                ))
            );
        }
    }

    fn history_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(HISTORY_FILE))
    }

    fn load_history(&mut self) {
        if let Some(path) = Self::history_path() {
            // A missing history file is a fresh session, not an error
            let _ = self.editor.load_history(&path);
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = Self::history_path() {
            if let Err(e) = self.editor.save_history(&path) {
                if !self.flags.is_set("quiet") {
                    eprintln!(
                        "{}",
                        self.highlighter
                            .highlight_warning(&format!("warning: could not save history: {}", e))
                    );
                }
            }
        }
    }
}

pub(crate) fn prompt_directive(line: &str) -> Option<&str> {
    line.strip_prefix(PROMPT_DIRECTIVE)
}

// One classify-execute cycle. Every executing path leaves the last exit
// status freshly set; the prompt directive and blank lines execute nothing.
fn execute_line(
    line: &str,
    state: &mut ShellState,
    dispatcher: &BuiltinDispatcher,
    executor: &ProcessExecutor,
    highlighter: &SyntaxHighlighter,
) {
    if let Some(value) = prompt_directive(line) {
        apply_prompt_directive(value, state, highlighter);
        return;
    }

    // Leading whitespace never changes what a line means; trailing
    // whitespace can (it is what separates `echo ` from bare `echo`).
    let line = line.trim_start();
    let Some(token) = line.split_whitespace().next() else {
        return;
    };

    match classify(token, state.catalog()) {
        CommandCategory::Builtin => match dispatcher.dispatch(line, state) {
            Ok(()) => state.set_last_status(0),
            Err(e) => {
                eprintln!("{}", highlighter.highlight_error(&e.to_string()));
                state.set_last_status(GENERAL_FAILURE_STATUS);
            }
        },
        CommandCategory::External => match executor.execute(line, state) {
            Ok(status) => state.set_last_status(status),
            Err(e) => {
                eprintln!("{}", highlighter.highlight_error(&e.to_string()));
                state.set_last_status(GENERAL_FAILURE_STATUS);
            }
        },
        CommandCategory::NotFound => {
            println!(
                "{}",
                highlighter.highlight_warning(&format!("command not found: {}", token))
            );
            state.set_last_status(NOT_FOUND_STATUS);
        }
    }
}

fn apply_prompt_directive(value: &str, state: &mut ShellState, highlighter: &SyntaxHighlighter) {
    if value.is_empty() || value.starts_with(' ') {
        println!(
            "{}",
            highlighter.highlight_hint("to rename the shell use: PS1=<name>")
        );
        return;
    }

    if let Err(e) = state.set_prompt(value) {
        eprintln!("{}", highlighter.highlight_error(&format!("PS1: {}", e)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{DEFAULT_PROMPT, MAX_PROMPT_LEN};
    use std::os::unix::fs::PermissionsExt;
    use std::{env, fs};

    fn quiet_executor() -> ProcessExecutor {
        let mut flags = Flags::new();
        flags
            .parse(&["-q".to_string()])
            .expect("failed to parse test flags");
        ProcessExecutor::new(&flags)
    }

    fn run_line(line: &str, state: &mut ShellState) {
        let dispatcher = BuiltinDispatcher::new();
        let executor = quiet_executor();
        let highlighter = SyntaxHighlighter::new();
        execute_line(line, state, &dispatcher, &executor, &highlighter);
    }

    #[test]
    fn test_render_prompt_format() {
        assert_eq!(render_prompt("venule"), "[venule]$ ");
    }

    #[test]
    fn test_prompt_directive_parsing() {
        assert_eq!(prompt_directive("PS1=newname"), Some("newname"));
        assert_eq!(prompt_directive("PS1="), Some(""));
        assert_eq!(prompt_directive("echo PS1=x"), None);
        assert_eq!(prompt_directive(" PS1=x"), None);
    }

    #[test]
    fn test_prompt_directive_replaces_prompt() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());
        run_line("PS1=renamed", &mut state);
        assert_eq!(state.prompt(), "renamed");
    }

    #[test]
    fn test_malformed_prompt_directives_change_nothing() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());

        run_line("PS1=", &mut state);
        run_line("PS1= spaced", &mut state);
        run_line(&format!("PS1={}", "x".repeat(MAX_PROMPT_LEN + 1)), &mut state);

        assert_eq!(state.prompt(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_unknown_command_sets_127_without_spawning() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());
        run_line("doesnotexist123", &mut state);

        assert_eq!(state.last_status(), 127);
        assert_eq!(state.last_child(), None);
    }

    #[test]
    fn test_blank_line_leaves_status_alone() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());
        state.set_last_status(42);

        run_line("   ", &mut state);
        assert_eq!(state.last_status(), 42);
    }

    #[test]
    fn test_builtin_success_sets_zero() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());
        state.set_last_status(42);

        run_line("echo hello", &mut state);
        assert_eq!(state.last_status(), 0);

        // the trailing space makes this the plain echo form, not bare echo
        run_line("echo ", &mut state);
        assert_eq!(state.last_status(), 0);
    }

    #[test]
    fn test_builtin_failure_sets_one() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());

        // bare "echo" is a builtin token with no matching sub-handler
        run_line("echo", &mut state);
        assert_eq!(state.last_status(), 1);

        run_line("cd one two three", &mut state);
        assert_eq!(state.last_status(), 1);
    }

    #[test]
    fn test_cataloged_external_reports_its_exit_code() {
        let script = env::temp_dir().join(format!("venule_shell_exit5_{}", std::process::id()));
        fs::write(&script, "#!/bin/sh\nexit 5\n").expect("failed to write script fixture");
        let mut perms = fs::metadata(&script)
            .expect("failed to stat script fixture")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).expect("failed to chmod script fixture");

        let name = script.display().to_string();
        let mut state = ShellState::new(ExternalCommandCatalog::from_names(vec![name.clone()]));

        assert_eq!(classify(&name, state.catalog()), CommandCategory::External);
        run_line(&name, &mut state);

        assert_eq!(state.last_status(), 5);
        assert!(state.last_child().is_some());
        let _ = fs::remove_file(script);
    }

    #[test]
    fn test_query_builtins_never_reach_the_executor() {
        let mut state = ShellState::new(ExternalCommandCatalog::empty());

        for line in ["echo $?", "echo $$", "echo $SHELL"] {
            run_line(line, &mut state);
            assert_eq!(state.last_status(), 0, "query form failed: {}", line);
            assert_eq!(state.last_child(), None, "spawned a child for: {}", line);
        }
    }
}
