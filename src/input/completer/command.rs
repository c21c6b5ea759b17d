use std::{borrow::Cow, collections::BTreeSet};

use rustyline::completion::Pair;

use crate::core::classify::BUILTIN_COMMANDS;

// Completes the first word from the names the classifier can actually
// resolve: the builtin set plus the session catalog.
#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeSet<Cow<'static, str>>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeSet::new(),
        };
        completer.add_builtin_commands();
        completer
    }

    fn add_builtin_commands(&mut self) {
        for name in BUILTIN_COMMANDS {
            self.commands.insert(Cow::Borrowed(name));
        }
    }

    pub fn update_catalog(&mut self, names: &[String]) {
        for name in names {
            self.commands.insert(Cow::Owned(name.clone()));
        }
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect()
    }
}
