use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

#[derive(Clone)]
pub struct PathCompleter;

impl Default for PathCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = self.split_input(incomplete);

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(&file_prefix) {
                        matches.push(self.completion_pair(name, &entry.path(), &dir_to_search));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn split_input(&self, incomplete: &str) -> (PathBuf, String) {
        let path = Path::new(incomplete);

        if incomplete.is_empty() {
            (PathBuf::from("."), String::new())
        } else if incomplete.ends_with('/') {
            (PathBuf::from(incomplete), String::new())
        } else {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let prefix = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            (dir, prefix)
        }
    }

    fn completion_pair(&self, name: &str, full_path: &Path, dir_to_search: &Path) -> Pair {
        let completed = if dir_to_search == Path::new(".") {
            name.to_string()
        } else {
            dir_to_search.join(name).to_string_lossy().into_owned()
        };

        if full_path.is_dir() {
            Pair {
                display: format!("{}/", completed),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: completed.clone(),
                replacement: format!("{} ", completed),
            }
        }
    }
}
