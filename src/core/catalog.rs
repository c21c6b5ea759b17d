use std::{fmt, fs, path::Path};

pub const DEFAULT_CATALOG_FILE: &str = "external_commands.txt";

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog read error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

// One program name per line, loaded once at startup. Membership is exact
// string equality in file order, not path resolution.
#[derive(Debug, Clone, Default)]
pub struct ExternalCommandCatalog {
    names: Vec<String>,
}

impl ExternalCommandCatalog {
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn release(&mut self) {
        self.names = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_catalog(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{}_{}", name, std::process::id()));
        fs::write(&path, content).expect("failed to write catalog fixture");
        path
    }

    #[test]
    fn test_load_keeps_file_order() -> Result<(), CatalogError> {
        let path = write_catalog("venule_catalog_order", "zgrep\nls\ncat\n");
        let catalog = ExternalCommandCatalog::load(&path)?;

        assert_eq!(catalog.names(), ["zgrep", "ls", "cat"]);
        fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_load_skips_blank_lines() -> Result<(), CatalogError> {
        let path = write_catalog("venule_catalog_blank", "ls\n\n   \ncat\n\n");
        let catalog = ExternalCommandCatalog::load(&path)?;

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("ls"));
        assert!(catalog.contains("cat"));
        fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("venule_catalog_does_not_exist");
        let result = ExternalCommandCatalog::load(&path);
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_membership_is_exact() {
        let catalog = ExternalCommandCatalog::from_names(vec!["ls".to_string()]);

        assert!(catalog.contains("ls"));
        assert!(!catalog.contains("l"));
        assert!(!catalog.contains("lsblk"));
        assert!(!catalog.contains("LS"));
    }

    #[test]
    fn test_release_drops_storage() {
        let mut catalog = ExternalCommandCatalog::from_names(vec!["ls".to_string()]);
        catalog.release();

        assert!(catalog.is_empty());
        assert!(!catalog.contains("ls"));
    }
}
