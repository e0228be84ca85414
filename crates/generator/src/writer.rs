//! Destinations for rendered SDL

use openapi_graphql_common::{Result, TranslationError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists rendered SDL text
#[cfg_attr(test, mockall::automock)]
pub trait SchemaWriter {
    fn write(&self, sdl: &str) -> Result<()>;
}

/// Writes SDL to a file, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaWriter for FileWriter {
    fn write(&self, sdl: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                TranslationError::Generation(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.path, sdl).map_err(|e| {
            TranslationError::Generation(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), bytes = sdl.len(), "wrote schema");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/nested/schema.graphql");

        let writer = FileWriter::new(&path);
        writer.write("type Query {\n  ok: Boolean\n}\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "type Query {\n  ok: Boolean\n}\n"
        );
    }

    #[test]
    fn test_file_writer_reports_failures() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be overwritten by a file
        let writer = FileWriter::new(temp_dir.path());
        assert!(matches!(
            writer.write("x"),
            Err(TranslationError::Generation(_))
        ));
    }
}
