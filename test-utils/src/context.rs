use entity::prelude::TablesDocument;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{
    builder::{ACTIVE_FILE, ARCHIVED_FILE},
    error::TestError,
};

/// Test context owning an isolated data directory.
///
/// The directory and everything in it is deleted when the context is dropped,
/// so keep the context alive for as long as the code under test uses the path.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Creates a context with a new, empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with an empty directory
    /// - `Err(TestError::Io)` - The directory could not be created
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of the data directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the data directory.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Serializes a document into the data directory.
    pub fn write_document(&self, name: &str, document: &TablesDocument) -> Result<(), TestError> {
        let contents = serde_json::to_string_pretty(document)?;
        std::fs::write(self.file_path(name), contents)?;
        Ok(())
    }

    /// Reads a document back from the data directory.
    ///
    /// # Returns
    /// - `Ok(TablesDocument)` - Parsed document
    /// - `Err(TestError)` - File missing or not a valid document
    pub fn read_document(&self, name: &str) -> Result<TablesDocument, TestError> {
        let contents = std::fs::read_to_string(self.file_path(name))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reads the active table document.
    pub fn read_active(&self) -> Result<TablesDocument, TestError> {
        self.read_document(ACTIVE_FILE)
    }

    /// Reads the archived table document.
    pub fn read_archived(&self) -> Result<TablesDocument, TestError> {
        self.read_document(ARCHIVED_FILE)
    }

    /// Names of all files in the data directory, sorted.
    ///
    /// Used to assert that no temporary files were left behind by a write.
    pub fn file_names(&self) -> Result<Vec<String>, TestError> {
        let mut names = std::fs::read_dir(self.dir.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }
}
