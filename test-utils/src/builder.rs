use entity::prelude::{TableRecord, TablesDocument};

use crate::{context::TestContext, error::TestError};

/// File name of the active table document.
pub const ACTIVE_FILE: &str = "tables_active.json";
/// File name of the archived table document.
pub const ARCHIVED_FILE: &str = "tables_archived.json";
/// File name of the settings document.
pub const SETTINGS_FILE: &str = "config.json";

/// Builder for creating test contexts with a seeded data directory.
///
/// Documents are only written when something was added for them, so a test can
/// exercise the "file does not exist" path simply by not seeding it.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_active(id, record)
///     .with_raw_file("tables_archived.json", "{ not json")
///     .build()?;
/// ```
pub struct TestBuilder {
    active: Option<TablesDocument>,
    archived: Option<TablesDocument>,
    raw_files: Vec<(String, String)>,
}

impl TestBuilder {
    /// Creates a builder that produces an empty data directory.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with nothing seeded
    pub fn new() -> Self {
        Self {
            active: None,
            archived: None,
            raw_files: Vec::new(),
        }
    }

    /// Adds a record to the active document.
    ///
    /// # Arguments
    /// - `id` - Table id used as the document key
    /// - `record` - Record to store under `id`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_active(mut self, id: impl Into<String>, record: TableRecord) -> Self {
        self.active
            .get_or_insert_with(TablesDocument::new)
            .insert(id.into(), record);
        self
    }

    /// Adds a record to the archived document.
    ///
    /// # Arguments
    /// - `id` - Table id used as the document key
    /// - `record` - Record to store under `id`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_archived(mut self, id: impl Into<String>, record: TableRecord) -> Self {
        self.archived
            .get_or_insert_with(TablesDocument::new)
            .insert(id.into(), record);
        self
    }

    /// Writes an empty active document, distinct from having no file at all.
    pub fn with_empty_active(mut self) -> Self {
        self.active.get_or_insert_with(TablesDocument::new);
        self
    }

    /// Writes arbitrary contents to a file in the data directory.
    ///
    /// Raw files are written after the documents, so they replace a seeded
    /// document of the same name. Use this for corrupt or hand-edited data.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `contents` - Exact file contents
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_raw_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.raw_files.push((name.into(), contents.into()));
        self
    }

    /// Writes a settings document.
    ///
    /// # Arguments
    /// - `settings` - JSON value written to `config.json`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_settings(self, settings: serde_json::Value) -> Self {
        let contents = settings.to_string();
        self.with_raw_file(SETTINGS_FILE, contents)
    }

    /// Creates the temporary directory and writes everything that was seeded.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the directory; it is removed on drop
    /// - `Err(TestError)` - Directory creation or a seed write failed
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if let Some(active) = self.active {
            context.write_document(ACTIVE_FILE, &active)?;
        }
        if let Some(archived) = self.archived {
            context.write_document(ARCHIVED_FILE, &archived)?;
        }
        for (name, contents) in self.raw_files {
            std::fs::write(context.file_path(&name), contents)?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
