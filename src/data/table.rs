use entity::prelude::{TableRecord, TableStatus, TablesDocument};
use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

use crate::{error::persistence::PersistenceError, model::table::Table};

/// File name of the document holding active tables.
pub const ACTIVE_FILE: &str = "tables_active.json";
/// File name of the document holding archived tables.
pub const ARCHIVED_FILE: &str = "tables_archived.json";

/// Both collections as loaded from disk, keyed by table id.
#[derive(Debug, Default)]
pub struct StoredTables {
    pub active: HashMap<String, Table>,
    pub archived: HashMap<String, Table>,
}

/// Documents to write in one save. `None` leaves that file untouched.
#[derive(Debug, Default)]
pub struct TablesSnapshot {
    pub active: Option<TablesDocument>,
    pub archived: Option<TablesDocument>,
}

/// Reads and writes the two table documents in a data directory.
///
/// Writes are atomic per document: the new content goes to a temporary file in
/// the same directory, is synced, then renamed over the target. Concurrent saves
/// are serialized so an older snapshot can never overwrite a newer one that
/// started writing first.
pub struct TableRepository {
    active_path: PathBuf,
    archived_path: PathBuf,
    write_lock: Mutex<()>,
}

impl TableRepository {
    /// Creates a repository for the documents in `data_dir`.
    ///
    /// The directory is created on the first save if it does not exist.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            active_path: data_dir.join(ACTIVE_FILE),
            archived_path: data_dir.join(ARCHIVED_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn active_path(&self) -> &Path {
        &self.active_path
    }

    pub fn archived_path(&self) -> &Path {
        &self.archived_path
    }

    /// Loads both documents.
    ///
    /// An absent document is an empty collection; an empty file is corrupt. Records from the active
    /// document are normalised to active status without archive metadata, and
    /// an id present in both documents is kept only as archived.
    ///
    /// # Returns
    /// - `Ok(StoredTables)` - Both collections
    /// - `Err(PersistenceError::Corrupt)` - A document is not valid JSON of the expected shape
    /// - `Err(PersistenceError::InvalidRecord)` - A record holds an unparsable snowflake or an inconsistent roster
    /// - `Err(PersistenceError::Read)` - A document exists but could not be read
    pub async fn load(&self) -> Result<StoredTables, PersistenceError> {
        let active_path = self.active_path.clone();
        let archived_path = self.archived_path.clone();

        let (active_doc, archived_doc) = tokio::task::spawn_blocking(move || {
            Ok::<_, PersistenceError>((read_document(&active_path)?, read_document(&archived_path)?))
        })
        .await??;

        let mut active = into_tables(&self.active_path, active_doc)?;
        let mut archived = into_tables(&self.archived_path, archived_doc)?;

        for table in active.values_mut() {
            table.status = TableStatus::Active;
            table.archive_reason = None;
            table.archived_at = None;
            table.archived_by = None;
        }
        for table in archived.values_mut() {
            table.status = TableStatus::Archived;
        }

        active.retain(|id, _| {
            let duplicate = archived.contains_key(id);
            if duplicate {
                tracing::warn!(
                    "Table {} is present in both documents; keeping the archived copy",
                    id
                );
            }
            !duplicate
        });

        tracing::info!(
            "Loaded {} active and {} archived tables",
            active.len(),
            archived.len()
        );

        Ok(StoredTables { active, archived })
    }

    /// Writes the documents present in `snapshot`.
    ///
    /// # Arguments
    /// - `snapshot` - Documents to write; `None` entries are skipped
    ///
    /// # Returns
    /// - `Ok(())` - Every selected document was replaced
    /// - `Err(PersistenceError::Write)` - A write failed; that file still holds its previous content
    /// - `Err(PersistenceError::Serialize)` - A document could not be encoded
    pub async fn save(&self, snapshot: TablesSnapshot) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;

        let active_path = self.active_path.clone();
        let archived_path = self.archived_path.clone();

        tokio::task::spawn_blocking(move || {
            if let Some(document) = snapshot.active {
                write_document(&active_path, &document)?;
            }
            if let Some(document) = snapshot.archived {
                write_document(&archived_path, &document)?;
            }
            Ok(())
        })
        .await?
    }
}

/// Builds the on-disk document for a collection.
pub fn to_document<'a>(tables: impl IntoIterator<Item = &'a Table>) -> TablesDocument {
    tables
        .into_iter()
        .map(|table| (table.id.clone(), table.to_entity()))
        .collect()
}

fn into_tables(
    path: &Path,
    document: TablesDocument,
) -> Result<HashMap<String, Table>, PersistenceError> {
    document
        .into_iter()
        .map(|(id, record)| {
            Table::from_entity(id.clone(), record)
                .map(|table| (id.clone(), table))
                .map_err(|source| PersistenceError::InvalidRecord {
                    path: path.to_path_buf(),
                    table_id: id,
                    source,
                })
        })
        .collect()
}

fn read_document(path: &Path) -> Result<TablesDocument, PersistenceError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TablesDocument::new()),
        Err(e) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    serde_json::from_slice::<TablesDocument>(&bytes).map_err(|e| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_document(path: &Path, document: &TablesDocument) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec_pretty(document).map_err(PersistenceError::Serialize)?;
    write_atomic(path, |file| file.write_all(&bytes))
}

/// Replaces `path` with whatever `write` produces, or leaves it untouched on failure.
///
/// The temporary file lives next to the target so the final rename never
/// crosses a filesystem boundary. It is removed when `write` or the sync fails.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let write_err = |source: io::Error| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".tables_")
        .suffix(".json")
        .tempfile_in(dir)
        .map_err(write_err)?;

    write(temp.as_file_mut()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}
