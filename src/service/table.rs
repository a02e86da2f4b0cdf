//! Table store: the single source of truth for tables while the bot runs.
//!
//! Every mutation follows the same sequence on a spawned task: take the
//! table's lock, mutate the in-memory collections, flush to disk, release.
//! Running it on its own task means a handler that is dropped mid-await can't
//! leave a change applied in memory but never written. Flush failures don't
//! roll the change back; they are reported through `Committed::flush` and the
//! next successful flush includes the change.

use entity::prelude::ArchiveReason;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::{Mutex, RwLock};

use crate::{
    data::table::{to_document, TableRepository, TablesSnapshot},
    error::{
        internal::InternalError, persistence::PersistenceError, table::TableError, AppError,
    },
    model::table::{
        JoinOutcome, LeaveOutcome, ListScope, Table, TableDraft, TableRole, UpdateTableParams,
    },
};

/// Result of a mutation together with the outcome of writing it to disk.
///
/// The mutation itself always happened when a `Committed` is returned.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub flush: Result<(), PersistenceError>,
}

impl<T> Committed<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            flush: Ok(()),
        }
    }

    /// Whether the change is known to be on disk.
    pub fn is_persisted(&self) -> bool {
        self.flush.is_ok()
    }
}

/// Which documents a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlushScope {
    Active,
    Both,
}

#[derive(Debug, Default)]
struct Tables {
    active: HashMap<String, Table>,
    archived: HashMap<String, Table>,
}

impl Tables {
    fn active_mut(&mut self, id: &str) -> Result<&mut Table, TableError> {
        if let Some(table) = self.active.get_mut(id) {
            return Ok(table);
        }
        if self.archived.contains_key(id) {
            Err(TableError::Archived(id.to_string()))
        } else {
            Err(TableError::NotFound(id.to_string()))
        }
    }

    fn archive(
        &mut self,
        id: &str,
        reason: ArchiveReason,
        archived_by: Option<u64>,
    ) -> Result<Table, TableError> {
        let mut table = match self.active.remove(id) {
            Some(table) => table,
            None if self.archived.contains_key(id) => {
                return Err(TableError::Archived(id.to_string()))
            }
            None => return Err(TableError::NotFound(id.to_string())),
        };
        table.mark_archived(reason, archived_by);
        self.archived.insert(id.to_string(), table.clone());
        Ok(table)
    }
}

struct StoreInner {
    tables: RwLock<Tables>,
    /// One lock per table id, created on first use.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Held while taking a snapshot and writing it.
    flush_lock: Mutex<()>,
    repo: TableRepository,
}

impl StoreInner {
    async fn table_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id.to_string()).or_default().clone()
    }

    /// Drops the lock of an id that is not an active table.
    ///
    /// Archived and unknown tables reject every mutation under the collection
    /// lock, so they need no per-table ordering.
    async fn release_lock(&self, id: &str) {
        if self.tables.read().await.active.contains_key(id) {
            return;
        }
        self.locks.lock().await.remove(id);
    }

    /// Writes the current state of the selected documents.
    ///
    /// The snapshot is taken after the flush lock is acquired, so whichever
    /// flush finishes last always wrote the latest state.
    async fn flush(&self, scope: FlushScope) -> Result<(), PersistenceError> {
        let _guard = self.flush_lock.lock().await;

        let snapshot = {
            let tables = self.tables.read().await;
            TablesSnapshot {
                active: Some(to_document(tables.active.values())),
                archived: (scope == FlushScope::Both).then(|| to_document(tables.archived.values())),
            }
        };

        let result = self.repo.save(snapshot).await;
        if let Err(e) = &result {
            tracing::error!("Failed to persist tables: {}", e);
        }
        result
    }
}

/// In-memory table store backed by the two JSON documents.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct TableStore {
    inner: Arc<StoreInner>,
}

impl TableStore {
    /// Loads both documents and builds the store.
    ///
    /// # Arguments
    /// - `repo` - Repository for the data directory
    ///
    /// # Returns
    /// - `Ok(TableStore)` - Store holding every persisted table
    /// - `Err(PersistenceError)` - A document is corrupt or unreadable
    pub async fn open(repo: TableRepository) -> Result<Self, PersistenceError> {
        let stored = repo.load().await?;

        Ok(Self {
            inner: Arc::new(StoreInner {
                tables: RwLock::new(Tables {
                    active: stored.active,
                    archived: stored.archived,
                }),
                locks: Mutex::new(HashMap::new()),
                flush_lock: Mutex::new(()),
                repo,
            }),
        })
    }

    /// Runs `mutate` under the table's lock and flushes the result.
    ///
    /// The whole sequence runs on a spawned task and is awaited here, so it
    /// completes even if the caller's future is dropped.
    async fn commit<T, F>(
        &self,
        table_id: Option<String>,
        scope: FlushScope,
        mutate: F,
    ) -> Result<Committed<T>, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Tables) -> Result<T, TableError> + Send + 'static,
    {
        let inner = self.inner.clone();

        let task = tokio::spawn(async move {
            let table_guard = match table_id.as_deref() {
                Some(id) => Some(inner.table_lock(id).await.lock_owned().await),
                None => None,
            };

            let mutated = {
                let mut tables = inner.tables.write().await;
                mutate(&mut tables)
            };

            let committed = match mutated {
                Ok(value) => Ok(Committed {
                    value,
                    flush: inner.flush(scope).await,
                }),
                Err(e) => Err(e),
            };

            if let Some(id) = table_id.as_deref() {
                inner.release_lock(id).await;
            }
            drop(table_guard);
            committed
        });

        let committed = task.await.map_err(InternalError::TaskJoin)??;
        Ok(committed)
    }

    /// Inserts a validated draft into the active collection.
    ///
    /// # Arguments
    /// - `draft` - Table built by `TableDraft::new`, usually with its message id attached
    ///
    /// # Returns
    /// - `Ok(Committed<Table>)` - The stored table
    /// - `Err(AppError::TableErr(Validation))` - A table with the same id already exists
    pub async fn create(&self, draft: TableDraft) -> Result<Committed<Table>, AppError> {
        let table = draft.into_table();
        let id = table.id.clone();

        let committed = self
            .commit(Some(id.clone()), FlushScope::Active, move |tables| {
                if tables.active.contains_key(&table.id) || tables.archived.contains_key(&table.id)
                {
                    return Err(TableError::Validation(
                        "A table with this id already exists.".to_string(),
                    ));
                }
                tables.active.insert(table.id.clone(), table.clone());
                Ok(table)
            })
            .await?;

        tracing::info!(
            "Created table {} ({}) by GM {}",
            id,
            committed.value.system,
            committed.value.gm_id
        );
        Ok(committed)
    }

    /// Looks a table up by id, active first, then archived.
    ///
    /// # Returns
    /// - `Ok(Table)` - A copy of the table
    /// - `Err(TableError::NotFound)` - No table with this id exists
    pub async fn get(&self, id: &str) -> Result<Table, TableError> {
        let tables = self.inner.tables.read().await;
        tables
            .active
            .get(id)
            .or_else(|| tables.archived.get(id))
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.to_string()))
    }

    /// Signs a user up for a table.
    ///
    /// # Arguments
    /// - `id` - Table id
    /// - `user_id` - Discord id of the user
    ///
    /// # Returns
    /// - `Ok(Committed<(JoinOutcome, Table)>)` - Outcome and the updated table
    /// - `Err(AppError::TableErr(_))` - Not found, archived, already present, or own table
    pub async fn join(
        &self,
        id: &str,
        user_id: u64,
    ) -> Result<Committed<(JoinOutcome, Table)>, AppError> {
        let table_id = id.to_string();
        let committed = self
            .commit(Some(table_id.clone()), FlushScope::Active, move |tables| {
                let table = tables.active_mut(&table_id)?;
                let outcome = table.join(user_id)?;
                Ok((outcome, table.clone()))
            })
            .await?;

        tracing::info!("User {} {:?} table {}", user_id, committed.value.0, id);
        Ok(committed)
    }

    /// Removes a user from a table, promoting the first waiting user into a freed seat.
    ///
    /// # Returns
    /// - `Ok(Committed<(LeaveOutcome, Table)>)` - Outcome and the updated table
    /// - `Err(AppError::TableErr(_))` - Not found, archived, or user not signed up
    pub async fn leave(
        &self,
        id: &str,
        user_id: u64,
    ) -> Result<Committed<(LeaveOutcome, Table)>, AppError> {
        let table_id = id.to_string();
        let committed = self
            .commit(Some(table_id.clone()), FlushScope::Active, move |tables| {
                let table = tables.active_mut(&table_id)?;
                let outcome = table.leave(user_id)?;
                Ok((outcome, table.clone()))
            })
            .await?;

        tracing::info!("User {} left table {} ({:?})", user_id, id, committed.value.0);
        Ok(committed)
    }

    /// Moves a table to the archive. Irreversible.
    ///
    /// # Arguments
    /// - `id` - Table id
    /// - `reason` - Why the table is archived
    /// - `archived_by` - User who archived it, `None` for automatic archiving
    ///
    /// # Returns
    /// - `Ok(Committed<Table>)` - The archived table
    /// - `Err(AppError::TableErr(Archived | NotFound))` - Already archived or unknown
    pub async fn archive(
        &self,
        id: &str,
        reason: ArchiveReason,
        archived_by: Option<u64>,
    ) -> Result<Committed<Table>, AppError> {
        let table_id = id.to_string();
        let committed = self
            .commit(Some(table_id.clone()), FlushScope::Both, move |tables| {
                tables.archive(&table_id, reason, archived_by)
            })
            .await?;

        tracing::info!("Archived table {} ({:?})", id, reason);
        Ok(committed)
    }

    /// Archives every active table matching `predicate`.
    ///
    /// Used when the bot loses access to a guild or channel. Nothing is written
    /// when no table matches.
    ///
    /// # Returns
    /// - `Ok(Committed<Vec<Table>>)` - The archived tables, possibly empty
    pub async fn archive_where<P>(
        &self,
        predicate: P,
        reason: ArchiveReason,
    ) -> Result<Committed<Vec<Table>>, AppError>
    where
        P: Fn(&Table) -> bool + Send + 'static,
    {
        let any_match = {
            let tables = self.inner.tables.read().await;
            tables.active.values().any(&predicate)
        };
        if !any_match {
            return Ok(Committed::clean(Vec::new()));
        }

        let committed = self
            .commit(None, FlushScope::Both, move |tables| {
                let ids: Vec<String> = tables
                    .active
                    .values()
                    .filter(|t| predicate(t))
                    .map(|t| t.id.clone())
                    .collect();

                ids.iter()
                    .map(|id| tables.archive(id, reason, None))
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        for table in &committed.value {
            self.inner.release_lock(&table.id).await;
        }

        tracing::info!(
            "Archived {} tables ({:?})",
            committed.value.len(),
            reason
        );
        Ok(committed)
    }

    /// Applies an edit to an active table.
    ///
    /// # Returns
    /// - `Ok(Committed<(Table, Vec<u64>)>)` - Updated table and users promoted by a raised cap
    /// - `Err(AppError::TableErr(Validation))` - Invalid field, or cap below the current roster
    /// - `Err(AppError::TableErr(Archived | NotFound))` - Table can't be edited
    pub async fn edit(
        &self,
        id: &str,
        params: UpdateTableParams,
    ) -> Result<Committed<(Table, Vec<u64>)>, AppError> {
        let table_id = id.to_string();
        let committed = self
            .commit(Some(table_id.clone()), FlushScope::Active, move |tables| {
                let table = tables.active_mut(&table_id)?;
                let promoted = table.apply(params)?;
                Ok((table.clone(), promoted))
            })
            .await?;

        tracing::info!("Edited table {}", id);
        Ok(committed)
    }

    /// Records the message that displays a table.
    pub async fn attach_message(
        &self,
        id: &str,
        message_id: u64,
    ) -> Result<Committed<Table>, AppError> {
        let table_id = id.to_string();
        self.commit(Some(table_id.clone()), FlushScope::Active, move |tables| {
            let table = tables.active_mut(&table_id)?;
            table.message_id = Some(message_id);
            Ok(table.clone())
        })
        .await
    }

    /// Number of per-table locks currently held in the registry.
    #[cfg(test)]
    pub(crate) async fn lock_count(&self) -> usize {
        self.inner.locks.lock().await.len()
    }

    /// Active tables visible in `scope`, sorted by schedule text.
    ///
    /// # Arguments
    /// - `scope` - A channel, or a user in a DM together with the channels they can see
    ///
    /// # Returns
    /// - `Vec<Table>` - Matching tables
    pub async fn list_for(&self, scope: &ListScope) -> Vec<Table> {
        let tables = self.inner.tables.read().await;
        let mut result: Vec<Table> = tables
            .active
            .values()
            .filter(|table| match scope {
                ListScope::Channel(channel_id) => table.channel_id == *channel_id,
                ListScope::Direct {
                    user_id,
                    visible_channel_ids,
                } => {
                    table.role_of(*user_id).is_some()
                        || visible_channel_ids.contains(&table.channel_id)
                }
            })
            .cloned()
            .collect();

        sort_by_schedule(&mut result, |t| t);
        result
    }

    /// Active tables the user runs, plays in or waits for, with their role.
    pub async fn tables_for_user(&self, user_id: u64) -> Vec<(Table, TableRole)> {
        let tables = self.inner.tables.read().await;
        let mut result: Vec<(Table, TableRole)> = tables
            .active
            .values()
            .filter_map(|table| table.role_of(user_id).map(|role| (table.clone(), role)))
            .collect();

        sort_by_schedule(&mut result, |(t, _)| t);
        result
    }

    /// Copies of all active tables, sorted by schedule text.
    pub async fn active_tables(&self) -> Vec<Table> {
        let tables = self.inner.tables.read().await;
        let mut result: Vec<Table> = tables.active.values().cloned().collect();

        sort_by_schedule(&mut result, |t| t);
        result
    }

    /// Channels that hold at least one active table.
    pub async fn active_channel_ids(&self) -> HashSet<u64> {
        let tables = self.inner.tables.read().await;
        tables.active.values().map(|t| t.channel_id).collect()
    }
}

fn sort_by_schedule<E>(entries: &mut [E], table: impl Fn(&E) -> &Table) {
    entries.sort_by(|a, b| {
        let (a, b) = (table(a), table(b));
        a.schedule
            .to_lowercase()
            .cmp(&b.schedule.to_lowercase())
            .then_with(|| a.system.cmp(&b.system))
            .then_with(|| a.id.cmp(&b.id))
    });
}
