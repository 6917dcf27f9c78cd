//! Mirroring repository over a primary and a secondary store.
//!
//! # Responsibility
//! - Route writes to the primary store and mirror successful writes to the
//!   secondary as a best-effort, unawaited side effect.
//! - Route reads to the primary store with a single fallback to the
//!   secondary on failure.
//!
//! # Invariants
//! - A mirror write is only initiated after the primary write succeeds; a
//!   failed primary write never touches the secondary.
//! - Mirror failures are logged and swallowed, never surfaced to callers
//!   and never retried.
//! - The secondary is eventually consistent with the primary, not
//!   guaranteed consistent at any instant.

use std::sync::Arc;

use log::{info, warn};

use crate::model::Record;
use crate::op::AsyncOp;
use crate::query::{equal, FieldRef, Predicate, Query, SortCriterion};
use crate::store::{Store, StoreError};

/// Composition of two stores adding write-mirroring and read-fallback.
///
/// The repository does not own the stores' lifecycles; both are injected at
/// construction along with the identity field handle and the default sort
/// key applied by [`find`](Self::find).
pub struct MirroredRepository<T: Record> {
    primary: Arc<dyn Store<T>>,
    secondary: Arc<dyn Store<T>>,
    id_field: FieldRef<T, T::Id>,
    default_sort: SortCriterion<T>,
}

#[derive(Clone, Copy)]
enum WriteKind {
    Insert,
    Update,
    Delete,
}

impl WriteKind {
    fn apply<T: Record>(self, store: &dyn Store<T>, record: T) -> AsyncOp<T> {
        match self {
            Self::Insert => store.insert(record),
            Self::Update => store.update(record),
            Self::Delete => store.delete(record),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl<T: Record> MirroredRepository<T> {
    /// Creates a repository over `primary` and `secondary`.
    pub fn new(
        primary: Arc<dyn Store<T>>,
        secondary: Arc<dyn Store<T>>,
        id_field: FieldRef<T, T::Id>,
        default_sort: SortCriterion<T>,
    ) -> Self {
        Self {
            primary,
            secondary,
            id_field,
            default_sort,
        }
    }

    /// Inserts into the primary store, mirroring the insert on success.
    ///
    /// Primary failure propagates unchanged; no mirror is attempted.
    pub fn add(&self, record: T) -> AsyncOp<T> {
        self.mirrored_write(WriteKind::Insert, record)
    }

    /// Updates in the primary store, mirroring the update on success.
    pub fn update(&self, record: T) -> AsyncOp<T> {
        self.mirrored_write(WriteKind::Update, record)
    }

    /// Deletes from the primary store, mirroring the delete on success.
    pub fn remove(&self, record: T) -> AsyncOp<T> {
        self.mirrored_write(WriteKind::Delete, record)
    }

    /// Resolves a record by identity, falling back to the secondary store
    /// when the primary read fails.
    pub fn find_by_id(&self, id: T::Id) -> AsyncOp<Option<T>> {
        let query = Query::filter(equal(self.id_field, id));
        self.read_with_fallback(query)
            .map(|records| records.into_iter().next())
    }

    /// Finds records matching `predicate`, sorted by the default key,
    /// falling back to the secondary store when the primary read fails.
    pub fn find(&self, predicate: Predicate<T>) -> AsyncOp<Vec<T>> {
        let query = Query::filter(predicate).sorted_by(self.default_sort.clone());
        self.read_with_fallback(query)
    }

    fn mirrored_write(&self, kind: WriteKind, record: T) -> AsyncOp<T> {
        let secondary = Arc::clone(&self.secondary);
        kind.apply(self.primary.as_ref(), record)
            .on_complete(move |stored| {
                let mirror = kind.apply(secondary.as_ref(), stored.clone());
                tokio::spawn(async move {
                    if let Err(error) = mirror.resolve().await {
                        warn!(
                            "event=mirror_write module=repo status=error op={} error={error}",
                            kind.as_str()
                        );
                    }
                });
            })
    }

    fn read_with_fallback(&self, query: Query<T>) -> AsyncOp<Vec<T>> {
        let secondary = Arc::clone(&self.secondary);
        self.primary.execute(&query).recover(move |primary_error| {
            info!("event=read_fallback module=repo status=start primary_error={primary_error}");
            secondary.execute(&query).map_err(move |secondary_error| {
                StoreError::recovery_exhausted(primary_error, secondary_error)
            })
        })
    }
}
