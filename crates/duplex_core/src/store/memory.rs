//! In-memory reference store.
//!
//! # Responsibility
//! - Provide the reference implementation of the [`Store`] contract for
//!   tests and as the model for backend implementers.
//!
//! # Invariants
//! - Backing storage is an ordered sequence; insert appends, so
//!   predicate-match order equals insertion order.
//! - Identity lookups are linear scans, acceptable for a reference store.
//! - The backing sequence is guarded against concurrent mutation by an
//!   async mutex; each operation is internally sequential.

use std::sync::Arc;

use log::debug;
use tokio::sync::Mutex;

use crate::model::Record;
use crate::op::AsyncOp;
use crate::query::Query;
use crate::store::{Store, StoreError};

/// Reference [`Store`] keeping records in an ordered in-memory sequence.
pub struct MemoryStore<T: Record> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T: Record> MemoryStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a store seeded with `records` in the given order.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Returns a copy of the backing sequence in storage order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    /// Returns the number of held records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Returns whether a record with `id` is held.
    pub async fn contains(&self, id: &T::Id) -> bool {
        self.records
            .lock()
            .await
            .iter()
            .any(|record| record.id() == *id)
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> for MemoryStore<T> {
    fn insert(&self, record: T) -> AsyncOp<T> {
        let records = Arc::clone(&self.records);
        AsyncOp::spawn(async move {
            let mut records = records.lock().await;
            let id = record.id();
            if records.iter().any(|existing| existing.id() == id) {
                return Err(StoreError::conflict(id));
            }
            records.push(record.clone());
            debug!(
                "event=store_insert module=store status=ok records={}",
                records.len()
            );
            Ok(record)
        })
    }

    fn update(&self, record: T) -> AsyncOp<T> {
        let records = Arc::clone(&self.records);
        AsyncOp::spawn(async move {
            let mut records = records.lock().await;
            let id = record.id();
            match records.iter_mut().find(|existing| existing.id() == id) {
                Some(slot) => {
                    *slot = record.clone();
                    debug!("event=store_update module=store status=ok");
                    Ok(record)
                }
                None => Err(StoreError::not_found(id)),
            }
        })
    }

    fn delete(&self, record: T) -> AsyncOp<T> {
        let records = Arc::clone(&self.records);
        AsyncOp::spawn(async move {
            let mut records = records.lock().await;
            let id = record.id();
            match records.iter().position(|existing| existing.id() == id) {
                Some(index) => {
                    let removed = records.remove(index);
                    debug!(
                        "event=store_delete module=store status=ok records={}",
                        records.len()
                    );
                    Ok(removed)
                }
                None => Err(StoreError::not_found(id)),
            }
        })
    }

    fn execute(&self, query: &Query<T>) -> AsyncOp<Vec<T>> {
        let records = Arc::clone(&self.records);
        let query = query.clone();
        AsyncOp::spawn(async move {
            let held = records.lock().await;
            let mut matched: Vec<T> = held
                .iter()
                .filter(|record| query.predicate().matches(record))
                .cloned()
                .collect();
            drop(held);
            query.sort().sort(&mut matched);
            debug!(
                "event=store_execute module=store status=ok matched={}",
                matched.len()
            );
            Ok(matched)
        })
    }
}
