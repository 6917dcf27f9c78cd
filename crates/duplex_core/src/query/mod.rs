//! Typed query building blocks.
//!
//! # Responsibility
//! - Compose a predicate and a sort spec into an immutable [`Query`].
//! - Bind a query to a store, producing a deferred read via [`BoundQuery`].
//!
//! # Invariants
//! - Query values are immutable; `sorted`/`sorted_by` return a new value and
//!   never mutate the receiver, so queries can be shared across calls.
//! - The first sort criterion is the primary key; later ones break ties.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub mod field_ref;
pub mod predicate;
pub mod sort;

pub use field_ref::FieldRef;
pub use predicate::{
    equal, greater_or_equal, greater_than, less_or_equal, less_than, Comparison, Operator,
    Predicate,
};
pub use sort::{Direction, SortCriterion, SortSpec};

use crate::model::Record;
use crate::op::AsyncOp;
use crate::store::Store;

/// A predicate plus an ordered sort spec over a record type `T`.
pub struct Query<T> {
    predicate: Predicate<T>,
    sort: SortSpec<T>,
}

impl<T> Query<T> {
    /// Starts a query from a predicate with an empty sort spec.
    pub const fn filter(predicate: Predicate<T>) -> Self {
        Self {
            predicate,
            sort: SortSpec::empty(),
        }
    }

    /// Returns a new query with a `(field, direction)` criterion appended.
    pub fn sorted<V>(&self, field: FieldRef<T, V>, direction: Direction) -> Self
    where
        T: 'static,
        V: Ord + Send + Sync + 'static,
    {
        self.sorted_by(SortCriterion::new(field, direction))
    }

    /// Returns a new query with a prebuilt criterion appended.
    pub fn sorted_by(&self, criterion: SortCriterion<T>) -> Self {
        Self {
            predicate: self.predicate.clone(),
            sort: self.sort.clone().with(criterion),
        }
    }

    /// Returns the filter predicate.
    pub const fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }

    /// Returns the sort spec.
    pub const fn sort(&self) -> &SortSpec<T> {
        &self.sort
    }

    /// Binds this query to a target store for execution.
    pub fn bind(&self, store: Arc<dyn Store<T>>) -> BoundQuery<T>
    where
        T: Record,
    {
        BoundQuery {
            query: self.clone(),
            store,
        }
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            sort: self.sort.clone(),
        }
    }
}

impl<T> Debug for Query<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("predicate", &self.predicate)
            .field("sort", &self.sort)
            .finish()
    }
}

/// A query bound to a target store; the executable, deferred read.
pub struct BoundQuery<T: Record> {
    query: Query<T>,
    store: Arc<dyn Store<T>>,
}

impl<T: Record> BoundQuery<T> {
    /// Executes the query against the bound store.
    pub fn result(&self) -> AsyncOp<Vec<T>> {
        self.store.execute(&self.query)
    }
}

impl<T: Record> Clone for BoundQuery<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            store: Arc::clone(&self.store),
        }
    }
}
