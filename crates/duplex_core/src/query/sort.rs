//! Sort criteria and multi-key sort specs.
//!
//! A criterion requires the field's value type to be totally ordered. A spec
//! chains criteria in order: the first is the primary key, later criteria
//! break ties, and the applied sort is stable so equal-key records keep
//! their input order.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::field_ref::FieldRef;

/// Sort direction for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One (field, direction) sort key with a type-erased comparator.
pub struct SortCriterion<T> {
    field: &'static str,
    direction: Direction,
    compare: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T> SortCriterion<T> {
    /// Creates a criterion for a totally ordered field.
    pub fn new<V>(field: FieldRef<T, V>, direction: Direction) -> Self
    where
        T: 'static,
        V: Ord + Send + Sync + 'static,
    {
        let compare = Arc::new(move |a: &T, b: &T| {
            let ordering = field.get(a).cmp(&field.get(b));
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        Self {
            field: field.name(),
            direction,
            compare,
        }
    }

    /// Ascending criterion shorthand.
    pub fn ascending<V>(field: FieldRef<T, V>) -> Self
    where
        T: 'static,
        V: Ord + Send + Sync + 'static,
    {
        Self::new(field, Direction::Ascending)
    }

    /// Descending criterion shorthand.
    pub fn descending<V>(field: FieldRef<T, V>) -> Self
    where
        T: 'static,
        V: Ord + Send + Sync + 'static,
    {
        Self::new(field, Direction::Descending)
    }

    /// Returns the sorted field's name.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the sort direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Compares two records under this criterion.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<T> Clone for SortCriterion<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            direction: self.direction,
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> Debug for SortCriterion<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        write!(f, "{} {direction}", self.field)
    }
}

/// Ordered sequence of sort criteria.
pub struct SortSpec<T> {
    criteria: Vec<SortCriterion<T>>,
}

impl<T> SortSpec<T> {
    /// Creates an empty spec (no ordering applied).
    pub const fn empty() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Returns a new spec with `criterion` appended as the next tie-breaker.
    pub fn with(mut self, criterion: SortCriterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Returns the criteria in priority order.
    pub fn criteria(&self) -> &[SortCriterion<T>] {
        &self.criteria
    }

    /// Compares two records under the full key sequence.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for criterion in &self.criteria {
            let ordering = criterion.compare(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable-sorts `records` in place; an empty spec keeps input order.
    pub fn sort(&self, records: &mut [T]) {
        if self.criteria.is_empty() {
            return;
        }
        records.sort_by(|a, b| self.compare(a, b));
    }
}

impl<T> Default for SortSpec<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
        }
    }
}

impl<T> Debug for SortSpec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.criteria).finish()
    }
}
