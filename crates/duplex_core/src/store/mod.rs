//! Store contract and failure semantics.
//!
//! # Responsibility
//! - Define the minimal CRUD+query contract every persistence backend
//!   implements to be pluggable.
//! - Define the error kinds stores and repositories surface.
//!
//! # Invariants
//! - `insert` fails with `Conflict` when the identity already exists.
//! - `update`/`delete` fail with `NotFound` when the identity is absent.
//! - `execute` filters with the query predicate and applies a stable sort,
//!   so equal-key tie order matches input order.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub use memory::MemoryStore;

use crate::model::Record;
use crate::op::AsyncOp;
use crate::query::Query;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure kinds surfaced by stores and repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert of an identity that already exists.
    Conflict(String),
    /// Update or delete of an identity that is absent.
    NotFound(String),
    /// Opaque transport/storage failure from a backend.
    Backend(String),
    /// Both primary and secondary failed for a read.
    RecoveryExhausted {
        primary: Box<StoreError>,
        secondary: Box<StoreError>,
    },
}

impl StoreError {
    pub fn conflict(id: impl Display) -> Self {
        Self::Conflict(id.to_string())
    }

    pub fn not_found(id: impl Display) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    pub fn recovery_exhausted(primary: Self, secondary: Self) -> Self {
        Self::RecoveryExhausted {
            primary: Box::new(primary),
            secondary: Box::new(secondary),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(id) => write!(f, "record already exists: {id}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Backend(message) => write!(f, "backend failure: {message}"),
            Self::RecoveryExhausted { primary, secondary } => write!(
                f,
                "primary and secondary both failed: primary: {primary}; secondary: {secondary}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RecoveryExhausted { secondary, .. } => Some(secondary.as_ref()),
            Self::Conflict(_) | Self::NotFound(_) | Self::Backend(_) => None,
        }
    }
}

/// Contract any persistence backend implements.
///
/// The trait itself is stateless; a concrete store owns whatever connection
/// or collection state it needs, along with its own internal concurrency
/// control. Every operation is non-blocking from the caller's perspective
/// and delivers its outcome through an [`AsyncOp`].
pub trait Store<T: Record>: Send + Sync {
    /// Adds a new record; `Conflict` when the identity already exists.
    fn insert(&self, record: T) -> AsyncOp<T>;

    /// Replaces the record matching the identity; `NotFound` when absent.
    fn update(&self, record: T) -> AsyncOp<T>;

    /// Removes the record matching the identity; `NotFound` when absent.
    /// Resolves with the removed record.
    fn delete(&self, record: T) -> AsyncOp<T>;

    /// Returns matching records ordered per the query's sort spec.
    fn execute(&self, query: &Query<T>) -> AsyncOp<Vec<T>>;
}

#[cfg(test)]
mod tests {
    use super::StoreError;
    use std::error::Error;

    #[test]
    fn display_names_the_identity_or_cause() {
        assert_eq!(
            StoreError::conflict(42).to_string(),
            "record already exists: 42"
        );
        assert_eq!(
            StoreError::not_found("abc").to_string(),
            "record not found: abc"
        );
        assert_eq!(
            StoreError::backend("socket closed").to_string(),
            "backend failure: socket closed"
        );
    }

    #[test]
    fn recovery_exhausted_carries_both_causes() {
        let combined = StoreError::recovery_exhausted(
            StoreError::backend("primary down"),
            StoreError::backend("secondary down"),
        );
        let rendered = combined.to_string();
        assert!(rendered.contains("primary down"));
        assert!(rendered.contains("secondary down"));
        assert!(combined.source().is_some());
    }
}
