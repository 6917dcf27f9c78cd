//! Record identity contract.
//!
//! # Responsibility
//! - Define the single trait every stored type must satisfy.
//! - Make the stable-identity requirement explicit in signatures.
//!
//! # Invariants
//! - `id()` is stable for the lifetime of a record and never reused for
//!   another record in the same store.
//! - Update and delete match exclusively on `id()`, never on field values.

use std::fmt::{Debug, Display};

/// Contract for application-defined record types.
///
/// Stores and repositories are generic over this trait. The associated `Id`
/// is the identity field used for update/delete matching and for conflict
/// detection on insert. `Display` and `Debug` bounds keep identities
/// printable in error messages and query diagnostics.
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identity type for this record.
    type Id: Clone + Eq + Debug + Display + Send + Sync + 'static;

    /// Returns the stable identity of this record.
    fn id(&self) -> Self::Id;
}
