//! Typed field handles.
//!
//! A `FieldRef` names one field of a record type together with an accessor,
//! so predicates and sort criteria are checked against the record type at
//! compile time. There is no runtime field validation anywhere in this
//! crate; a wrong field name or a literal of the wrong type simply does not
//! compile.

use std::fmt::{self, Debug, Formatter};

/// Typed handle to one named field of a record type `T` with value type `V`.
///
/// Construct one handle per field, either with [`FieldRef::new`] or the
/// [`field_ref!`](crate::field_ref) macro, and reuse it across predicates
/// and sort criteria. Handles are `Copy`.
pub struct FieldRef<T, V> {
    name: &'static str,
    get: fn(&T) -> V,
}

impl<T, V> FieldRef<T, V> {
    /// Creates a field handle from a name and an accessor.
    pub const fn new(name: &'static str, get: fn(&T) -> V) -> Self {
        Self { name, get }
    }

    /// Returns the field name used in diagnostics and renderings.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads this field's value out of a record.
    pub fn get(&self, record: &T) -> V {
        (self.get)(record)
    }
}

impl<T, V> Clone for FieldRef<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for FieldRef<T, V> {}

impl<T, V> Debug for FieldRef<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({})", self.name)
    }
}

/// Generates a [`FieldRef`] for one struct field.
///
/// The accessor clones the field value, so the macro works for any field
/// type that is `Clone`. Naming a field that does not exist on the record
/// type is a compile error.
#[macro_export]
macro_rules! field_ref {
    ($record:ty, $field:ident) => {
        $crate::query::FieldRef::new(stringify!($field), |record: &$record| {
            ::std::clone::Clone::clone(&record.$field)
        })
    };
}
