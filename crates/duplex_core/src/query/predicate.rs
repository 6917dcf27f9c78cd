//! Composable filter predicates over records.
//!
//! # Responsibility
//! - Represent filter conditions as an immutable comparison/and/or/not tree.
//! - Evaluate a predicate against a record as a pure boolean function.
//!
//! # Invariants
//! - Construction never fails at runtime for well-typed inputs; every
//!   failure mode is a compile-time type mismatch via [`FieldRef`].
//! - Trees are built bottom-up and never mutated after construction.
//! - `matches` has no side effects; child evaluation order is unobservable.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::field_ref::FieldRef;

/// Comparison operator applied between a field value and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    LessThan,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    GreaterThan,
}

impl Operator {
    /// Returns the conventional symbol for renderings and diagnostics.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::GreaterOrEqual => ">=",
            Self::GreaterThan => ">",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::LessThan => ordering == Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::GreaterThan => ordering == Ordering::Greater,
        }
    }
}

/// One field-operator-literal comparison.
///
/// The field's value type is erased behind the evaluation closure; the field
/// name, operator, and a `Debug` rendering of the literal are kept for
/// diagnostics.
pub struct Comparison<T> {
    field: &'static str,
    operator: Operator,
    literal: String,
    eval: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Comparison<T> {
    /// Returns the compared field's name.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the comparison operator.
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    fn matches(&self, record: &T) -> bool {
        (self.eval)(record)
    }
}

impl<T> Clone for Comparison<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            operator: self.operator,
            literal: self.literal.clone(),
            eval: Arc::clone(&self.eval),
        }
    }
}

impl<T> Debug for Comparison<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.symbol(), self.literal)
    }
}

/// Immutable predicate tree over a record type `T`.
pub enum Predicate<T> {
    Comparison(Comparison<T>),
    And(Box<Predicate<T>>, Box<Predicate<T>>),
    Or(Box<Predicate<T>>, Box<Predicate<T>>),
    Not(Box<Predicate<T>>),
}

impl<T> Predicate<T> {
    /// Evaluates this predicate against one record.
    pub fn matches(&self, record: &T) -> bool {
        match self {
            Self::Comparison(comparison) => comparison.matches(record),
            Self::And(left, right) => left.matches(record) && right.matches(record),
            Self::Or(left, right) => left.matches(record) || right.matches(record),
            Self::Not(inner) => !inner.matches(record),
        }
    }

    /// Conjunction of this predicate with another.
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of this predicate with another.
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Negation of this predicate.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Comparison(comparison) => Self::Comparison(comparison.clone()),
            Self::And(left, right) => Self::And(left.clone(), right.clone()),
            Self::Or(left, right) => Self::Or(left.clone(), right.clone()),
            Self::Not(inner) => Self::Not(inner.clone()),
        }
    }
}

impl<T> Debug for Predicate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(comparison) => write!(f, "{comparison:?}"),
            Self::And(left, right) => write!(f, "({left:?} and {right:?})"),
            Self::Or(left, right) => write!(f, "({left:?} or {right:?})"),
            Self::Not(inner) => write!(f, "(not {inner:?})"),
        }
    }
}

/// Builds an equality comparison between a field and a literal.
pub fn equal<T: 'static, V>(field: FieldRef<T, V>, literal: V) -> Predicate<T>
where
    V: PartialEq + Debug + Send + Sync + 'static,
{
    let rendered = format!("{literal:?}");
    let eval = Arc::new(move |record: &T| field.get(record) == literal);
    Predicate::Comparison(Comparison {
        field: field.name(),
        operator: Operator::Equal,
        literal: rendered,
        eval,
    })
}

/// Builds a strict less-than comparison.
pub fn less_than<T: 'static, V>(field: FieldRef<T, V>, literal: V) -> Predicate<T>
where
    V: PartialOrd + Debug + Send + Sync + 'static,
{
    ordered(field, Operator::LessThan, literal)
}

/// Builds a less-or-equal comparison.
pub fn less_or_equal<T: 'static, V>(field: FieldRef<T, V>, literal: V) -> Predicate<T>
where
    V: PartialOrd + Debug + Send + Sync + 'static,
{
    ordered(field, Operator::LessOrEqual, literal)
}

/// Builds a greater-or-equal comparison.
pub fn greater_or_equal<T: 'static, V>(field: FieldRef<T, V>, literal: V) -> Predicate<T>
where
    V: PartialOrd + Debug + Send + Sync + 'static,
{
    ordered(field, Operator::GreaterOrEqual, literal)
}

/// Builds a strict greater-than comparison.
pub fn greater_than<T: 'static, V>(field: FieldRef<T, V>, literal: V) -> Predicate<T>
where
    V: PartialOrd + Debug + Send + Sync + 'static,
{
    ordered(field, Operator::GreaterThan, literal)
}

fn ordered<T: 'static, V>(field: FieldRef<T, V>, operator: Operator, literal: V) -> Predicate<T>
where
    V: PartialOrd + Debug + Send + Sync + 'static,
{
    let rendered = format!("{literal:?}");
    let eval = Arc::new(move |record: &T| {
        field
            .get(record)
            .partial_cmp(&literal)
            .is_some_and(|ordering| operator.holds(ordering))
    });
    Predicate::Comparison(Comparison {
        field: field.name(),
        operator,
        literal: rendered,
        eval,
    })
}

#[cfg(test)]
mod tests {
    use super::{equal, greater_than, less_or_equal, Operator};
    use crate::query::FieldRef;

    struct Row {
        count: i64,
        label: String,
    }

    fn count() -> FieldRef<Row, i64> {
        FieldRef::new("count", |row: &Row| row.count)
    }

    fn label() -> FieldRef<Row, String> {
        FieldRef::new("label", |row: &Row| row.label.clone())
    }

    fn row(count: i64, label: &str) -> Row {
        Row {
            count,
            label: label.to_string(),
        }
    }

    #[test]
    fn comparison_applies_operator_to_field_value() {
        let tall = greater_than(count(), 10);
        assert!(tall.matches(&row(11, "a")));
        assert!(!tall.matches(&row(10, "a")));
    }

    #[test]
    fn equality_uses_value_type_equality() {
        let named = equal(label(), "alpha".to_string());
        assert!(named.matches(&row(0, "alpha")));
        assert!(!named.matches(&row(0, "beta")));
    }

    #[test]
    fn combinators_follow_boolean_semantics() {
        let both = greater_than(count(), 0).and(equal(label(), "a".to_string()));
        assert!(both.matches(&row(1, "a")));
        assert!(!both.matches(&row(1, "b")));
        assert!(!both.matches(&row(0, "a")));

        let either = less_or_equal(count(), 0).or(equal(label(), "a".to_string()));
        assert!(either.matches(&row(5, "a")));
        assert!(either.matches(&row(-1, "b")));
        assert!(!either.matches(&row(5, "b")));

        let inverted = greater_than(count(), 0).negate();
        assert!(inverted.matches(&row(0, "a")));
        assert!(!inverted.matches(&row(1, "a")));
    }

    #[test]
    fn debug_rendering_names_field_operator_and_literal() {
        let predicate = greater_than(count(), 10).and(equal(label(), "a".to_string()));
        assert_eq!(format!("{predicate:?}"), "(count > 10 and label == \"a\")");
        assert_eq!(Operator::GreaterOrEqual.symbol(), ">=");
    }
}
