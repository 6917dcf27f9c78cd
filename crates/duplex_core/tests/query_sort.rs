mod common;

use common::{budget, title, Project};
use duplex_core::{equal, greater_or_equal, Direction, Query, SortCriterion, SortSpec};

fn dataset() -> Vec<Project> {
    vec![
        Project::new(1, "B", 20),
        Project::new(2, "A", 5),
        Project::new(3, "A", 20),
        Project::new(4, "C", 5),
    ]
}

#[test]
fn appending_a_criterion_preserves_the_primary_key_order() {
    let by_budget = SortSpec::empty().with(SortCriterion::ascending(budget()));
    let by_budget_then_title = SortSpec::empty()
        .with(SortCriterion::ascending(budget()))
        .with(SortCriterion::ascending(title()));

    let mut primary_only = dataset();
    by_budget.sort(&mut primary_only);

    let mut multi_key = dataset();
    by_budget_then_title.sort(&mut multi_key);

    let budgets_primary: Vec<i64> = primary_only.iter().map(|p| p.budget).collect();
    let budgets_multi: Vec<i64> = multi_key.iter().map(|p| p.budget).collect();
    assert_eq!(budgets_primary, budgets_multi);

    let ids: Vec<u32> = multi_key.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 4, 3, 1]);
}

#[test]
fn stable_sort_keeps_input_order_for_equal_keys() {
    let by_budget = SortSpec::empty().with(SortCriterion::ascending(budget()));
    let mut records = dataset();
    by_budget.sort(&mut records);

    // Budgets 5 and 20 each appear twice; ties keep dataset order.
    let ids: Vec<u32> = records.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);
}

#[test]
fn sorted_returns_a_new_query_and_never_mutates_the_receiver() {
    let base = Query::filter(greater_or_equal(budget(), 0));
    assert!(base.sort().is_empty());

    let by_title = base.sorted(title(), Direction::Ascending);
    let by_title_then_budget = by_title.sorted(budget(), Direction::Descending);

    assert!(base.sort().is_empty());
    assert_eq!(by_title.sort().len(), 1);
    assert_eq!(by_title_then_budget.sort().len(), 2);

    let fields: Vec<&str> = by_title_then_budget
        .sort()
        .criteria()
        .iter()
        .map(|criterion| criterion.field())
        .collect();
    assert_eq!(fields, vec!["title", "budget"]);
}

#[test]
fn shared_query_values_stay_reusable_after_derivation() {
    let shared = Query::filter(equal(title(), "A".to_string()));
    let derived = shared.sorted(budget(), Direction::Ascending);

    // Both values filter identically; only the derived one sorts.
    let record = Project::new(3, "A", 20);
    assert!(shared.predicate().matches(&record));
    assert!(derived.predicate().matches(&record));
    assert!(shared.sort().is_empty());
    assert_eq!(derived.sort().len(), 1);
}

#[test]
fn descending_criterion_reverses_the_key() {
    let spec = SortSpec::empty().with(SortCriterion::descending(budget()));
    let mut records = dataset();
    spec.sort(&mut records);

    let budgets: Vec<i64> = records.iter().map(|p| p.budget).collect();
    assert_eq!(budgets, vec![20, 20, 5, 5]);
}
