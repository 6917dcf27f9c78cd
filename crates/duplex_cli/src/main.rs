//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `duplex_core` wiring end to end.
//! - Keep output deterministic for quick local sanity checks.

use std::sync::Arc;

use duplex_core::{
    field_ref, greater_or_equal, FieldRef, MemoryStore, MirroredRepository, Record, SortCriterion,
    StoreError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Project {
    id: u32,
    title: String,
    budget: i64,
}

impl Record for Project {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn id() -> FieldRef<Project, u32> {
    field_ref!(Project, id)
}

fn title() -> FieldRef<Project, String> {
    field_ref!(Project, title)
}

fn budget() -> FieldRef<Project, i64> {
    field_ref!(Project, budget)
}

fn project(id: u32, title: &str, budget: i64) -> Project {
    Project {
        id,
        title: title.to_string(),
        budget,
    }
}

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    println!("duplex_core ping={}", duplex_core::ping());
    println!("duplex_core version={}", duplex_core::core_version());

    let primary: Arc<MemoryStore<Project>> = Arc::new(MemoryStore::new());
    let secondary: Arc<MemoryStore<Project>> = Arc::new(MemoryStore::new());
    let repo = MirroredRepository::new(
        primary.clone(),
        secondary.clone(),
        id(),
        SortCriterion::ascending(title()),
    );

    repo.add(project(1, "A", 5)).resolve().await?;
    repo.add(project(2, "B", 20)).resolve().await?;

    let over_budget: Vec<String> = repo
        .find(greater_or_equal(budget(), 10))
        .resolve()
        .await?
        .into_iter()
        .map(|p| p.title)
        .collect();
    println!("over_budget={over_budget:?}");

    let all: Vec<String> = repo
        .find(greater_or_equal(budget(), 0))
        .resolve()
        .await?
        .into_iter()
        .map(|p| p.title)
        .collect();
    println!("all_by_title={all:?}");

    Ok(())
}
