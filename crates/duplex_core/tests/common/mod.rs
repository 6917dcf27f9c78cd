#![allow(dead_code)]

//! Shared fixtures for integration tests.

use duplex_core::{field_ref, AsyncOp, FieldRef, Query, Record, Store, StoreError};
use serde::{Deserialize, Serialize};

/// Sample record with one field per supported comparison category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub budget: i64,
    pub active: bool,
}

impl Project {
    pub fn new(id: u32, title: &str, budget: i64) -> Self {
        Self {
            id,
            title: title.to_string(),
            budget,
            active: true,
        }
    }
}

impl Record for Project {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

pub fn id() -> FieldRef<Project, u32> {
    field_ref!(Project, id)
}

pub fn title() -> FieldRef<Project, String> {
    field_ref!(Project, title)
}

pub fn budget() -> FieldRef<Project, i64> {
    field_ref!(Project, budget)
}

pub fn active() -> FieldRef<Project, bool> {
    field_ref!(Project, active)
}

/// Returns the two-project dataset used across scenarios.
pub fn sample_projects() -> Vec<Project> {
    vec![Project::new(1, "A", 5), Project::new(2, "B", 20)]
}

/// Store stub failing every operation with the same backend error.
pub struct FailingStore {
    message: &'static str,
}

impl FailingStore {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }

    fn error(&self) -> StoreError {
        StoreError::backend(self.message)
    }
}

impl Store<Project> for FailingStore {
    fn insert(&self, _record: Project) -> AsyncOp<Project> {
        AsyncOp::fail(self.error())
    }

    fn update(&self, _record: Project) -> AsyncOp<Project> {
        AsyncOp::fail(self.error())
    }

    fn delete(&self, _record: Project) -> AsyncOp<Project> {
        AsyncOp::fail(self.error())
    }

    fn execute(&self, _query: &Query<Project>) -> AsyncOp<Vec<Project>> {
        AsyncOp::fail(self.error())
    }
}
