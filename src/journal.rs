// ABOUTME: Meal journal collaborator boundary and its in-memory implementation
// ABOUTME: Async trait over entry storage; DashMap-backed store with snapshot reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Meal Journal
//!
//! The analysis core never talks to storage directly; it receives a
//! snapshot of entries per call. [`MealJournal`] is that collaborator
//! boundary. The bundled [`InMemoryJournal`] backs the server out of the
//! box and the tests; a durable implementation lives outside this service.
//!
//! Snapshot contract: `entries_for` returns a clone taken under the shard
//! lock, so one analysis call always sees a non-changing collection even
//! while new meals are being logged concurrently.

use async_trait::async_trait;
use dashmap::DashMap;
use mealtrics_core::MealEntry;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppResult;

/// Storage collaborator for logged meals
#[async_trait]
pub trait MealJournal: Send + Sync {
    /// Append one entry to the user's journal
    async fn record(&self, entry: MealEntry) -> AppResult<Uuid>;

    /// Snapshot of all entries for the user.
    ///
    /// `None` means the user has never logged anything (distinct from an
    /// empty window, which is a normal analysis input).
    async fn entries_for(&self, user_id: Uuid) -> AppResult<Option<Vec<MealEntry>>>;
}

/// In-memory journal keyed by user id
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    entries: DashMap<Uuid, Vec<MealEntry>>,
}

impl InMemoryJournal {
    /// Create an empty journal
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealJournal for InMemoryJournal {
    async fn record(&self, entry: MealEntry) -> AppResult<Uuid> {
        let id = entry.id;
        debug!(user_id = %entry.user_id, entry_id = %id, "recording meal entry");
        self.entries.entry(entry.user_id).or_default().push(entry);
        Ok(id)
    }

    async fn entries_for(&self, user_id: Uuid) -> AppResult<Option<Vec<MealEntry>>> {
        Ok(self.entries.get(&user_id).map(|entries| entries.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mealtrics_core::MealType;

    fn entry(user_id: Uuid) -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            user_id,
            timestamp: Utc::now(),
            meal_type: MealType::Lunch,
            calories: 600.0,
            protein_g: 30.0,
            carbohydrates_g: 70.0,
            fat_g: 18.0,
            name: None,
            food_items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn unknown_user_is_none_not_empty() {
        let journal = InMemoryJournal::new();
        assert!(journal.entries_for(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn recorded_entries_come_back_in_order() {
        let journal = InMemoryJournal::new();
        let user = Uuid::new_v4();
        let first = journal.record(entry(user)).await.unwrap();
        let second = journal.record(entry(user)).await.unwrap();

        let entries = journal.entries_for(user).await.unwrap().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, first);
        assert_eq!(entries[1].id, second);
    }
}
