//! In-memory solution store
//!
//! Used by tests and when no database is configured. Writers are serialized
//! behind a single lock; concurrent edits of one record are last-write-wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Solution, SolutionSection},
    utils::time::bump_timestamp,
};

use super::SolutionStore;

/// Solution store held in process memory
#[derive(Default)]
pub struct MemorySolutionStore {
    // Insertion order is kept so equal timestamps still list newest first.
    solutions: RwLock<Vec<Solution>>,
}

impl MemorySolutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored solutions
    pub async fn len(&self) -> usize {
        self.solutions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.solutions.read().await.is_empty()
    }

    fn newest_first<'a>(items: impl DoubleEndedIterator<Item = &'a Solution>) -> Vec<Solution> {
        let mut list: Vec<Solution> = items.rev().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

#[async_trait]
impl SolutionStore for MemorySolutionStore {
    async fn insert(&self, solution: &Solution) -> AppResult<Solution> {
        let mut solutions = self.solutions.write().await;
        if solutions.iter().any(|s| s.id == solution.id) {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }
        solutions.push(solution.clone());
        Ok(solution.clone())
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.solutions.read().await.iter().any(|s| s.id == id))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Solution>> {
        Ok(self
            .solutions
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_approved(&self) -> AppResult<Vec<Solution>> {
        let solutions = self.solutions.read().await;
        Ok(Self::newest_first(solutions.iter().filter(|s| s.is_approved)))
    }

    async fn list_all(&self) -> AppResult<Vec<Solution>> {
        let solutions = self.solutions.read().await;
        Ok(Self::newest_first(solutions.iter()))
    }

    async fn replace_sections(
        &self,
        id: &str,
        sections: &[SolutionSection],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Solution>> {
        let mut solutions = self.solutions.write().await;
        let Some(solution) = solutions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        solution.sections = sections.to_vec();
        solution.updated_at = bump_timestamp(solution.updated_at, now);
        Ok(Some(solution.clone()))
    }

    async fn toggle_approval(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<Solution>> {
        let mut solutions = self.solutions.write().await;
        let Some(solution) = solutions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        solution.is_approved = !solution.is_approved;
        solution.updated_at = bump_timestamp(solution.updated_at, now);
        Ok(Some(solution.clone()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionType;
    use chrono::Duration;

    fn solution(id: &str, created_at: DateTime<Utc>, is_approved: bool) -> Solution {
        Solution {
            id: id.to_string(),
            title: id.to_string(),
            problem_id: "1092".to_string(),
            problem_statement_link: None,
            sections: vec![SolutionSection::new(
                SolutionSection::derived_id(id, 0),
                SectionType::Paragraph,
                "x",
                None,
            )],
            tags: vec![],
            category: "DP".to_string(),
            author: "CSES Solver Team".to_string(),
            created_at,
            updated_at: created_at,
            is_approved,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemorySolutionStore::new();
        let now = Utc::now();
        store.insert(&solution("a", now, false)).await.unwrap();

        let result = store.insert(&solution("a", now, false)).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lists_newest_first_and_filters_approved() {
        let store = MemorySolutionStore::new();
        let base = Utc::now();
        store.insert(&solution("old", base, true)).await.unwrap();
        store.insert(&solution("pending", base + Duration::seconds(1), false)).await.unwrap();
        store.insert(&solution("new", base + Duration::seconds(2), true)).await.unwrap();

        let approved: Vec<String> =
            store.list_approved().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(approved, vec!["new", "old"]);

        let all: Vec<String> = store.list_all().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(all, vec!["new", "pending", "old"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_list_latest_insert_first() {
        let store = MemorySolutionStore::new();
        let now = Utc::now();
        store.insert(&solution("first", now, true)).await.unwrap();
        store.insert(&solution("second", now, true)).await.unwrap();

        let ids: Vec<String> = store.list_all().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_unknown_id_mutations_return_none() {
        let store = MemorySolutionStore::new();
        let now = Utc::now();

        assert!(store.toggle_approval("ghost", now).await.unwrap().is_none());
        assert!(store.replace_sections("ghost", &[], now).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_toggle_bumps_updated_at_even_with_stale_clock() {
        let store = MemorySolutionStore::new();
        let created = Utc::now();
        store.insert(&solution("a", created, false)).await.unwrap();

        let toggled = store
            .toggle_approval("a", created - Duration::seconds(5))
            .await
            .unwrap()
            .unwrap();
        assert!(toggled.is_approved);
        assert!(toggled.updated_at > created);
    }
}
