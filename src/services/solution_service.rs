//! Solution service

use std::collections::HashSet;
use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    cache::ViewCache,
    constants::{MAX_SLUG_ATTEMPTS, SOLUTION_AUTHOR, cache_keys},
    db::repositories::SolutionStore,
    error::{AppError, AppResult, FieldError},
    handlers::{
        admin::response::{ApprovalResponse, DashboardResponse},
        solutions::{
            request::{SectionInput, SubmitSolutionRequest},
            response::SolutionView,
        },
    },
    models::{ApprovalState, SectionType, Solution, SolutionSection},
    utils::{now_utc, parse_tags, slug, slugify, validation::validate_section_content},
};

/// Solution service for business logic
pub struct SolutionService;

impl SolutionService {
    /// Store a new pending solution under a fresh slug
    pub async fn create(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        payload: SubmitSolutionRequest,
    ) -> AppResult<Solution> {
        let base = slugify(&payload.title);
        let tags = parse_tags(&payload.tags);
        let now = now_utc();

        for candidate in slug::candidates(&base, MAX_SLUG_ATTEMPTS) {
            if store.exists(&candidate).await? {
                continue;
            }

            let sections = Self::build_sections(&candidate, &payload.sections, false)?;
            let solution = Solution {
                id: candidate,
                title: payload.title.clone(),
                problem_id: payload.problem_id.clone(),
                problem_statement_link: payload.problem_statement_link.clone(),
                sections,
                tags: tags.clone(),
                category: payload.category.clone(),
                author: SOLUTION_AUTHOR.to_string(),
                created_at: now,
                updated_at: now,
                is_approved: false,
            };

            match store.insert(&solution).await {
                Ok(stored) => {
                    info!(solution_id = %stored.id, backend = store.backend(), "Solution submitted");
                    Self::invalidate_views(cache, &stored.id).await;
                    return Ok(stored);
                }
                // Another writer took the slug between the check and the insert.
                Err(AppError::AlreadyExists(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        warn!(base_slug = %base, "Slug candidates exhausted");
        Err(AppError::Conflict(format!(
            "Could not allocate an id for \"{}\"",
            payload.title
        )))
    }

    /// Approved solutions, newest first
    pub async fn list_approved(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
    ) -> AppResult<Vec<Solution>> {
        Self::read_through(cache, cache_keys::APPROVED_LISTING, || store.list_approved()).await
    }

    /// Approved solutions filtered by a case-insensitive query; blank queries match everything
    pub async fn search(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        query: Option<&str>,
    ) -> AppResult<Vec<Solution>> {
        let solutions = Self::list_approved(store, cache).await?;
        Ok(filter_solutions(solutions, query.unwrap_or_default()))
    }

    /// Every solution regardless of approval, newest first
    pub async fn list_all(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
    ) -> AppResult<Vec<Solution>> {
        Self::read_through(cache, cache_keys::ADMIN_LISTING, || store.list_all()).await
    }

    /// Dashboard counts plus every record
    pub async fn dashboard(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
    ) -> AppResult<DashboardResponse> {
        Ok(Self::list_all(store, cache).await?.into())
    }

    /// Public detail view of a solution
    pub async fn get_view(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        id: &str,
    ) -> AppResult<SolutionView> {
        Self::read_through(cache, &cache_keys::detail(id), || async {
            let solution = Self::get_by_id(store, id).await?;
            Ok(SolutionView::from(solution))
        })
        .await
    }

    /// Full record regardless of approval
    pub async fn get_by_id(store: &dyn SolutionStore, id: &str) -> AppResult<Solution> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Solution not found".to_string()))
    }

    /// Overwrite every section of a solution
    pub async fn replace_sections(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        id: &str,
        sections: &[SectionInput],
    ) -> AppResult<Solution> {
        let sections = Self::build_sections(id, sections, true)?;
        Self::store_sections(store, cache, id, &sections).await
    }

    /// Replace the content of one section, keeping the others untouched
    pub async fn update_section_content(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        id: &str,
        section_id: &str,
        content: &str,
    ) -> AppResult<Solution> {
        validate_section_content(content).map_err(|e| {
            AppError::field("content", e.message.map(|m| m.to_string()).unwrap_or_default())
        })?;

        let mut sections = Self::get_by_id(store, id).await?.sections;
        let section = sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;
        section.content = content.to_string();

        Self::store_sections(store, cache, id, &sections).await
    }

    /// Flip the approval flag of a solution
    pub async fn toggle_approval(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        id: &str,
    ) -> AppResult<ApprovalResponse> {
        let solution = store
            .toggle_approval(id, now_utc())
            .await?
            .ok_or_else(|| AppError::NotFound("Solution not found".to_string()))?;

        info!(solution_id = %solution.id, is_approved = solution.is_approved, "Solution approval toggled");
        Self::invalidate_views(cache, &solution.id).await;

        let verb = match solution.approval_state() {
            ApprovalState::Approved => "approved",
            ApprovalState::Pending => "unapproved",
        };
        Ok(ApprovalResponse {
            success: true,
            message: format!("Solution {} successfully.", verb),
            is_approved: solution.is_approved,
            solution,
        })
    }

    async fn store_sections(
        store: &dyn SolutionStore,
        cache: &dyn ViewCache,
        id: &str,
        sections: &[SolutionSection],
    ) -> AppResult<Solution> {
        let solution = store
            .replace_sections(id, sections, now_utc())
            .await?
            .ok_or_else(|| AppError::NotFound("Solution not found".to_string()))?;

        info!(solution_id = %solution.id, sections = solution.sections.len(), "Solution sections updated");
        Self::invalidate_views(cache, &solution.id).await;
        Ok(solution)
    }

    /// Turn client sections into stored ones.
    ///
    /// With `keep_ids` a non-blank client id is kept and only missing ids are
    /// derived; without it every id is derived from the position.
    fn build_sections(
        solution_id: &str,
        inputs: &[SectionInput],
        keep_ids: bool,
    ) -> AppResult<Vec<SolutionSection>> {
        if inputs.is_empty() {
            return Err(AppError::field("sections", "At least one section is required."));
        }

        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let Ok(section_type) = input.section_type.parse::<SectionType>() else {
                errors.push(FieldError::new(
                    format!("sections[{}].section_type", index),
                    "Unknown section type.",
                ));
                continue;
            };

            let id = input
                .id
                .as_deref()
                .filter(|_| keep_ids)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| SolutionSection::derived_id(solution_id, index));

            if !seen.insert(id.clone()) {
                errors.push(FieldError::new(
                    format!("sections[{}].id", index),
                    "Section ids must be unique.",
                ));
                continue;
            }

            sections.push(SolutionSection::new(
                id,
                section_type,
                input.content.clone(),
                input.language.clone(),
            ));
        }

        if errors.is_empty() {
            Ok(sections)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Serve a cached view or compute and cache it. Cache failures never fail the request.
    async fn read_through<T, F, Fut>(cache: &dyn ViewCache, key: &str, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => warn!(key, error = %e, "Discarding unreadable cached view"),
            },
            Ok(None) => {}
            Err(e) => warn!(key, backend = cache.backend(), error = %e, "View cache read failed"),
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                match cache.put_if_absent(key, &raw).await {
                    Ok(true) => {}
                    Ok(false) => debug!(key, "Skipped caching view over an existing or invalidated key"),
                    Err(e) => warn!(key, backend = cache.backend(), error = %e, "View cache write failed"),
                }
            }
            Err(e) => warn!(key, error = %e, "Failed to serialize view for caching"),
        }

        Ok(value)
    }

    async fn invalidate_views(cache: &dyn ViewCache, id: &str) {
        let keys = [
            cache_keys::APPROVED_LISTING.to_string(),
            cache_keys::ADMIN_LISTING.to_string(),
            cache_keys::detail(id),
        ];
        if let Err(e) = cache.invalidate(&keys).await {
            warn!(solution_id = id, backend = cache.backend(), error = %e, "View cache invalidation failed");
        }
    }
}

/// Keep solutions matching the trimmed, case-insensitive `query`, preserving order
pub fn filter_solutions(solutions: Vec<Solution>, query: &str) -> Vec<Solution> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return solutions;
    }
    solutions.into_iter().filter(|s| s.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        cache::MemoryViewCache,
        db::repositories::MemorySolutionStore,
    };
    use tokio_test::assert_ok;

    /// Memory store that can hold a read open, hide ids from `exists`, or lose one insert race
    #[derive(Default)]
    struct ScriptedStore {
        inner: MemorySolutionStore,
        hold_next_find: AtomicBool,
        read_done: Notify,
        release: Notify,
        blind_exists: AtomicBool,
        lose_next_insert: AtomicBool,
    }

    #[async_trait]
    impl SolutionStore for ScriptedStore {
        async fn insert(&self, solution: &Solution) -> AppResult<Solution> {
            if self.lose_next_insert.swap(false, Ordering::SeqCst) {
                return Err(AppError::AlreadyExists("Resource already exists".to_string()));
            }
            self.inner.insert(solution).await
        }

        async fn exists(&self, id: &str) -> AppResult<bool> {
            if self.blind_exists.load(Ordering::SeqCst) {
                return Ok(false);
            }
            self.inner.exists(id).await
        }

        async fn find_by_id(&self, id: &str) -> AppResult<Option<Solution>> {
            let found = self.inner.find_by_id(id).await?;
            if self.hold_next_find.swap(false, Ordering::SeqCst) {
                self.read_done.notify_one();
                self.release.notified().await;
            }
            Ok(found)
        }

        async fn list_approved(&self) -> AppResult<Vec<Solution>> {
            self.inner.list_approved().await
        }

        async fn list_all(&self) -> AppResult<Vec<Solution>> {
            self.inner.list_all().await
        }

        async fn replace_sections(
            &self,
            id: &str,
            sections: &[SolutionSection],
            now: DateTime<Utc>,
        ) -> AppResult<Option<Solution>> {
            self.inner.replace_sections(id, sections, now).await
        }

        async fn toggle_approval(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<Solution>> {
            self.inner.toggle_approval(id, now).await
        }

        fn backend(&self) -> &'static str {
            "scripted"
        }
    }

    fn submission(title: &str) -> SubmitSolutionRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "problemId": "1092",
            "sections": [
                {"type": "paragraph", "content": "Pair numbers from both ends."},
                {"type": "code", "content": "int main() {}"}
            ],
            "tags": "dp, greedy",
            "category": "Introductory"
        }))
        .unwrap()
    }

    fn section(id: Option<&str>, section_type: &str, content: &str) -> SectionInput {
        SectionInput {
            id: id.map(str::to_string),
            section_type: section_type.to_string(),
            content: content.to_string(),
            language: None,
        }
    }

    #[tokio::test]
    async fn test_create_two_sets() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        let solution = assert_ok!(SolutionService::create(&store, &cache, submission("Two Sets")).await);
        assert_eq!(solution.id, "two-sets");
        assert!(!solution.is_approved);
        assert_eq!(solution.tags, vec!["dp", "greedy"]);
        assert_eq!(solution.author, SOLUTION_AUTHOR);
        assert_eq!(solution.created_at, solution.updated_at);
        assert_eq!(solution.sections[0].id, "two-sets-section-1");
        assert_eq!(solution.sections[1].language.as_deref(), Some("plaintext"));
    }

    #[tokio::test]
    async fn test_colliding_titles_get_suffixes() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        let first = SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        let second = SolutionService::create(&store, &cache, submission("two  sets!")).await.unwrap();
        let third = SolutionService::create(&store, &cache, submission("Two-Sets")).await.unwrap();

        assert_eq!(first.id, "two-sets");
        assert_eq!(second.id, "two-sets-1");
        assert_eq!(third.id, "two-sets-2");
        assert_eq!(second.sections[0].id, "two-sets-1-section-1");
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_listings() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        SolutionService::list_all(&store, &cache).await.unwrap();
        assert!(cache.contains(cache_keys::ADMIN_LISTING).await);

        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        assert!(!cache.contains(cache_keys::ADMIN_LISTING).await);

        let all = SolutionService::list_all(&store, &cache).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        let created = SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();

        let approved = SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();
        assert!(approved.is_approved);
        assert_eq!(approved.message, "Solution approved successfully.");
        assert!(approved.solution.updated_at > created.updated_at);
        assert_eq!(approved.solution.sections, created.sections);
        assert_eq!(approved.solution.created_at, created.created_at);

        let listed = SolutionService::list_approved(&store, &cache).await.unwrap();
        assert_eq!(listed.len(), 1);

        let reverted = SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();
        assert!(!reverted.is_approved);
        assert_eq!(reverted.message, "Solution unapproved successfully.");

        let listed = SolutionService::list_approved(&store, &cache).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_is_not_found() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        let result = SolutionService::toggle_approval(&store, &cache, "ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_detail_view_follows_approval() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();

        let view = SolutionService::get_view(&store, &cache, "two-sets").await.unwrap();
        assert!(matches!(view, SolutionView::Pending { .. }));

        SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();
        let view = SolutionService::get_view(&store, &cache, "two-sets").await.unwrap();
        assert!(matches!(view, SolutionView::Published { .. }));
    }

    #[tokio::test]
    async fn test_replace_sections_unknown_id_creates_nothing() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        let result = SolutionService::replace_sections(
            &store,
            &cache,
            "ghost",
            &[section(None, "paragraph", "text")],
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_replace_sections_keeps_and_derives_ids() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();

        let updated = SolutionService::replace_sections(
            &store,
            &cache,
            "two-sets",
            &[
                section(Some("two-sets-section-1"), "heading", "Idea"),
                section(None, "hint", "Sum must be even."),
            ],
        )
        .await
        .unwrap();

        let ids: Vec<&str> = updated.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["two-sets-section-1", "two-sets-section-2"]);
        assert_eq!(updated.sections[1].section_type, SectionType::Hint);
    }

    #[tokio::test]
    async fn test_replace_sections_rejects_duplicate_ids() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();

        let result = SolutionService::replace_sections(
            &store,
            &cache,
            "two-sets",
            &[section(Some("a"), "paragraph", "x"), section(Some("a"), "paragraph", "y")],
        )
        .await;

        match result {
            Err(AppError::Validation(fields)) => assert_eq!(fields[0].field, "sections[1].id"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_section_content() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();

        let updated = SolutionService::update_section_content(
            &store,
            &cache,
            "two-sets",
            "two-sets-section-2",
            "fn main() {}",
        )
        .await
        .unwrap();
        assert_eq!(updated.sections[1].content, "fn main() {}");
        assert_eq!(updated.sections[0].content, "Pair numbers from both ends.");

        let missing = SolutionService::update_section_content(
            &store,
            &cache,
            "two-sets",
            "two-sets-section-9",
            "x",
        )
        .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let empty =
            SolutionService::update_section_content(&store, &cache, "two-sets", "two-sets-section-1", "  ")
                .await;
        assert!(matches!(empty, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_filters_approved() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        SolutionService::create(&store, &cache, submission("Coin Combinations")).await.unwrap();
        SolutionService::create(&store, &cache, submission("Hidden Draft")).await.unwrap();
        SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();
        SolutionService::toggle_approval(&store, &cache, "coin-combinations").await.unwrap();

        let hits = SolutionService::search(&store, &cache, Some("  COIN ")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "coin-combinations");

        let by_tag = SolutionService::search(&store, &cache, Some("greedy")).await.unwrap();
        assert_eq!(by_tag.len(), 2);

        let everything = SolutionService::search(&store, &cache, None).await.unwrap();
        assert_eq!(everything.len(), 2);
        assert!(everything.iter().all(|s| s.is_approved));
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        SolutionService::create(&store, &cache, submission("Coin Combinations")).await.unwrap();
        SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();

        let dashboard = SolutionService::dashboard(&store, &cache).await.unwrap();
        assert_eq!((dashboard.total, dashboard.approved, dashboard.pending), (2, 1, 1));
    }

    #[tokio::test]
    async fn test_create_ignores_client_section_ids() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);
        let mut payload = submission("Two Sets");
        payload.sections[0].id = Some("evil".to_string());
        payload.sections[1].id = Some("evil".to_string());

        let solution = SolutionService::create(&store, &cache, payload).await.unwrap();
        let ids: Vec<&str> = solution.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["two-sets-section-1", "two-sets-section-2"]);
    }

    #[tokio::test]
    async fn test_slug_candidates_exhausted_is_conflict() {
        let store = MemorySolutionStore::new();
        let cache = MemoryViewCache::new(60);

        for _ in 0..=MAX_SLUG_ATTEMPTS {
            SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        }
        assert!(store.exists("two-sets-100").await.unwrap());
        assert_eq!(store.len().await, MAX_SLUG_ATTEMPTS as usize + 1);

        let result = SolutionService::create(&store, &cache, submission("Two Sets")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.len().await, MAX_SLUG_ATTEMPTS as usize + 1);
    }

    #[tokio::test]
    async fn test_lost_insert_race_moves_to_next_suffix() {
        let store = ScriptedStore::default();
        let cache = MemoryViewCache::new(60);
        store.blind_exists.store(true, Ordering::SeqCst);
        store.lose_next_insert.store(true, Ordering::SeqCst);

        let solution = SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        assert_eq!(solution.id, "two-sets-1");
        assert_eq!(solution.sections[0].id, "two-sets-1-section-1");
        assert!(!store.inner.exists("two-sets").await.unwrap());
    }

    #[tokio::test]
    async fn test_slow_read_does_not_recache_after_unapproval() {
        let store = ScriptedStore::default();
        let cache = MemoryViewCache::new(300);
        SolutionService::create(&store, &cache, submission("Two Sets")).await.unwrap();
        SolutionService::toggle_approval(&store, &cache, "two-sets").await.unwrap();
        store.hold_next_find.store(true, Ordering::SeqCst);

        let reader = SolutionService::get_view(&store, &cache, "two-sets");
        let writer = async {
            store.read_done.notified().await;
            let unapproved = SolutionService::toggle_approval(&store, &cache, "two-sets").await;
            store.release.notify_one();
            unapproved
        };
        let (stale, unapproved) = tokio::join!(reader, writer);

        // The reader loaded the record before the toggle.
        assert!(matches!(stale.unwrap(), SolutionView::Published { .. }));
        assert!(!unapproved.unwrap().is_approved);
        assert!(!cache.contains(&cache_keys::detail("two-sets")).await);

        let view = SolutionService::get_view(&store, &cache, "two-sets").await.unwrap();
        assert!(matches!(view, SolutionView::Pending { .. }));
        let listed = SolutionService::list_approved(&store, &cache).await.unwrap();
        assert!(listed.is_empty());
    }
}
