//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    assistant::AiAssistant, cache::ViewCache, config::Config, db::repositories::SolutionStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Solution persistence (PostgreSQL or in-memory)
    store: Arc<dyn SolutionStore>,

    /// Rendered view cache (Redis or in-memory)
    cache: Arc<dyn ViewCache>,

    /// AI assistant
    assistant: Arc<dyn AiAssistant>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        store: Arc<dyn SolutionStore>,
        cache: Arc<dyn ViewCache>,
        assistant: Arc<dyn AiAssistant>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                cache,
                assistant,
                config,
            }),
        }
    }

    /// Get the solution store
    pub fn store(&self) -> &dyn SolutionStore {
        self.inner.store.as_ref()
    }

    /// Get the view cache
    pub fn cache(&self) -> &dyn ViewCache {
        self.inner.cache.as_ref()
    }

    pub fn assistant(&self) -> &dyn AiAssistant {
        self.inner.assistant.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
