//! Database repositories
//!
//! Repositories handle all direct store interactions. Services depend on the
//! [`SolutionStore`] trait so the same workflow runs against PostgreSQL or the
//! in-memory store.

pub mod memory_repo;
pub mod solution_repo;

pub use memory_repo::MemorySolutionStore;
pub use solution_repo::{PgSolutionStore, SolutionStore};
