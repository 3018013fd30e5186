//! Solution repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};

use crate::{
    error::AppResult,
    models::{Solution, SolutionSection},
};

/// Persistent collection of solutions keyed by slug
#[async_trait]
pub trait SolutionStore: Send + Sync {
    /// Persist a new solution. Fails with `AlreadyExists` if the id is taken.
    async fn insert(&self, solution: &Solution) -> AppResult<Solution>;

    /// Whether a solution with this id exists
    async fn exists(&self, id: &str) -> AppResult<bool>;

    /// Find a solution by id regardless of approval state
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Solution>>;

    /// Approved solutions, newest first
    async fn list_approved(&self) -> AppResult<Vec<Solution>>;

    /// Every solution, newest first
    async fn list_all(&self) -> AppResult<Vec<Solution>>;

    /// Overwrite the sections of an existing solution and bump `updated_at`.
    ///
    /// Returns `None` for an unknown id; never creates a record.
    async fn replace_sections(
        &self,
        id: &str,
        sections: &[SolutionSection],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Solution>>;

    /// Flip `is_approved` and bump `updated_at`. Returns `None` for an unknown id.
    async fn toggle_approval(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<Solution>>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Row shape of the `solutions` table
#[derive(Debug, FromRow)]
struct SolutionRow {
    id: String,
    title: String,
    problem_id: String,
    problem_statement_link: Option<String>,
    sections: Json<Vec<SolutionSection>>,
    tags: Vec<String>,
    category: String,
    author: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_approved: bool,
}

impl From<SolutionRow> for Solution {
    fn from(row: SolutionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            problem_id: row.problem_id,
            problem_statement_link: row.problem_statement_link,
            sections: row.sections.0,
            tags: row.tags,
            category: row.category,
            author: row.author,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_approved: row.is_approved,
        }
    }
}

/// PostgreSQL-backed solution store
#[derive(Clone)]
pub struct PgSolutionStore {
    pool: PgPool,
}

impl PgSolutionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SolutionStore for PgSolutionStore {
    async fn insert(&self, solution: &Solution) -> AppResult<Solution> {
        let row = sqlx::query_as::<_, SolutionRow>(
            r#"
            INSERT INTO solutions (
                id, title, problem_id, problem_statement_link, sections,
                tags, category, author, created_at, updated_at, is_approved
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&solution.id)
        .bind(&solution.title)
        .bind(&solution.problem_id)
        .bind(&solution.problem_statement_link)
        .bind(Json(&solution.sections))
        .bind(&solution.tags)
        .bind(&solution.category)
        .bind(&solution.author)
        .bind(solution.created_at)
        .bind(solution.updated_at)
        .bind(solution.is_approved)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM solutions WHERE id = $1)"#)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Solution>> {
        let row = sqlx::query_as::<_, SolutionRow>(r#"SELECT * FROM solutions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_approved(&self) -> AppResult<Vec<Solution>> {
        let rows = sqlx::query_as::<_, SolutionRow>(
            r#"SELECT * FROM solutions WHERE is_approved = true ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Solution>> {
        let rows =
            sqlx::query_as::<_, SolutionRow>(r#"SELECT * FROM solutions ORDER BY created_at DESC"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn replace_sections(
        &self,
        id: &str,
        sections: &[SolutionSection],
        now: DateTime<Utc>,
    ) -> AppResult<Option<Solution>> {
        let row = sqlx::query_as::<_, SolutionRow>(
            r#"
            UPDATE solutions
            SET
                sections = $2,
                updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(sections))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn toggle_approval(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<Solution>> {
        let row = sqlx::query_as::<_, SolutionRow>(
            r#"
            UPDATE solutions
            SET
                is_approved = NOT is_approved,
                updated_at = GREATEST($2, updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
