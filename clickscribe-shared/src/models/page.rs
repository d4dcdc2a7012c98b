/// Page model and database operations
///
/// A page is the root of a clickable tree. The row stores only the title and
/// the ordered array of header IDs; the `tree` module resolves those IDs into
/// a fully populated structure.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pages (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255),
///     headers UUID[] NOT NULL DEFAULT '{}'
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Page document row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique page ID
    pub id: Uuid,

    /// Display title
    pub title: Option<String>,

    /// Ordered child header IDs, backfilled after header creation
    pub headers: Vec<Uuid>,
}

impl Page {
    /// Creates a new page with an empty header array
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, title: Option<&str>) -> Result<Self, sqlx::Error> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (title, headers)
            VALUES ($1, '{}')
            RETURNING id, title, headers
            "#,
        )
        .bind(title)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    /// Finds a page by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, title, headers
            FROM pages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(page)
    }

    /// Lists all pages (unpopulated rows)
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let pages = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, title, headers
            FROM pages
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(pages)
    }

    /// Backfills the page's header-ID array
    pub async fn set_headers(
        pool: &PgPool,
        id: Uuid,
        headers: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE pages SET headers = $2 WHERE id = $1")
            .bind(id)
            .bind(headers)
            .execute(pool)
            .await?;

        Ok(())
    }
}
