/// Subheader model and database operations
///
/// Subheaders sit under a header and own an ordered array of button IDs.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE subheaders (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     header_ref UUID,
///     title VARCHAR(255),
///     sort_order INT NOT NULL DEFAULT 0,
///     buttons UUID[] NOT NULL DEFAULT '{}'
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::header::sort_by_id_order;

/// Subheader document row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subheader {
    /// Unique subheader ID
    pub id: Uuid,

    /// Back-reference to the owning header
    pub header_ref: Option<Uuid>,

    /// Title, also used for this subheader's line in the scratch buffer
    pub title: Option<String>,

    /// Position among the header's subheaders
    #[sqlx(rename = "sort_order")]
    #[serde(rename = "order")]
    pub order: i32,

    /// Ordered child button IDs
    pub buttons: Vec<Uuid>,
}

/// Input for creating a new subheader row
#[derive(Debug, Clone)]
pub struct CreateSubheader {
    /// Owning header
    pub header_ref: Uuid,

    /// Title
    pub title: Option<String>,

    /// Position among the header's subheaders
    pub order: i32,
}

impl Subheader {
    /// Creates a new subheader with an empty button array
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, data: CreateSubheader) -> Result<Self, sqlx::Error> {
        let subheader = sqlx::query_as::<_, Subheader>(
            r#"
            INSERT INTO subheaders (header_ref, title, sort_order, buttons)
            VALUES ($1, $2, $3, '{}')
            RETURNING id, header_ref, title, sort_order, buttons
            "#,
        )
        .bind(data.header_ref)
        .bind(data.title)
        .bind(data.order)
        .fetch_one(pool)
        .await?;

        Ok(subheader)
    }

    /// Fetches several subheaders, preserving the order of `ids`
    pub async fn find_many(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Subheader>(
            r#"
            SELECT id, header_ref, title, sort_order, buttons
            FROM subheaders
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(sort_by_id_order(rows, ids, |s| s.id))
    }

    /// Backfills the subheader's button-ID array
    pub async fn set_buttons(pool: &PgPool, id: Uuid, buttons: &[Uuid]) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE subheaders SET buttons = $2 WHERE id = $1")
            .bind(id)
            .bind(buttons)
            .execute(pool)
            .await?;

        Ok(())
    }
}
