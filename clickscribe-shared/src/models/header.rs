/// Header model and database operations
///
/// Headers sit directly under a page. Each header owns ordered arrays of
/// subheader and button IDs, plus a `sort_order` used when laying out the
/// scratch buffer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE headers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     page_ref UUID,
///     title VARCHAR(255),
///     display_text VARCHAR(255),
///     sort_order INT NOT NULL DEFAULT 0,
///     subheaders UUID[] NOT NULL DEFAULT '{}',
///     buttons UUID[] NOT NULL DEFAULT '{}'
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Header document row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Unique header ID
    pub id: Uuid,

    /// Back-reference to the owning page
    pub page_ref: Option<Uuid>,

    /// Internal title shown in the builder UI
    pub title: Option<String>,

    /// Text used for this header's line in the scratch buffer
    pub display_text: Option<String>,

    /// Position among the page's headers
    #[sqlx(rename = "sort_order")]
    #[serde(rename = "order")]
    pub order: i32,

    /// Ordered child subheader IDs
    pub subheaders: Vec<Uuid>,

    /// Ordered child button IDs
    pub buttons: Vec<Uuid>,
}

/// Input for creating a new header row
#[derive(Debug, Clone)]
pub struct CreateHeader {
    /// Owning page
    pub page_ref: Uuid,

    /// Internal title
    pub title: Option<String>,

    /// Scratch-buffer display text
    pub display_text: Option<String>,

    /// Position among the page's headers
    pub order: i32,
}

impl Header {
    /// Creates a new header with empty child arrays
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, data: CreateHeader) -> Result<Self, sqlx::Error> {
        let header = sqlx::query_as::<_, Header>(
            r#"
            INSERT INTO headers (page_ref, title, display_text, sort_order, subheaders, buttons)
            VALUES ($1, $2, $3, $4, '{}', '{}')
            RETURNING id, page_ref, title, display_text, sort_order, subheaders, buttons
            "#,
        )
        .bind(data.page_ref)
        .bind(data.title)
        .bind(data.display_text)
        .bind(data.order)
        .fetch_one(pool)
        .await?;

        Ok(header)
    }

    /// Finds a header by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let header = sqlx::query_as::<_, Header>(
            r#"
            SELECT id, page_ref, title, display_text, sort_order, subheaders, buttons
            FROM headers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(header)
    }

    /// Fetches several headers, preserving the order of `ids`
    ///
    /// IDs with no matching row are silently skipped, mirroring how dangling
    /// references behave in a document store.
    pub async fn find_many(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Header>(
            r#"
            SELECT id, page_ref, title, display_text, sort_order, subheaders, buttons
            FROM headers
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(sort_by_id_order(rows, ids, |h| h.id))
    }

    /// Backfills the header's child-ID arrays
    pub async fn link_children(
        pool: &PgPool,
        id: Uuid,
        subheaders: &[Uuid],
        buttons: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE headers SET subheaders = $2, buttons = $3 WHERE id = $1")
            .bind(id)
            .bind(subheaders)
            .bind(buttons)
            .execute(pool)
            .await?;

        Ok(())
    }
}

/// Reorders fetched rows to match the parent's ID array
pub(crate) fn sort_by_id_order<T, F>(rows: Vec<T>, ids: &[Uuid], id_of: F) -> Vec<T>
where
    F: Fn(&T) -> Uuid,
{
    let mut rows: Vec<(usize, T)> = rows
        .into_iter()
        .filter_map(|row| {
            let pos = ids.iter().position(|id| *id == id_of(&row))?;
            Some((pos, row))
        })
        .collect();
    rows.sort_by_key(|(pos, _)| *pos);
    rows.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_id_order_preserves_parent_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let rows = vec![c, a, b];
        let sorted = sort_by_id_order(rows, &[a, b, c], |id| *id);
        assert_eq!(sorted, vec![a, b, c]);
    }

    #[test]
    fn test_sort_by_id_order_skips_dangling_ids() {
        let a = Uuid::new_v4();
        let missing = Uuid::new_v4();

        let sorted = sort_by_id_order(vec![a], &[missing, a], |id| *id);
        assert_eq!(sorted, vec![a]);
    }

    #[test]
    fn test_header_order_serializes_as_order() {
        let header = Header {
            id: Uuid::new_v4(),
            page_ref: None,
            title: Some("Phase 1".to_string()),
            display_text: Some("Phase 1".to_string()),
            order: 2,
            subheaders: vec![],
            buttons: vec![],
        };

        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["order"], 2);
        assert_eq!(json["displayText"], "Phase 1");
    }
}
