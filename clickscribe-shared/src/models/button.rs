/// Button model and database operations
///
/// Buttons are the leaves (and inner nodes) of the tree: each button has
/// optional left/right-click output strings and optional recursive lists of
/// sub-option buttons that open as left/right-click sub-menus.
///
/// Top-level buttons carry a back-reference to their owning header or
/// subheader; nested sub-option buttons carry neither.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE buttons (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     header_ref UUID,
///     subheader_ref UUID,
///     display_text VARCHAR(255) NOT NULL,
///     on_left_click_output TEXT,
///     on_right_click_output TEXT,
///     left_click_sub_options UUID[] NOT NULL DEFAULT '{}',
///     right_click_sub_options UUID[] NOT NULL DEFAULT '{}'
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::header::sort_by_id_order;

/// Owning parent of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonParent {
    /// Button sits directly under a header
    Header(Uuid),

    /// Button sits under a subheader
    Subheader(Uuid),

    /// Button is a sub-option of another button; no back-reference stored
    Nested,
}

/// Button document row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Unique button ID
    pub id: Uuid,

    /// Back-reference to the owning header, if any
    pub header_ref: Option<Uuid>,

    /// Back-reference to the owning subheader, if any
    pub subheader_ref: Option<Uuid>,

    /// Label shown on the rendered button
    pub display_text: String,

    /// Text appended to the scratch buffer on left click
    pub on_left_click_output: Option<String>,

    /// Text appended to the scratch buffer on right click
    pub on_right_click_output: Option<String>,

    /// Sub-option button IDs opened by left click
    pub left_click_sub_options: Vec<Uuid>,

    /// Sub-option button IDs opened by right click
    pub right_click_sub_options: Vec<Uuid>,
}

/// Input for creating a new button row
#[derive(Debug, Clone)]
pub struct CreateButton {
    /// Owning parent
    pub parent: ButtonParent,

    /// Label
    pub display_text: String,

    /// Left-click output
    pub on_left_click_output: Option<String>,

    /// Right-click output
    pub on_right_click_output: Option<String>,
}

impl Button {
    /// Creates a new button with empty sub-option arrays
    ///
    /// Sub-option arrays are backfilled by [`Button::set_sub_options`] once
    /// the nested buttons exist.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn create(pool: &PgPool, data: CreateButton) -> Result<Self, sqlx::Error> {
        let (header_ref, subheader_ref) = match data.parent {
            ButtonParent::Header(id) => (Some(id), None),
            ButtonParent::Subheader(id) => (None, Some(id)),
            ButtonParent::Nested => (None, None),
        };

        let button = sqlx::query_as::<_, Button>(
            r#"
            INSERT INTO buttons
                (header_ref, subheader_ref, display_text,
                 on_left_click_output, on_right_click_output,
                 left_click_sub_options, right_click_sub_options)
            VALUES ($1, $2, $3, $4, $5, '{}', '{}')
            RETURNING id, header_ref, subheader_ref, display_text,
                      on_left_click_output, on_right_click_output,
                      left_click_sub_options, right_click_sub_options
            "#,
        )
        .bind(header_ref)
        .bind(subheader_ref)
        .bind(data.display_text)
        .bind(data.on_left_click_output)
        .bind(data.on_right_click_output)
        .fetch_one(pool)
        .await?;

        Ok(button)
    }

    /// Finds a button by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let button = sqlx::query_as::<_, Button>(
            r#"
            SELECT id, header_ref, subheader_ref, display_text,
                   on_left_click_output, on_right_click_output,
                   left_click_sub_options, right_click_sub_options
            FROM buttons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(button)
    }

    /// Fetches several buttons, preserving the order of `ids`
    pub async fn find_many(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Button>(
            r#"
            SELECT id, header_ref, subheader_ref, display_text,
                   on_left_click_output, on_right_click_output,
                   left_click_sub_options, right_click_sub_options
            FROM buttons
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(sort_by_id_order(rows, ids, |b| b.id))
    }

    /// Backfills the button's sub-option ID arrays
    pub async fn set_sub_options(
        pool: &PgPool,
        id: Uuid,
        left: &[Uuid],
        right: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE buttons SET left_click_sub_options = $2, right_click_sub_options = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(left)
        .bind(right)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_parent_refs() {
        let header_id = Uuid::new_v4();
        assert_eq!(ButtonParent::Header(header_id), ButtonParent::Header(header_id));
        assert_ne!(ButtonParent::Header(header_id), ButtonParent::Nested);
    }

    #[test]
    fn test_button_serializes_camel_case() {
        let button = Button {
            id: Uuid::new_v4(),
            header_ref: None,
            subheader_ref: None,
            display_text: "Install".to_string(),
            on_left_click_output: Some("installed".to_string()),
            on_right_click_output: None,
            left_click_sub_options: vec![],
            right_click_sub_options: vec![],
        };

        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(json["displayText"], "Install");
        assert_eq!(json["onLeftClickOutput"], "installed");
        assert!(json["leftClickSubOptions"].as_array().unwrap().is_empty());
    }
}
