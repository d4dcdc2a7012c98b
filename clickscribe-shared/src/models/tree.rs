/// Nested page-tree creation and retrieval
///
/// This module is the heart of the persistence layer. Page creation accepts a
/// nested input structure (headers, their subheaders and buttons, and
/// recursively nested button sub-options), creates one row per node, and then
/// backfills each parent's child-ID array. Retrieval walks the stored ID
/// arrays back into a fully populated tree.
///
/// Creation is not transactional: a failure part-way through leaves the rows
/// already written in place and surfaces the error to the caller.
///
/// # Example
///
/// ```no_run
/// use clickscribe_shared::models::tree::{create_page_tree, load_page_tree, PageInput};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let input: PageInput = serde_json::from_str(
///     r#"{"title": "Daily report", "headers": []}"#,
/// ).unwrap();
///
/// let page = create_page_tree(&pool, &input).await?;
/// let reloaded = load_page_tree(&pool, page.id).await?;
/// assert!(reloaded.is_some());
/// # Ok(())
/// # }
/// ```

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use super::{
    button::{Button, ButtonParent, CreateButton},
    header::{CreateHeader, Header},
    page::Page,
    subheader::{CreateSubheader, Subheader},
};

// ---------------------------------------------------------------------------
// Creation input
// ---------------------------------------------------------------------------

/// Nested input for creating a complete page
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    /// Page title
    pub title: Option<String>,

    /// Headers in submission order
    #[serde(default)]
    #[validate(nested)]
    pub headers: Vec<HeaderInput>,
}

/// Input for one header and its children
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInput {
    /// Internal title
    #[validate(length(min = 3, message = "Title must be at least 3 characters long."))]
    pub title: Option<String>,

    /// Scratch-buffer display text
    pub display_text: Option<String>,

    /// Position among the page's headers
    #[serde(rename = "order", default)]
    pub order: i32,

    /// Subheaders under this header
    #[serde(default)]
    #[validate(nested)]
    pub subheaders: Vec<SubheaderInput>,

    /// Buttons directly under this header
    #[serde(default)]
    #[validate(nested)]
    pub buttons: Vec<ButtonInput>,
}

/// Input for one subheader and its buttons
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubheaderInput {
    /// Title
    pub title: Option<String>,

    /// Position among the header's subheaders
    #[serde(rename = "order", default)]
    pub order: i32,

    /// Buttons under this subheader
    #[serde(default)]
    #[validate(nested)]
    pub buttons: Vec<ButtonInput>,
}

/// Input for one button, possibly with recursive sub-options
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ButtonInput {
    /// Label shown on the button
    pub display_text: String,

    /// Text appended on left click
    pub on_left_click_output: Option<String>,

    /// Text appended on right click
    pub on_right_click_output: Option<String>,

    /// Sub-options opened by left click
    #[serde(default)]
    pub left_click_sub_options: Vec<ButtonInput>,

    /// Sub-options opened by right click
    #[serde(default)]
    pub right_click_sub_options: Vec<ButtonInput>,
}

// ---------------------------------------------------------------------------
// Populated output
// ---------------------------------------------------------------------------

/// Fully populated page tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTree {
    /// Page ID
    pub id: Uuid,

    /// Page title
    pub title: Option<String>,

    /// Headers in stored order
    pub headers: Vec<HeaderTree>,
}

/// Header with populated children
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTree {
    /// Header ID
    pub id: Uuid,

    /// Internal title
    pub title: Option<String>,

    /// Scratch-buffer display text
    pub display_text: Option<String>,

    /// Position among the page's headers
    #[serde(rename = "order")]
    pub order: i32,

    /// Populated subheaders
    pub subheaders: Vec<SubheaderTree>,

    /// Populated buttons directly under the header
    pub buttons: Vec<ButtonTree>,
}

/// Subheader with populated buttons
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubheaderTree {
    /// Subheader ID
    pub id: Uuid,

    /// Title
    pub title: Option<String>,

    /// Position among the header's subheaders
    #[serde(rename = "order")]
    pub order: i32,

    /// Populated buttons
    pub buttons: Vec<ButtonTree>,
}

/// Button with recursively populated sub-options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonTree {
    /// Button ID
    pub id: Uuid,

    /// Owning header, if the button sits directly under one
    pub header_ref: Option<Uuid>,

    /// Owning subheader, if any
    pub subheader_ref: Option<Uuid>,

    /// Label
    pub display_text: String,

    /// Left-click output
    pub on_left_click_output: Option<String>,

    /// Right-click output
    pub on_right_click_output: Option<String>,

    /// Populated left-click sub-options
    pub left_click_sub_options: Vec<ButtonTree>,

    /// Populated right-click sub-options
    pub right_click_sub_options: Vec<ButtonTree>,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Creates a complete page tree from nested input
///
/// Walks the input structure creating one row per node, then backfills the
/// parent-to-child ID arrays level by level: buttons onto their subheader or
/// header, subheaders onto their header, headers onto the page. Returns the
/// freshly created page, fully populated.
///
/// # Errors
///
/// Returns an error if any insert or backfill fails. Rows created before the
/// failure are left in place (no rollback).
pub async fn create_page_tree(pool: &PgPool, input: &PageInput) -> Result<PageTree, sqlx::Error> {
    let page = Page::create(pool, input.title.as_deref()).await?;

    let mut header_ids = Vec::with_capacity(input.headers.len());
    for header_input in &input.headers {
        let header = Header::create(
            pool,
            CreateHeader {
                page_ref: page.id,
                title: header_input.title.clone(),
                display_text: header_input.display_text.clone(),
                order: header_input.order,
            },
        )
        .await?;

        let mut subheader_ids = Vec::with_capacity(header_input.subheaders.len());
        for subheader_input in &header_input.subheaders {
            let subheader = Subheader::create(
                pool,
                CreateSubheader {
                    header_ref: header.id,
                    title: subheader_input.title.clone(),
                    order: subheader_input.order,
                },
            )
            .await?;

            let mut button_ids = Vec::with_capacity(subheader_input.buttons.len());
            for button_input in &subheader_input.buttons {
                button_ids.push(
                    create_button_subtree(
                        pool,
                        button_input,
                        ButtonParent::Subheader(subheader.id),
                    )
                    .await?,
                );
            }
            Subheader::set_buttons(pool, subheader.id, &button_ids).await?;

            subheader_ids.push(subheader.id);
        }

        let mut button_ids = Vec::with_capacity(header_input.buttons.len());
        for button_input in &header_input.buttons {
            button_ids.push(
                create_button_subtree(pool, button_input, ButtonParent::Header(header.id)).await?,
            );
        }

        Header::link_children(pool, header.id, &subheader_ids, &button_ids).await?;
        header_ids.push(header.id);
    }

    Page::set_headers(pool, page.id, &header_ids).await?;

    load_page_tree(pool, page.id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Recursively creates a button and its sub-option subtrees
///
/// Returns the ID of the created root button. Recursion is boxed because the
/// sub-option lists nest to arbitrary depth.
fn create_button_subtree<'a>(
    pool: &'a PgPool,
    input: &'a ButtonInput,
    parent: ButtonParent,
) -> BoxFuture<'a, Result<Uuid, sqlx::Error>> {
    Box::pin(async move {
        let button = Button::create(
            pool,
            CreateButton {
                parent,
                display_text: input.display_text.clone(),
                on_left_click_output: input.on_left_click_output.clone(),
                on_right_click_output: input.on_right_click_output.clone(),
            },
        )
        .await?;

        let mut left = Vec::with_capacity(input.left_click_sub_options.len());
        for sub_input in &input.left_click_sub_options {
            left.push(create_button_subtree(pool, sub_input, ButtonParent::Nested).await?);
        }

        let mut right = Vec::with_capacity(input.right_click_sub_options.len());
        for sub_input in &input.right_click_sub_options {
            right.push(create_button_subtree(pool, sub_input, ButtonParent::Nested).await?);
        }

        if !left.is_empty() || !right.is_empty() {
            Button::set_sub_options(pool, button.id, &left, &right).await?;
        }

        Ok(button.id)
    })
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// Loads a fully populated page tree
///
/// Resolves the page's header-ID array, each header's subheader and button
/// arrays, and every button's sub-option arrays recursively. Dangling IDs
/// (rows deleted out from under their parent) are skipped.
///
/// # Errors
///
/// Returns an error if database connection fails
pub async fn load_page_tree(pool: &PgPool, id: Uuid) -> Result<Option<PageTree>, sqlx::Error> {
    let Some(page) = Page::find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let headers = Header::find_many(pool, &page.headers).await?;

    let mut header_trees = Vec::with_capacity(headers.len());
    for header in headers {
        let subheaders = Subheader::find_many(pool, &header.subheaders).await?;

        let mut subheader_trees = Vec::with_capacity(subheaders.len());
        for subheader in subheaders {
            let buttons = load_button_list(pool, &subheader.buttons).await?;
            subheader_trees.push(SubheaderTree {
                id: subheader.id,
                title: subheader.title,
                order: subheader.order,
                buttons,
            });
        }

        let buttons = load_button_list(pool, &header.buttons).await?;
        header_trees.push(HeaderTree {
            id: header.id,
            title: header.title,
            display_text: header.display_text,
            order: header.order,
            subheaders: subheader_trees,
            buttons,
        });
    }

    Ok(Some(PageTree {
        id: page.id,
        title: page.title,
        headers: header_trees,
    }))
}

/// Loads a list of buttons with populated sub-option subtrees
async fn load_button_list(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<ButtonTree>, sqlx::Error> {
    let rows = Button::find_many(pool, ids).await?;

    let mut trees = Vec::with_capacity(rows.len());
    for row in rows {
        trees.push(load_button_subtree(pool, row).await?);
    }

    Ok(trees)
}

/// Recursively resolves a button row into a populated subtree
fn load_button_subtree(
    pool: &PgPool,
    row: Button,
) -> BoxFuture<'_, Result<ButtonTree, sqlx::Error>> {
    Box::pin(async move {
        let left = load_button_list(pool, &row.left_click_sub_options).await?;
        let right = load_button_list(pool, &row.right_click_sub_options).await?;

        Ok(ButtonTree {
            id: row.id,
            header_ref: row.header_ref,
            subheader_ref: row.subheader_ref,
            display_text: row.display_text,
            on_left_click_output: row.on_left_click_output,
            on_right_click_output: row.on_right_click_output,
            left_click_sub_options: left,
            right_click_sub_options: right,
        })
    })
}

// ---------------------------------------------------------------------------
// Demo data
// ---------------------------------------------------------------------------

/// Builds the canned demo page used by the populate-dummy-data endpoint
///
/// Three headers (one with subheaders, one with nested button sub-options)
/// exercising every shape the tree supports.
pub fn demo_page_input() -> PageInput {
    let quick_button = |label: &str, left: &str, right: &str| ButtonInput {
        display_text: label.to_string(),
        on_left_click_output: Some(left.to_string()),
        on_right_click_output: Some(right.to_string()),
        left_click_sub_options: vec![],
        right_click_sub_options: vec![],
    };

    PageInput {
        title: Some("Demo Inspection Sheet".to_string()),
        headers: vec![
            HeaderInput {
                title: Some("Exterior".to_string()),
                display_text: Some("Exterior".to_string()),
                order: 1,
                subheaders: vec![
                    SubheaderInput {
                        title: Some("Roof".to_string()),
                        order: 1,
                        buttons: vec![
                            quick_button("OK", "no visible damage", "needs follow-up"),
                            quick_button("Leak", "leak detected", "leak suspected"),
                        ],
                    },
                    SubheaderInput {
                        title: Some("Walls".to_string()),
                        order: 2,
                        buttons: vec![quick_button("Cracks", "hairline cracks", "major cracks")],
                    },
                ],
                buttons: vec![],
            },
            HeaderInput {
                title: Some("Interior".to_string()),
                display_text: Some("Interior".to_string()),
                order: 2,
                subheaders: vec![],
                buttons: vec![ButtonInput {
                    display_text: "Flooring".to_string(),
                    on_left_click_output: Some("flooring intact".to_string()),
                    on_right_click_output: Some("flooring worn".to_string()),
                    left_click_sub_options: vec![
                        quick_button("Hardwood", "hardwood in good shape", "hardwood scratched"),
                        quick_button("Tile", "tile in good shape", "tile chipped"),
                    ],
                    right_click_sub_options: vec![quick_button(
                        "Carpet",
                        "carpet clean",
                        "carpet stained",
                    )],
                }],
            },
            HeaderInput {
                title: Some("Summary".to_string()),
                display_text: Some("Summary".to_string()),
                order: 3,
                subheaders: vec![],
                buttons: vec![quick_button("Verdict", "passed", "failed")],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_input_from_wire_json() {
        let input: PageInput = serde_json::from_str(
            r#"{
                "title": "Site visit",
                "headers": [
                    {
                        "title": "General",
                        "displayText": "General",
                        "order": 1,
                        "subheaders": [
                            {"title": "Access", "order": 1, "buttons": [
                                {"displayText": "Gate", "onLeftClickOutput": "gate open"}
                            ]}
                        ],
                        "buttons": [
                            {
                                "displayText": "Weather",
                                "onLeftClickOutput": "sunny",
                                "leftClickSubOptions": [
                                    {"displayText": "Windy", "onLeftClickOutput": "strong wind"}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .expect("wire JSON should deserialize");

        assert_eq!(input.title.as_deref(), Some("Site visit"));
        assert_eq!(input.headers.len(), 1);

        let header = &input.headers[0];
        assert_eq!(header.order, 1);
        assert_eq!(header.subheaders.len(), 1);
        assert_eq!(header.subheaders[0].buttons[0].display_text, "Gate");
        assert_eq!(
            header.buttons[0].left_click_sub_options[0]
                .on_left_click_output
                .as_deref(),
            Some("strong wind")
        );
    }

    #[test]
    fn test_page_input_minimal_json() {
        let input: PageInput = serde_json::from_str(r#"{"title": "Empty"}"#).unwrap();
        assert!(input.headers.is_empty());
    }

    #[test]
    fn test_header_input_validation_rejects_short_title() {
        let input = PageInput {
            title: Some("Page".to_string()),
            headers: vec![HeaderInput {
                title: Some("ab".to_string()),
                ..Default::default()
            }],
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_header_input_validation_accepts_valid_tree() {
        let input = demo_page_input();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_demo_page_input_shape() {
        let input = demo_page_input();
        assert_eq!(input.headers.len(), 3);

        // Orders are distinct and ascending
        let orders: Vec<i32> = input.headers.iter().map(|h| h.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        // Second header exercises nested sub-options on both sides
        let nested = &input.headers[1].buttons[0];
        assert_eq!(nested.left_click_sub_options.len(), 2);
        assert_eq!(nested.right_click_sub_options.len(), 1);
    }

    #[test]
    fn test_button_tree_serializes_camel_case() {
        let tree = ButtonTree {
            id: Uuid::new_v4(),
            header_ref: None,
            subheader_ref: Some(Uuid::new_v4()),
            display_text: "OK".to_string(),
            on_left_click_output: Some("fine".to_string()),
            on_right_click_output: None,
            left_click_sub_options: vec![],
            right_click_sub_options: vec![],
        };

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["displayText"], "OK");
        assert_eq!(json["onLeftClickOutput"], "fine");
        assert!(json.get("subheaderRef").is_some());
    }
}
