/// Page endpoints
///
/// This module provides page creation and retrieval endpoints. A page is a
/// tree of headers, subheaders, and buttons; buttons nest recursively as
/// left/right-click sub-menus.
///
/// # Endpoints
///
/// - `POST /api/v1/pages/create-page` - Create a page from nested input
/// - `GET  /api/v1/pages/all` - List page rows (bearer auth required)
/// - `GET  /api/v1/pages/page-details/:page_id` - Fully populated page tree
/// - `POST /api/v1/pages/populate-dummy-data` - Create a canned demo page

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use clickscribe_shared::{
    auth::middleware::AuthContext,
    models::{
        page::Page,
        tree::{create_page_tree, demo_page_input, load_page_tree, PageInput, PageTree},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create-page request; the nested input arrives under a `data` key
#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    /// Nested page input
    pub data: PageInput,
}

/// Create-page response
#[derive(Debug, Serialize)]
pub struct CreatePageResponse {
    /// Confirmation message
    pub message: String,

    /// The created page, fully populated
    pub page: PageTree,
}

/// Page-listing response
#[derive(Debug, Serialize)]
pub struct PageListResponse {
    /// Unpopulated page rows (id, title, header-ID array)
    pub pages: Vec<Page>,
}

/// Page-details response
#[derive(Debug, Serialize)]
pub struct PageDetailsResponse {
    /// The requested page, fully populated
    pub page: PageTree,
}

/// Create-page endpoint
///
/// Accepts a nested page structure and persists it one row per node,
/// backfilling each parent's child-ID array afterwards. Creation is not
/// transactional; a failure part-way through leaves the rows already
/// written in place and surfaces a generic 500.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/pages/create-page
/// Content-Type: application/json
///
/// {
///   "data": {
///     "title": "Inspection Sheet",
///     "headers": [
///       {
///         "title": "Exterior",
///         "displayText": "Exterior",
///         "order": 1,
///         "subheaders": [{"title": "Roof", "order": 1, "buttons": []}],
///         "buttons": [{"displayText": "OK", "onLeftClickOutput": "no damage"}]
///       }
///     ]
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `500 Internal Server Error`: Server error (partial writes not rolled back)
pub async fn create_page(
    State(state): State<AppState>,
    Json(req): Json<CreatePageRequest>,
) -> ApiResult<(StatusCode, Json<CreatePageResponse>)> {
    req.data.validate()?;

    let page = create_page_tree(&state.db, &req.data).await?;

    tracing::info!(page_id = %page.id, "page created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePageResponse {
            message: "Page created successfully.".to_string(),
            page,
        }),
    ))
}

/// Page-listing endpoint
///
/// Returns all page rows without populating children. Requires a bearer
/// token; the auth middleware injects the caller's [`AuthContext`].
///
/// # Errors
///
/// - `400 Bad Request`: Bearer token is missing
/// - `403 Forbidden`: Invalid or expired token
pub async fn all_pages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PageListResponse>> {
    tracing::debug!(user_id = %auth.user_id, "listing pages");

    let pages = Page::list_all(&state.db).await?;

    Ok(Json(PageListResponse { pages }))
}

/// Page-details endpoint
///
/// Resolves the stored child-ID arrays into a fully populated tree: headers
/// with their subheaders and buttons, every button with its recursive
/// left/right sub-option trees.
///
/// # Errors
///
/// - `400 Bad Request`: `page_id` is not a UUID
/// - `404 Not Found`: No page with that id
pub async fn page_details(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> ApiResult<Json<PageDetailsResponse>> {
    let id = Uuid::parse_str(&page_id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid page id: {}", page_id)))?;

    let page = load_page_tree(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Page not found!".to_string()))?;

    Ok(Json(PageDetailsResponse { page }))
}

/// Demo-data endpoint
///
/// Creates a canned demo page through the normal creation path and returns
/// it populated. Useful for manual front-end testing against an empty
/// database.
pub async fn populate_dummy_data(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<CreatePageResponse>)> {
    let input = demo_page_input();
    let page = create_page_tree(&state.db, &input).await?;

    tracing::info!(page_id = %page.id, "demo page created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePageResponse {
            message: "Page created successfully.".to_string(),
            page,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_page_request_unwraps_data_key() {
        let req: CreatePageRequest = serde_json::from_str(
            r#"{"data": {"title": "Checklist", "headers": []}}"#,
        )
        .unwrap();

        assert_eq!(req.data.title.as_deref(), Some("Checklist"));
        assert!(req.data.headers.is_empty());
    }

    #[test]
    fn test_create_page_request_rejects_missing_data_key() {
        let result: Result<CreatePageRequest, _> =
            serde_json::from_str(r#"{"title": "Checklist"}"#);
        assert!(result.is_err());
    }
}
