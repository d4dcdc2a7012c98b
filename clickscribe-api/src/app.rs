/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use clickscribe_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = clickscribe_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use clickscribe_shared::auth::middleware::authenticate;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                                  # Liveness + DB check (public)
/// ├── GET /health                            # Same handler (public)
/// └── /api/v1/
///     ├── /user/
///     │   ├── POST /signup
///     │   └── POST /login
///     └── /pages/
///         ├── POST /create-page
///         ├── GET  /all                      # Bearer auth required
///         ├── GET  /page-details/:page_id
///         └── POST /populate-dummy-data
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer-token authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // User routes (public, no auth required)
    let user_routes = Router::new()
        .route("/signup", post(routes::users::signup))
        .route("/login", post(routes::users::login));

    // Page routes; only the listing endpoint requires a bearer token
    let page_routes = Router::new()
        .route("/create-page", post(routes::pages::create_page))
        .route("/page-details/:page_id", get(routes::pages::page_details))
        .route(
            "/populate-dummy-data",
            post(routes::pages::populate_dummy_data),
        )
        .merge(
            Router::new()
                .route("/all", get(routes::pages::all_pages))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    bearer_auth_layer,
                )),
        );

    let v1_routes = Router::new()
        .nest("/user", user_routes)
        .nest("/pages", page_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Validates the Authorization header and injects the resulting
/// `AuthContext` into request extensions. A missing token maps to 400,
/// an invalid or expired one to 403.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_context = authenticate(req.headers(), state.jwt_secret())?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
