/// Database models for Clickscribe
///
/// This module contains all database models and their CRUD operations.
///
/// Pages, headers, subheaders, and buttons are stored document-style: each
/// parent row owns an array of child IDs that is backfilled after the children
/// are created. The `tree` module walks these arrays to build and load fully
/// populated page trees.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `page`: Page documents (root of the tree)
/// - `header`: Headers belonging to a page
/// - `subheader`: Subheaders belonging to a header
/// - `button`: Buttons with recursive left/right-click sub-options
/// - `tree`: Nested creation input, populated output, recursive walkers
///
/// # Example
///
/// ```no_run
/// use clickscribe_shared::models::user::{User, CreateUser};
/// use clickscribe_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod button;
pub mod header;
pub mod page;
pub mod subheader;
pub mod tree;
pub mod user;
