//! # Clickscribe Scratch Buffer
//!
//! Pure library implementing the scratch buffer that a rendered page writes
//! into: a line-oriented text document where each header owns a top-level
//! line and each subheader an indented line, plus a capped linear undo/redo
//! history.
//!
//! No I/O and no async; the API server and any future desktop shell drive it
//! with populated page trees from `clickscribe-shared`.
//!
//! ## Modules
//!
//! - `outline`: ordering view over a populated page (headers and subheaders
//!   sorted by their stored `order`)
//! - `history`: capped linear snapshot history
//! - `buffer`: the scratch buffer itself with header/subheader/button click
//!   handlers
//!
//! ## Example
//!
//! ```
//! use clickscribe_scratch::{PageOutline, ScratchBuffer};
//! use clickscribe_shared::models::tree::{HeaderTree, PageTree};
//! use uuid::Uuid;
//!
//! let page = PageTree {
//!     id: Uuid::new_v4(),
//!     title: Some("Report".to_string()),
//!     headers: vec![HeaderTree {
//!         id: Uuid::new_v4(),
//!         title: Some("Exterior".to_string()),
//!         display_text: Some("Exterior".to_string()),
//!         order: 1,
//!         subheaders: vec![],
//!         buttons: vec![],
//!     }],
//! };
//!
//! let outline = PageOutline::from_page(&page);
//! let mut buffer = ScratchBuffer::new();
//! buffer.click_button(&outline, "no damage", Some(page.headers[0].id), None);
//! assert_eq!(buffer.text(), "\nExterior: no damage;");
//! ```

pub mod buffer;
pub mod history;
pub mod outline;

pub use buffer::ScratchBuffer;
pub use history::EditHistory;
pub use outline::{HeaderOutline, PageOutline, SubheaderOutline};
