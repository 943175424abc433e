//! Stockroom - local inventory manager.
//!
//! Core concepts:
//! - **Item**: one inventory record, stored as JSON under the `inventory` key
//! - **Store**: string-keyed byte storage (in memory, a directory, or Fjall)
//! - **Session**: owns the inventory, the displayed list and the pending edit
//!
//! # Example
//!
//! ```
//! use stockroom_core::{Confirmation, MemoryStore, Session};
//!
//! let mut session = Session::open(MemoryStore::new());
//! session.search("widget");
//! assert!(session.rows().is_empty());
//! assert!(!session.delete("missing", Confirmation::Accepted).unwrap());
//! ```

pub mod dir_store;
pub mod form;
pub mod image;
mod item;
pub mod notice;
pub mod persist;
pub mod render;
mod session;
mod store;
pub mod view;

pub use dir_store::{DirStore, DirStoreError};
pub use form::{Field, FormError, FormMode, ItemDraft, ItemForm};
pub use image::{resolve_image, resolve_or_keep, ImageError};
pub use item::{Item, ItemId, PLACEHOLDER_IMAGE};
pub use notice::{Notice, Notices};
pub use persist::{PersistError, INVENTORY_KEY};
pub use render::Row;
pub use session::{next_id, Committed, Confirmation, Session, SessionError};
pub use store::{MemoryStore, Store};
pub use view::SortKey;
