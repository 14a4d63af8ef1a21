//! Keyed cache for descrambled Nintendo Switch system fonts
//!
//! The console ships its shared fonts as BFTTF files spread over five system
//! titles. This crate resolves each font through a [`ContainerSource`],
//! descrambles it with the [`bfttf`] transform, and caches the result in a
//! [`FontStore`] keyed by [`FontKind`].
//!
//! ```no_run
//! use sysfont_storage::{DirectorySource, FontKind, FontStore};
//!
//! # fn main() -> sysfont_storage::Result<()> {
//! let source = DirectorySource::new("dumps/system-fonts");
//! let store = FontStore::new();
//! store.load(&source)?;
//!
//! if let Some(font) = store.font(FontKind::Standard) {
//!     println!("standard font: {} bytes of TTF", font.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod error;
pub mod store;
pub mod table;
pub mod types;

pub use container::{Container, ContainerSource, DirectorySource, EntryHandle, MemorySource};
pub use error::{Error, Result};
pub use store::FontStore;
pub use table::FontDescriptor;
pub use types::{FontData, FontKind, TitleId};
