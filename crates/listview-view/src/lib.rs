//! # listview-view
//!
//! Effectful shell of the admin list view.
//!
//! ## Components
//!
//! - **collaborators**: traits for fetching, exporting, deleting, navigation,
//!   notifications and file saving
//! - **cache**: bounded listing cache keyed by model and query string
//! - **actions**: permission-gated add/change/export/delete dispatcher
//! - **view**: the [`ListView`] controller owning one model's query inputs
//!
//! ## Example
//!
//! ```ignore
//! use listview_core::{ListViewSettings, SchemaRegistry};
//! use listview_view::{Collaborators, ListView};
//!
//! let registry = SchemaRegistry::from_path("models.toml")?;
//! let view = ListView::open("user", &registry, ListViewSettings::default(), collaborators);
//! let page = view.on_search("alice").await?;
//! ```

pub mod actions;
pub mod cache;
pub mod collaborators;
pub mod errors;
pub mod view;

pub use actions::{ActionDispatcher, ExportStatus};
pub use cache::{DEFAULT_CAPACITY, ListCache, cache_key};
pub use collaborators::{
	Collaborators, ExportFetcher, FileSaver, ListFetcher, Navigator, Notifier, RecordDeleter,
};
pub use errors::{ListViewError, ListViewResult};
pub use view::{DeleteConfirmation, ListSnapshot, ListView, ViewMode};
