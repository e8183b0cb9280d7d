//! # Listview
//!
//! A schema-driven list view for admin-style CRUD applications.
//!
//! Given a declarative model description (fields, filter widgets, permissions),
//! the list view renders a paginated, sortable, filterable and exportable
//! record listing without model-specific code. The heart of the crate is the
//! query-state compiler: it turns search text, column filters, sort and
//! pagination into one canonical server query, and a single coordinator keeps
//! pagination and filters consistent across user actions and deletes.
//!
//! ## Feature Flags
//!
//! - `core` - filters, query compiler, pagination coordinator, columns, configuration
//! - `view` - collaborator traits, listing cache, action dispatcher, [`ListView`](view::ListView)
//! - `full` (default) - everything
//!
//! ## Architecture
//!
//! - **types**: shared data model (`listview-types`)
//! - **core**: pure logic (`listview-core`)
//! - **view**: effectful shell driven by user events (`listview-view`)
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use listview::prelude::*;
//!
//! let registry = SchemaRegistry::from_path("models.toml")?;
//! let view = ListView::open("user", &registry, ListViewSettings::default(), collaborators);
//!
//! view.on_filter(FilterKey::new("email__icontains"), "acme".into()).await?;
//! view.on_sort("created_at").await?;
//! let page = view.current_page();
//! ```

pub mod types;

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "view")]
pub mod view;

// Re-export the data model
pub use listview_types::{
	FetchError, FetchResult, Field, FilterValue, FilterWidgetType, ListConfiguration, ListPage,
	ModelSchema, Permission, RangeValue, Record, RecordId, Route, SortDirection, SortSpec,
};

// Re-export configuration
#[cfg(feature = "core")]
pub use listview_core::{ConfigError, ConfigResult, ListViewSettings, SchemaRegistry, SchemaSource};

// Re-export the query state
#[cfg(feature = "core")]
pub use listview_core::{
	ColumnDescriptor, FilterKey, FilterState, ListEvent, Pagination, PaginationCoordinator,
	compile_export_query, compile_list_query, project_columns,
};

// Re-export the controller
#[cfg(feature = "view")]
pub use listview_view::{
	ActionDispatcher, Collaborators, DeleteConfirmation, ExportStatus, ListView, ListViewError,
	ListViewResult, ViewMode,
};

/// Commonly used items
pub mod prelude {
	pub use crate::types::{
		Field, FilterValue, FilterWidgetType, ListConfiguration, ModelSchema, Permission, Record,
		RecordId, Route, SortSpec,
	};

	#[cfg(feature = "core")]
	pub use crate::core::{
		FilterKey, FilterState, ListViewSettings, Pagination, SchemaRegistry, SchemaSource,
	};

	#[cfg(feature = "view")]
	pub use crate::view::{
		Collaborators, ExportFetcher, FileSaver, ListFetcher, ListView, Navigator, Notifier,
		RecordDeleter, ViewMode,
	};
}
