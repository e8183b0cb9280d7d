//! # listview-core
//!
//! Pure logic of the admin list view:
//!
//! - **filters**: filter keys and the immutable filter state store
//! - **widgets**: filter widget table (render + encode per widget)
//! - **query**: list and export query compiler
//! - **pagination**: pagination/reset coordinator
//! - **columns**: column projection from a model schema
//! - **config**: settings and the schema registry
//!
//! Nothing here performs I/O except loading configuration files; the view
//! shell in `listview-view` drives these pieces from user events.

pub mod columns;
pub mod config;
pub mod errors;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod widgets;

pub use columns::{
	Cell, ColumnDescriptor, FilterBinding, FilterIcon, RenderRule, field_title, project_columns,
};
pub use config::{ListViewSettings, SchemaRegistry, SchemaSource};
pub use errors::{ConfigError, ConfigResult};
pub use filters::{FilterKey, FilterKeyCollision, FilterState, filter_key_collisions};
pub use pagination::{
	FALLBACK_PAGE_SIZE, ListEvent, Pagination, PaginationCoordinator, Transition,
};
pub use query::{
	CompiledQuery, ExportQuery, FilterTransform, ListQuery, WidgetFilterTransform,
	compile_export_query, compile_list_query,
};
pub use widgets::{FilterControl, FilterOption, WidgetBinding, widget_binding};
