//! # listview-types
//!
//! Shared type definitions for the admin list view.
//!
//! These types describe a listable model (its fields, per-field list
//! configuration and permissions), the values a filter widget produces, the
//! sort specification, the records a listing returns and the routes a list
//! view can navigate to. They carry no behavior beyond construction and
//! formatting, so they can be shared between the pure query logic and the
//! effectful view shell.

pub mod errors;
pub mod filter;
pub mod record;
pub mod route;
pub mod schema;
pub mod sort;

pub use errors::{FetchError, FetchResult};
pub use filter::{FilterValue, FilterWidgetType, RangeValue};
pub use record::{ListPage, Record, RecordId};
pub use route::Route;
pub use schema::{DEFAULT_PK_FIELD, Field, ListConfiguration, ModelSchema, Permission};
pub use sort::{EmptySortField, SortDirection, SortSpec};
