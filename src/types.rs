//! Shared data model module.
//!
//! Model schemas, filter values, sort specifications, records and routes.

pub use listview_types::*;
