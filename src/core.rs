//! Pure list view logic module.
//!
//! This module provides access to the filter state store, the query compiler,
//! the pagination/reset coordinator, column projection and configuration
//! loading.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "core")]
//! use listview::core::{FilterState, PaginationCoordinator, compile_list_query};
//! ```

#[cfg(feature = "core")]
pub use listview_core::*;
