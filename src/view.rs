//! List view controller module.
//!
//! This module provides access to the [`ListView`] controller, the action
//! dispatcher and the collaborator traits a host implements.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "view")]
//! use listview::view::{Collaborators, ListView, ViewMode};
//! ```

#[cfg(feature = "view")]
pub use listview_view::*;
