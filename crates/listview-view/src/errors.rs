//! Error types for the list view

use listview_types::{FetchError, Permission};
use thiserror::Error;

/// List view error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListViewError {
	/// The model has no schema or no permissions; the view shows the no-access state
	#[error("No permissions for model '{0}'")]
	NoPermission(String),

	/// The schema does not grant the requested operation
	#[error("Permission '{permission}' is not granted for model '{model}'")]
	PermissionDenied { model: String, permission: Permission },

	/// The record carries no usable primary key
	#[error("Record has no primary key in field '{0}'")]
	MissingPrimaryKey(String),

	/// A collaborator request failed
	#[error(transparent)]
	Fetch(#[from] FetchError),
}

/// Result type for list view operations
pub type ListViewResult<T> = Result<T, ListViewError>;
