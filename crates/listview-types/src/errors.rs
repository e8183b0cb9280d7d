//! Error types for list view collaborators

use thiserror::Error;

/// Failure reported by a network collaborator (list, export, delete)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The request could not be sent or completed
	#[error("Request failed: {0}")]
	Request(String),

	/// The server answered with a non-success status
	#[error("Server returned {code}: {message}")]
	Status { code: u16, message: String },

	/// The response body could not be decoded
	#[error("Invalid response: {0}")]
	Decode(String),
}

/// Result type for collaborator operations
pub type FetchResult<T> = Result<T, FetchError>;
