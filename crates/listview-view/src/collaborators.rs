//! Collaborator interfaces
//!
//! The list view performs no I/O of its own. Fetching, exporting, deleting,
//! navigation, notifications and file saving are injected through these traits
//! and bundled in [`Collaborators`].

use async_trait::async_trait;
use listview_core::{ExportQuery, ListQuery};
use listview_types::{FetchResult, ListPage, RecordId, Route};
use std::sync::Arc;

/// Fetches one page of a model listing (`GET` semantics)
#[async_trait]
pub trait ListFetcher: Send + Sync {
	async fn fetch_list(&self, model_name: &str, query: &ListQuery) -> FetchResult<ListPage>;
}

/// Fetches the exported listing as raw CSV bytes
#[async_trait]
pub trait ExportFetcher: Send + Sync {
	async fn fetch_export(&self, model_name: &str, query: &ExportQuery) -> FetchResult<Vec<u8>>;
}

/// Deletes a single record
#[async_trait]
pub trait RecordDeleter: Send + Sync {
	async fn delete_record(&self, model_name: &str, id: &RecordId) -> FetchResult<()>;
}

/// Route transitions to other admin views
pub trait Navigator: Send + Sync {
	fn navigate(&self, route: Route);
}

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
	fn success(&self, message: &str);
	fn error(&self, message: &str);
}

/// Client-side file download
pub trait FileSaver: Send + Sync {
	fn save(&self, filename: &str, contents: &[u8]);
}

/// All collaborators a list view needs
#[derive(Clone)]
pub struct Collaborators {
	pub lists: Arc<dyn ListFetcher>,
	pub exports: Arc<dyn ExportFetcher>,
	pub deleter: Arc<dyn RecordDeleter>,
	pub navigator: Arc<dyn Navigator>,
	pub notifier: Arc<dyn Notifier>,
	pub files: Arc<dyn FileSaver>,
}

impl std::fmt::Debug for Collaborators {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Collaborators").finish_non_exhaustive()
	}
}
