//! Recording collaborators shared by the list view integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use listview_core::{ExportQuery, ListQuery, SchemaRegistry};
use listview_types::{
	FetchError, FetchResult, Field, FilterWidgetType, ListConfiguration, ListPage, ModelSchema,
	Permission, Record, RecordId, Route,
};
use listview_view::{
	Collaborators, ExportFetcher, FileSaver, ListFetcher, Navigator, Notifier, RecordDeleter,
};
use mockall::mock;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::oneshot;

// ============================================================================
// Recording fakes
// ============================================================================

/// List fetcher answering every query with one record echoing the query string
///
/// `total` is read when the request arrives, so a held response reports the
/// total of the moment it was requested.
#[derive(Default)]
pub struct RecordingLists {
	pub requests: Mutex<Vec<String>>,
	pub total: Mutex<u64>,
	pub failing: Mutex<bool>,
	held: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl RecordingLists {
	/// Hold the response to `query_string` until the returned sender fires
	pub fn hold(&self, query_string: &str) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		self.held.lock().insert(query_string.to_string(), rx);
		tx
	}

	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().clone()
	}
}

/// Query string a page from [`RecordingLists`] was fetched with
pub fn echoed_query(page: &ListPage) -> String {
	page.results[0]["query"].as_str().unwrap().to_string()
}

#[async_trait]
impl ListFetcher for RecordingLists {
	async fn fetch_list(&self, _model_name: &str, query: &ListQuery) -> FetchResult<ListPage> {
		let query_string = query.to_query_string();
		self.requests.lock().push(query_string.clone());
		let total = *self.total.lock();

		let held = self.held.lock().remove(&query_string);
		if let Some(rx) = held {
			let _ = rx.await;
		}

		if *self.failing.lock() {
			return Err(FetchError::Status {
				code: 500,
				message: "Internal Server Error".to_string(),
			});
		}

		let record: Record = serde_json::from_value(json!({
			"id": 1,
			"email": "alice@example.com",
			"query": query_string,
		}))
		.unwrap();
		Ok(ListPage {
			results: vec![record],
			total,
		})
	}
}

/// Export fetcher returning fixed CSV bytes
#[derive(Default)]
pub struct RecordingExports {
	pub requests: Mutex<Vec<String>>,
	pub failing: Mutex<bool>,
	gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RecordingExports {
	/// Hold the next export until the returned sender fires
	pub fn hold_next(&self) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		*self.gate.lock() = Some(rx);
		tx
	}
}

#[async_trait]
impl ExportFetcher for RecordingExports {
	async fn fetch_export(&self, _model_name: &str, query: &ExportQuery) -> FetchResult<Vec<u8>> {
		self.requests.lock().push(query.to_query_string());

		let gate = self.gate.lock().take();
		if let Some(rx) = gate {
			let _ = rx.await;
		}

		if *self.failing.lock() {
			return Err(FetchError::Request("connection reset".to_string()));
		}
		Ok(b"id,email\n1,alice@example.com\n".to_vec())
	}
}

/// Deleter failing for a configurable set of ids
#[derive(Default)]
pub struct RecordingDeleter {
	pub deleted: Mutex<Vec<RecordId>>,
	pub failing: Mutex<HashSet<RecordId>>,
}

#[async_trait]
impl RecordDeleter for RecordingDeleter {
	async fn delete_record(&self, _model_name: &str, id: &RecordId) -> FetchResult<()> {
		tokio::task::yield_now().await;
		if self.failing.lock().contains(id) {
			return Err(FetchError::Status {
				code: 409,
				message: "Conflict".to_string(),
			});
		}
		self.deleted.lock().push(id.clone());
		Ok(())
	}
}

#[derive(Default)]
pub struct RecordingNavigator {
	pub routes: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
	fn navigate(&self, route: Route) {
		self.routes.lock().push(route);
	}
}

#[derive(Default)]
pub struct RecordingNotifier {
	pub successes: Mutex<Vec<String>>,
	pub errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
	fn success(&self, message: &str) {
		self.successes.lock().push(message.to_string());
	}

	fn error(&self, message: &str) {
		self.errors.lock().push(message.to_string());
	}
}

#[derive(Default)]
pub struct RecordingFiles {
	pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FileSaver for RecordingFiles {
	fn save(&self, filename: &str, contents: &[u8]) {
		self.saved
			.lock()
			.push((filename.to_string(), contents.to_vec()));
	}
}

// ============================================================================
// mockall mocks
// ============================================================================

mock! {
	pub Router {}

	impl Navigator for Router {
		fn navigate(&self, route: Route);
	}
}

mock! {
	pub Toasts {}

	impl Notifier for Toasts {
		fn success(&self, message: &str);
		fn error(&self, message: &str);
	}
}

// ============================================================================
// Harness
// ============================================================================

/// All fakes of one test, kept for inspection
#[derive(Default)]
pub struct Harness {
	pub lists: Arc<RecordingLists>,
	pub exports: Arc<RecordingExports>,
	pub deleter: Arc<RecordingDeleter>,
	pub navigator: Arc<RecordingNavigator>,
	pub notifier: Arc<RecordingNotifier>,
	pub files: Arc<RecordingFiles>,
}

impl Harness {
	pub fn collaborators(&self) -> Collaborators {
		Collaborators {
			lists: self.lists.clone(),
			exports: self.exports.clone(),
			deleter: self.deleter.clone(),
			navigator: self.navigator.clone(),
			notifier: self.notifier.clone(),
			files: self.files.clone(),
		}
	}

	/// Collaborators with the navigation and notification channels replaced
	pub fn collaborators_with(
		&self,
		navigator: Arc<dyn Navigator>,
		notifier: Arc<dyn Notifier>,
	) -> Collaborators {
		Collaborators {
			navigator,
			notifier,
			..self.collaborators()
		}
	}
}

/// `user` model with every permission and a mix of column configurations
pub fn user_schema() -> ModelSchema {
	ModelSchema::new("user")
		.with_list_per_page(20)
		.with_search_help_text("Search by email or name")
		.with_permissions(Permission::ALL)
		.with_field(Field::new("id").with_list_configuration(
			ListConfiguration::default().sortable().linked(),
		))
		.with_field(Field::new("email").with_list_configuration(
			ListConfiguration::default()
				.sortable()
				.with_filter(FilterWidgetType::Input),
		))
		.with_field(Field::new("created_at").with_list_configuration(
			ListConfiguration::default()
				.sortable()
				.with_filter(FilterWidgetType::DateTimeRangePicker)
				.with_filter_condition("created_at"),
		))
		.with_field(Field::new("password"))
}

pub fn registry() -> SchemaRegistry {
	SchemaRegistry::new()
		.with_schema(user_schema())
		.with_schema(ModelSchema::new("audit_log").with_field(Field::listed("message")))
}

pub fn record(id: u64) -> Record {
	serde_json::from_value(json!({ "id": id, "email": format!("user{id}@example.com") })).unwrap()
}
