//! List view controller
//!
//! [`ListView`] owns the query inputs of one model listing (search text, sort,
//! pagination and filters) and drives the pure pieces of `listview-core` from
//! user events. Every handler routes through the [`PaginationCoordinator`]
//! before the listing is fetched again.
//!
//! State lives behind a `parking_lot::Mutex` that is never held across an
//! `.await`, so fetches, exports and deletes can be in flight while the user
//! keeps editing filters. Fetched pages are cached under the query that
//! produced them; [`ListView::current_page`] only ever reads the entry of the
//! current query. Concurrent refreshes of the same query share one fetch, and
//! a fetch that started before a delete is never stored.

use crate::actions::{ActionDispatcher, ExportStatus};
use crate::cache::{ListCache, cache_key};
use crate::collaborators::{Collaborators, ListFetcher, Notifier};
use crate::errors::{ListViewError, ListViewResult};
use listview_core::{
	ColumnDescriptor, ExportQuery, FilterKey, FilterState, ListEvent, ListQuery, ListViewSettings,
	Pagination, PaginationCoordinator, SchemaSource, WidgetFilterTransform, compile_export_query,
	compile_list_query, field_title, filter_key_collisions, project_columns,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use listview_types::{
	FetchResult, FilterValue, ListPage, ModelSchema, Permission, Record, RecordId, Route, SortSpec,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

type PendingFetch = Shared<BoxFuture<'static, FetchResult<ListPage>>>;

/// What the view displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
	/// The listing with its actions
	Listing,
	/// Unknown model or no permissions; nothing is fetched
	NoPermission,
}

/// Per-row confirmation required before a delete is dispatched
///
/// Only [`ListView::ask_delete`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
	id: RecordId,
	title: String,
	message: String,
}

impl DeleteConfirmation {
	/// Primary key of the row to delete
	pub fn id(&self) -> &RecordId {
		&self.id
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Query inputs of a view at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
	pub model_name: String,
	pub search: Option<String>,
	pub sort: Option<SortSpec>,
	pub pagination: Pagination,
	pub filters: FilterState,
}

#[derive(Debug, Default)]
struct ViewState {
	search: Option<String>,
	sort: Option<SortSpec>,
	pagination: Pagination,
	filters: FilterState,
	cache: ListCache,
	// Fetches not yet settled, by cache key
	pending: HashMap<String, PendingFetch>,
}

impl ViewState {
	fn apply(&mut self, coordinator: &PaginationCoordinator, event: ListEvent) {
		let transition = coordinator.transition(self.pagination, &event);
		self.pagination = transition.pagination;
		if transition.clear_filters {
			self.filters = FilterState::cleared();
		}
	}
}

/// Controller of one model listing
pub struct ListView {
	model_name: String,
	schema: Option<ModelSchema>,
	settings: ListViewSettings,
	coordinator: PaginationCoordinator,
	transform: WidgetFilterTransform,
	dispatcher: Option<ActionDispatcher>,
	lists: Arc<dyn ListFetcher>,
	notifier: Arc<dyn Notifier>,
	state: Mutex<ViewState>,
}

impl std::fmt::Debug for ListView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ListView")
			.field("model_name", &self.model_name)
			.field("mode", &self.mode())
			.field("snapshot", &self.snapshot())
			.finish_non_exhaustive()
	}
}

impl ListView {
	/// Open the listing of `model_name`
	///
	/// A model the source does not know, or one without any permission, opens
	/// in [`ViewMode::NoPermission`]. That is a display state, not an error.
	pub fn open(
		model_name: impl Into<String>,
		source: &dyn SchemaSource,
		settings: ListViewSettings,
		collaborators: Collaborators,
	) -> Self {
		let model_name = model_name.into();
		let schema = source
			.schema(&model_name)
			.filter(|schema| !schema.permissions.is_empty());

		let (coordinator, transform, dispatcher) = match &schema {
			Some(schema) => {
				filter_key_collisions(schema);
				(
					PaginationCoordinator::for_schema(schema, &settings),
					WidgetFilterTransform::for_schema(schema),
					Some(ActionDispatcher::new(
						schema,
						settings.export_extension.clone(),
						&collaborators,
					)),
				)
			}
			None => {
				tracing::debug!("No listable schema for model '{}'", model_name);
				(
					PaginationCoordinator::new(settings.default_page_size),
					WidgetFilterTransform::default(),
					None,
				)
			}
		};

		let state = ViewState {
			pagination: coordinator.initial(),
			..ViewState::default()
		};

		Self {
			model_name,
			schema,
			settings,
			coordinator,
			transform,
			dispatcher,
			lists: collaborators.lists,
			notifier: collaborators.notifier,
			state: Mutex::new(state),
		}
	}

	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	pub fn mode(&self) -> ViewMode {
		if self.schema.is_some() {
			ViewMode::Listing
		} else {
			ViewMode::NoPermission
		}
	}

	pub fn schema(&self) -> Option<&ModelSchema> {
		self.schema.as_ref()
	}

	pub fn settings(&self) -> &ListViewSettings {
		&self.settings
	}

	/// Enabled actions; empty in the no-access state
	pub fn actions(&self) -> Vec<Permission> {
		self.dispatcher
			.as_ref()
			.map(ActionDispatcher::actions)
			.unwrap_or_default()
	}

	pub fn is_exporting(&self) -> bool {
		self.dispatcher
			.as_ref()
			.is_some_and(ActionDispatcher::is_exporting)
	}

	/// Columns for the current filter state
	pub fn columns(&self) -> Vec<ColumnDescriptor> {
		let Some(schema) = &self.schema else {
			return Vec::new();
		};
		let filters = self.state.lock().filters.clone();
		project_columns(schema, &filters, &self.settings)
	}

	/// Placeholder of the search box
	pub fn search_placeholder(&self) -> String {
		self.schema
			.as_ref()
			.and_then(|schema| schema.search_help_text.clone())
			.unwrap_or_else(|| format!("Search {}", field_title(&self.model_name)))
	}

	/// Page sizes the pager offers
	pub fn page_size_options(&self) -> Vec<u64> {
		self.settings
			.page_size_options_for(self.coordinator.default_page_size())
	}

	pub fn search(&self) -> Option<String> {
		self.state.lock().search.clone()
	}

	pub fn sort(&self) -> Option<SortSpec> {
		self.state.lock().sort.clone()
	}

	pub fn pagination(&self) -> Pagination {
		self.state.lock().pagination
	}

	pub fn filters(&self) -> FilterState {
		self.state.lock().filters.clone()
	}

	/// Listing query of the current state
	pub fn list_query(&self) -> ListQuery {
		let state = self.state.lock();
		self.compile_list(&state)
	}

	/// Export query of the current state
	pub fn export_query(&self) -> ExportQuery {
		let state = self.state.lock();
		compile_export_query(
			state.search.as_deref(),
			state.sort.as_ref(),
			&state.filters,
			&self.transform,
		)
	}

	fn compile_list(&self, state: &ViewState) -> ListQuery {
		compile_list_query(
			state.search.as_deref(),
			state.sort.as_ref(),
			state.pagination,
			&state.filters,
			&self.transform,
		)
	}

	/// Cached page of the current query, if it has been fetched
	pub fn current_page(&self) -> Option<ListPage> {
		let state = self.state.lock();
		let key = cache_key(&self.model_name, &self.compile_list(&state));
		state.cache.get(&key).cloned()
	}

	/// Number of pages of the current listing, once fetched
	pub fn total_pages(&self) -> Option<u64> {
		let page_size = self.pagination().page_size();
		self.current_page().map(|page| page.total_pages(page_size))
	}

	/// Fetch the listing of the current query
	///
	/// Returns `Ok(None)` in the no-access state, where nothing is fetched. A
	/// page already cached for the query is returned without a request, and a
	/// refresh of a query that is already being fetched joins that fetch.
	///
	/// The fetched page is stored under the query it was requested with, so a
	/// response arriving after the inputs changed never becomes the current
	/// page. A response to a fetch that started before the cache was
	/// invalidated is returned to its caller but not stored.
	pub async fn refresh(&self) -> ListViewResult<Option<ListPage>> {
		if self.schema.is_none() {
			return Ok(None);
		}

		let (key, generation, fetch) = {
			let mut state = self.state.lock();
			let query = self.compile_list(&state);
			let key = cache_key(&self.model_name, &query);
			if let Some(page) = state.cache.get(&key) {
				return Ok(Some(page.clone()));
			}
			let generation = state.cache.generation();
			let fetch = match state.pending.get(&key).cloned() {
				Some(fetch) => {
					tracing::debug!("Joining in-flight fetch of {}", key);
					fetch
				}
				None => {
					let fetch = self.start_fetch(&key, query);
					state.pending.insert(key.clone(), fetch.clone());
					fetch
				}
			};
			(key, generation, fetch)
		};

		// Poll a clone; a terminated `Shared` never compares equal
		let result = fetch.clone().await;

		let mut state = self.state.lock();
		if state
			.pending
			.get(&key)
			.is_some_and(|pending| pending.ptr_eq(&fetch))
		{
			state.pending.remove(&key);
		}
		let page = result?;
		state.cache.insert_if_current(generation, key, page.clone());
		Ok(Some(page))
	}

	fn start_fetch(&self, key: &str, query: ListQuery) -> PendingFetch {
		tracing::debug!("Fetching {}", key);
		let lists = Arc::clone(&self.lists);
		let notifier = Arc::clone(&self.notifier);
		let model_name = self.model_name.clone();
		async move {
			let result = lists.fetch_list(&model_name, &query).await;
			if let Err(err) = &result {
				tracing::warn!("Listing of '{}' failed: {}", model_name, err);
				notifier.error(&format!("Failed to load {}", field_title(&model_name)));
			}
			result
		}
		.boxed()
		.shared()
	}

	/// Set the search text; an empty text clears the search
	pub async fn on_search(&self, text: &str) -> ListViewResult<Option<ListPage>> {
		{
			let mut state = self.state.lock();
			state.search = (!text.is_empty()).then(|| text.to_string());
			state.apply(&self.coordinator, ListEvent::SearchChanged);
		}
		self.refresh().await
	}

	/// Set the filter under `key` to `value`
	pub async fn on_filter(
		&self,
		key: FilterKey,
		value: FilterValue,
	) -> ListViewResult<Option<ListPage>> {
		{
			let mut state = self.state.lock();
			state.filters = state.filters.with_value(key, value);
			state.apply(&self.coordinator, ListEvent::FilterApplied);
		}
		self.refresh().await
	}

	/// Remove the filter under `key`
	pub async fn on_reset(&self, key: &FilterKey) -> ListViewResult<Option<ListPage>> {
		{
			let mut state = self.state.lock();
			state.filters = state.filters.without(key);
			state.apply(&self.coordinator, ListEvent::FilterReset);
		}
		self.refresh().await
	}

	/// Pager reported `page` and `page_size`
	pub async fn on_table_change(
		&self,
		page: u64,
		page_size: u64,
	) -> ListViewResult<Option<ListPage>> {
		self.state
			.lock()
			.apply(&self.coordinator, ListEvent::TableChanged { page, page_size });
		self.refresh().await
	}

	/// Header click on `field`: ascending first, then toggling direction
	pub async fn on_sort(&self, field: &str) -> ListViewResult<Option<ListPage>> {
		{
			let mut state = self.state.lock();
			state.sort = Some(SortSpec::toggled(state.sort.as_ref(), field));
			state.apply(&self.coordinator, ListEvent::SortChanged);
		}
		self.refresh().await
	}

	/// Sort reported by the table widget
	pub async fn on_sort_change(&self, sort: SortSpec) -> ListViewResult<Option<ListPage>> {
		{
			let mut state = self.state.lock();
			state.sort = Some(sort);
			state.apply(&self.coordinator, ListEvent::SortChanged);
		}
		self.refresh().await
	}

	fn dispatcher(&self) -> ListViewResult<&ActionDispatcher> {
		self.dispatcher
			.as_ref()
			.ok_or_else(|| ListViewError::NoPermission(self.model_name.clone()))
	}

	fn record_id(&self, record: &Record) -> ListViewResult<RecordId> {
		let pk_field = self
			.schema
			.as_ref()
			.map(|schema| schema.pk_field.as_str())
			.ok_or_else(|| ListViewError::NoPermission(self.model_name.clone()))?;
		RecordId::from_record(record, pk_field)
			.ok_or_else(|| ListViewError::MissingPrimaryKey(pk_field.to_string()))
	}

	/// Navigate to the create form
	pub fn add(&self) -> ListViewResult<Route> {
		self.dispatcher()?.add()
	}

	/// Navigate to the edit form of `record`
	pub fn edit(&self, record: &Record) -> ListViewResult<Route> {
		let id = self.record_id(record)?;
		self.dispatcher()?.change(id)
	}

	/// Export the full filtered and sorted listing
	pub async fn export(&self) -> ListViewResult<ExportStatus> {
		let dispatcher = self.dispatcher()?;
		let query = self.export_query();
		dispatcher.export(&query).await
	}

	/// Confirmation to show before deleting `record`
	pub fn ask_delete(&self, record: &Record) -> ListViewResult<DeleteConfirmation> {
		let dispatcher = self.dispatcher()?;
		if !dispatcher.can(Permission::Delete) {
			return Err(ListViewError::PermissionDenied {
				model: self.model_name.clone(),
				permission: Permission::Delete,
			});
		}
		let id = self.record_id(record)?;
		Ok(DeleteConfirmation {
			title: format!("Delete {}?", field_title(&self.model_name)),
			message: format!(
				"Are you sure you want to delete \"{}\"? This action cannot be undone.",
				id
			),
			id,
		})
	}

	/// Dispatch a confirmed delete
	///
	/// On success the cached listing of the model is dropped, pagination goes
	/// back to the defaults, filters are cleared and the listing is fetched
	/// again. Fetches still in flight from before the delete are detached and
	/// their pages are not stored. On failure nothing changes, so the row
	/// stays visible.
	pub async fn confirm_delete(
		&self,
		confirmation: DeleteConfirmation,
	) -> ListViewResult<Option<ListPage>> {
		self.dispatcher()?.delete(&confirmation.id).await?;
		{
			let mut state = self.state.lock();
			state.cache.invalidate_model(&self.model_name);
			state.pending.clear();
			state.apply(&self.coordinator, ListEvent::RecordDeleted);
		}
		self.refresh().await
	}

	/// Current query inputs
	pub fn snapshot(&self) -> ListSnapshot {
		let state = self.state.lock();
		ListSnapshot {
			model_name: self.model_name.clone(),
			search: state.search.clone(),
			sort: state.sort.clone(),
			pagination: state.pagination,
			filters: state.filters.clone(),
		}
	}
}
