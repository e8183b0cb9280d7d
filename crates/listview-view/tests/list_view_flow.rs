//! List view controller integration tests
//!
//! Drives [`ListView`] through user events against recording collaborators and
//! checks the query that reaches the list fetcher, the state reset protocol and
//! the no-access state.

mod support;

use listview_core::{FilterKey, FilterState, ListViewSettings, Pagination};
use listview_types::{FilterValue, Permission, SortSpec};
use listview_view::{ListView, ListViewError, ViewMode};
use rstest::*;
use support::{Harness, echoed_query, registry, user_schema};

#[fixture]
fn harness() -> Harness {
	Harness::default()
}

fn open(harness: &Harness, model_name: &str) -> ListView {
	ListView::open(
		model_name,
		&registry(),
		ListViewSettings::default(),
		harness.collaborators(),
	)
}

// ============================================================================
// No-access state
// ============================================================================

/// Test: unknown model shows the no-permission state and fetches nothing
///
/// **Test Category**: Use case
#[rstest]
#[tokio::test]
async fn test_unknown_model_issues_no_fetch(harness: Harness) {
	let view = open(&harness, "invoice");

	assert_eq!(view.mode(), ViewMode::NoPermission);
	assert!(view.columns().is_empty());
	assert!(view.actions().is_empty());
	assert_eq!(view.refresh().await.unwrap(), None);
	assert_eq!(view.on_search("acme").await.unwrap(), None);
	assert!(harness.lists.requests().is_empty());
	assert!(harness.notifier.errors.lock().is_empty());
}

/// Test: a schema with an empty permission set is the same no-access state
///
/// **Test Category**: Edge case
#[rstest]
#[tokio::test]
async fn test_model_without_permissions_is_no_access(harness: Harness) {
	let view = open(&harness, "audit_log");

	assert_eq!(view.mode(), ViewMode::NoPermission);
	assert_eq!(view.refresh().await.unwrap(), None);
	assert!(matches!(view.add(), Err(ListViewError::NoPermission(model)) if model == "audit_log"));
	assert!(harness.lists.requests().is_empty());
}

// ============================================================================
// Query state
// ============================================================================

/// Test: initial fetch uses the schema page size
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_initial_refresh(harness: Harness) {
	let view = open(&harness, "user");

	let page = view.refresh().await.unwrap().unwrap();

	assert_eq!(view.mode(), ViewMode::Listing);
	assert_eq!(echoed_query(&page), "offset=0&limit=20");
	assert_eq!(view.current_page(), Some(page));
	assert_eq!(view.search_placeholder(), "Search by email or name");
	assert_eq!(view.page_size_options(), vec![10, 20, 50, 100]);
}

/// Test: a cached query is not fetched twice
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_refresh_reuses_cached_page(harness: Harness) {
	let view = open(&harness, "user");

	view.refresh().await.unwrap();
	view.refresh().await.unwrap();

	assert_eq!(harness.lists.requests().len(), 1);
}

/// Test: applying a filter resets the page and lands in the query
///
/// **Test Category**: State transition
#[rstest]
#[tokio::test]
async fn test_filter_applied_resets_page(harness: Harness) {
	let view = open(&harness, "user");
	view.on_table_change(3, 20).await.unwrap();

	let page = view
		.on_filter(FilterKey::new("email__icontains"), FilterValue::from("acme"))
		.await
		.unwrap()
		.unwrap();

	assert_eq!(view.pagination(), Pagination::new(1, 20));
	assert_eq!(echoed_query(&page), "offset=0&limit=20&email__icontains=acme");
}

/// Test: resetting a filter removes its key from the query
///
/// **Test Category**: State transition
#[rstest]
#[tokio::test]
async fn test_filter_reset_removes_key(harness: Harness) {
	let view = open(&harness, "user");
	let key = FilterKey::new("email__icontains");
	view.on_filter(key.clone(), FilterValue::from("acme")).await.unwrap();

	view.on_reset(&key).await.unwrap();

	assert!(view.filters().is_empty());
	assert!(!view.list_query().contains_key("email__icontains"));
	assert_eq!(
		harness.lists.requests().last().map(String::as_str),
		Some("offset=0&limit=20")
	);
}

/// Test: an empty string is an active filter, unlike an absent key
///
/// **Test Category**: Edge case
#[rstest]
#[tokio::test]
async fn test_empty_string_filter_is_active(harness: Harness) {
	let view = open(&harness, "user");

	view.on_filter(FilterKey::new("email__icontains"), FilterValue::from(""))
		.await
		.unwrap();

	assert_eq!(view.list_query().get("email__icontains"), Some(""));
}

/// Test: range filters expand to lower and upper bound keys
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_range_filter_expands_to_bounds(harness: Harness) {
	let view = open(&harness, "user");

	view.on_filter(
		FilterKey::new("created_at"),
		FilterValue::range(Some("2024-01-01"), Some("2024-12-31")),
	)
	.await
	.unwrap();

	let query = view.list_query();
	assert_eq!(query.get("created_at__gte"), Some("2024-01-01"));
	assert_eq!(query.get("created_at__lte"), Some("2024-12-31"));
}

/// Test: page size change resets the page, plain page change keeps the size
///
/// **Test Category**: State transition
#[rstest]
#[tokio::test]
async fn test_table_change_transitions(harness: Harness) {
	let view = open(&harness, "user");

	view.on_table_change(4, 20).await.unwrap();
	assert_eq!(view.pagination(), Pagination::new(4, 20));
	assert_eq!(view.list_query().get("offset"), Some("60"));

	view.on_table_change(4, 50).await.unwrap();
	assert_eq!(view.pagination(), Pagination::new(1, 50));
}

/// Test: clicking a column twice sorts descending
///
/// **Test Category**: Use case
#[rstest]
#[tokio::test]
async fn test_sort_toggles_direction(harness: Harness) {
	let view = open(&harness, "user");
	view.on_table_change(2, 20).await.unwrap();

	view.on_sort("created_at").await.unwrap();
	assert_eq!(view.list_query().get("sort_by"), Some("created_at"));

	view.on_sort("created_at").await.unwrap();
	assert_eq!(view.list_query().get("sort_by"), Some("-created_at"));
	assert_eq!(view.pagination(), Pagination::new(2, 20));

	view.on_sort_change(SortSpec::ascending("email")).await.unwrap();
	assert_eq!(view.sort(), Some(SortSpec::ascending("email")));
}

/// Test: search goes first in the query and resets only the page
///
/// **Test Category**: State transition
#[rstest]
#[tokio::test]
async fn test_search_changes(harness: Harness) {
	let view = open(&harness, "user");
	view.on_table_change(3, 50).await.unwrap();

	view.on_search("alice smith").await.unwrap();
	assert_eq!(view.pagination(), Pagination::new(1, 50));
	assert_eq!(
		view.list_query().to_query_string(),
		"search=alice%20smith&offset=0&limit=50"
	);

	view.on_search("").await.unwrap();
	assert_eq!(view.search(), None);
	assert!(!view.list_query().contains_key("search"));
}

/// Test: export query never carries pagination keys
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_export_query_has_no_pagination(harness: Harness) {
	let view = open(&harness, "user");
	view.on_table_change(5, 20).await.unwrap();
	view.on_sort("email").await.unwrap();

	assert_eq!(view.export_query().to_query_string(), "sort_by=email");
}

/// Test: column filter icons follow the filter state
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_columns_track_active_filters(harness: Harness) {
	let view = open(&harness, "user");
	let key = FilterKey::new("email__icontains");

	let inactive = view.columns();
	view.on_filter(key.clone(), FilterValue::from("acme")).await.unwrap();
	let active = view.columns();

	let fields: Vec<_> = active.iter().map(|column| column.field.as_str()).collect();
	assert_eq!(fields, vec!["id", "email", "created_at"]);
	assert_eq!(
		inactive[1].filter.as_ref().map(|filter| filter.icon),
		Some(listview_core::FilterIcon::Filterable)
	);
	assert_eq!(
		active[1].filter.as_ref().map(|filter| filter.icon),
		Some(listview_core::FilterIcon::Active)
	);
}

// ============================================================================
// Ordering and failures
// ============================================================================

/// Test: a response for a superseded query never becomes the current page
///
/// **Test Category**: Concurrency
#[rstest]
#[tokio::test]
async fn test_superseded_response_does_not_overwrite(harness: Harness) {
	let view = open(&harness, "user");
	let release_old = harness.lists.hold("offset=20&limit=20");
	let release_new = harness.lists.hold("offset=0&limit=20&email__icontains=acme");

	let (old, new, ()) = tokio::join!(
		view.on_table_change(2, 20),
		view.on_filter(FilterKey::new("email__icontains"), FilterValue::from("acme")),
		async {
			release_new.send(()).unwrap();
			tokio::task::yield_now().await;
			release_old.send(()).unwrap();
		},
	);

	assert_eq!(echoed_query(&old.unwrap().unwrap()), "offset=20&limit=20");
	assert_eq!(
		echoed_query(&new.unwrap().unwrap()),
		"offset=0&limit=20&email__icontains=acme"
	);
	let current = view.current_page().unwrap();
	assert_eq!(echoed_query(&current), "offset=0&limit=20&email__icontains=acme");
}

/// Test: concurrent refreshes of one query share a single fetch
///
/// **Test Category**: Concurrency
#[rstest]
#[tokio::test]
async fn test_concurrent_refreshes_share_fetch(harness: Harness) {
	let view = open(&harness, "user");
	let release = harness.lists.hold("offset=0&limit=20");

	let (first, second, ()) = tokio::join!(view.refresh(), view.refresh(), async {
		tokio::task::yield_now().await;
		release.send(()).unwrap();
	});

	assert_eq!(first.unwrap(), second.unwrap());
	assert_eq!(harness.lists.requests(), vec!["offset=0&limit=20"]);
	assert!(view.current_page().is_some());
}

/// Test: a shared failing fetch notifies once
///
/// **Test Category**: Error path
#[rstest]
#[tokio::test]
async fn test_shared_failure_notifies_once(harness: Harness) {
	let view = open(&harness, "user");
	*harness.lists.failing.lock() = true;
	let release = harness.lists.hold("offset=0&limit=20");

	let (first, second, ()) = tokio::join!(view.refresh(), view.refresh(), async {
		release.send(()).unwrap();
	});

	assert!(matches!(first, Err(ListViewError::Fetch(_))));
	assert!(matches!(second, Err(ListViewError::Fetch(_))));
	assert_eq!(harness.notifier.errors.lock().clone(), vec!["Failed to load User"]);
	assert_eq!(harness.lists.requests().len(), 1);
}

/// Test: failed listing notifies and leaves the query inputs untouched
///
/// **Test Category**: Error path
#[rstest]
#[tokio::test]
async fn test_fetch_failure_keeps_state(harness: Harness) {
	let view = open(&harness, "user");
	*harness.lists.failing.lock() = true;

	let result = view
		.on_filter(FilterKey::new("email__icontains"), FilterValue::from("acme"))
		.await;

	assert!(matches!(result, Err(ListViewError::Fetch(_))));
	assert_eq!(harness.notifier.errors.lock().clone(), vec!["Failed to load User"]);
	assert_eq!(view.filters().len(), 1);
	assert_eq!(view.current_page(), None);

	*harness.lists.failing.lock() = false;
	assert!(view.refresh().await.unwrap().is_some());
}

/// Test: snapshot reflects the current inputs and serializes
///
/// **Test Category**: Happy path
#[rstest]
#[tokio::test]
async fn test_snapshot(harness: Harness) {
	let view = open(&harness, "user");
	view.on_search("bob").await.unwrap();
	view.on_sort("email").await.unwrap();
	view.on_filter(FilterKey::new("email__icontains"), FilterValue::from("acme"))
		.await
		.unwrap();

	let snapshot = view.snapshot();

	assert_eq!(snapshot.model_name, "user");
	assert_eq!(snapshot.search.as_deref(), Some("bob"));
	assert_eq!(snapshot.sort, Some(SortSpec::ascending("email")));
	assert_eq!(snapshot.pagination, Pagination::new(1, 20));
	assert_eq!(
		snapshot.filters,
		FilterState::new().with_value(FilterKey::new("email__icontains"), "acme".into())
	);
	let json = serde_json::to_value(&snapshot).unwrap();
	assert_eq!(json["sort"], "email");
	assert_eq!(json["filters"]["email__icontains"], "acme");
}

/// Test: opening a schema with colliding filter keys still lists it
///
/// **Test Category**: Edge case
#[rstest]
#[tokio::test]
async fn test_colliding_filter_keys_open_normally(harness: Harness) {
	use listview_core::SchemaRegistry;
	use listview_types::{Field, FilterWidgetType, ListConfiguration};

	let filtered = || ListConfiguration::default().with_filter(FilterWidgetType::Input);
	let schema = user_schema()
		.with_field(Field::new("name").with_list_configuration(filtered()))
		.with_field(Field::new("full_name").with_list_configuration(
			filtered().with_filter_condition("name__icontains"),
		));
	let registry = SchemaRegistry::new().with_schema(schema);

	let view = ListView::open(
		"user",
		&registry,
		ListViewSettings::default(),
		harness.collaborators(),
	);

	assert_eq!(view.mode(), ViewMode::Listing);
	assert!(view.actions().contains(&Permission::Export));
	let key = FilterKey::new("name__icontains");
	view.on_filter(key.clone(), FilterValue::from("alice")).await.unwrap();
	view.on_filter(key.clone(), FilterValue::from("bob")).await.unwrap();
	assert_eq!(view.filters().get(&key), Some(&FilterValue::from("bob")));
}
