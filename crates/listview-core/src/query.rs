//! Query compiler
//!
//! Turns the list view inputs (search text, sort, pagination, filters) into a
//! canonical flat query. The same inputs always produce the same query string:
//!
//! 1. `search`, when set
//! 2. `sort_by`, when set
//! 3. `offset` and `limit` (listing only)
//! 4. transformed filter pairs, in filter insertion order
//!
//! Unset inputs are omitted rather than sent as empty strings. The export
//! query is compiled from the same inputs minus pagination, so an export always
//! targets the full filtered and sorted result set.

use crate::filters::{FilterKey, FilterState};
use crate::pagination::Pagination;
use crate::widgets::{encode_by_shape, widget_binding};
use listview_types::{FilterWidgetType, ModelSchema, SortSpec};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;
use std::ops::Deref;

pub const SEARCH_KEY: &str = "search";
pub const SORT_KEY: &str = "sort_by";
pub const OFFSET_KEY: &str = "offset";
pub const LIMIT_KEY: &str = "limit";

/// Keys owned by the compiler; filter pairs may not use them
pub const RESERVED_KEYS: [&str; 4] = [SEARCH_KEY, SORT_KEY, OFFSET_KEY, LIMIT_KEY];

/// Characters escaped in query keys and values (everything but RFC 3986 unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Expansion of the filter state into server query pairs
///
/// Applied identically to list and export queries.
pub trait FilterTransform {
	fn transform(&self, filters: &FilterState) -> Vec<(String, String)>;
}

impl<F> FilterTransform for F
where
	F: Fn(&FilterState) -> Vec<(String, String)>,
{
	fn transform(&self, filters: &FilterState) -> Vec<(String, String)> {
		self(filters)
	}
}

/// Transform encoding each filter with its field's widget binding
///
/// Keys that no field of the schema owns are encoded by value shape.
#[derive(Debug, Clone, Default)]
pub struct WidgetFilterTransform {
	widgets: HashMap<FilterKey, FilterWidgetType>,
}

impl WidgetFilterTransform {
	pub fn for_schema(schema: &ModelSchema) -> Self {
		let widgets = schema
			.list_fields()
			.filter_map(|field| {
				let widget = field.list_configuration.as_ref()?.filter_widget_type?;
				Some((FilterKey::for_field(field), widget))
			})
			.collect();
		Self { widgets }
	}

	pub fn widget_for(&self, key: &FilterKey) -> Option<FilterWidgetType> {
		self.widgets.get(key).copied()
	}
}

impl FilterTransform for WidgetFilterTransform {
	fn transform(&self, filters: &FilterState) -> Vec<(String, String)> {
		let mut pairs = Vec::with_capacity(filters.len());
		for (key, value) in filters.iter() {
			match self.widget_for(key) {
				Some(widget) => (widget_binding(widget).encode)(key, value, &mut pairs),
				None => encode_by_shape(key, value, &mut pairs),
			}
		}
		pairs
	}
}

/// Ordered key-value pairs of a compiled query
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompiledQuery {
	pairs: Vec<(String, String)>,
}

impl CompiledQuery {
	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}

	/// First value stored under `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.pairs.iter().any(|(name, _)| name == key)
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Percent-encoded `key=value&...` string, without a leading `?`
	pub fn to_query_string(&self) -> String {
		self.pairs
			.iter()
			.map(|(key, value)| {
				format!(
					"{}={}",
					utf8_percent_encode(key, QUERY_COMPONENT),
					utf8_percent_encode(value, QUERY_COMPONENT)
				)
			})
			.collect::<Vec<_>>()
			.join("&")
	}

	fn push(&mut self, key: &str, value: impl Into<String>) {
		self.pairs.push((key.to_string(), value.into()));
	}

	fn push_filters(&mut self, filters: &FilterState, transform: &dyn FilterTransform) {
		for (key, value) in transform.transform(filters) {
			if RESERVED_KEYS.contains(&key.as_str()) {
				tracing::warn!("Dropping filter pair '{}': the key is reserved", key);
				continue;
			}
			self.pairs.push((key, value));
		}
	}
}

/// Query for one page of the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListQuery(CompiledQuery);

impl Deref for ListQuery {
	type Target = CompiledQuery;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Query for exporting the whole filtered listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExportQuery(CompiledQuery);

impl Deref for ExportQuery {
	type Target = CompiledQuery;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

fn compile_common(search: Option<&str>, sort_by: Option<&SortSpec>) -> CompiledQuery {
	let mut query = CompiledQuery::default();
	if let Some(search) = search {
		query.push(SEARCH_KEY, search);
	}
	if let Some(sort_by) = sort_by {
		query.push(SORT_KEY, sort_by.to_string());
	}
	query
}

/// Compile the listing query
///
/// # Examples
///
/// ```
/// use listview_core::filters::{FilterKey, FilterState};
/// use listview_core::pagination::Pagination;
/// use listview_core::query::{WidgetFilterTransform, compile_list_query};
/// use listview_types::SortSpec;
///
/// let filters = FilterState::new().with_value(FilterKey::from("email__icontains"), "acme".into());
/// let query = compile_list_query(
///     None,
///     Some(&SortSpec::descending("created_at")),
///     Pagination::new(2, 10),
///     &filters,
///     &WidgetFilterTransform::default(),
/// );
///
/// assert_eq!(
///     query.to_query_string(),
///     "sort_by=-created_at&offset=10&limit=10&email__icontains=acme"
/// );
/// ```
pub fn compile_list_query(
	search: Option<&str>,
	sort_by: Option<&SortSpec>,
	pagination: Pagination,
	filters: &FilterState,
	transform: &dyn FilterTransform,
) -> ListQuery {
	let mut query = compile_common(search, sort_by);
	query.push(OFFSET_KEY, pagination.offset().to_string());
	query.push(LIMIT_KEY, pagination.page_size().to_string());
	query.push_filters(filters, transform);

	tracing::debug!(query = %query.to_query_string(), "Compiled list query");
	ListQuery(query)
}

/// Compile the export query; pagination never takes part in it
pub fn compile_export_query(
	search: Option<&str>,
	sort_by: Option<&SortSpec>,
	filters: &FilterState,
	transform: &dyn FilterTransform,
) -> ExportQuery {
	let mut query = compile_common(search, sort_by);
	query.push_filters(filters, transform);

	tracing::debug!(query = %query.to_query_string(), "Compiled export query");
	ExportQuery(query)
}
