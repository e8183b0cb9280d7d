//! Filter state store
//!
//! Active column filters are kept in a [`FilterState`]: an insertion-ordered
//! map from [`FilterKey`] to [`FilterValue`]. Every update returns a new state,
//! so a view can compare, snapshot or discard states freely.

use indexmap::IndexMap;
use listview_types::{Field, FilterValue, ModelSchema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookup appended to a field name when no filter condition is configured
pub const DEFAULT_LOOKUP: &str = "icontains";

/// Server query key a column filter is sent under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterKey(String);

impl FilterKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Derive the filter key of `field`
	///
	/// Uses the configured `filter_condition` when present, otherwise
	/// `<field name>__icontains`.
	///
	/// # Examples
	///
	/// ```
	/// use listview_core::filters::FilterKey;
	/// use listview_types::{Field, ListConfiguration};
	///
	/// let email = Field::listed("email");
	/// assert_eq!(FilterKey::for_field(&email).as_str(), "email__icontains");
	///
	/// let status = Field::new("status")
	///     .with_list_configuration(ListConfiguration::default().with_filter_condition("status"));
	/// assert_eq!(FilterKey::for_field(&status).as_str(), "status");
	/// ```
	pub fn for_field(field: &Field) -> Self {
		match field
			.list_configuration
			.as_ref()
			.and_then(|configuration| configuration.filter_condition.as_deref())
		{
			Some(condition) => Self::new(condition),
			None => Self(format!("{}__{}", field.name, DEFAULT_LOOKUP)),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FilterKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for FilterKey {
	fn from(key: &str) -> Self {
		Self::new(key)
	}
}

/// Currently applied column filters
///
/// Absence of a key means "no filter". An empty string value is an active
/// filter and is sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
	entries: IndexMap<FilterKey, FilterValue>,
}

impl FilterState {
	pub fn new() -> Self {
		Self::default()
	}

	/// State with no filters applied
	pub fn cleared() -> Self {
		Self::default()
	}

	/// New state with `key` set to `value`
	///
	/// A key that is already present keeps its position, so the serialized
	/// query stays stable while a filter is edited.
	#[must_use]
	pub fn with_value(&self, key: FilterKey, value: FilterValue) -> Self {
		let mut entries = self.entries.clone();
		entries.insert(key, value);
		Self { entries }
	}

	/// New state with `key` removed entirely
	#[must_use]
	pub fn without(&self, key: &FilterKey) -> Self {
		let mut entries = self.entries.clone();
		entries.shift_remove(key);
		Self { entries }
	}

	pub fn get(&self, key: &FilterKey) -> Option<&FilterValue> {
		self.entries.get(key)
	}

	pub fn is_active(&self, key: &FilterKey) -> bool {
		self.entries.contains_key(key)
	}

	/// Filters in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, &FilterValue)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(FilterKey, FilterValue)> for FilterState {
	fn from_iter<I: IntoIterator<Item = (FilterKey, FilterValue)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

/// A filter key claimed by more than one listed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKeyCollision {
	pub key: FilterKey,
	/// Field names in declaration order; the last one wins
	pub fields: Vec<String>,
}

/// Find filter keys shared by several filterable fields of `schema`
///
/// Shared keys are kept as configured: the fields write to the same filter
/// state entry and the last applied value wins. Each collision is logged so
/// the configuration can be reviewed.
pub fn filter_key_collisions(schema: &ModelSchema) -> Vec<FilterKeyCollision> {
	let mut owners: IndexMap<FilterKey, Vec<String>> = IndexMap::new();
	for field in schema.list_fields() {
		let filterable = field
			.list_configuration
			.as_ref()
			.is_some_and(|configuration| configuration.filter_widget_type.is_some());
		if filterable {
			owners
				.entry(FilterKey::for_field(field))
				.or_default()
				.push(field.name.clone());
		}
	}

	owners
		.into_iter()
		.filter(|(_, fields)| fields.len() > 1)
		.map(|(key, fields)| {
			tracing::warn!(
				model = %schema.name,
				key = %key,
				"Filter key shared by fields {:?}; the last applied value wins",
				fields
			);
			FilterKeyCollision { key, fields }
		})
		.collect()
}
