//! Model schema definitions
//!
//! A [`ModelSchema`] is the declarative description of a listable entity. It is
//! supplied once per navigation to a model and never mutated by the list view.

use crate::filter::FilterWidgetType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Primary key field used when a schema does not name one
pub const DEFAULT_PK_FIELD: &str = "id";

fn default_pk_field() -> String {
	DEFAULT_PK_FIELD.to_string()
}

/// Mutating operation a model exposes in the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
	/// Create new records
	Add,
	/// Edit existing records
	Change,
	/// Delete records
	Delete,
	/// Export the filtered listing
	Export,
}

impl Permission {
	/// All permissions, in display order
	pub const ALL: [Permission; 4] = [
		Permission::Add,
		Permission::Change,
		Permission::Delete,
		Permission::Export,
	];

	/// Lowercase name, as used in configuration documents
	pub fn as_str(&self) -> &'static str {
		match self {
			Permission::Add => "add",
			Permission::Change => "change",
			Permission::Delete => "delete",
			Permission::Export => "export",
		}
	}
}

impl std::fmt::Display for Permission {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declarative description of a listable model
///
/// # Examples
///
/// ```
/// use listview_types::{Field, ListConfiguration, ModelSchema, Permission};
///
/// let schema = ModelSchema::new("user")
///     .with_list_per_page(25)
///     .with_permission(Permission::Delete)
///     .with_field(Field::listed("email"))
///     .with_field(Field::new("password"));
///
/// assert_eq!(schema.list_fields().count(), 1);
/// assert!(schema.has_permission(Permission::Delete));
/// assert!(!schema.has_permission(Permission::Add));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
	/// Model name, used in routes and request paths
	pub name: String,
	/// Page size configured for this model
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_per_page: Option<u64>,
	/// Placeholder text for the search box
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_help_text: Option<String>,
	/// Record field holding the primary key
	#[serde(default = "default_pk_field")]
	pub pk_field: String,
	/// Operations enabled for this model
	#[serde(default)]
	pub permissions: BTreeSet<Permission>,
	/// Fields in declaration order
	#[serde(default)]
	pub fields: Vec<Field>,
}

impl ModelSchema {
	/// Create an empty schema with no fields and no permissions
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			list_per_page: None,
			search_help_text: None,
			pk_field: default_pk_field(),
			permissions: BTreeSet::new(),
			fields: Vec::new(),
		}
	}

	pub fn with_list_per_page(mut self, page_size: u64) -> Self {
		self.list_per_page = Some(page_size);
		self
	}

	pub fn with_search_help_text(mut self, text: impl Into<String>) -> Self {
		self.search_help_text = Some(text.into());
		self
	}

	pub fn with_pk_field(mut self, pk_field: impl Into<String>) -> Self {
		self.pk_field = pk_field.into();
		self
	}

	pub fn with_permission(mut self, permission: Permission) -> Self {
		self.permissions.insert(permission);
		self
	}

	pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
		self.permissions.extend(permissions);
		self
	}

	pub fn with_field(mut self, field: Field) -> Self {
		self.fields.push(field);
		self
	}

	/// Check whether an operation is enabled
	pub fn has_permission(&self, permission: Permission) -> bool {
		self.permissions.contains(&permission)
	}

	/// Fields that take part in the listing, in declaration order
	pub fn list_fields(&self) -> impl Iterator<Item = &Field> {
		self.fields
			.iter()
			.filter(|field| field.list_configuration.is_some())
	}

	/// Look up a field by name
	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|field| field.name == name)
	}
}

/// A single model field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
	/// Field name as it appears in records
	pub name: String,
	/// List view behavior; `None` excludes the field from the listing
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_configuration: Option<ListConfiguration>,
}

impl Field {
	/// Create a field that is not shown in the listing
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			list_configuration: None,
		}
	}

	/// Create a field shown in the listing with default list behavior
	pub fn listed(name: impl Into<String>) -> Self {
		Self::new(name).with_list_configuration(ListConfiguration::default())
	}

	pub fn with_list_configuration(mut self, configuration: ListConfiguration) -> Self {
		self.list_configuration = Some(configuration);
		self
	}
}

/// Per-field list and filter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfiguration {
	/// Whether the column header offers sorting
	#[serde(default)]
	pub sorter: bool,
	/// Filter widget bound to this column
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filter_widget_type: Option<FilterWidgetType>,
	/// Extra widget properties (placeholder, options, mode, ...)
	#[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
	pub filter_widget_props: serde_json::Map<String, serde_json::Value>,
	/// Server query key the filter value is sent under
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filter_condition: Option<String>,
	/// Render the value as a link to the record
	#[serde(default)]
	pub is_link: bool,
	/// Text shown for empty values
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub empty_value_display: Option<String>,
}

impl ListConfiguration {
	pub fn sortable(mut self) -> Self {
		self.sorter = true;
		self
	}

	pub fn with_filter(mut self, widget: FilterWidgetType) -> Self {
		self.filter_widget_type = Some(widget);
		self
	}

	pub fn with_filter_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.filter_widget_props.insert(key.into(), value);
		self
	}

	pub fn with_filter_condition(mut self, condition: impl Into<String>) -> Self {
		self.filter_condition = Some(condition.into());
		self
	}

	pub fn linked(mut self) -> Self {
		self.is_link = true;
		self
	}

	pub fn with_empty_value_display(mut self, display: impl Into<String>) -> Self {
		self.empty_value_display = Some(display.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_list_fields_preserve_declaration_order() {
		let schema = ModelSchema::new("article")
			.with_field(Field::listed("title"))
			.with_field(Field::new("body"))
			.with_field(Field::listed("author"));

		let names: Vec<_> = schema.list_fields().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["title", "author"]);
	}

	#[rstest]
	fn test_deserialize_minimal_schema() {
		let schema: ModelSchema = serde_json::from_value(json!({
			"name": "user",
			"permissions": ["add", "export"],
			"fields": [
				{ "name": "email", "list_configuration": { "sorter": true } },
				{ "name": "password" }
			]
		}))
		.unwrap();

		assert_eq!(schema.pk_field, "id");
		assert_eq!(schema.list_per_page, None);
		assert!(schema.has_permission(Permission::Export));
		assert!(!schema.has_permission(Permission::Delete));
		let email = schema.field("email").unwrap();
		assert!(email.list_configuration.as_ref().unwrap().sorter);
		assert!(schema.field("password").unwrap().list_configuration.is_none());
	}

	#[rstest]
	fn test_deserialize_filter_configuration() {
		let configuration: ListConfiguration = serde_json::from_value(json!({
			"filter_widget_type": "range_picker",
			"filter_widget_props": { "placeholder": ["From", "To"] },
			"filter_condition": "created_at",
			"is_link": true,
			"empty_value_display": "n/a"
		}))
		.unwrap();

		assert_eq!(
			configuration.filter_widget_type,
			Some(FilterWidgetType::RangePicker)
		);
		assert_eq!(configuration.filter_condition.as_deref(), Some("created_at"));
		assert!(configuration.is_link);
		assert!(!configuration.sorter);
		assert_eq!(configuration.empty_value_display.as_deref(), Some("n/a"));
	}
}
