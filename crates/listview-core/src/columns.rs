//! Column projection
//!
//! Derives renderable column descriptors from a [`ModelSchema`]. Only fields
//! with a list configuration become columns, in declaration order. The filter
//! affordance of a column depends on the current [`FilterState`], so columns
//! are projected again whenever the filter state changes.

use crate::config::ListViewSettings;
use crate::filters::{FilterKey, FilterState};
use crate::widgets::{FilterControl, widget_binding};
use convert_case::{Case, Casing};
use listview_types::{
	Field, FilterWidgetType, ModelSchema, Permission, Record, RecordId, Route,
};
use serde_json::Value;

/// Display title for a field name
///
/// # Examples
///
/// ```
/// use listview_core::columns::field_title;
///
/// assert_eq!(field_title("created_at"), "Created At");
/// assert_eq!(field_title("lastLogin"), "Last Login");
/// ```
pub fn field_title(name: &str) -> String {
	name.to_case(Case::Title)
}

/// Filter icon state of a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterIcon {
	/// The column can be filtered; no filter is applied
	Filterable,
	/// A filter is applied to this column
	Active,
}

/// Filter widget attached to a column
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBinding {
	/// Key the column's filter value is stored and sent under
	pub key: FilterKey,
	pub widget: FilterWidgetType,
	pub control: FilterControl,
	pub icon: FilterIcon,
}

/// How a column renders its cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRule {
	/// Link to the record, labelled with the value
	Link { route_prefix: String },
	/// Raw value
	Value,
}

/// Rendered cell content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
	Text(String),
	Link { text: String, route: Route },
}

impl Cell {
	pub fn text(&self) -> &str {
		match self {
			Cell::Text(text) | Cell::Link { text, .. } => text,
		}
	}
}

/// Renderable column of the listing
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
	pub field: String,
	pub title: String,
	pub sortable: bool,
	pub filter: Option<FilterBinding>,
	pub render: RenderRule,
	/// Text shown for empty values
	pub empty_value_display: String,
	model_name: String,
	pk_field: String,
	editable: bool,
}

impl ColumnDescriptor {
	/// Render this column's value of `record`
	///
	/// Absent, `null` and empty string values show the empty display. A link
	/// column points at the edit form when the model allows changes and at the
	/// detail view otherwise; a record without a usable primary key renders as
	/// plain text.
	pub fn render_cell(&self, record: &Record) -> Cell {
		let text = match record.get(&self.field) {
			None | Some(Value::Null) => self.empty_value_display.clone(),
			Some(Value::String(text)) if text.is_empty() => self.empty_value_display.clone(),
			Some(Value::String(text)) => text.clone(),
			Some(other) => other.to_string(),
		};

		match self.render {
			RenderRule::Value => Cell::Text(text),
			RenderRule::Link { .. } => match RecordId::from_record(record, &self.pk_field) {
				Some(id) => Cell::Link {
					text,
					route: self.record_route(id),
				},
				None => Cell::Text(text),
			},
		}
	}

	/// Path of a link cell, below the route prefix
	pub fn link_path(&self, cell: &Cell) -> Option<String> {
		match (&self.render, cell) {
			(RenderRule::Link { route_prefix }, Cell::Link { route, .. }) => {
				Some(route.path(route_prefix))
			}
			_ => None,
		}
	}

	fn record_route(&self, id: RecordId) -> Route {
		let model_name = self.model_name.clone();
		if self.editable {
			Route::Change { model_name, id }
		} else {
			Route::Detail { model_name, id }
		}
	}
}

fn project_field(
	schema: &ModelSchema,
	field: &Field,
	filters: &FilterState,
	settings: &ListViewSettings,
) -> Option<ColumnDescriptor> {
	let configuration = field.list_configuration.as_ref()?;
	let title = field_title(&field.name);

	let filter = configuration.filter_widget_type.map(|widget| {
		let key = FilterKey::for_field(field);
		let icon = if filters.is_active(&key) {
			FilterIcon::Active
		} else {
			FilterIcon::Filterable
		};
		FilterBinding {
			control: (widget_binding(widget).render)(&title, &configuration.filter_widget_props),
			key,
			widget,
			icon,
		}
	});

	let render = if configuration.is_link {
		RenderRule::Link {
			route_prefix: settings.url_prefix.clone(),
		}
	} else {
		RenderRule::Value
	};

	Some(ColumnDescriptor {
		field: field.name.clone(),
		title,
		sortable: configuration.sorter,
		filter,
		render,
		empty_value_display: configuration
			.empty_value_display
			.clone()
			.unwrap_or_else(|| settings.empty_value_display.clone()),
		model_name: schema.name.clone(),
		pk_field: schema.pk_field.clone(),
		editable: schema.has_permission(Permission::Change),
	})
}

/// Project the listing columns of `schema`
pub fn project_columns(
	schema: &ModelSchema,
	filters: &FilterState,
	settings: &ListViewSettings,
) -> Vec<ColumnDescriptor> {
	schema
		.fields
		.iter()
		.filter_map(|field| project_field(schema, field, filters, settings))
		.collect()
}
