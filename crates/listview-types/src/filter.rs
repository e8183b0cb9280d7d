//! Filter widget tags and filter values

use serde::{Deserialize, Serialize};

/// Widget bound to a column filter
///
/// The set is closed: every widget has a binding in the filter widget table,
/// so the filter-to-server transform is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterWidgetType {
	/// Free text input
	Input,
	/// Numeric input
	InputNumber,
	/// Choice list; multi-select when its props set `mode = "multiple"`
	Select,
	/// Boolean toggle
	Switch,
	/// Single date
	DatePicker,
	/// Date range
	RangePicker,
	/// Date and time range
	DateTimeRangePicker,
	/// Numeric range
	NumberRange,
}

impl FilterWidgetType {
	pub const ALL: [FilterWidgetType; 8] = [
		FilterWidgetType::Input,
		FilterWidgetType::InputNumber,
		FilterWidgetType::Select,
		FilterWidgetType::Switch,
		FilterWidgetType::DatePicker,
		FilterWidgetType::RangePicker,
		FilterWidgetType::DateTimeRangePicker,
		FilterWidgetType::NumberRange,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			FilterWidgetType::Input => "input",
			FilterWidgetType::InputNumber => "input_number",
			FilterWidgetType::Select => "select",
			FilterWidgetType::Switch => "switch",
			FilterWidgetType::DatePicker => "date_picker",
			FilterWidgetType::RangePicker => "range_picker",
			FilterWidgetType::DateTimeRangePicker => "date_time_range_picker",
			FilterWidgetType::NumberRange => "number_range",
		}
	}

	/// Whether the widget produces a two-bound value
	pub fn is_range(&self) -> bool {
		matches!(
			self,
			FilterWidgetType::RangePicker
				| FilterWidgetType::DateTimeRangePicker
				| FilterWidgetType::NumberRange
		)
	}
}

impl std::fmt::Display for FilterWidgetType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Bounds of a range filter; either side may be open
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeValue {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub start: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end: Option<String>,
}

/// Value produced by a filter widget
///
/// An empty [`FilterValue::Scalar`] is still an active filter. Only the absence
/// of a key in the filter state means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	/// Single value (text, number, boolean, date)
	Scalar(String),
	/// Several selected choices
	Multiple(Vec<String>),
	/// Two-bound range
	Range(RangeValue),
}

impl FilterValue {
	/// Build a range value from optional bounds
	///
	/// # Examples
	///
	/// ```
	/// use listview_types::FilterValue;
	///
	/// let value = FilterValue::range(Some("2024-01-01"), None::<&str>);
	/// assert!(matches!(value, FilterValue::Range(ref r) if r.end.is_none()));
	/// ```
	pub fn range(start: Option<impl Into<String>>, end: Option<impl Into<String>>) -> Self {
		FilterValue::Range(RangeValue {
			start: start.map(Into::into),
			end: end.map(Into::into),
		})
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		FilterValue::Scalar(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		FilterValue::Scalar(value)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		FilterValue::Scalar(value.to_string())
	}
}

impl From<Vec<String>> for FilterValue {
	fn from(values: Vec<String>) -> Self {
		FilterValue::Multiple(values)
	}
}
