//! Filter widget table
//!
//! Maps every [`FilterWidgetType`] to a [`WidgetBinding`]: a render function
//! describing the control a host draws, and an encode function turning a
//! filter value into server query pairs.
//!
//! Encoding rules:
//!
//! - Scalar widgets send `key=value`
//! - Multiple choices are sent as one comma-delimited `key=a,b`
//! - Ranges are sent as `key__gte=start` and `key__lte=end`; an open bound is omitted

use crate::filters::FilterKey;
use listview_types::{FilterValue, FilterWidgetType, RangeValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lookup suffix for the lower bound of a range
pub const RANGE_START_LOOKUP: &str = "gte";
/// Lookup suffix for the upper bound of a range
pub const RANGE_END_LOOKUP: &str = "lte";

/// Delimiter joining multiple selected values
pub const MULTIPLE_DELIMITER: &str = ",";

/// Choice offered by a select-like control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
	pub label: String,
	pub value: String,
}

impl FilterOption {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// Description of the filter control a host should draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControl {
	pub widget: FilterWidgetType,
	/// One placeholder, or two for range widgets
	pub placeholder: Vec<String>,
	pub options: Vec<FilterOption>,
	pub multiple: bool,
}

pub type RenderFn = fn(&str, &Map<String, Value>) -> FilterControl;
pub type EncodeFn = fn(&FilterKey, &FilterValue, &mut Vec<(String, String)>);

/// Render and encode functions for one widget
#[derive(Debug, Clone, Copy)]
pub struct WidgetBinding {
	pub widget: FilterWidgetType,
	pub render: RenderFn,
	pub encode: EncodeFn,
}

static INPUT: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::Input,
	render: render_input,
	encode: encode_scalar,
};

static INPUT_NUMBER: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::InputNumber,
	render: render_input_number,
	encode: encode_scalar,
};

static SELECT: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::Select,
	render: render_select,
	encode: encode_scalar,
};

static SWITCH: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::Switch,
	render: render_switch,
	encode: encode_scalar,
};

static DATE_PICKER: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::DatePicker,
	render: render_date_picker,
	encode: encode_scalar,
};

static RANGE_PICKER: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::RangePicker,
	render: render_range_picker,
	encode: encode_range,
};

static DATE_TIME_RANGE_PICKER: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::DateTimeRangePicker,
	render: render_date_time_range_picker,
	encode: encode_range,
};

static NUMBER_RANGE: WidgetBinding = WidgetBinding {
	widget: FilterWidgetType::NumberRange,
	render: render_number_range,
	encode: encode_range,
};

/// Binding for `widget`
pub fn widget_binding(widget: FilterWidgetType) -> &'static WidgetBinding {
	match widget {
		FilterWidgetType::Input => &INPUT,
		FilterWidgetType::InputNumber => &INPUT_NUMBER,
		FilterWidgetType::Select => &SELECT,
		FilterWidgetType::Switch => &SWITCH,
		FilterWidgetType::DatePicker => &DATE_PICKER,
		FilterWidgetType::RangePicker => &RANGE_PICKER,
		FilterWidgetType::DateTimeRangePicker => &DATE_TIME_RANGE_PICKER,
		FilterWidgetType::NumberRange => &NUMBER_RANGE,
	}
}

/// Encode a value whose widget is unknown, based on its shape alone
pub fn encode_by_shape(key: &FilterKey, value: &FilterValue, out: &mut Vec<(String, String)>) {
	encode_scalar(key, value, out);
}

fn encode_scalar(key: &FilterKey, value: &FilterValue, out: &mut Vec<(String, String)>) {
	match value {
		FilterValue::Scalar(value) => out.push((key.to_string(), value.clone())),
		FilterValue::Multiple(values) => {
			out.push((key.to_string(), values.join(MULTIPLE_DELIMITER)))
		}
		FilterValue::Range(range) => push_bounds(key, range, out),
	}
}

fn encode_range(key: &FilterKey, value: &FilterValue, out: &mut Vec<(String, String)>) {
	match value {
		// Range pickers report `[start, end]`; empty strings are open bounds
		FilterValue::Multiple(values) if values.len() == 2 => {
			let bound = |value: &String| (!value.is_empty()).then(|| value.clone());
			let range = RangeValue {
				start: bound(&values[0]),
				end: bound(&values[1]),
			};
			push_bounds(key, &range, out);
		}
		other => encode_scalar(key, other, out),
	}
}

fn push_bounds(key: &FilterKey, range: &RangeValue, out: &mut Vec<(String, String)>) {
	if let Some(start) = &range.start {
		out.push((format!("{}__{}", key, RANGE_START_LOOKUP), start.clone()));
	}
	if let Some(end) = &range.end {
		out.push((format!("{}__{}", key, RANGE_END_LOOKUP), end.clone()));
	}
}

fn prop_str<'a>(props: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
	props.get(name).and_then(Value::as_str)
}

fn placeholder_or(props: &Map<String, Value>, default: String) -> Vec<String> {
	match prop_str(props, "placeholder") {
		Some(placeholder) => vec![placeholder.to_string()],
		None => vec![default],
	}
}

fn range_placeholder(props: &Map<String, Value>) -> Vec<String> {
	match props.get("placeholder") {
		Some(Value::Array(items)) if items.len() == 2 => items
			.iter()
			.map(|item| item.as_str().unwrap_or_default().to_string())
			.collect(),
		_ => vec!["Start".to_string(), "End".to_string()],
	}
}

fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn parse_options(props: &Map<String, Value>) -> Vec<FilterOption> {
	let Some(Value::Array(items)) = props.get("options") else {
		return Vec::new();
	};
	items
		.iter()
		.filter_map(|item| match item {
			Value::Object(option) => {
				let value = option.get("value").map(scalar_text)?;
				let label = option
					.get("label")
					.map(scalar_text)
					.unwrap_or_else(|| value.clone());
				Some(FilterOption { label, value })
			}
			Value::Null => None,
			scalar => {
				let value = scalar_text(scalar);
				Some(FilterOption::new(value.clone(), value))
			}
		})
		.collect()
}

fn single(widget: FilterWidgetType, placeholder: Vec<String>) -> FilterControl {
	FilterControl {
		widget,
		placeholder,
		options: Vec::new(),
		multiple: false,
	}
}

fn render_input(title: &str, props: &Map<String, Value>) -> FilterControl {
	single(
		FilterWidgetType::Input,
		placeholder_or(props, format!("Search {}", title)),
	)
}

fn render_input_number(title: &str, props: &Map<String, Value>) -> FilterControl {
	single(
		FilterWidgetType::InputNumber,
		placeholder_or(props, title.to_string()),
	)
}

fn render_select(title: &str, props: &Map<String, Value>) -> FilterControl {
	FilterControl {
		widget: FilterWidgetType::Select,
		placeholder: placeholder_or(props, format!("Select {}", title)),
		options: parse_options(props),
		multiple: prop_str(props, "mode") == Some("multiple"),
	}
}

fn render_switch(title: &str, props: &Map<String, Value>) -> FilterControl {
	FilterControl {
		widget: FilterWidgetType::Switch,
		placeholder: placeholder_or(props, title.to_string()),
		options: vec![
			FilterOption::new("Yes", "true"),
			FilterOption::new("No", "false"),
		],
		multiple: false,
	}
}

fn render_date_picker(title: &str, props: &Map<String, Value>) -> FilterControl {
	single(
		FilterWidgetType::DatePicker,
		placeholder_or(props, title.to_string()),
	)
}

fn render_range_picker(_title: &str, props: &Map<String, Value>) -> FilterControl {
	single(FilterWidgetType::RangePicker, range_placeholder(props))
}

fn render_date_time_range_picker(_title: &str, props: &Map<String, Value>) -> FilterControl {
	single(FilterWidgetType::DateTimeRangePicker, range_placeholder(props))
}

fn render_number_range(_title: &str, props: &Map<String, Value>) -> FilterControl {
	single(FilterWidgetType::NumberRange, range_placeholder(props))
}
