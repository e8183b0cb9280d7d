//! Single-column sort specification

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Direction of the active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Ascending,
	Descending,
}

/// Active sort column
///
/// Serialized the way the server expects it: the bare field name for
/// ascending order and the field name prefixed with `-` for descending order.
///
/// # Examples
///
/// ```
/// use listview_types::SortSpec;
///
/// let sort = SortSpec::toggled(None, "created_at");
/// assert_eq!(sort.to_string(), "created_at");
///
/// let sort = SortSpec::toggled(Some(&sort), "created_at");
/// assert_eq!(sort.to_string(), "-created_at");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
	pub field: String,
	pub direction: SortDirection,
}

impl SortSpec {
	pub fn ascending(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: SortDirection::Ascending,
		}
	}

	pub fn descending(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			direction: SortDirection::Descending,
		}
	}

	/// Sort reported by a table header widget
	pub fn from_order(field: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			field: field.into(),
			direction,
		}
	}

	/// Sort produced by a header click on `field`
	///
	/// A click on the column already sorted ascending switches it to
	/// descending. Any other click sorts `field` ascending. The sort is never
	/// cleared by a click.
	pub fn toggled(current: Option<&SortSpec>, field: &str) -> Self {
		match current {
			Some(sort) if sort.field == field && sort.direction == SortDirection::Ascending => {
				Self::descending(field)
			}
			_ => Self::ascending(field),
		}
	}

	pub fn is_descending(&self) -> bool {
		self.direction == SortDirection::Descending
	}
}

impl fmt::Display for SortSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.direction {
			SortDirection::Ascending => f.write_str(&self.field),
			SortDirection::Descending => write!(f, "-{}", self.field),
		}
	}
}

/// Error returned when parsing an empty sort string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sort field must not be empty")]
pub struct EmptySortField;

impl FromStr for SortSpec {
	type Err = EmptySortField;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let (field, direction) = match value.strip_prefix('-') {
			Some(field) => (field, SortDirection::Descending),
			None => (value, SortDirection::Ascending),
		};
		if field.is_empty() {
			return Err(EmptySortField);
		}
		Ok(Self::from_order(field, direction))
	}
}

impl Serialize for SortSpec {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for SortSpec {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}
