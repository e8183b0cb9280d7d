//! Records returned by the listing endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single listed record (field name -> value)
pub type Record = HashMap<String, serde_json::Value>;

/// Primary key of a record, in its textual form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Read the primary key of `record` from `pk_field`
	///
	/// Strings and numbers are accepted; any other value has no usable id.
	///
	/// # Examples
	///
	/// ```
	/// use listview_types::{Record, RecordId};
	/// use serde_json::json;
	///
	/// let record: Record = [("id".to_string(), json!(42))].into_iter().collect();
	/// assert_eq!(RecordId::from_record(&record, "id"), Some(RecordId::new("42")));
	/// ```
	pub fn from_record(record: &Record, pk_field: &str) -> Option<Self> {
		match record.get(pk_field)? {
			serde_json::Value::String(id) => Some(Self(id.clone())),
			serde_json::Value::Number(id) => Some(Self(id.to_string())),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RecordId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// One page of listing results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
	/// Records on this page, in server order
	pub results: Vec<Record>,
	/// Total number of records matching the query
	pub total: u64,
}

impl ListPage {
	/// Number of pages for `page_size`, never less than one
	pub fn total_pages(&self, page_size: u64) -> u64 {
		if self.total == 0 {
			return 1;
		}
		self.total.div_ceil(page_size.max(1))
	}
}
