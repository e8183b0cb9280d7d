//! Pagination/reset coordinator
//!
//! Every state-changing list event goes through [`PaginationCoordinator::transition`],
//! which decides the next `(page, page_size)` pair and whether the filter state
//! must be cleared.
//!
//! | Event | Page | Page size | Filters |
//! |---|---|---|---|
//! | Filter applied / reset | 1 | default | kept |
//! | Search changed | 1 | unchanged | kept |
//! | Page size changed | 1 | new size | kept |
//! | Page changed | new page | unchanged | kept |
//! | Sort changed | unchanged | unchanged | kept |
//! | Record deleted | 1 | default | cleared |

use crate::config::ListViewSettings;
use listview_types::ModelSchema;
use serde::{Deserialize, Serialize};

/// Page size used when neither the schema nor the settings provide one
pub const FALLBACK_PAGE_SIZE: u64 = 10;

/// Current page (1-indexed) and page size; both are always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
	page: u64,
	page_size: u64,
}

impl Pagination {
	/// Create a pagination, raising zero values to 1
	pub fn new(page: u64, page_size: u64) -> Self {
		Self {
			page: page.max(1),
			page_size: page_size.max(1),
		}
	}

	pub fn page(&self) -> u64 {
		self.page
	}

	pub fn page_size(&self) -> u64 {
		self.page_size
	}

	/// Number of records before the current page
	///
	/// # Examples
	///
	/// ```
	/// use listview_core::pagination::Pagination;
	///
	/// assert_eq!(Pagination::new(1, 25).offset(), 0);
	/// assert_eq!(Pagination::new(3, 25).offset(), 50);
	/// ```
	///
	/// A page beyond what `u64` can address is clamped to the last whole
	/// page, so the offset stays a multiple of the page size.
	pub fn offset(&self) -> u64 {
		(self.page - 1)
			.checked_mul(self.page_size)
			.unwrap_or(u64::MAX / self.page_size * self.page_size)
	}
}

impl Default for Pagination {
	fn default() -> Self {
		Self::new(1, FALLBACK_PAGE_SIZE)
	}
}

/// State-changing event observed by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
	/// A column filter was set
	FilterApplied,
	/// A column filter was removed
	FilterReset,
	/// The search text changed
	SearchChanged,
	/// The table pager reported a page and page size
	TableChanged { page: u64, page_size: u64 },
	/// The table header changed the sort
	SortChanged,
	/// A record deletion succeeded
	RecordDeleted,
}

/// Result of a coordinator transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
	pub pagination: Pagination,
	/// The filter state must be emptied
	pub clear_filters: bool,
}

/// State machine over [`Pagination`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCoordinator {
	default_page_size: u64,
}

impl PaginationCoordinator {
	/// Coordinator resetting to `default_page_size` (at least 1)
	pub fn new(default_page_size: u64) -> Self {
		Self {
			default_page_size: default_page_size.max(1),
		}
	}

	/// Coordinator for `schema`: its `list_per_page`, else the settings default
	pub fn for_schema(schema: &ModelSchema, settings: &ListViewSettings) -> Self {
		Self::new(schema.list_per_page.unwrap_or(settings.default_page_size))
	}

	pub fn default_page_size(&self) -> u64 {
		self.default_page_size
	}

	/// Initial state, also reached by every reset
	pub fn initial(&self) -> Pagination {
		Pagination::new(1, self.default_page_size)
	}

	/// Next state after `event`
	pub fn transition(&self, current: Pagination, event: &ListEvent) -> Transition {
		let (pagination, clear_filters) = match *event {
			ListEvent::FilterApplied | ListEvent::FilterReset => (self.initial(), false),
			ListEvent::SearchChanged => (Pagination::new(1, current.page_size), false),
			ListEvent::TableChanged { page, page_size } => {
				if page_size != current.page_size {
					(Pagination::new(1, page_size), false)
				} else {
					(Pagination::new(page, current.page_size), false)
				}
			}
			ListEvent::SortChanged => (current, false),
			ListEvent::RecordDeleted => (self.initial(), true),
		};

		tracing::debug!(
			event = ?event,
			page = pagination.page,
			page_size = pagination.page_size,
			clear_filters,
			"Pagination transition"
		);

		Transition {
			pagination,
			clear_filters,
		}
	}
}

impl Default for PaginationCoordinator {
	fn default() -> Self {
		Self::new(FALLBACK_PAGE_SIZE)
	}
}
