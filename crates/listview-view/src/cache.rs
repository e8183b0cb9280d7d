//! Listing cache keyed by model and query string
//!
//! Results are stored under the query that produced them and read back under
//! the current query. A response for a superseded query therefore never shows
//! up as the current page.
//!
//! The cache holds at most [`DEFAULT_CAPACITY`] pages and evicts the oldest
//! insert first. Every invalidation bumps a generation counter; a fetch that
//! started under an older generation must not be stored.

use indexmap::IndexMap;
use listview_core::ListQuery;
use listview_types::ListPage;

/// Pages kept per view before the oldest is evicted
pub const DEFAULT_CAPACITY: usize = 32;

/// Cache key of a listing request
pub fn cache_key(model_name: &str, query: &ListQuery) -> String {
	format!("{}?{}", model_name, query.to_query_string())
}

#[derive(Debug)]
pub struct ListCache {
	pages: IndexMap<String, ListPage>,
	capacity: usize,
	generation: u64,
}

impl Default for ListCache {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}
}

impl ListCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cache holding at most `capacity` pages (at least one)
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			pages: IndexMap::new(),
			capacity: capacity.max(1),
			generation: 0,
		}
	}

	pub fn get(&self, key: &str) -> Option<&ListPage> {
		self.pages.get(key)
	}

	/// Store `page` as the newest entry, evicting the oldest ones over capacity
	pub fn insert(&mut self, key: String, page: ListPage) {
		self.pages.shift_remove(&key);
		self.pages.insert(key, page);
		while self.pages.len() > self.capacity {
			if let Some((evicted, _)) = self.pages.shift_remove_index(0) {
				tracing::trace!("Evicted cached listing {}", evicted);
			}
		}
	}

	/// Store `page` only if no invalidation happened since `generation`
	///
	/// Returns whether the page was stored.
	pub fn insert_if_current(&mut self, generation: u64, key: String, page: ListPage) -> bool {
		if generation != self.generation {
			tracing::debug!("Discarding {} fetched before an invalidation", key);
			return false;
		}
		self.insert(key, page);
		true
	}

	/// Counter bumped by every invalidation
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Drop every cached page of `model_name`
	pub fn invalidate_model(&mut self, model_name: &str) {
		let prefix = format!("{}?", model_name);
		self.pages.retain(|key, _| !key.starts_with(&prefix));
		self.generation += 1;
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.pages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}
}
