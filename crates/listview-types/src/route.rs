//! Routes the list view navigates to
//!
//! - `{prefix}/{model}/` - List view
//! - `{prefix}/{model}/add/` - Create form
//! - `{prefix}/{model}/{id}/` - Detail view
//! - `{prefix}/{model}/{id}/change/` - Edit form

use crate::record::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
	List { model_name: String },
	Add { model_name: String },
	Detail { model_name: String, id: RecordId },
	Change { model_name: String, id: RecordId },
}

impl Route {
	pub fn model_name(&self) -> &str {
		match self {
			Route::List { model_name }
			| Route::Add { model_name }
			| Route::Detail { model_name, .. }
			| Route::Change { model_name, .. } => model_name,
		}
	}

	/// Render the route as a path below `prefix`
	///
	/// # Examples
	///
	/// ```
	/// use listview_types::{RecordId, Route};
	///
	/// let route = Route::Change {
	///     model_name: "user".to_string(),
	///     id: RecordId::new("7"),
	/// };
	/// assert_eq!(route.path("/admin"), "/admin/user/7/change/");
	/// assert_eq!(route.path("/admin/"), "/admin/user/7/change/");
	/// ```
	pub fn path(&self, prefix: &str) -> String {
		let prefix = prefix.trim_end_matches('/');
		match self {
			Route::List { model_name } => format!("{}/{}/", prefix, model_name),
			Route::Add { model_name } => format!("{}/{}/add/", prefix, model_name),
			Route::Detail { model_name, id } => format!("{}/{}/{}/", prefix, model_name, id),
			Route::Change { model_name, id } => {
				format!("{}/{}/{}/change/", prefix, model_name, id)
			}
		}
	}
}
