//! Action dispatcher
//!
//! Maps schema permissions to the mutating operations a list view offers and
//! issues them through the injected collaborators.
//!
//! - `Add`: navigate to the create form
//! - `Change`: navigate to the edit form of a record
//! - `Export`: fetch the export, save `<model>.<ext>`, notify
//! - `Delete`: delete a confirmed record, notify

use crate::collaborators::{
	Collaborators, ExportFetcher, FileSaver, Navigator, Notifier, RecordDeleter,
};
use crate::errors::{ListViewError, ListViewResult};
use listview_core::ExportQuery;
use listview_types::{ModelSchema, Permission, RecordId, Route};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
	/// The file was saved under `filename`
	Saved { filename: String },
	/// Another export is still in flight; nothing was requested
	InFlight,
}

/// Clears the in-flight flag when the export finishes, however it finishes
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

pub struct ActionDispatcher {
	model_name: String,
	permissions: BTreeSet<Permission>,
	export_extension: String,
	exporting: AtomicBool,
	exports: Arc<dyn ExportFetcher>,
	deleter: Arc<dyn RecordDeleter>,
	navigator: Arc<dyn Navigator>,
	notifier: Arc<dyn Notifier>,
	files: Arc<dyn FileSaver>,
}

impl std::fmt::Debug for ActionDispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionDispatcher")
			.field("model_name", &self.model_name)
			.field("permissions", &self.permissions)
			.field("exporting", &self.is_exporting())
			.finish_non_exhaustive()
	}
}

impl ActionDispatcher {
	pub fn new(
		schema: &ModelSchema,
		export_extension: impl Into<String>,
		collaborators: &Collaborators,
	) -> Self {
		Self {
			model_name: schema.name.clone(),
			permissions: schema.permissions.clone(),
			export_extension: export_extension.into(),
			exporting: AtomicBool::new(false),
			exports: Arc::clone(&collaborators.exports),
			deleter: Arc::clone(&collaborators.deleter),
			navigator: Arc::clone(&collaborators.navigator),
			notifier: Arc::clone(&collaborators.notifier),
			files: Arc::clone(&collaborators.files),
		}
	}

	/// Enabled operations, in display order
	pub fn actions(&self) -> Vec<Permission> {
		Permission::ALL
			.into_iter()
			.filter(|permission| self.can(*permission))
			.collect()
	}

	pub fn can(&self, permission: Permission) -> bool {
		self.permissions.contains(&permission)
	}

	/// Whether the export trigger should be disabled
	pub fn is_exporting(&self) -> bool {
		self.exporting.load(Ordering::Acquire)
	}

	/// File name of an export of this model
	pub fn export_filename(&self) -> String {
		format!("{}.{}", self.model_name, self.export_extension)
	}

	fn require(&self, permission: Permission) -> ListViewResult<()> {
		if self.can(permission) {
			Ok(())
		} else {
			Err(ListViewError::PermissionDenied {
				model: self.model_name.clone(),
				permission,
			})
		}
	}

	/// Navigate to the create form
	pub fn add(&self) -> ListViewResult<Route> {
		self.require(Permission::Add)?;
		let route = Route::Add {
			model_name: self.model_name.clone(),
		};
		self.navigator.navigate(route.clone());
		Ok(route)
	}

	/// Navigate to the edit form of record `id`
	pub fn change(&self, id: RecordId) -> ListViewResult<Route> {
		self.require(Permission::Change)?;
		let route = Route::Change {
			model_name: self.model_name.clone(),
			id,
		};
		self.navigator.navigate(route.clone());
		Ok(route)
	}

	/// Export the listing described by `query`
	///
	/// Only one export runs at a time; a request made while another is in
	/// flight returns [`ExportStatus::InFlight`] without contacting the server.
	pub async fn export(&self, query: &ExportQuery) -> ListViewResult<ExportStatus> {
		self.require(Permission::Export)?;
		if self.exporting.swap(true, Ordering::AcqRel) {
			tracing::debug!("Export of '{}' already in flight", self.model_name);
			return Ok(ExportStatus::InFlight);
		}
		let _guard = InFlightGuard(&self.exporting);

		match self.exports.fetch_export(&self.model_name, query).await {
			Ok(contents) => {
				let filename = self.export_filename();
				self.files.save(&filename, &contents);
				self.notifier.success("Export succeeded");
				tracing::info!("Exported {} bytes to {}", contents.len(), filename);
				Ok(ExportStatus::Saved { filename })
			}
			Err(err) => {
				tracing::warn!("Export of '{}' failed: {}", self.model_name, err);
				self.notifier.error("Export failed");
				Err(err.into())
			}
		}
	}

	/// Delete record `id`; the caller is responsible for confirmation
	pub async fn delete(&self, id: &RecordId) -> ListViewResult<()> {
		self.require(Permission::Delete)?;
		match self.deleter.delete_record(&self.model_name, id).await {
			Ok(()) => {
				self.notifier.success("Delete succeeded");
				tracing::info!("Deleted '{}' record {}", self.model_name, id);
				Ok(())
			}
			Err(err) => {
				tracing::warn!("Delete of '{}' record {} failed: {}", self.model_name, id, err);
				self.notifier.error(&format!("Failed to delete: {}", err));
				Err(err.into())
			}
		}
	}
}
