//! List view configuration
//!
//! - [`ListViewSettings`]: site-wide defaults (page size, URL prefix, ...)
//! - [`SchemaRegistry`]: the configuration source mapping model names to
//!   [`ModelSchema`]s, built in code or loaded from TOML or JSON documents
//!
//! # Registry document
//!
//! ```toml
//! [[models]]
//! name = "user"
//! list_per_page = 20
//! permissions = ["add", "delete"]
//!
//! [[models.fields]]
//! name = "email"
//! list_configuration = { sorter = true, filter_widget_type = "input" }
//! ```

use crate::errors::{ConfigError, ConfigResult};
use crate::pagination::FALLBACK_PAGE_SIZE;
use listview_types::ModelSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Source of model schemas
///
/// An unknown model yields `None`; the list view treats it as a model the
/// user has no permissions for.
pub trait SchemaSource: Send + Sync {
	fn schema(&self, model_name: &str) -> Option<ModelSchema>;
}

/// Site-wide list view defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListViewSettings {
	/// Page size for models without `list_per_page`
	pub default_page_size: u64,
	/// Page sizes offered by the pager
	pub page_size_options: Vec<u64>,
	/// Prefix of every admin route
	pub url_prefix: String,
	/// Text shown for empty cell values
	pub empty_value_display: String,
	/// Extension of exported files
	pub export_extension: String,
}

impl Default for ListViewSettings {
	fn default() -> Self {
		Self {
			default_page_size: FALLBACK_PAGE_SIZE,
			page_size_options: vec![10, 20, 50, 100],
			url_prefix: "/admin".to_string(),
			empty_value_display: "-".to_string(),
			export_extension: "csv".to_string(),
		}
	}
}

impl ListViewSettings {
	/// Parse settings from a TOML document; missing keys keep their defaults
	///
	/// # Examples
	///
	/// ```
	/// use listview_core::config::ListViewSettings;
	///
	/// let settings = ListViewSettings::from_toml_str("default_page_size = 25").unwrap();
	/// assert_eq!(settings.default_page_size, 25);
	/// assert_eq!(settings.url_prefix, "/admin");
	/// ```
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a TOML file
	pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let source = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&source)
	}

	pub fn validate(&self) -> ConfigResult<()> {
		if self.default_page_size == 0 {
			return Err(ConfigError::Invalid(
				"default_page_size must be at least 1".to_string(),
			));
		}
		if self.page_size_options.contains(&0) {
			return Err(ConfigError::Invalid(
				"page_size_options must all be at least 1".to_string(),
			));
		}
		Ok(())
	}

	/// Page sizes for the pager of a model using `page_size` by default
	///
	/// The configured options plus `page_size`, sorted and de-duplicated.
	pub fn page_size_options_for(&self, page_size: u64) -> Vec<u64> {
		let mut options = self.page_size_options.clone();
		options.push(page_size);
		options.sort_unstable();
		options.dedup();
		options
	}
}

#[derive(Debug, Default, Deserialize)]
struct RegistryDocument {
	#[serde(default)]
	models: Vec<ModelSchema>,
}

/// In-memory configuration source
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
	models: HashMap<String, ModelSchema>,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a schema under its model name, replacing any previous one
	pub fn register(&mut self, schema: ModelSchema) {
		if self.models.contains_key(&schema.name) {
			tracing::warn!("Model '{}' registered twice; keeping the last schema", schema.name);
		}
		self.models.insert(schema.name.clone(), schema);
	}

	pub fn with_schema(mut self, schema: ModelSchema) -> Self {
		self.register(schema);
		self
	}

	/// Parse a registry from a TOML document with a `[[models]]` array
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		let document: RegistryDocument = toml::from_str(source)?;
		Self::from_document(document)
	}

	/// Parse a registry from a JSON document with a `models` array
	pub fn from_json_str(source: &str) -> ConfigResult<Self> {
		let document: RegistryDocument = serde_json::from_str(source)?;
		Self::from_document(document)
	}

	/// Load a registry from a `.toml` or `.json` file
	pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		match path.extension().and_then(|extension| extension.to_str()) {
			Some("toml") => Self::from_toml_str(&source),
			Some("json") => Self::from_json_str(&source),
			_ => Err(ConfigError::Invalid(format!(
				"Unsupported schema file '{}': expected .toml or .json",
				path.display()
			))),
		}
	}

	fn from_document(document: RegistryDocument) -> ConfigResult<Self> {
		let mut registry = Self::new();
		for schema in document.models {
			if schema.name.is_empty() {
				return Err(ConfigError::Invalid(
					"model name must not be empty".to_string(),
				));
			}
			registry.register(schema);
		}
		tracing::debug!("Loaded {} model schemas", registry.len());
		Ok(registry)
	}

	pub fn len(&self) -> usize {
		self.models.len()
	}

	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}

impl SchemaSource for SchemaRegistry {
	fn schema(&self, model_name: &str) -> Option<ModelSchema> {
		self.models.get(model_name).cloned()
	}
}
