//! Sort settings and their loaders.

use std::path::Path;

use relsort_query::Order;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Prefix used by [`SortSettings::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "RELSORT";

/// Default maximum number of relation hops in a sort column.
pub const DEFAULT_MAX_RELATION_DEPTH: usize = 4;

/// Labels shown by sort links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortLabels {
	/// Label of an inactive link
	pub sort: String,
	/// Label of an active link whose next direction is ascending
	pub sort_ascending: String,
	/// Label of an active link whose next direction is descending
	pub sort_descending: String,
}

impl Default for SortLabels {
	fn default() -> Self {
		Self {
			sort: "Sort".to_string(),
			sort_ascending: "Sort ascending".to_string(),
			sort_descending: "Sort descending".to_string(),
		}
	}
}

/// Sorting configuration
///
/// # Examples
///
/// ```rust
/// use relsort_conf::SortSettings;
/// use relsort_query::Order;
///
/// let settings = SortSettings::new()
///     .with_sort_param("o")
///     .with_default_direction(Order::Desc);
///
/// assert_eq!(settings.sort_param, "o");
/// assert_eq!(settings.default_direction, Order::Desc);
/// assert!(settings.validate().is_ok());
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
	/// Request parameter carrying the sort column
	pub sort_param: String,

	/// Request parameter carrying the direction
	pub direction_param: String,

	/// Direction used when none is given or the given one is not recognized
	pub default_direction: Order,

	/// Maximum number of relation hops in a sort column
	pub max_relation_depth: usize,

	/// Sort link labels
	pub labels: SortLabels,
}

impl Default for SortSettings {
	fn default() -> Self {
		Self {
			sort_param: "sort".to_string(),
			direction_param: "direction".to_string(),
			default_direction: Order::Asc,
			max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
			labels: SortLabels::default(),
		}
	}
}

impl SortSettings {
	/// Create settings with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the sort column parameter name
	pub fn with_sort_param(mut self, param: impl Into<String>) -> Self {
		self.sort_param = param.into();
		self
	}

	/// Set the direction parameter name
	pub fn with_direction_param(mut self, param: impl Into<String>) -> Self {
		self.direction_param = param.into();
		self
	}

	/// Set the fallback direction
	pub fn with_default_direction(mut self, direction: Order) -> Self {
		self.default_direction = direction;
		self
	}

	/// Set the maximum number of relation hops
	pub fn with_max_relation_depth(mut self, depth: usize) -> Self {
		self.max_relation_depth = depth;
		self
	}

	/// Set link labels
	pub fn with_labels(mut self, labels: SortLabels) -> Self {
		self.labels = labels;
		self
	}

	/// Parse settings from a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read settings from a TOML file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loading sort settings");
		Self::from_toml_str(&content)
	}

	/// Default settings overridden by `RELSORT_*` environment variables.
	pub fn from_env() -> SettingsResult<Self> {
		Self::default().with_env_overrides(DEFAULT_ENV_PREFIX)
	}

	/// Override fields from environment variables named `<PREFIX>_<FIELD>`.
	///
	/// Recognized suffixes: `SORT_PARAM`, `DIRECTION_PARAM`,
	/// `DEFAULT_DIRECTION`, `MAX_RELATION_DEPTH`, `LABEL_SORT`,
	/// `LABEL_SORT_ASCENDING`, `LABEL_SORT_DESCENDING`.
	pub fn with_env_overrides(self, prefix: &str) -> SettingsResult<Self> {
		self.with_overrides_from(prefix, |key| std::env::var(key).ok())
	}

	/// Same as [`with_env_overrides`](Self::with_env_overrides) with a custom lookup.
	pub fn with_overrides_from<F>(mut self, prefix: &str, lookup: F) -> SettingsResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |suffix: &str| {
			let key = format!("{prefix}_{suffix}");
			lookup(&key).map(|value| (key, value))
		};

		if let Some((key, value)) = get("SORT_PARAM") {
			tracing::debug!(%key, "sort setting overridden");
			self.sort_param = value;
		}
		if let Some((key, value)) = get("DIRECTION_PARAM") {
			tracing::debug!(%key, "sort setting overridden");
			self.direction_param = value;
		}
		if let Some((key, value)) = get("DEFAULT_DIRECTION") {
			self.default_direction = match value.trim().to_ascii_lowercase().as_str() {
				"asc" => Order::Asc,
				"desc" => Order::Desc,
				_ => return Err(SettingsError::invalid(key, "expected `asc` or `desc`")),
			};
		}
		if let Some((key, value)) = get("MAX_RELATION_DEPTH") {
			self.max_relation_depth = value
				.trim()
				.parse()
				.map_err(|e| SettingsError::invalid(key, format!("{e}")))?;
		}
		if let Some((_, value)) = get("LABEL_SORT") {
			self.labels.sort = value;
		}
		if let Some((_, value)) = get("LABEL_SORT_ASCENDING") {
			self.labels.sort_ascending = value;
		}
		if let Some((_, value)) = get("LABEL_SORT_DESCENDING") {
			self.labels.sort_descending = value;
		}

		self.validate()?;
		Ok(self)
	}

	/// Check the settings are usable.
	pub fn validate(&self) -> SettingsResult<()> {
		if self.sort_param.trim().is_empty() {
			return Err(SettingsError::invalid("sort_param", "must not be empty"));
		}
		if self.direction_param.trim().is_empty() {
			return Err(SettingsError::invalid("direction_param", "must not be empty"));
		}
		if self.sort_param == self.direction_param {
			return Err(SettingsError::invalid(
				"direction_param",
				"must differ from sort_param",
			));
		}
		if self.max_relation_depth == 0 {
			return Err(SettingsError::invalid(
				"max_relation_depth",
				"must be at least 1",
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::collections::HashMap;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = SortSettings::default();

		assert_eq!(settings.sort_param, "sort");
		assert_eq!(settings.direction_param, "direction");
		assert_eq!(settings.default_direction, Order::Asc);
		assert_eq!(settings.max_relation_depth, 4);
		assert_eq!(settings.labels.sort_descending, "Sort descending");
	}

	#[rstest]
	fn test_from_toml_str_partial() {
		let settings = SortSettings::from_toml_str(
			r#"
			default_direction = "desc"

			[labels]
			sort = "Order"
			"#,
		)
		.unwrap();

		assert_eq!(settings.default_direction, Order::Desc);
		assert_eq!(settings.labels.sort, "Order");
		assert_eq!(settings.labels.sort_ascending, "Sort ascending");
		assert_eq!(settings.sort_param, "sort");
	}

	#[rstest]
	fn test_from_toml_str_rejects_bad_direction() {
		let result = SortSettings::from_toml_str(r#"default_direction = "sideways""#);
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[rstest]
	fn test_from_toml_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "sort_param = \"order_by\"").unwrap();

		let settings = SortSettings::from_toml_file(file.path()).unwrap();
		assert_eq!(settings.sort_param, "order_by");
	}

	#[rstest]
	fn test_from_toml_file_missing() {
		let result = SortSettings::from_toml_file("/nonexistent/relsort.toml");
		assert!(matches!(result, Err(SettingsError::Io(_))));
	}

	#[rstest]
	#[case(SortSettings::default().with_sort_param(""), "sort_param")]
	#[case(SortSettings::default().with_direction_param(" "), "direction_param")]
	#[case(SortSettings::default().with_direction_param("sort"), "direction_param")]
	#[case(SortSettings::default().with_max_relation_depth(0), "max_relation_depth")]
	fn test_validate_rejects(#[case] settings: SortSettings, #[case] expected_key: &str) {
		match settings.validate() {
			Err(SettingsError::Invalid { key, .. }) => assert_eq!(key, expected_key),
			other => panic!("expected invalid setting, got {other:?}"),
		}
	}

	#[rstest]
	fn test_overrides_from_lookup() {
		let vars: HashMap<&str, &str> = [
			("APP_SORT_PARAM", "s"),
			("APP_DEFAULT_DIRECTION", "DESC"),
			("APP_MAX_RELATION_DEPTH", "2"),
			("APP_LABEL_SORT", "Trier"),
		]
		.into_iter()
		.collect();

		let settings = SortSettings::default()
			.with_overrides_from("APP", |k| vars.get(k).map(|v| v.to_string()))
			.unwrap();

		assert_eq!(settings.sort_param, "s");
		assert_eq!(settings.default_direction, Order::Desc);
		assert_eq!(settings.max_relation_depth, 2);
		assert_eq!(settings.labels.sort, "Trier");
		assert_eq!(settings.direction_param, "direction");
	}

	#[rstest]
	fn test_overrides_reject_bad_depth() {
		let result = SortSettings::default().with_overrides_from("APP", |k| {
			(k == "APP_MAX_RELATION_DEPTH").then(|| "many".to_string())
		});

		match result {
			Err(SettingsError::Invalid { key, .. }) => assert_eq!(key, "APP_MAX_RELATION_DEPTH"),
			other => panic!("expected invalid setting, got {other:?}"),
		}
	}

	#[rstest]
	#[serial(relsort_env)]
	fn test_with_env_overrides() {
		// SAFETY: This test runs serially with #[serial] attribute
		unsafe {
			std::env::set_var("RELSORT_TEST_DIRECTION_PARAM", "dir");
		}

		let settings = SortSettings::default()
			.with_env_overrides("RELSORT_TEST")
			.unwrap();
		assert_eq!(settings.direction_param, "dir");

		// SAFETY: Cleanup after test
		unsafe {
			std::env::remove_var("RELSORT_TEST_DIRECTION_PARAM");
		}
	}
}
