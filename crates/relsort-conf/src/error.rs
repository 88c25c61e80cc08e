//! Settings errors.

/// Error raised while loading or validating [`SortSettings`](crate::SortSettings).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting `{key}`: {message}")]
	Invalid { key: String, message: String },
}

impl SettingsError {
	pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Invalid {
			key: key.into(),
			message: message.into(),
		}
	}
}

/// Result alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
