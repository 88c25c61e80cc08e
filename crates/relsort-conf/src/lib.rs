//! # relsort-conf
//!
//! Settings shared by the sorting core and the request layer.
//!
//! Settings are resolved from three sources, in increasing priority:
//!
//! 1. [`SortSettings::default`]
//! 2. A TOML document ([`SortSettings::from_toml_str`], [`SortSettings::from_toml_file`])
//! 3. Environment variables ([`SortSettings::with_env_overrides`])
//!
//! ## Example
//!
//! ```rust
//! use relsort_conf::SortSettings;
//!
//! let settings = SortSettings::from_toml_str(
//!     r#"
//!     sort_param = "order"
//!     max_relation_depth = 2
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.sort_param, "order");
//! assert_eq!(settings.direction_param, "direction");
//! assert_eq!(settings.max_relation_depth, 2);
//! ```

mod error;
mod settings;

pub use error::{SettingsError, SettingsResult};
pub use settings::{DEFAULT_ENV_PREFIX, DEFAULT_MAX_RELATION_DEPTH, SortLabels, SortSettings};
