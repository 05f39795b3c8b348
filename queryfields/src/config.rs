//! Sieve configuration: parameter names and delimiter.
//!
//! The defaults match the public query-string contract (`fields`, `fields!`,
//! `,`). Overrides can come from code, from environment pairs, or from a TOML
//! document.
//!
//! # Example
//!
//! ```
//! use queryfields::SieveConfig;
//!
//! let config = SieveConfig::builder()
//!     .include_arg("only")
//!     .exclude_arg("omit")
//!     .delimiter(";")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.include_arg_name(), "only");
//! assert_eq!(config.delimiter(), ";");
//! ```

use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_EXCLUDE_ARG, DEFAULT_INCLUDE_ARG, ENV_DELIMITER, ENV_EXCLUDE_ARG,
    ENV_INCLUDE_ARG,
};
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;

/// Which query parameter a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgKind {
    /// The inclusion parameter (`fields` by default).
    Include,
    /// The exclusion parameter (`fields!` by default).
    Exclude,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// Invalid sieve configuration.
///
/// This is a programmer or deployment error and is reported when the
/// configuration is built, never while a request is being served.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The delimiter is the empty string.
    EmptyDelimiter,
    /// A parameter name is the empty string.
    EmptyArgName { param: ArgKind },
    /// Include and exclude parameters share the same name.
    ConflictingArgNames { name: String },
    /// The configuration document could not be read.
    InvalidDocument { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDelimiter => f.write_str("Field delimiter must not be empty"),
            Self::EmptyArgName { param } => {
                write!(f, "The {param} parameter name must not be empty")
            },
            Self::ConflictingArgNames { name } => {
                write!(
                    f,
                    "Include and exclude parameters must differ, both are '{name}'"
                )
            },
            Self::InvalidDocument { message } => {
                write!(f, "Invalid queryfields configuration: {message}")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameter names and delimiter used to read a fieldset from a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieveConfig {
    include_arg_name: Cow<'static, str>,
    exclude_arg_name: Cow<'static, str>,
    delimiter: Cow<'static, str>,
}

/// Shared default configuration.
pub(crate) static DEFAULT_CONFIG: SieveConfig = SieveConfig::new();

impl SieveConfig {
    /// The default configuration: `fields`, `fields!` and `,`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_arg_name: Cow::Borrowed(DEFAULT_INCLUDE_ARG),
            exclude_arg_name: Cow::Borrowed(DEFAULT_EXCLUDE_ARG),
            delimiter: Cow::Borrowed(DEFAULT_DELIMITER),
        }
    }

    /// Start from the defaults and override individual settings.
    #[must_use]
    pub const fn builder() -> SieveConfigBuilder {
        SieveConfigBuilder {
            config: Self::new(),
        }
    }

    /// Build a configuration from environment pairs.
    ///
    /// Reads `QUERYFIELDS_INCLUDE_ARG`, `QUERYFIELDS_EXCLUDE_ARG` and
    /// `QUERYFIELDS_DELIMITER`; unset variables keep their defaults.
    ///
    /// ```
    /// use queryfields::SieveConfig;
    ///
    /// let env = vec![("QUERYFIELDS_DELIMITER".to_string(), "|".to_string())];
    /// let config = SieveConfig::from_env(&env).unwrap();
    /// assert_eq!(config.delimiter(), "|");
    /// assert_eq!(config.include_arg_name(), "fields");
    /// ```
    pub fn from_env(env: &[(String, String)]) -> Result<Self, ConfigError> {
        let lookup = |name: &str| {
            env.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        let mut builder = Self::builder();
        if let Some(name) = lookup(ENV_INCLUDE_ARG) {
            builder = builder.include_arg(name);
        }
        if let Some(name) = lookup(ENV_EXCLUDE_ARG) {
            builder = builder.exclude_arg(name);
        }
        if let Some(delimiter) = lookup(ENV_DELIMITER) {
            builder = builder.delimiter(delimiter);
        }
        builder.build()
    }

    /// Build a configuration from the `[queryfields]` table of a TOML document.
    ///
    /// A document without the table yields the defaults. Unknown keys inside
    /// the table are rejected.
    ///
    /// ```
    /// use queryfields::SieveConfig;
    ///
    /// let config = SieveConfig::from_toml(
    ///     r#"
    ///     [queryfields]
    ///     include_arg_name = "only"
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.include_arg_name(), "only");
    /// assert_eq!(config.exclude_arg_name(), "fields!");
    /// ```
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let document: TomlDocument =
            toml::from_str(document).map_err(|e| ConfigError::InvalidDocument {
                message: e.message().to_string(),
            })?;

        let table = document.queryfields.unwrap_or_default();
        let mut builder = Self::builder();
        if let Some(name) = table.include_arg_name {
            builder = builder.include_arg(name);
        }
        if let Some(name) = table.exclude_arg_name {
            builder = builder.exclude_arg(name);
        }
        if let Some(delimiter) = table.delimiter {
            builder = builder.delimiter(delimiter);
        }
        builder.build()
    }

    /// Name of the parameter listing fields to keep.
    #[must_use]
    pub fn include_arg_name(&self) -> &str {
        &self.include_arg_name
    }

    /// Name of the parameter listing fields to drop.
    #[must_use]
    pub fn exclude_arg_name(&self) -> &str {
        &self.exclude_arg_name
    }

    /// Separator between field names inside one parameter value.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by [`SieveConfig::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct SieveConfigBuilder {
    config: SieveConfig,
}

impl SieveConfigBuilder {
    /// Set the inclusion parameter name.
    pub fn include_arg(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.include_arg_name = name.into();
        self
    }

    /// Set the exclusion parameter name.
    pub fn exclude_arg(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.exclude_arg_name = name.into();
        self
    }

    /// Set the delimiter. May be longer than one character.
    pub fn delimiter(mut self, delimiter: impl Into<Cow<'static, str>>) -> Self {
        self.config.delimiter = delimiter.into();
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<SieveConfig, ConfigError> {
        let config = self.config;
        if config.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if config.include_arg_name.is_empty() {
            return Err(ConfigError::EmptyArgName {
                param: ArgKind::Include,
            });
        }
        if config.exclude_arg_name.is_empty() {
            return Err(ConfigError::EmptyArgName {
                param: ArgKind::Exclude,
            });
        }
        if config.include_arg_name == config.exclude_arg_name {
            return Err(ConfigError::ConflictingArgNames {
                name: config.include_arg_name.into_owned(),
            });
        }
        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
struct TomlDocument {
    queryfields: Option<TomlTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTable {
    include_arg_name: Option<String>,
    exclude_arg_name: Option<String>,
    delimiter: Option<String>,
}

#[cfg(test)]
mod tests;
