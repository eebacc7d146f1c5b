//! Database settings loaded via OrthoConfig.

use std::ffi::OsString;
use std::fmt;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading [`DatabaseSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// CLI, environment, or file sources could not be merged.
    #[error("failed to load database settings: {message}")]
    Load {
        /// Description of the loader failure.
        message: String,
    },
}

impl SettingsError {
    /// Create a load error with the given message.
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }
}

/// Session settings gathered from CLI flags, `DATABASE_*` environment
/// variables, and configuration files.
///
/// Text fields are optional; gaps are filled with the session defaults when
/// resolved into [`SessionFactoryParams`](super::SessionFactoryParams). The
/// command timeout carries a loader default so an environment that supplies
/// nothing still yields a settings value.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    /// Provider connection string.
    pub connection_string: Option<String>,
    /// Connection password.
    pub password: Option<String>,
    /// SQL dialect identifier.
    pub dialect: Option<String>,
    /// Schema applied to unqualified names.
    pub default_schema: Option<String>,
    /// Command timeout in seconds; `0` keeps the provider default.
    #[ortho_config(default = 0)]
    pub command_timeout: u32,
    /// Application role activated after connecting.
    pub app_role_name: Option<String>,
    /// Password for the application role.
    pub app_role_password: Option<String>,
}

impl DatabaseSettings {
    /// Load settings from `args` layered over environment and file sources.
    ///
    /// The first item is treated as the program name.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source cannot be parsed.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::load(err.to_string()))
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("DatabaseSettings")
            .field(
                "connection_string",
                &self
                    .connection_string
                    .as_deref()
                    .map(super::redact_connection_string),
            )
            .field("password", &masked(&self.password))
            .field("dialect", &self.dialect)
            .field("default_schema", &self.default_schema)
            .field("command_timeout", &self.command_timeout)
            .field("app_role_name", &self.app_role_name)
            .field("app_role_password", &masked(&self.app_role_password))
            .finish()
    }
}
