//! Session factory parameters and the port that consumes them.
//!
//! [`SessionFactoryParams`] is owned by this module: its fields are private
//! and it can only be produced from defaults or from [`DatabaseSettings`].
//! Adapters implementing [`SessionFactory`] read it through accessors; the
//! record itself performs no validation, so bad connection strings surface
//! as [`DatabaseError`]s from the adapter.
//!
//! [`DatabaseError`]: crate::DatabaseError

mod settings;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::DatabaseResult;

pub use settings::{DatabaseSettings, SettingsError};

/// Dialect used when none is configured.
pub const DEFAULT_DIALECT: &str = "MsSql2008";

const REDACTED: &str = "<redacted>";

/// Parameters required to open a database session.
///
/// Defaults: dialect `"MsSql2008"`, every other text field empty, command
/// timeout `0` (provider default). Passwords are zeroed on drop and redacted
/// from `Debug` output, including `Password=`/`Pwd=` segments embedded in the
/// connection string.
///
/// # Examples
/// ```
/// use persistence_contracts::session::SessionFactoryParams;
///
/// let params = SessionFactoryParams::default();
/// assert_eq!(params.dialect(), "MsSql2008");
/// assert_eq!(params.command_timeout(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionFactoryParams {
    connection_string: String,
    password: Zeroizing<String>,
    dialect: String,
    default_schema: String,
    command_timeout_secs: u32,
    app_role_name: String,
    app_role_password: Zeroizing<String>,
}

impl Default for SessionFactoryParams {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            password: Zeroizing::new(String::new()),
            dialect: DEFAULT_DIALECT.to_owned(),
            default_schema: String::new(),
            command_timeout_secs: 0,
            app_role_name: String::new(),
            app_role_password: Zeroizing::new(String::new()),
        }
    }
}

impl SessionFactoryParams {
    /// Resolve parameters from loaded settings, filling gaps with defaults.
    #[must_use]
    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        let defaults = Self::default();
        let params = Self {
            connection_string: settings
                .connection_string
                .clone()
                .unwrap_or(defaults.connection_string),
            password: settings
                .password
                .clone()
                .map_or(defaults.password, Zeroizing::new),
            dialect: settings.dialect.clone().unwrap_or(defaults.dialect),
            default_schema: settings
                .default_schema
                .clone()
                .unwrap_or(defaults.default_schema),
            command_timeout_secs: settings.command_timeout,
            app_role_name: settings
                .app_role_name
                .clone()
                .unwrap_or(defaults.app_role_name),
            app_role_password: settings
                .app_role_password
                .clone()
                .map_or(defaults.app_role_password, Zeroizing::new),
        };
        debug!(
            dialect = %params.dialect,
            default_schema = %params.default_schema,
            command_timeout_secs = params.command_timeout_secs,
            app_role = params.has_application_role(),
            "resolved session factory parameters"
        );
        params
    }

    /// Provider connection string.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        self.connection_string.as_str()
    }

    /// Connection password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// SQL dialect identifier.
    #[must_use]
    pub fn dialect(&self) -> &str {
        self.dialect.as_str()
    }

    /// Schema applied to unqualified names; empty for the provider default.
    #[must_use]
    pub fn default_schema(&self) -> &str {
        self.default_schema.as_str()
    }

    /// Raw command timeout in seconds; `0` means the provider default.
    #[must_use]
    pub const fn command_timeout_secs(&self) -> u32 {
        self.command_timeout_secs
    }

    /// Explicit command timeout, or `None` to use the provider default.
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        match self.command_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(u64::from(secs))),
        }
    }

    /// Application role activated after connecting.
    #[must_use]
    pub fn app_role_name(&self) -> &str {
        self.app_role_name.as_str()
    }

    /// Password for the application role.
    #[must_use]
    pub fn app_role_password(&self) -> &str {
        self.app_role_password.as_str()
    }

    /// Whether an application role should be activated.
    #[must_use]
    pub fn has_application_role(&self) -> bool {
        !self.app_role_name.is_empty()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { REDACTED }
}

/// Mask the value of every `Password=` or `Pwd=` segment in a
/// `key=value;` connection string, leaving other segments untouched.
pub(crate) fn redact_connection_string(connection_string: &str) -> String {
    connection_string
        .split(';')
        .map(|segment| match segment.split_once('=') {
            Some((key, value))
                if !value.is_empty()
                    && ["password", "pwd"]
                        .iter()
                        .any(|secret| key.trim().eq_ignore_ascii_case(secret)) =>
            {
                format!("{key}={REDACTED}")
            }
            _ => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Load [`DatabaseSettings`] from `args` and resolve them into parameters.
///
/// The first item is treated as the program name.
///
/// # Errors
///
/// Returns [`SettingsError::Load`] when a settings source cannot be parsed.
pub fn resolve_from_args<I, T>(args: I) -> Result<SessionFactoryParams, SettingsError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let settings = DatabaseSettings::load_from_args(args)?;
    Ok(SessionFactoryParams::from_settings(&settings))
}

impl fmt::Debug for SessionFactoryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFactoryParams")
            .field(
                "connection_string",
                &redact_connection_string(&self.connection_string),
            )
            .field("password", &redact(&self.password))
            .field("dialect", &self.dialect)
            .field("default_schema", &self.default_schema)
            .field("command_timeout_secs", &self.command_timeout_secs)
            .field("app_role_name", &self.app_role_name)
            .field("app_role_password", &redact(&self.app_role_password))
            .finish()
    }
}

impl From<&DatabaseSettings> for SessionFactoryParams {
    fn from(settings: &DatabaseSettings) -> Self {
        Self::from_settings(settings)
    }
}

/// Port implemented by adapters that open database sessions.
///
/// Implementations report every failure as a [`DatabaseError`], keeping the
/// provider error as its cause.
///
/// [`DatabaseError`]: crate::DatabaseError
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Session handle produced by the adapter.
    type Session: Send;

    /// Open a session using `params`.
    async fn open_session(&self, params: &SessionFactoryParams) -> DatabaseResult<Self::Session>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::io;

    use super::*;
    use crate::error::{DatabaseError, DatabaseResultExt};
    use rstest::{fixture, rstest};

    #[fixture]
    fn empty_settings() -> DatabaseSettings {
        DatabaseSettings {
            connection_string: None,
            password: None,
            dialect: None,
            default_schema: None,
            command_timeout: 0,
            app_role_name: None,
            app_role_password: None,
        }
    }

    #[fixture]
    fn full_settings() -> DatabaseSettings {
        DatabaseSettings {
            connection_string: Some("Server=db01;Database=pricing".to_owned()),
            password: Some("hunter2".to_owned()),
            dialect: Some("MsSql2012".to_owned()),
            default_schema: Some("dbo".to_owned()),
            command_timeout: 90,
            app_role_name: Some("pricing_app".to_owned()),
            app_role_password: Some("s3cret".to_owned()),
        }
    }

    #[rstest]
    fn defaults_match_documented_values() {
        let params = SessionFactoryParams::default();

        assert_eq!(params.dialect(), "MsSql2008");
        assert_eq!(params.connection_string(), "");
        assert_eq!(params.password(), "");
        assert_eq!(params.default_schema(), "");
        assert_eq!(params.app_role_name(), "");
        assert_eq!(params.app_role_password(), "");
        assert_eq!(params.command_timeout_secs(), 0);
        assert_eq!(params.command_timeout(), None);
        assert!(!params.has_application_role());
    }

    #[rstest]
    fn empty_settings_resolve_to_defaults(empty_settings: DatabaseSettings) {
        let params = SessionFactoryParams::from_settings(&empty_settings);

        assert_eq!(params, SessionFactoryParams::default());
    }

    #[rstest]
    fn settings_override_every_field(full_settings: DatabaseSettings) {
        let params = SessionFactoryParams::from(&full_settings);

        assert_eq!(params.connection_string(), "Server=db01;Database=pricing");
        assert_eq!(params.password(), "hunter2");
        assert_eq!(params.dialect(), "MsSql2012");
        assert_eq!(params.default_schema(), "dbo");
        assert_eq!(params.command_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(params.app_role_name(), "pricing_app");
        assert_eq!(params.app_role_password(), "s3cret");
        assert!(params.has_application_role());
    }

    #[rstest]
    fn debug_output_redacts_passwords(full_settings: DatabaseSettings) {
        let rendered = format!("{:?}", SessionFactoryParams::from_settings(&full_settings));

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains(REDACTED));
        assert!(rendered.contains("pricing_app"));
    }

    #[rstest]
    #[case("Server=db01;Password=topsecret", "Server=db01;Password=<redacted>")]
    #[case("Server=db01; pwd =topsecret;Database=x", "Server=db01; pwd =<redacted>;Database=x")]
    #[case("PASSWORD=topsecret", "PASSWORD=<redacted>")]
    #[case("Server=db01;Password=", "Server=db01;Password=")]
    #[case("Server=db01;Database=pricing", "Server=db01;Database=pricing")]
    fn connection_string_passwords_are_masked(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(redact_connection_string(raw), expected);
    }

    #[rstest]
    fn debug_output_masks_connection_string_passwords(mut full_settings: DatabaseSettings) {
        full_settings.connection_string = Some("Server=a;Password=topsecret".to_owned());

        let rendered = format!("{:?}", SessionFactoryParams::from_settings(&full_settings));
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("Server=a;Password=<redacted>"));
    }

    struct RecordingFactory;

    #[async_trait]
    impl SessionFactory for RecordingFactory {
        type Session = String;

        async fn open_session(&self, params: &SessionFactoryParams) -> DatabaseResult<String> {
            if params.connection_string().is_empty() {
                return Err::<String, _>(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "connection string is empty",
                ))
                .database_context("could not open session");
            }
            Ok(format!("{}@{}", params.dialect(), params.connection_string()))
        }
    }

    #[rstest]
    #[tokio::test]
    async fn factory_reads_params_through_accessors(full_settings: DatabaseSettings) {
        let params = SessionFactoryParams::from_settings(&full_settings);

        let session = RecordingFactory
            .open_session(&params)
            .await
            .expect("session should open");
        assert_eq!(session, "MsSql2012@Server=db01;Database=pricing");
    }

    #[rstest]
    #[tokio::test]
    async fn factory_failures_surface_as_database_errors() {
        let err: DatabaseError = RecordingFactory
            .open_session(&SessionFactoryParams::default())
            .await
            .expect_err("empty connection string must fail");

        assert_eq!(
            err.report(),
            "could not open session: connection string is empty"
        );
    }
}
