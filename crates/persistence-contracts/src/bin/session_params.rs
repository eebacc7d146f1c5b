//! Resolve and print the session factory parameters for this environment.
//!
//! Settings come from CLI flags, `DATABASE_*` environment variables, and
//! configuration files. Passwords, including `Password=`/`Pwd=` segments of
//! the connection string, are redacted from every output.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use persistence_contracts::session::{SettingsError, resolve_from_args};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SettingsError> {
    let params = resolve_from_args(env::args_os())?;
    info!(
        dialect = params.dialect(),
        timeout = ?params.command_timeout(),
        app_role = params.has_application_role(),
        "session factory parameters resolved"
    );
    if let Err(err) = writeln!(io::stdout().lock(), "{params:#?}") {
        drop(err);
    }
    Ok(())
}
