//! Database-layer error type.
//!
//! Adapters wrap lower-level storage and connectivity faults in
//! [`DatabaseError`] before surfacing them, keeping the original failure as
//! the cause so diagnostic tooling can walk the full chain.

use std::error::Error as StdError;

use thiserror::Error;
use tracing::debug;

/// Owned cause retained by [`DatabaseError`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Convenient result alias for database-layer operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Failure raised by a database operation.
///
/// The message is the operator-facing part. The cause, when present, is the
/// exact error value supplied by the caller and is exposed through
/// [`std::error::Error::source`].
///
/// # Examples
/// ```
/// use std::io;
///
/// use persistence_contracts::DatabaseError;
///
/// let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
/// let err = DatabaseError::with_cause("could not open session", refused);
///
/// assert_eq!(err.message(), "could not open session");
/// assert_eq!(err.report(), "could not open session: refused");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DatabaseError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl DatabaseError {
    /// Create an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error that wraps a lower-level cause.
    ///
    /// Boxed causes are stored as given, so the retained cause is the same
    /// allocation the caller passed in.
    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Borrow the wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Consume the error and return the wrapped cause, if any.
    #[must_use]
    pub fn into_cause(self) -> Option<BoxedCause> {
        self.cause
    }

    /// Iterate over this error followed by every transitive source.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(Some(self as &(dyn StdError + 'static)), |err| {
            (*err).source()
        })
    }

    /// Render the full cause chain as `outer: inner: root`.
    #[must_use]
    pub fn report(&self) -> String {
        self.chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}

/// Extension for turning arbitrary failures into [`DatabaseError`]s.
pub trait DatabaseResultExt<T> {
    /// Wrap the error variant in a [`DatabaseError`] with `message`, keeping
    /// the original error as its cause.
    ///
    /// # Errors
    ///
    /// Returns the wrapped [`DatabaseError`] when `self` is `Err`.
    fn database_context(self, message: impl Into<String>) -> DatabaseResult<T>;
}

impl<T, E> DatabaseResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn database_context(self, message: impl Into<String>) -> DatabaseResult<T> {
        self.map_err(|err| {
            let text = message.into();
            debug!(
                error_type = %std::any::type_name::<E>(),
                cause = %err,
                message = %text,
                "database operation failed"
            );
            DatabaseError::with_cause(text, err)
        })
    }
}
