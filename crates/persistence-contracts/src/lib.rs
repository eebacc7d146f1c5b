//! Shared contracts for the temporal persistence layer.
//!
//! The crate defines the vocabulary that persistence adapters, the entity
//! deletion workflow, and pricing components exchange. It deliberately holds
//! no storage engine or workflow logic: those live behind the
//! [`session::SessionFactory`] port and in the consumers of
//! [`EntityDeleteInput`].
//!
//! # Overview
//!
//! - [`DatabaseError`]: database-layer failure with an optional wrapped cause
//! - [`EntityDeleteInput`]: serialisable request to delete an entity as of a
//!   point in time
//! - [`HasPricingEnvironment`]: capability exposing a pricing date and
//!   calculation environment
//! - [`ChangeKind`]: closed classification of mutations
//! - [`session::SessionFactoryParams`]: connection parameters resolved from
//!   [`session::DatabaseSettings`]
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use persistence_contracts::{ChangeKind, EntityDeleteInput, ObjectChange};
//!
//! let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
//! let request = EntityDeleteInput::new(42, as_of, false);
//! let change = ObjectChange::deleted(request.object_id());
//!
//! assert_eq!(change.kind(), ChangeKind::Deleted);
//! ```

mod change_kind;
mod delete_input;
mod error;
mod pricing;
pub mod session;

pub use change_kind::{ChangeKind, ObjectChange, ParseChangeKindError};
pub use delete_input::EntityDeleteInput;
pub use error::{BoxedCause, DatabaseError, DatabaseResult, DatabaseResultExt};
pub use pricing::{HasPricingEnvironment, PricingEnvironment, PricingEnvironmentError};
