//! Pricing-environment capability.
//!
//! Components that price "as of a date, under an environment" advertise that
//! context through [`HasPricingEnvironment`]. Consumers depend on the trait,
//! never on a concrete context type.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read-only access to the pricing date and calculation environment.
///
/// Implementors must return defined values for as long as the context they
/// represent is alive.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use persistence_contracts::HasPricingEnvironment;
///
/// struct EndOfDayRun {
///     date: NaiveDate,
/// }
///
/// impl HasPricingEnvironment for EndOfDayRun {
///     fn pricing_date(&self) -> NaiveDate {
///         self.date
///     }
///
///     fn calculation_environment(&self) -> &str {
///         "EOD"
///     }
/// }
///
/// fn label(ctx: &impl HasPricingEnvironment) -> String {
///     format!("{} {}", ctx.calculation_environment(), ctx.pricing_date())
/// }
///
/// let run = EndOfDayRun { date: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap() };
/// assert_eq!(label(&run), "EOD 2024-03-28");
/// ```
pub trait HasPricingEnvironment {
    /// Date the component prices as of.
    fn pricing_date(&self) -> NaiveDate;

    /// Name of the calculation environment in use.
    fn calculation_environment(&self) -> &str;
}

impl<T: HasPricingEnvironment + ?Sized> HasPricingEnvironment for &T {
    fn pricing_date(&self) -> NaiveDate {
        (**self).pricing_date()
    }

    fn calculation_environment(&self) -> &str {
        (**self).calculation_environment()
    }
}

macro_rules! forward_pricing_environment {
    ($($pointer:ident),* $(,)?) => {
        $(
            impl<T: HasPricingEnvironment + ?Sized> HasPricingEnvironment for $pointer<T> {
                fn pricing_date(&self) -> NaiveDate {
                    (**self).pricing_date()
                }

                fn calculation_environment(&self) -> &str {
                    (**self).calculation_environment()
                }
            }
        )*
    };
}

forward_pricing_environment!(Box, Rc, Arc);

/// Validation errors raised when building a [`PricingEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingEnvironmentError {
    /// Environment name was empty once trimmed.
    #[error("calculation environment must not be empty")]
    EmptyEnvironment,
}

/// Owned pricing context value.
///
/// ## Invariants
/// - `calculation_environment` is trimmed and non-empty.
///
/// Serialises as `{"pricingDate": "YYYY-MM-DD", "calculationEnvironment":
/// "..."}`; deserialisation re-applies the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PricingEnvironmentDto", into = "PricingEnvironmentDto")]
pub struct PricingEnvironment {
    pricing_date: NaiveDate,
    calculation_environment: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PricingEnvironmentDto {
    pricing_date: NaiveDate,
    calculation_environment: String,
}

impl PricingEnvironment {
    /// Build a context for `calculation_environment` on `pricing_date`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingEnvironmentError::EmptyEnvironment`] when the
    /// environment name is blank.
    pub fn new(
        pricing_date: NaiveDate,
        calculation_environment: impl Into<String>,
    ) -> Result<Self, PricingEnvironmentError> {
        let raw = calculation_environment.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PricingEnvironmentError::EmptyEnvironment);
        }
        Ok(Self {
            pricing_date,
            calculation_environment: trimmed.to_owned(),
        })
    }

    /// Snapshot the context advertised by any implementor.
    ///
    /// # Errors
    ///
    /// Returns [`PricingEnvironmentError::EmptyEnvironment`] when the source
    /// reports a blank environment name.
    pub fn capture<S>(source: &S) -> Result<Self, PricingEnvironmentError>
    where
        S: HasPricingEnvironment + ?Sized,
    {
        Self::new(source.pricing_date(), source.calculation_environment())
    }
}

impl HasPricingEnvironment for PricingEnvironment {
    fn pricing_date(&self) -> NaiveDate {
        self.pricing_date
    }

    fn calculation_environment(&self) -> &str {
        self.calculation_environment.as_str()
    }
}

impl fmt::Display for PricingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            self.calculation_environment,
            self.pricing_date.format("%Y-%m-%d")
        )
    }
}

impl TryFrom<PricingEnvironmentDto> for PricingEnvironment {
    type Error = PricingEnvironmentError;

    fn try_from(dto: PricingEnvironmentDto) -> Result<Self, Self::Error> {
        Self::new(dto.pricing_date, dto.calculation_environment)
    }
}

impl From<PricingEnvironment> for PricingEnvironmentDto {
    fn from(value: PricingEnvironment) -> Self {
        Self {
            pricing_date: value.pricing_date,
            calculation_environment: value.calculation_environment,
        }
    }
}
