//! Error type shared across the crate.
//!
//! Validation failures raised by the premium calculator are typed so that
//! callers can decide whether to surface them (single-point requests) or
//! drop the offending grid point (sweeps and trajectories).

use crate::table::Gender;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommutaError {
    /// Pure endowments pay on survival only; a deferral window has no meaning.
    #[error("pure endowment cannot be deferred (deferral {deferral} > 0)")]
    DeferredPureEndowment { deferral: u32 },

    #[error("endowment products cannot be written as whole-life")]
    WholeLifeEndowment,

    /// The requested horizon runs past the end of the mortality table.
    #[error("age + deferral + term = {combined} exceeds table maximum age {max_age}")]
    HorizonExceeded { combined: i64, max_age: u32 },

    #[error("{what} is zero, result undefined")]
    ZeroDivisor { what: &'static str },

    #[error("no mortality rows for table {table:?}, gender {gender}")]
    TableNotFound { table: String, gender: Gender },

    #[error("interest rate must be greater than -1, got {0}")]
    InvalidRate(f64),

    #[error("unknown product code {0:?}")]
    UnknownProduct(char),

    #[error("unknown gender code {0:?}")]
    UnknownGender(String),

    #[error("mortality data schema: {0}")]
    Schema(String),

    #[error(transparent)]
    Params(#[from] garde::Report),

    #[error(transparent)]
    Frame(#[from] PolarsError),
}
