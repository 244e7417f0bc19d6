//! # Commuta Prelude
//!
//! Re-exports the most common types and functions so one `use` statement
//! covers the full pricing workflow.
//!
//! ## Example
//!
//! ```rust
//! # use commuta::prelude::*;
//! let series = MortalitySeries::from_lx("DEMO", Gender::Male,
//!     (0..=60).map(|age| 1_000.0 * (1.0 - age as f64 / 60.0)).collect())?;
//! let comms = CommutationSet::derive(&series, 0.05)?;
//! let spec = CoverageSpec::builder()
//!     .product(Product::LifeInsurance)
//!     .benefit_term(Term::Finite(10))
//!     .payment_term(Term::Finite(10))
//!     .build();
//! let state = net_level_premium().comms(&comms).x(30).spec(spec).call()?;
//! println!("net level premium: {:.6}", state.pna);
//! # CommutaResult::Ok(())
//! ```

// Package result and error types
pub use crate::CommutaResult;
pub use crate::error::CommutaError;

// Commutation functions
pub use crate::commutation::CommutationSet;

// Premiums, reserves and non-forfeiture values
pub use crate::pricing::nonforfeit::{Extended, Nonforfeiture, nonforfeiture};
pub use crate::pricing::premium::{PremiumState, net_level_premium, net_single_premium};
pub use crate::pricing::reserve::{ReserveMethod, ReserveResult, reserve};

// Product variants and schedules
pub use crate::product::{CoverageSpec, Product, Term};

// Grid sweeps
pub use crate::sweep::{
    RATE_GRID, SurfacePoint, TableQuote, TrajectoryPoint, premium_surface, reserve_trajectory,
    table_comparison,
};

// Mortality data and market inputs
pub use crate::market::RiskFreeSeries;
pub use crate::table::{Gender, MortTableSet, MortalitySeries};

// Most commonly used Polars types for working with the table datasets
pub use polars::prelude::{DataFrame, LazyFrame, PolarsError, PolarsResult, Series};
