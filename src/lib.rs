//! # Commuta
//!
//! A Rust library for commutation-function life insurance mathematics: net
//! single and level premiums, prospective and retrospective reserves, and
//! paid-up/extended non-forfeiture values.
//!
//! ## Features
//! - **Commutation-based**: Dₓ, Cₓ, Nₓ, Mₓ derived once per (table, rate),
//!   every premium and reserve a handful of array lookups
//! - **Four products**: endowment, pure endowment, life insurance and life
//!   annuity, each deferred/temporary/whole-life, antecipated or
//!   postecipated
//! - **Explicit valuation bases**: pricing-rate and valuation-rate
//!   commutation sets are independent values, so sensitivity sweeps can
//!   never corrupt a priced premium
//! - **Sweep-friendly**: grid sweeps (premium surface, reserve trajectory,
//!   cross-table comparison) drop unevaluable points instead of aborting
//! - **Builder Pattern**: calculation functions use builders with
//!   parameter validation
//!
//! ## Quick Start
//!
//! ```rust
//! use commuta::prelude::*;
//!
//! // A demo table; production datasets arrive as polars DataFrames with
//! // (table, gender, age, lx, dx) rows.
//! let series = MortalitySeries::from_lx("DEMO", Gender::Male,
//!     (0..=60).map(|age| 1_000.0 * (1.0 - age as f64 / 60.0)).collect())?;
//! let comms = CommutationSet::derive(&series, 0.05)?;
//!
//! // 10-year endowment on a 30-year-old, premiums over the same 10 years.
//! let spec = CoverageSpec::builder()
//!     .product(Product::Endowment)
//!     .benefit_term(Term::Finite(10))
//!     .payment_term(Term::Finite(10))
//!     .build();
//! let state = net_level_premium().comms(&comms).x(30).spec(spec).call()?;
//!
//! // Reserve five years in, on the pricing basis.
//! let mid = reserve()
//!     .state(&state)
//!     .pricing(&comms)
//!     .valuation(&comms)
//!     .t(5)
//!     .call()?;
//!
//! println!("single premium: {:.6}", state.pup);
//! println!("level premium:  {:.6}", state.pna);
//! println!("reserve at 5:   {:.6}", mid.value);
//! # CommutaResult::Ok(())
//! ```
//!
//! ## Notes
//! - All functions follow standard actuarial notation; interest rates are
//!   decimals (0.05 for 5%)
//! - Whole-life cover is the tagged [`product::Term::Whole`] variant, not a
//!   floating-point infinity
//! - Single-point requests surface validation errors; sweeps skip the
//!   offending grid point and log it at debug level

pub type CommutaResult<T> = Result<T, error::CommutaError>;
pub mod commutation;
pub mod error;
mod macros;
pub mod market;
pub mod prelude;
pub mod pricing;
pub mod product;
pub mod sweep;
pub mod table;
