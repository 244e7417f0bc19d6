//! # Pricing
//!
//! Net premiums, reserves and non-forfeiture values, all closed-form over
//! a [`crate::commutation::CommutationSet`].
//!
//! ## Submodules
//! - [`premium`] — product validation, net single premium, net level premium
//! - [`reserve`] — prospective and retrospective reserves over evaluation time
//! - [`nonforfeit`] — paid-up fractions and extended-cover best-fit search

// Module structure
pub mod nonforfeit;
pub mod premium;
pub mod reserve;
