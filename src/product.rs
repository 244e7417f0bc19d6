//! Product variants and coverage schedules.
//!
//! Four products are supported, keyed by the single-letter codes used in
//! the table datasets: endowment `D`, pure endowment `d`, life insurance
//! `A` and life annuity `a`. "Whole life" is a tagged [`Term`] variant
//! rather than a floating-point infinity; it resolves to a finite bound
//! only where commutation arrays are indexed.

use crate::CommutaResult;
use crate::error::CommutaError;
use bon::Builder;
use garde::Validate;
use std::fmt;

// =======================================
// PRODUCT
// =======================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Endowment (`D`): pays on death within the term or on survival to it.
    Endowment,
    /// Pure endowment (`d`): pays on survival to the end of the term only.
    PureEndowment,
    /// Life insurance (`A`): pays at the end of the year of death.
    LifeInsurance,
    /// Life annuity (`a`): periodic payments while alive.
    Annuity,
}

impl Product {
    pub fn code(self) -> char {
        match self {
            Product::Endowment => 'D',
            Product::PureEndowment => 'd',
            Product::LifeInsurance => 'A',
            Product::Annuity => 'a',
        }
    }

    pub fn from_code(code: char) -> CommutaResult<Self> {
        match code {
            'D' => Ok(Product::Endowment),
            'd' => Ok(Product::PureEndowment),
            'A' => Ok(Product::LifeInsurance),
            'a' => Ok(Product::Annuity),
            other => Err(CommutaError::UnknownProduct(other)),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =======================================
// TERM
// =======================================

/// Length of a benefit or payment window in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Runs for the remaining lifetime.
    Whole,
    Finite(u32),
}

impl Term {
    pub fn is_whole(self) -> bool {
        matches!(self, Term::Whole)
    }

    pub fn finite(self) -> Option<u32> {
        match self {
            Term::Whole => None,
            Term::Finite(years) => Some(years),
        }
    }

    /// The smaller of the term and `bound`; a whole-life term yields `bound`.
    pub fn min_u32(self, bound: u32) -> u32 {
        match self {
            Term::Whole => bound,
            Term::Finite(years) => years.min(bound),
        }
    }

    /// Whether the term runs strictly past `years`.
    pub fn outlasts(self, years: u32) -> bool {
        match self {
            Term::Whole => true,
            Term::Finite(term) => years < term,
        }
    }
}

impl From<u32> for Term {
    fn from(years: u32) -> Self {
        Term::Finite(years)
    }
}

// =======================================
// COVERAGE SPEC
// =======================================

/// Benefit and payment schedules of one priced product.
///
/// The benefit side describes what the insurer owes (deferral `n`, term
/// `m`, timing); the payment side describes the premium annuity (deferral
/// `i`, term `k`, timing). Antecipated means due at the start of each
/// period, postecipated at the end.
///
/// # Example
/// ```rust
/// # use commuta::prelude::*;
/// let spec = CoverageSpec::builder()
///     .product(Product::LifeInsurance)
///     .benefit_term(Term::Finite(10))
///     .payment_term(Term::Finite(10))
///     .build();
/// assert_eq!(spec.benefit_deferral, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate, Builder)]
#[garde(allow_unvalidated)]
pub struct CoverageSpec {
    pub product: Product,

    // Benefit deferral in years - basic range check, the table-dependent
    // horizon check happens against the commutation set
    #[garde(range(max = 150))]
    #[builder(default = 0)]
    pub benefit_deferral: u32,

    #[builder(default = Term::Whole)]
    pub benefit_term: Term,

    #[builder(default = true)]
    pub benefit_antecipated: bool,

    #[garde(range(max = 150))]
    #[builder(default = 0)]
    pub payment_deferral: u32,

    #[builder(default = Term::Whole)]
    pub payment_term: Term,

    #[builder(default = true)]
    pub payment_antecipated: bool,
}
