#![allow(non_snake_case)]

//! # Commutation Engine
//!
//! Derives the commutation functions Dₓ, Cₓ, Nₓ, Mₓ from a mortality
//! series and an interest rate.
//!
//! # Formulas
//! ```text
//! Dₓ = lₓ · (1+i)⁻ˣ
//! Cₓ = dₓ · (1+i)⁻⁽ˣ⁺¹⁾
//! Nₓ = Σₖ₌ₓ^ω Dₖ
//! Mₓ = Σₖ₌ₓ^ω Cₖ
//! ```
//! The one-year shift in Cₓ reflects death benefits paid at the end of the
//! year of death. Nₓ and Mₓ are materialized as reverse cumulative sums so
//! every premium formula is a handful of array lookups.
//!
//! # Example
//! ```rust
//! # use commuta::prelude::*;
//! let series = MortalitySeries::from_lx("DEMO", Gender::Male,
//!     vec![1000.0, 900.0, 750.0, 500.0, 0.0])?;
//! let comms = CommutationSet::derive(&series, 0.05)?;
//! println!("D30-equivalent at age 2: {:.4}", comms.Dx(2));
//! # CommutaResult::Ok(())
//! ```

use crate::CommutaResult;
use crate::error::CommutaError;
use crate::table::MortalitySeries;

/// Commutation functions for one mortality series at one interest rate.
///
/// Two sets routinely coexist: one derived at the premium's pricing rate
/// and one at a (possibly different) valuation rate for reserve
/// re-evaluation. They are independent values and are never mutated after
/// derivation, so a rate-sensitivity sweep cannot corrupt the originally
/// priced premium.
#[derive(Debug, Clone, PartialEq)]
pub struct CommutationSet {
    rate: f64,
    Dx: Vec<f64>,
    Cx: Vec<f64>,
    Nx: Vec<f64>,
    Mx: Vec<f64>,
}

impl CommutationSet {
    /// Derive all four commutation arrays.
    ///
    /// `rate` must be greater than −1; zero is legal and means no
    /// discounting.
    pub fn derive(series: &MortalitySeries, rate: f64) -> CommutaResult<Self> {
        if !(rate > -1.0) {
            return Err(CommutaError::InvalidRate(rate));
        }

        let v = 1.0 + rate;

        let Dx: Vec<f64> = series
            .lives()
            .iter()
            .enumerate()
            .map(|(age, lx)| lx * v.powf(-(age as f64)))
            .collect();

        let Cx: Vec<f64> = series
            .deaths()
            .iter()
            .enumerate()
            .map(|(age, dx)| dx * v.powf(-(age as f64 + 1.0)))
            .collect();

        Ok(Self {
            rate,
            Nx: reverse_cumsum(&Dx),
            Mx: reverse_cumsum(&Cx),
            Dx,
            Cx,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Highest age carried by the underlying series.
    pub fn max_age(&self) -> u32 {
        (self.Dx.len() - 1) as u32
    }

    /// Dₓ at `x`. Ages beyond the table evaluate to zero, signalling
    /// "not representable at this age" to callers instead of panicking.
    pub fn Dx(&self, x: u32) -> f64 {
        value_at(&self.Dx, x)
    }

    /// Cₓ at `x`; zero beyond the table.
    pub fn Cx(&self, x: u32) -> f64 {
        value_at(&self.Cx, x)
    }

    /// Nₓ at `x`; zero beyond the table.
    pub fn Nx(&self, x: u32) -> f64 {
        value_at(&self.Nx, x)
    }

    /// Mₓ at `x`; zero beyond the table.
    pub fn Mx(&self, x: u32) -> f64 {
        value_at(&self.Mx, x)
    }
}

fn reverse_cumsum(values: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    let mut acc = 0.0;
    for (slot, value) in out.iter_mut().zip(values.iter()).rev() {
        acc += value;
        *slot = acc;
    }
    out
}

fn value_at(values: &[f64], x: u32) -> f64 {
    values.get(x as usize).copied().unwrap_or(0.0)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Gender;
    use approx::assert_abs_diff_eq;

    fn demo_series() -> MortalitySeries {
        MortalitySeries::from_lx(
            "DEMO",
            Gender::Male,
            vec![
                1000.0, 980.0, 955.0, 925.0, 890.0, 850.0, 800.0, 740.0, 660.0, 550.0, 400.0,
                200.0, 0.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_reverse_cumsum_identity() {
        let series = demo_series();
        let comms = CommutationSet::derive(&series, 0.04).unwrap();

        for age in 0..=comms.max_age() {
            let nx: f64 = (age..=comms.max_age()).map(|k| comms.Dx(k)).sum();
            let mx: f64 = (age..=comms.max_age()).map(|k| comms.Cx(k)).sum();
            assert_abs_diff_eq!(comms.Nx(age), nx, epsilon = 1e-9);
            assert_abs_diff_eq!(comms.Mx(age), mx, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_rate_leaves_lives_undiscounted() {
        let series = demo_series();
        let comms = CommutationSet::derive(&series, 0.0).unwrap();
        for (age, lx) in series.lives().iter().enumerate() {
            assert_abs_diff_eq!(comms.Dx(age as u32), *lx, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_discounting_shifts_deaths_one_year() {
        let series = demo_series();
        let rate = 0.05;
        let comms = CommutationSet::derive(&series, rate).unwrap();
        let v: f64 = 1.0 / (1.0 + rate);
        assert_abs_diff_eq!(comms.Cx(3), series.deaths()[3] * v.powf(4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(comms.Dx(3), series.lives()[3] * v.powf(3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_lookups_beyond_table_are_zero() {
        let series = demo_series();
        let comms = CommutationSet::derive(&series, 0.04).unwrap();
        let past = comms.max_age() + 1;
        assert_eq!(comms.Dx(past), 0.0);
        assert_eq!(comms.Cx(past), 0.0);
        assert_eq!(comms.Nx(past), 0.0);
        assert_eq!(comms.Mx(past), 0.0);
        assert_eq!(comms.Nx(500), 0.0);
    }

    #[test]
    fn test_rate_at_or_below_minus_one_is_rejected() {
        let series = demo_series();
        assert!(matches!(
            CommutationSet::derive(&series, -1.0),
            Err(CommutaError::InvalidRate(_))
        ));
        assert!(matches!(
            CommutationSet::derive(&series, -1.5),
            Err(CommutaError::InvalidRate(_))
        ));
        assert!(CommutationSet::derive(&series, -0.5).is_ok());
    }
}
