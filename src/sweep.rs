//! Grid sweeps over the pricing engine.
//!
//! Everything here drives the pure functions in [`crate::pricing`] over a
//! grid and assembles the evaluable points. A grid point that fails
//! validation (an age/term combination the table cannot carry, a horizon
//! past the table end) is dropped from the output, never aborting the
//! sweep; each skip is logged at debug level.

use crate::commutation::CommutationSet;
use crate::pricing::premium::{PremiumState, net_level_premium};
use crate::pricing::reserve::{ReserveMethod, reserve};
use crate::product::CoverageSpec;
use crate::table::{Gender, MortTableSet, MortalitySeries};
use crate::CommutaResult;
use bon::builder;
use log::debug;

/// Interest-rate grid of the premium sensitivity surface: 2% to 10% in
/// half-percent steps.
pub const RATE_GRID: [f64; 17] = [
    0.020, 0.025, 0.030, 0.035, 0.040, 0.045, 0.050, 0.055, 0.060, 0.065, 0.070, 0.075, 0.080,
    0.085, 0.090, 0.095, 0.100,
];

/// One point of the (age, rate) premium surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub age: u32,
    pub rate: f64,
    /// Net level premium scaled by the face value.
    pub premium: f64,
}

/// One point of a reserve trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub t: u32,
    pub retrospective: f64,
    pub prospective: f64,
}

/// Net level premium of one table in a cross-table comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuote {
    pub table: String,
    pub premium: f64,
}

/// Net level premium over [`RATE_GRID`] × ages `0..=max_age`.
///
/// # Example
/// ```rust
/// # use commuta::prelude::*;
/// # let series = MortalitySeries::from_lx("DEMO", Gender::Male,
/// #     (0..=60).map(|age| 1_000.0 * (1.0 - age as f64 / 60.0)).collect())?;
/// let spec = CoverageSpec::builder()
///     .product(Product::LifeInsurance)
///     .benefit_term(Term::Finite(10))
///     .payment_term(Term::Finite(10))
///     .build();
/// let surface = premium_surface()
///     .series(&series)
///     .spec(spec)
///     .face_value(100_000.0)
///     .call()?;
/// assert!(!surface.is_empty());
/// # CommutaResult::Ok(())
/// ```
#[builder]
pub fn premium_surface(
    series: &MortalitySeries,
    spec: CoverageSpec,
    #[builder(default = 1.0)] face_value: f64,
    #[builder(default = 80)] max_age: u32,
) -> CommutaResult<Vec<SurfacePoint>> {
    let mut points = Vec::new();

    for rate in RATE_GRID {
        let comms = CommutationSet::derive(series, rate)?;
        for age in 0..=max_age {
            match net_level_premium().comms(&comms).x(age).spec(spec).call() {
                Ok(state) => points.push(SurfacePoint {
                    age,
                    rate,
                    premium: state.pna * face_value,
                }),
                Err(err) => {
                    debug!("surface point skipped at age {age}, rate {rate}: {err}");
                }
            }
        }
    }

    Ok(points)
}

/// Retrospective/prospective reserve pairs for `t = 0..horizon`.
///
/// A point is emitted only when both methods evaluate at that `t`, so the
/// two series always pair up.
#[builder]
pub fn reserve_trajectory(
    state: &PremiumState,
    pricing: &CommutationSet,
    valuation: &CommutationSet,
    #[builder(default = 1.0)] face_value: f64,
    #[builder(default = 100)] horizon: u32,
) -> Vec<TrajectoryPoint> {
    (0..horizon)
        .filter_map(|t| {
            let retro = reserve()
                .state(state)
                .pricing(pricing)
                .valuation(valuation)
                .t(t)
                .method(ReserveMethod::Retrospective)
                .call();
            let prosp = reserve()
                .state(state)
                .pricing(pricing)
                .valuation(valuation)
                .t(t)
                .method(ReserveMethod::Prospective)
                .call();

            match (retro, prosp) {
                (Ok(retro), Ok(prosp)) => Some(TrajectoryPoint {
                    t,
                    retrospective: retro.value * face_value,
                    prospective: prosp.value * face_value,
                }),
                (Err(err), _) | (_, Err(err)) => {
                    debug!("trajectory point skipped at t = {t}: {err}");
                    None
                }
            }
        })
        .collect()
}

/// Net level premium per table name, at one fixed (gender, rate, age).
///
/// Tables whose series cannot carry the requested product are skipped.
#[builder]
pub fn table_comparison(
    set: &MortTableSet,
    tables: &[String],
    gender: Gender,
    rate: f64,
    age: u32,
    spec: CoverageSpec,
    #[builder(default = 1.0)] face_value: f64,
) -> Vec<TableQuote> {
    let mut quotes = Vec::new();

    for table in tables {
        let quote = set
            .select(table, gender)
            .and_then(|series| CommutationSet::derive(&series, rate))
            .and_then(|comms| net_level_premium().comms(&comms).x(age).spec(spec).call());

        match quote {
            Ok(state) => quotes.push(TableQuote {
                table: table.clone(),
                premium: state.pna * face_value,
            }),
            Err(err) => debug!("table {table:?} skipped in comparison: {err}"),
        }
    }

    quotes
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Product, Term};
    use polars::prelude::df;

    fn linear_lx(omega: u32) -> Vec<f64> {
        (0..=omega)
            .map(|age| 1_000.0 * (1.0 - age as f64 / omega as f64))
            .collect()
    }

    fn term_spec() -> CoverageSpec {
        CoverageSpec::builder()
            .product(Product::LifeInsurance)
            .benefit_term(Term::Finite(10))
            .payment_term(Term::Finite(10))
            .build()
    }

    #[test]
    fn test_surface_covers_grid_and_skips_unsupported_ages() {
        let series = MortalitySeries::from_lx("DEMO", Gender::Male, linear_lx(60)).unwrap();
        let surface = premium_surface()
            .series(&series)
            .spec(term_spec())
            .call()
            .unwrap();

        // Ages above 60 - 10 cannot carry a 10-year term; everything else can.
        assert!(surface.iter().all(|point| point.age <= 50));
        assert_eq!(surface.len(), RATE_GRID.len() * 51);
        assert!(surface.iter().all(|point| point.premium > 0.0));
    }

    #[test]
    fn test_surface_premiums_fall_as_rates_rise() {
        let series = MortalitySeries::from_lx("DEMO", Gender::Male, linear_lx(60)).unwrap();
        let surface = premium_surface()
            .series(&series)
            .spec(term_spec())
            .call()
            .unwrap();

        let at_age_30: Vec<f64> = RATE_GRID
            .iter()
            .map(|rate| {
                surface
                    .iter()
                    .find(|p| p.age == 30 && p.rate == *rate)
                    .unwrap()
                    .premium
            })
            .collect();
        assert!(at_age_30.windows(2).all(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn test_trajectory_pairs_up_and_truncates_at_table_end() {
        let series = MortalitySeries::from_lx("DEMO", Gender::Male, linear_lx(60)).unwrap();
        let comms = CommutationSet::derive(&series, 0.04).unwrap();
        let state = net_level_premium()
            .comms(&comms)
            .x(30)
            .spec(term_spec())
            .call()
            .unwrap();

        let trajectory = reserve_trajectory()
            .state(&state)
            .pricing(&comms)
            .valuation(&comms)
            .call();

        // At t = 30 the retrospective accumulation factor hits the empty
        // terminal age, and past it the shifted age leaves the table, so
        // the trajectory stops well short of the 100-step horizon.
        assert_eq!(trajectory.len(), 30);
        assert_eq!(trajectory.first().unwrap().t, 0);
        assert_eq!(trajectory.last().unwrap().t, 29);
        assert_eq!(trajectory.first().unwrap().prospective, 0.0);
        assert!(trajectory.iter().all(|p| p.retrospective.is_finite()));
    }

    #[test]
    fn test_table_comparison_skips_short_tables() {
        let mut table = vec!["LONG"; 61];
        table.extend(vec!["SHORT"; 21]);
        let gender = vec!["male"; table.len()];
        let mut age: Vec<u32> = (0..=60).collect();
        age.extend(0..=20u32);
        let mut lx = linear_lx(60);
        lx.extend(linear_lx(20));
        let mut dx: Vec<f64> = Vec::with_capacity(table.len());
        for series_lx in [linear_lx(60), linear_lx(20)] {
            let mut deaths: Vec<f64> =
                series_lx.windows(2).map(|pair| pair[0] - pair[1]).collect();
            deaths.push(*series_lx.last().unwrap());
            dx.extend(deaths);
        }

        let set = MortTableSet::from_df(
            df! {
                "table" => table,
                "gender" => gender,
                "age" => age,
                "lx" => lx,
                "dx" => dx,
            }
            .unwrap(),
        )
        .unwrap();

        let names = vec!["LONG".to_string(), "SHORT".to_string(), "MISSING".to_string()];
        let quotes = table_comparison()
            .set(&set)
            .tables(&names)
            .gender(Gender::Male)
            .rate(0.05)
            .age(30)
            .spec(term_spec())
            .face_value(1_000.0)
            .call();

        // Age 30 does not exist in SHORT and MISSING has no rows at all.
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].table, "LONG");
        assert!(quotes[0].premium > 0.0);
    }
}
