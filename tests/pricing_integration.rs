//! End-to-end pricing workflow through the prelude: dataset in, premium,
//! reserves and non-forfeiture values out, the way a dashboard backend
//! would drive the crate.

use approx::assert_abs_diff_eq;
use commuta::mtdf;
use commuta::prelude::*;
use polars::prelude::NamedFrom;

fn linear_lx(omega: u32) -> Vec<f64> {
    (0..=omega)
        .map(|age| 1_000.0 * (1.0 - age as f64 / omega as f64))
        .collect()
}

fn demo_set() -> MortTableSet {
    let omega = 60u32;
    let lx = linear_lx(omega);
    let mut dx: Vec<f64> = lx.windows(2).map(|pair| pair[0] - pair[1]).collect();
    dx.push(*lx.last().unwrap());

    mtdf! {
        "table" => vec!["AT2000"; (omega + 1) as usize],
        "gender" => vec!["male"; (omega + 1) as usize],
        "age" => (0..=omega).collect::<Vec<u32>>(),
        "lx" => lx,
        "dx" => dx,
    }
    .expect("failed to build demo table set")
}

#[test]
fn test_full_quote_workflow() {
    let set = demo_set();
    assert_eq!(set.tables().unwrap(), vec!["AT2000".to_string()]);

    let series = set.select("AT2000", Gender::Male).unwrap();
    assert_eq!(series.max_age(), 60);

    let rates = RiskFreeSeries::from_df(
        DataFrame::new(vec![
            Series::new("period".into(), vec![202401i64, 202402]).into_column(),
            Series::new("annual_rate_pct".into(), vec![4.50, 5.00]).into_column(),
        ])
        .unwrap(),
    )
    .unwrap();
    let rate = rates.latest_annual_rate().unwrap();
    assert_eq!(rate, 0.05);

    let comms = CommutationSet::derive(&series, rate).unwrap();
    let spec = CoverageSpec::builder()
        .product(Product::Endowment)
        .benefit_term(Term::Finite(10))
        .payment_term(Term::Finite(10))
        .build();
    let state = net_level_premium().comms(&comms).x(30).spec(spec).call().unwrap();

    assert!(state.pup > 0.0);
    assert!(state.pna < state.pup);
    assert_abs_diff_eq!(state.pna * state.anui, state.pup, epsilon = 1e-12);

    // Reserve trajectory on the pricing basis, scaled to a face value.
    let trajectory = reserve_trajectory()
        .state(&state)
        .pricing(&comms)
        .valuation(&comms)
        .face_value(100_000.0)
        .call();

    assert!(!trajectory.is_empty());
    assert_eq!(trajectory[0].prospective, 0.0);
    assert_eq!(trajectory[0].retrospective, 0.0);

    // Both methods agree along the whole premium-paying period.
    for point in trajectory.iter().filter(|p| p.t <= 10) {
        assert_abs_diff_eq!(point.prospective, point.retrospective, epsilon = 1e-3);
    }

    // At maturity the endowment reserve equals the full face value.
    let maturity = trajectory.iter().find(|p| p.t == 10).unwrap();
    assert_abs_diff_eq!(maturity.prospective, 100_000.0, epsilon = 1e-3);

    // Midway through the payment window both non-forfeiture options exist.
    let midway = reserve()
        .state(&state)
        .pricing(&comms)
        .valuation(&comms)
        .t(5)
        .method(ReserveMethod::Prospective)
        .call()
        .unwrap();
    assert!(midway.paid_up > 0.0 && midway.paid_up < 1.0);
    assert!(matches!(midway.extended, Extended::Endowment { term: 10, .. }));
}

#[test]
fn test_single_point_errors_surface_while_sweeps_skip() {
    let set = demo_set();
    let series = set.select("AT2000", Gender::Male).unwrap();
    let comms = CommutationSet::derive(&series, 0.05).unwrap();

    // Single-point request: the error comes back to the caller.
    let err = net_single_premium()
        .comms(&comms)
        .x(55)
        .m(Term::Finite(10))
        .product(Product::LifeInsurance)
        .call()
        .unwrap_err();
    assert!(matches!(err, CommutaError::HorizonExceeded { .. }));

    // Sweep: the same combination is silently dropped from the grid.
    let spec = CoverageSpec::builder()
        .product(Product::LifeInsurance)
        .benefit_term(Term::Finite(10))
        .payment_term(Term::Finite(10))
        .build();
    let surface = premium_surface().series(&series).spec(spec).call().unwrap();
    assert!(surface.iter().all(|point| point.age != 55));
    assert!(surface.iter().any(|point| point.age == 50));
}

#[test]
fn test_rate_shifted_valuation_against_pricing_basis() {
    let set = demo_set();
    let series = set.select("AT2000", Gender::Male).unwrap();
    let pricing = CommutationSet::derive(&series, 0.04).unwrap();
    let shifted = CommutationSet::derive(&series, 0.08).unwrap();

    let spec = CoverageSpec::builder()
        .product(Product::LifeInsurance)
        .benefit_term(Term::Finite(20))
        .payment_term(Term::Finite(20))
        .build();
    let state = net_level_premium().comms(&pricing).x(30).spec(spec).call().unwrap();

    let base = reserve_trajectory()
        .state(&state)
        .pricing(&pricing)
        .valuation(&pricing)
        .call();
    let stressed = reserve_trajectory()
        .state(&state)
        .pricing(&pricing)
        .valuation(&shifted)
        .call();

    assert_eq!(base.len(), stressed.len());
    let base_mid = base.iter().find(|p| p.t == 10).unwrap();
    let stressed_mid = stressed.iter().find(|p| p.t == 10).unwrap();
    assert!(base_mid.prospective != stressed_mid.prospective);
}
