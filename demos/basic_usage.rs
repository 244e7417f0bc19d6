//! # Commuta Basic Usage Example
//!
//! Prices an endowment, walks its reserve trajectory and resolves the
//! non-forfeiture options, mirroring what a dashboard backend would do.

use commuta::prelude::*;

fn main() -> CommutaResult<()> {
    env_logger::init();

    println!("Commuta Basic Usage Example");
    println!("===========================");
    println!();

    // A synthetic survivorship closing at age 100; production datasets
    // arrive as (table, gender, age, lx, dx) DataFrames.
    let lx: Vec<f64> = (0..=100)
        .map(|age| 100_000.0 * (1.0 - age as f64 / 100.0).powf(1.4))
        .collect();
    let series = MortalitySeries::from_lx("DEMO", Gender::Male, lx)?;
    println!("Table {} runs to age {}", series.table(), series.max_age());

    // Commutation sets for pricing and for a stressed valuation.
    let pricing = CommutationSet::derive(&series, 0.05)?;
    let stressed = CommutationSet::derive(&series, 0.08)?;

    // 20-year endowment on a 35-year-old, premiums over the same period.
    let spec = CoverageSpec::builder()
        .product(Product::Endowment)
        .benefit_term(Term::Finite(20))
        .payment_term(Term::Finite(20))
        .build();
    let face_value = 250_000.0;
    let state = net_level_premium().comms(&pricing).x(35).spec(spec).call()?;

    println!();
    println!("=== Premiums (product {}, age 35, 5% p.a.) ===", spec.product);
    println!("  net single premium: {:>12.2}", state.pup * face_value);
    println!("  net level premium:  {:>12.2}", state.pna * face_value);
    println!("  annuity factor:     {:>12.6}", state.anui);

    // Reserve ten years in, on both bases.
    let base = reserve()
        .state(&state)
        .pricing(&pricing)
        .valuation(&pricing)
        .t(10)
        .call()?;
    let shifted = reserve()
        .state(&state)
        .pricing(&pricing)
        .valuation(&stressed)
        .t(10)
        .call()?;

    println!();
    println!("=== Reserve at t = 10 ===");
    println!("  pricing basis (5%):  {:>12.2}", base.value * face_value);
    println!("  stressed basis (8%): {:>12.2}", shifted.value * face_value);
    println!("  paid-up fraction:    {:>12.4}", base.paid_up);
    match base.extended {
        Extended::Endowment { term, amount } => {
            println!("  extended: full cover {term}y, endowment {:.2}", amount * face_value);
        }
        Extended::Term(years) => println!("  extended: full cover for {years}y"),
        Extended::None => println!("  extended: none"),
    }

    // Retrospective/prospective trajectory on the pricing basis.
    let trajectory = reserve_trajectory()
        .state(&state)
        .pricing(&pricing)
        .valuation(&pricing)
        .face_value(face_value)
        .call();

    println!();
    println!("=== Reserve trajectory (every 5 years) ===");
    println!("   t   retrospective    prospective");
    for point in trajectory.iter().filter(|p| p.t % 5 == 0) {
        println!(
            "  {:>2}  {:>14.2}  {:>13.2}",
            point.t, point.retrospective, point.prospective
        );
    }

    Ok(())
}
