//! Net single and net level premiums.
//!
//! All four product variants dispatch through one commutation-indexed
//! formula set. Whole-life terms never substitute a finite horizon; the
//! upper commutation lookup simply drops out of the formula.

use crate::CommutaResult;
use crate::commutation::CommutationSet;
use crate::error::CommutaError;
use crate::product::{CoverageSpec, Product, Term};
use bon::builder;
use garde::Validate;

// =======================================
// PREMIUM STATE
// =======================================

/// Result of one net-level-premium computation.
///
/// Immutable once produced; reserve and non-forfeiture calculations take
/// it by reference, so re-pricing can never silently change an earlier
/// valuation's inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumState {
    pub age: u32,
    pub spec: CoverageSpec,
    /// Net single premium.
    pub pup: f64,
    /// Premium-annuity factor, the `a` in `P·a = A`.
    pub anui: f64,
    /// Net level premium, `pup / anui`.
    pub pna: f64,
}

// =======================================
// PUBLIC FUNCTIONS
// =======================================

/// Net single premium of one product.
///
/// # Formulas
/// ```text
/// D:  (Mₓ₊ₙ − Mₓ₊ₙ₊ₘ + Dₓ₊ₙ₊ₘ) / Dₓ
/// d:  Dₓ₊ₘ / Dₓ
/// A:  (Mₓ₊ₙ − Mₓ₊ₙ₊ₘ) / Dₓ            (whole life: Mₓ₊ₙ / Dₓ)
/// a:  (Nₓ₊ₙ₊ⱼ − Nₓ₊ₙ₊ₘ₊ⱼ) / Dₓ        (whole life: Nₓ₊ₙ₊ⱼ / Dₓ)
/// ```
/// where `j = 0` for an antecipated annuity and `1` otherwise: an
/// annuity-due pays its first installment at time `n`, an annuity-immediate
/// one year later.
///
/// # Example
/// ```rust
/// # use commuta::prelude::*;
/// # let series = MortalitySeries::from_lx("DEMO", Gender::Male,
/// #     (0..=60).map(|age| 1_000.0 * (1.0 - age as f64 / 60.0)).collect())?;
/// let comms = CommutationSet::derive(&series, 0.05)?;
/// let term_cover = net_single_premium()
///     .comms(&comms)
///     .x(30)
///     .m(Term::Finite(10))
///     .product(Product::LifeInsurance)
///     .call()?;
/// println!("10-year cover: {term_cover:.6}");
/// # CommutaResult::Ok(())
/// ```
#[builder]
pub fn net_single_premium(
    comms: &CommutationSet,
    x: u32,
    #[builder(default = 0)] n: u32,
    #[builder(default = Term::Whole)] m: Term,
    #[builder(default = true)] antecipated: bool,
    product: Product,
) -> CommutaResult<f64> {
    verify_product(comms, x, n, m, antecipated, product)?;

    let add_one = if antecipated && product == Product::Annuity {
        0
    } else {
        1
    };

    let value = match (product, m) {
        (Product::Endowment, Term::Finite(m)) => {
            (comms.Mx(x + n) - comms.Mx(x + n + m) + comms.Dx(x + n + m)) / comms.Dx(x)
        }
        (Product::PureEndowment, Term::Finite(m)) => comms.Dx(x + m) / comms.Dx(x),
        (Product::LifeInsurance, Term::Whole) => comms.Mx(x + n) / comms.Dx(x),
        (Product::LifeInsurance, Term::Finite(m)) => {
            (comms.Mx(x + n) - comms.Mx(x + n + m)) / comms.Dx(x)
        }
        (Product::Annuity, Term::Whole) => comms.Nx(x + n + add_one) / comms.Dx(x),
        (Product::Annuity, Term::Finite(m)) => {
            (comms.Nx(x + n + add_one) - comms.Nx(x + n + m + add_one)) / comms.Dx(x)
        }
        (Product::Endowment | Product::PureEndowment, Term::Whole) => {
            return Err(CommutaError::WholeLifeEndowment);
        }
    };

    Ok(value)
}

/// Net level premium for a full coverage spec.
///
/// Computes the benefit's net single premium `pup`, the premium-annuity
/// factor `anui` over the payment schedule, and `pna = pup / anui`, all on
/// the same commutation set.
///
/// # Example
/// ```rust
/// # use commuta::prelude::*;
/// # let series = MortalitySeries::from_lx("DEMO", Gender::Male,
/// #     (0..=60).map(|age| 1_000.0 * (1.0 - age as f64 / 60.0)).collect())?;
/// let comms = CommutationSet::derive(&series, 0.05)?;
/// let spec = CoverageSpec::builder()
///     .product(Product::Endowment)
///     .benefit_term(Term::Finite(10))
///     .payment_term(Term::Finite(10))
///     .build();
/// let state = net_level_premium().comms(&comms).x(30).spec(spec).call()?;
/// assert!(state.pna < state.pup);
/// # CommutaResult::Ok(())
/// ```
#[builder]
pub fn net_level_premium(
    comms: &CommutationSet,
    x: u32,
    spec: CoverageSpec,
) -> CommutaResult<PremiumState> {
    spec.validate()?;

    let pup = net_single_premium()
        .comms(comms)
        .x(x)
        .n(spec.benefit_deferral)
        .m(spec.benefit_term)
        .antecipated(spec.benefit_antecipated)
        .product(spec.product)
        .call()?;

    let anui = net_single_premium()
        .comms(comms)
        .x(x)
        .n(spec.payment_deferral)
        .m(spec.payment_term)
        .antecipated(spec.payment_antecipated)
        .product(Product::Annuity)
        .call()?;

    if anui == 0.0 {
        return Err(CommutaError::ZeroDivisor {
            what: "annuity factor",
        });
    }

    Ok(PremiumState {
        age: x,
        spec,
        pup,
        anui,
        pna: pup / anui,
    })
}

// =======================================
// VALIDATION
// =======================================

/// Checks that a (product, age, deferral, term) combination is supported
/// by the table behind `comms`.
fn verify_product(
    comms: &CommutationSet,
    x: u32,
    n: u32,
    m: Term,
    antecipated: bool,
    product: Product,
) -> CommutaResult<()> {
    if product == Product::PureEndowment && n > 0 {
        return Err(CommutaError::DeferredPureEndowment { deferral: n });
    }

    if matches!(product, Product::PureEndowment | Product::Endowment) && m.is_whole() {
        return Err(CommutaError::WholeLifeEndowment);
    }

    // An antecipated annuity makes its last payment one year earlier, so
    // the horizon it needs from the table is one year shorter. A whole-life
    // term contributes nothing; its lookups fall off the end of the table
    // by construction.
    let adjustment = i64::from(antecipated && product == Product::Annuity);
    let effective_term = i64::from(m.finite().unwrap_or(0));
    let combined = i64::from(x) + i64::from(n) + effective_term - adjustment;
    let max_age = comms.max_age();

    if combined > i64::from(max_age) {
        return Err(CommutaError::HorizonExceeded { combined, max_age });
    }

    Ok(())
}
