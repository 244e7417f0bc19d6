//! Prospective and retrospective reserves.
//!
//! Both methods re-invoke the net-single-premium formulas with the time
//! index folded into age, deferral and term, on a valuation commutation
//! set that may be derived at a different rate than the one the premium
//! was priced at. The pricing set is only consulted by the non-forfeiture
//! search.
//!
//! Boundary behaviour, applied identically to both methods:
//! - the reserve is 0 at `t = 0`;
//! - it is 0 while `t` precedes both the benefit and the payment window;
//! - it is 0 once `t` has outrun both windows (full run-off).
//!
//! A `t` whose shifted-age sub-computation falls off the table is an
//! error for that `t` alone; trajectory callers skip it and move on.

use crate::CommutaResult;
use crate::commutation::CommutationSet;
use crate::error::CommutaError;
use crate::pricing::nonforfeit::{Extended, nonforfeiture};
use crate::pricing::premium::{PremiumState, net_single_premium};
use crate::product::{CoverageSpec, Product, Term};
use bon::builder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveMethod {
    /// Present value of future benefits minus future premiums.
    Prospective,
    /// Accumulated value of past premiums minus past benefits.
    Retrospective,
}

/// One reserve evaluation. Computed fresh per `(t, method, rate)` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveResult {
    pub t: u32,
    pub method: ReserveMethod,
    pub value: f64,
    /// Reduced-benefit fraction if premiums stop at `t`; resolved for
    /// prospective evaluations inside the open payment window, 0 otherwise.
    pub paid_up: f64,
    pub extended: Extended,
}

/// Reserve at evaluation time `t`.
///
/// `pricing` is the set the premium was priced on; `valuation` is the set
/// the reserve discounts on. Pass the same set twice when no rate shift is
/// wanted; the two are deliberately distinct arguments so a sensitivity
/// sweep cannot corrupt the priced premium.
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
/// let mid = reserve()
///     .state(&state)
///     .pricing(&comms)
///     .valuation(&comms)
///     .t(5)
///     .call()?;
/// assert!(mid.value > 0.0);
/// # CommutaResult::Ok(())
/// ```
#[builder]
pub fn reserve(
    state: &PremiumState,
    pricing: &CommutationSet,
    valuation: &CommutationSet,
    t: u32,
    #[builder(default = ReserveMethod::Prospective)] method: ReserveMethod,
) -> CommutaResult<ReserveResult> {
    match method {
        ReserveMethod::Retrospective => {
            let value = retrospective(state, valuation, t)?;
            Ok(ReserveResult {
                t,
                method,
                value,
                paid_up: 0.0,
                extended: Extended::None,
            })
        }
        ReserveMethod::Prospective => {
            let (value, benefit_pv) = prospective(state, valuation, t)?;
            let resolved = nonforfeiture()
                .state(state)
                .pricing(pricing)
                .t(t)
                .benefit_value(benefit_pv)
                .reserve(value)
                .call();
            Ok(ReserveResult {
                t,
                method,
                value,
                paid_up: resolved.paid_up,
                extended: resolved.extended,
            })
        }
    }
}

// =======================================
// RETROSPECTIVE
// =======================================

fn retrospective(state: &PremiumState, comms: &CommutationSet, t: u32) -> CommutaResult<f64> {
    if t == 0 {
        return Ok(0.0);
    }

    let spec = state.spec;
    let x = state.age;
    let n = spec.benefit_deferral;
    let i = spec.payment_deferral;
    let adjust_pay = u32::from(spec.payment_antecipated);
    let adjust_benefit = u32::from(spec.benefit_antecipated && spec.product == Product::Annuity);

    // Accumulation runs through the reciprocal of the pure endowment to t.
    let endowment_t = net_single_premium()
        .comms(comms)
        .x(x)
        .m(Term::Finite(t))
        .antecipated(spec.payment_antecipated)
        .product(Product::PureEndowment)
        .call()?;
    if endowment_t == 0.0 {
        return Err(CommutaError::ZeroDivisor {
            what: "accumulation factor",
        });
    }

    // Premiums collected up to t.
    let payment_pv = if t <= i.saturating_sub(adjust_pay) {
        0.0
    } else {
        net_single_premium()
            .comms(comms)
            .x(x)
            .n(i)
            .m(Term::Finite(spec.payment_term.min_u32(t - i)))
            .antecipated(spec.payment_antecipated)
            .product(Product::Annuity)
            .call()?
    };

    // Benefits incurred up to t.
    let benefit_pv = if t <= n.saturating_sub(adjust_benefit) {
        0.0
    } else {
        match (spec.product, spec.benefit_term) {
            // Looking backwards, an endowment shows only its insurance part
            // until maturity: no survival benefit has been seen yet.
            (Product::Endowment, Term::Finite(m)) if t <= m + n => net_single_premium()
                .comms(comms)
                .x(x)
                .n(n)
                .m(Term::Finite((t - n).min(m)))
                .antecipated(spec.benefit_antecipated)
                .product(Product::LifeInsurance)
                .call()?,
            // A pure endowment has incurred nothing before its term is up.
            (Product::PureEndowment, Term::Finite(m)) if t <= m => 0.0,
            _ => net_single_premium()
                .comms(comms)
                .x(x)
                .n(n)
                .m(Term::Finite(spec.benefit_term.min_u32(t - n)))
                .antecipated(spec.benefit_antecipated)
                .product(spec.product)
                .call()?,
        }
    };

    let (payment_pv, benefit_pv) = apply_zero_windows(&spec, t, payment_pv, benefit_pv);

    Ok((state.pna * payment_pv - benefit_pv) / endowment_t)
}

// =======================================
// PROSPECTIVE
// =======================================

/// Returns the reserve together with the future-benefit single premium at
/// `t`, which the paid-up fraction is measured against.
fn prospective(state: &PremiumState, comms: &CommutationSet, t: u32) -> CommutaResult<(f64, f64)> {
    if t == 0 {
        return Ok((0.0, 0.0));
    }

    let spec = state.spec;
    let x = state.age;
    let n = spec.benefit_deferral;
    let i = spec.payment_deferral;
    let adjust_pay = u32::from(spec.payment_antecipated);
    let adjust_benefit = u32::from(spec.benefit_antecipated && spec.product == Product::Annuity);

    // Future premiums from t on, at the shifted age x + t.
    let payment_pv = if t <= i.saturating_sub(adjust_pay) {
        net_single_premium()
            .comms(comms)
            .x(x + t)
            .n(i - t)
            .m(spec.payment_term)
            .antecipated(spec.payment_antecipated)
            .product(Product::Annuity)
            .call()?
    } else {
        let remaining = match spec.payment_term {
            Term::Whole => Term::Whole,
            Term::Finite(k) => Term::Finite((i + k).saturating_sub(t)),
        };
        net_single_premium()
            .comms(comms)
            .x(x + t)
            .m(remaining)
            .antecipated(spec.payment_antecipated)
            .product(Product::Annuity)
            .call()?
    };

    // Future benefits from t on.
    let within_deferral = t <= n.saturating_sub(adjust_benefit);
    let before_expiry = match spec.benefit_term {
        Term::Whole => true,
        Term::Finite(m) => t <= (m + n).saturating_sub(adjust_benefit),
    };
    let benefit_pv = if within_deferral {
        net_single_premium()
            .comms(comms)
            .x(x + t)
            .n(n - t)
            .m(spec.benefit_term)
            .antecipated(spec.benefit_antecipated)
            .product(spec.product)
            .call()?
    } else if before_expiry {
        let remaining = match spec.benefit_term {
            Term::Whole => Term::Whole,
            Term::Finite(m) => Term::Finite((n + m).saturating_sub(t)),
        };
        net_single_premium()
            .comms(comms)
            .x(x + t)
            .m(remaining)
            .antecipated(spec.benefit_antecipated)
            .product(spec.product)
            .call()?
    } else {
        0.0
    };

    let (payment_pv, benefit_pv) = apply_zero_windows(&spec, t, payment_pv, benefit_pv);

    Ok((benefit_pv - state.pna * payment_pv, benefit_pv))
}

// =======================================
// SHARED BOUNDARIES
// =======================================

fn apply_zero_windows(
    spec: &CoverageSpec,
    t: u32,
    payment_pv: f64,
    benefit_pv: f64,
) -> (f64, f64) {
    let n = spec.benefit_deferral;
    let i = spec.payment_deferral;

    // Before either window opens there is nothing to reserve for.
    if t < n && t < i {
        return (0.0, 0.0);
    }

    // After both windows have closed the contract has fully run off. A
    // whole-life window never closes.
    if let (Term::Finite(m), Term::Finite(k)) = (spec.benefit_term, spec.payment_term) {
        if t > m + n && t > k + i {
            return (0.0, 0.0);
        }
    }

    (payment_pv, benefit_pv)
}
