//! Paid-up and extended-cover non-forfeiture values.
//!
//! When premium payments stop at time `t`, the reserve on hand can fund
//! either a reduced ("paid-up") benefit or a shorter full benefit
//! ("extended" cover). There is no closed form for the extended term, so
//! it is found by a linear search over candidate terms, taking the first
//! minimum of |reserve − repriced premium|; ties therefore resolve to the
//! smallest candidate. Candidates that fail validation at the shifted age
//! are simply not valid fits.

use crate::commutation::CommutationSet;
use crate::pricing::premium::{PremiumState, net_single_premium};
use crate::product::{Product, Term};
use bon::builder;

/// Extended-cover description derived from a reserve.
#[derive(Debug, Clone, PartialEq)]
pub enum Extended {
    /// No extended cover could be derived.
    None,
    /// Full benefit kept for this many further years.
    Term(u32),
    /// Endowment conversion: full death cover for `term` years plus a
    /// reduced survival benefit of `amount`.
    Endowment { term: u32, amount: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nonforfeiture {
    pub paid_up: f64,
    pub extended: Extended,
}

/// Resolve non-forfeiture options at time `t`.
///
/// Only meaningful strictly inside the open payment window
/// (`i < t < k`); outside it both options are empty. `benefit_value` is
/// the single premium of the remaining benefit at `t` and `reserve` the
/// prospective reserve, both computed by the reserve calculator. The
/// extended-cover candidates are re-priced on the `pricing` set.
#[builder]
pub fn nonforfeiture(
    state: &PremiumState,
    pricing: &CommutationSet,
    t: u32,
    benefit_value: f64,
    reserve: f64,
) -> Nonforfeiture {
    let spec = state.spec;

    let open_window = t > spec.payment_deferral && spec.payment_term.outlasts(t);
    if !open_window {
        return Nonforfeiture {
            paid_up: 0.0,
            extended: Extended::None,
        };
    }

    let paid_up = if benefit_value > 0.0 {
        reserve / benefit_value
    } else {
        0.0
    };

    let extended = match spec.product {
        Product::LifeInsurance | Product::Annuity => {
            best_fit_term(state, pricing, t, reserve, spec.product)
        }
        Product::Endowment => extended_endowment(state, pricing, t, reserve),
        Product::PureEndowment => Extended::None,
    };

    Nonforfeiture { paid_up, extended }
}

// =======================================
// SEARCHES
// =======================================

/// Candidate terms run from 1 up to the shorter of the benefit term and
/// the years the table still covers past `t`. The first minimum wins.
fn best_fit_term(
    state: &PremiumState,
    pricing: &CommutationSet,
    t: u32,
    reserve: f64,
    product: Product,
) -> Extended {
    let spec = state.spec;
    let limit = spec
        .benefit_term
        .min_u32(pricing.max_age().saturating_sub(t));
    let deferral = spec.benefit_deferral.saturating_sub(t);

    let mut best: Option<(u32, f64)> = None;
    for period in 1..limit {
        let Ok(value) = net_single_premium()
            .comms(pricing)
            .x(state.age + t)
            .n(deferral)
            .m(Term::Finite(period))
            .antecipated(spec.benefit_antecipated)
            .product(product)
            .call()
        else {
            continue;
        };
        let distance = (reserve - value).abs();
        if best.is_none_or(|(_, nearest)| distance < nearest) {
            best = Some((period, distance));
        }
    }

    match best {
        Some((period, _)) => Extended::Term(period),
        None => Extended::None,
    }
}

/// For endowments, first check whether the reserve covers the remaining
/// death cover on its own; if it does, the surplus buys back a reduced
/// survival benefit directly through the pure-endowment formula. If not,
/// fall back to the same term search used for life insurance.
fn extended_endowment(
    state: &PremiumState,
    pricing: &CommutationSet,
    t: u32,
    reserve: f64,
) -> Extended {
    let spec = state.spec;
    let n = spec.benefit_deferral;
    let Term::Finite(m) = spec.benefit_term else {
        // Endowments are always finite; guarded at pricing time.
        return Extended::None;
    };
    let x = state.age + t;

    let insurance = if t <= n {
        net_single_premium()
            .comms(pricing)
            .x(x)
            .n(n - t)
            .m(Term::Finite(m))
            .antecipated(spec.benefit_antecipated)
            .product(Product::LifeInsurance)
            .call()
    } else {
        match m.checked_sub(t) {
            Some(rest) => net_single_premium()
                .comms(pricing)
                .x(x)
                .m(Term::Finite(rest))
                .antecipated(spec.benefit_antecipated)
                .product(Product::LifeInsurance)
                .call(),
            None => Ok(0.0),
        }
    }
    .unwrap_or(0.0);

    if reserve >= insurance {
        let unit = net_single_premium()
            .comms(pricing)
            .x(x)
            .m(Term::Finite((m + n).saturating_sub(t)))
            .antecipated(spec.benefit_antecipated)
            .product(Product::PureEndowment)
            .call()
            .unwrap_or(1.0);
        Extended::Endowment {
            term: m,
            amount: (reserve - insurance) / unit,
        }
    } else {
        best_fit_term(state, pricing, t, reserve, Product::LifeInsurance)
    }
}
