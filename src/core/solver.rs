//! Initial-installment search for step-up loans.
//!
//! With an installment that grows every year the first-year installment that
//! exactly retires the loan at the end of the tenure is found by bisection on
//! the signed leftover balance.

use serde::Serialize;

use super::emi::standard_emi;
use super::schedule::{StepUpSchedule, month_count};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute leftover balance, in currency units, accepted as paid off.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate: f64,
    pub leftover: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub initial_installment: f64,
    pub leftover_balance: f64,
    pub iterations: Vec<SolveIteration>,
    pub converged: bool,
}

impl SolveOutcome {
    fn exact(initial_installment: f64, leftover_balance: f64) -> Self {
        Self {
            initial_installment,
            leftover_balance,
            iterations: Vec::new(),
            converged: true,
        }
    }
}

/// Balance left after paying `installment` (stepped up every year) for the
/// whole tenure. Negative when the candidate overpays. Not clamped, so the
/// sign always tells which side of the root the candidate is on.
pub fn leftover_balance(
    principal: f64,
    monthly_rate: f64,
    years: u32,
    installment: f64,
    step_up_percent: f64,
) -> f64 {
    let growth = 1.0 + monthly_rate;
    StepUpSchedule::new(installment, step_up_percent, years)
        .fold(principal, |balance, period| balance * growth - period.amount)
}

/// Starting guess: the level installment, or for interest-free loans the
/// exact step-weighted share `P / sum(12 * (1+s)^y)`.
pub fn baseline_installment(
    principal: f64,
    monthly_rate: f64,
    years: u32,
    step_up_percent: f64,
) -> f64 {
    let months = month_count(years);
    if months == 0 || principal == 0.0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        let factor = 1.0 + step_up_percent / 100.0;
        let weighted_months: f64 = (0..years).map(|y| 12.0 * factor.powf(y as f64)).sum();
        return principal / weighted_months;
    }
    standard_emi(principal, monthly_rate, months)
}

pub fn solve_initial_installment(
    principal: f64,
    monthly_rate: f64,
    years: u32,
    step_up_percent: f64,
    config: SolverConfig,
) -> SolveOutcome {
    let residual = |candidate: f64| {
        leftover_balance(principal, monthly_rate, years, candidate, step_up_percent)
    };

    let baseline = baseline_installment(principal, monthly_rate, years, step_up_percent);
    let baseline_leftover = residual(baseline);
    if baseline_leftover.abs() < config.tolerance {
        return SolveOutcome::exact(baseline, baseline_leftover);
    }

    // Zero always underpays a positive loan; the baseline overpays whenever the
    // installment steps up. Widen the top until the root is bracketed.
    let mut lo = 0.0;
    let mut hi = baseline;
    let mut hi_leftover = baseline_leftover;
    let mut widenings = 0;
    while hi_leftover > 0.0 && hi > 0.0 && widenings < 64 {
        lo = hi;
        hi *= 2.0;
        hi_leftover = residual(hi);
        widenings += 1;
    }

    let mut best = (hi, hi_leftover);
    let mut iterations = Vec::with_capacity(config.max_iterations as usize);
    let mut converged = false;
    if hi_leftover <= 0.0 {
        let mut it = 0;
        while it < config.max_iterations {
            it += 1;
            let mid = (lo + hi) * 0.5;
            let leftover = residual(mid);
            iterations.push(SolveIteration {
                iteration: it,
                lower_bound: lo,
                upper_bound: hi,
                candidate: mid,
                leftover,
            });

            if leftover.abs() < best.1.abs() {
                best = (mid, leftover);
            }
            if leftover.abs() < config.tolerance {
                converged = true;
                break;
            }
            if leftover > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
    }

    if converged {
        tracing::debug!(
            principal,
            years,
            step_up_percent,
            iterations = iterations.len(),
            installment = best.0,
            "solved step-up installment"
        );
    } else {
        tracing::warn!(
            principal,
            years,
            step_up_percent,
            leftover = best.1,
            "step-up installment search stopped before tolerance; returning best estimate"
        );
    }

    SolveOutcome {
        initial_installment: best.0,
        leftover_balance: best.1,
        iterations,
        converged,
    }
}
