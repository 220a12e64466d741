use super::error::CalcResult;
use super::schedule::{
    StepUpSchedule, compound_growth, month_count, monthly_rate, percentage_of, round_currency,
};
use super::solver::{self, SolveOutcome, SolverConfig};
use super::types::{EmiInputs, EmiResult, EmiYearRow, StepUpEmiInputs, StepUpEmiResult};
use super::validate::{non_negative, years};

/// Level monthly installment that retires `principal` over `months`.
pub fn standard_emi(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 || principal == 0.0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }
    let growth = compound_growth(monthly_rate, months);
    principal * monthly_rate * (1.0 + growth) / growth
}

#[derive(Debug, Clone)]
pub(crate) struct Amortization {
    pub rows: Vec<EmiYearRow>,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
    pub last_installment: f64,
    pub payoff_month: Option<u32>,
}

#[derive(Debug, Default)]
struct YearTally {
    installment: f64,
    paid: f64,
    principal: f64,
    interest: f64,
}

/// Month-by-month loan schedule. The balance never goes below zero: any
/// overshoot in the payoff month is taken back out of that month's principal
/// and payment. The schedule ends with the year in which the loan is repaid.
pub(crate) fn amortize(
    principal: f64,
    monthly_rate: f64,
    years: u32,
    initial_installment: f64,
    step_up_percent: f64,
) -> Amortization {
    let mut balance = principal;
    let mut rows = Vec::with_capacity(years as usize);
    let mut tally = YearTally::default();
    let mut total_paid = 0.0;
    let mut total_interest = 0.0;
    let mut total_principal = 0.0;
    let mut last_installment = 0.0;
    let mut payoff_month = None;

    for period in StepUpSchedule::new(initial_installment, step_up_percent, years) {
        if balance <= 0.0 {
            break;
        }
        if period.month == 1 {
            tally.installment = period.amount;
        }

        let interest = balance * monthly_rate;
        let mut principal_part = period.amount - interest;
        let mut paid = period.amount;
        balance -= principal_part;
        if balance <= 0.0 {
            principal_part += balance;
            paid += balance;
            balance = 0.0;
            payoff_month = Some(period.index);
        }

        tally.paid += paid;
        tally.principal += principal_part;
        tally.interest += interest;
        last_installment = period.amount;

        if period.ends_year() || balance <= 0.0 {
            total_paid += tally.paid;
            total_interest += tally.interest;
            total_principal += tally.principal;
            rows.push(EmiYearRow {
                year: period.year,
                monthly_emi: round_currency(tally.installment),
                emi_paid: round_currency(tally.paid),
                principal_paid: round_currency(tally.principal),
                interest_paid: round_currency(tally.interest),
                outstanding_balance: round_currency(balance.max(0.0)),
            });
            tally = YearTally::default();
        }
    }

    Amortization {
        rows,
        total_paid,
        total_interest,
        total_principal,
        final_balance: balance,
        last_installment,
        payoff_month,
    }
}

pub fn calculate_emi(inputs: &EmiInputs) -> CalcResult<EmiResult> {
    non_negative("loanAmount", inputs.loan_amount)?;
    non_negative("annualRate", inputs.annual_rate)?;
    years("tenureYears", inputs.tenure_years)?;

    let rate = monthly_rate(inputs.annual_rate);
    let months = month_count(inputs.tenure_years);
    let emi = standard_emi(inputs.loan_amount, rate, months);
    let schedule = amortize(inputs.loan_amount, rate, inputs.tenure_years, emi, 0.0);

    let total_payment = emi * months as f64;
    let total_interest = total_payment - inputs.loan_amount;

    Ok(EmiResult {
        loan_amount: round_currency(inputs.loan_amount),
        emi: round_currency(emi),
        total_payment: round_currency(total_payment),
        total_interest: round_currency(total_interest),
        principal_percentage: percentage_of(inputs.loan_amount, total_payment),
        interest_percentage: percentage_of(total_interest, total_payment),
        yearly_breakdown: schedule.rows,
    })
}

pub fn calculate_step_up_emi(inputs: &StepUpEmiInputs) -> CalcResult<StepUpEmiResult> {
    calculate_step_up_emi_with(inputs, SolverConfig::default())
}

/// Loan whose installment rises by `step_up_percent` every year while still
/// retiring the loan within the fixed tenure.
pub fn calculate_step_up_emi_with(
    inputs: &StepUpEmiInputs,
    config: SolverConfig,
) -> CalcResult<StepUpEmiResult> {
    non_negative("loanAmount", inputs.loan_amount)?;
    non_negative("annualRate", inputs.annual_rate)?;
    years("tenureYears", inputs.tenure_years)?;
    non_negative("stepUpPercent", inputs.step_up_percent)?;

    let rate = monthly_rate(inputs.annual_rate);
    let months = month_count(inputs.tenure_years);
    if months == 0 || inputs.loan_amount == 0.0 {
        return Ok(StepUpEmiResult {
            loan_amount: round_currency(inputs.loan_amount),
            first_month_emi: 0.0,
            last_month_emi: 0.0,
            total_payment: 0.0,
            total_interest: 0.0,
            principal_percentage: 0.0,
            interest_percentage: 0.0,
            converged: true,
            solver_iterations: 0,
            payoff_month: None,
            yearly_breakdown: Vec::new(),
        });
    }

    let outcome = if inputs.step_up_percent == 0.0 {
        let emi = standard_emi(inputs.loan_amount, rate, months);
        SolveOutcome {
            initial_installment: emi,
            leftover_balance: 0.0,
            iterations: Vec::new(),
            converged: true,
        }
    } else {
        solver::solve_initial_installment(
            inputs.loan_amount,
            rate,
            inputs.tenure_years,
            inputs.step_up_percent,
            config,
        )
    };

    let schedule = amortize(
        inputs.loan_amount,
        rate,
        inputs.tenure_years,
        outcome.initial_installment,
        inputs.step_up_percent,
    );

    if schedule.final_balance >= config.tolerance {
        tracing::warn!(
            loan_amount = inputs.loan_amount,
            outstanding = schedule.final_balance,
            "step-up schedule ends with an outstanding balance"
        );
    }

    Ok(StepUpEmiResult {
        loan_amount: round_currency(inputs.loan_amount),
        first_month_emi: round_currency(outcome.initial_installment),
        last_month_emi: round_currency(schedule.last_installment),
        total_payment: round_currency(schedule.total_paid),
        total_interest: round_currency(schedule.total_interest),
        principal_percentage: percentage_of(schedule.total_principal, schedule.total_paid),
        interest_percentage: percentage_of(schedule.total_interest, schedule.total_paid),
        converged: outcome.converged,
        solver_iterations: outcome.iterations.len() as u32,
        payoff_month: schedule.payoff_month,
        yearly_breakdown: schedule.rows,
    })
}
