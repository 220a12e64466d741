use super::error::CalcResult;
use super::schedule::{
    StepUpSchedule, compound_growth, month_count, monthly_rate, percentage_of, round_currency,
};
use super::types::{SipInputs, SipResult, SipYearRow, StepUpSipInputs};
use super::validate::{non_negative, percentage, years};

/// Future value of a fixed monthly contribution, compounded monthly with the
/// contribution credited at the start of each month.
pub fn calculate_sip(inputs: &SipInputs) -> CalcResult<SipResult> {
    validate_contribution(inputs.monthly_investment, inputs.annual_rate)?;
    years("years", inputs.years)?;

    let rate = monthly_rate(inputs.annual_rate);
    let months = month_count(inputs.years);
    let contribution = inputs.monthly_investment;
    let future_value = annuity_due_value(contribution, rate, months);
    let total_investment = contribution * months as f64;

    let yearly_investment = contribution * 12.0;
    let yearly_breakdown = (1..=inputs.years)
        .map(|year| {
            let elapsed = month_count(year);
            let value = annuity_due_value(contribution, rate, elapsed);
            let invested = contribution * elapsed as f64;
            SipYearRow {
                year,
                investment: round_currency(yearly_investment),
                total_invested: round_currency(invested),
                interest_earned: round_currency(value - invested),
                year_end_value: round_currency(value),
            }
        })
        .collect();

    Ok(build_result(total_investment, future_value, yearly_breakdown))
}

/// Monthly contributions that grow by `step_up_percent` at the start of every
/// year after the first. No closed form exists once the contribution changes,
/// so the balance is simulated month by month.
pub fn calculate_step_up_sip(inputs: &StepUpSipInputs) -> CalcResult<SipResult> {
    validate_contribution(inputs.monthly_investment, inputs.annual_rate)?;
    years("years", inputs.years)?;
    non_negative("stepUpPercent", inputs.step_up_percent)?;

    let growth = 1.0 + monthly_rate(inputs.annual_rate);
    let mut balance = 0.0;
    let mut total_invested = 0.0;
    let mut year_investment = 0.0;
    let mut yearly_breakdown = Vec::with_capacity(inputs.years as usize);

    for period in StepUpSchedule::new(
        inputs.monthly_investment,
        inputs.step_up_percent,
        inputs.years,
    ) {
        balance = (balance + period.amount) * growth;
        total_invested += period.amount;
        year_investment += period.amount;

        if period.ends_year() {
            yearly_breakdown.push(SipYearRow {
                year: period.year,
                investment: round_currency(year_investment),
                total_invested: round_currency(total_invested),
                interest_earned: round_currency(balance - total_invested),
                year_end_value: round_currency(balance),
            });
            year_investment = 0.0;
        }
    }

    Ok(build_result(total_invested, balance, yearly_breakdown))
}

fn annuity_due_value(contribution: f64, rate: f64, months: u32) -> f64 {
    if rate == 0.0 {
        return contribution * months as f64;
    }
    contribution * (compound_growth(rate, months) / rate) * (1.0 + rate)
}

fn validate_contribution(monthly_investment: f64, annual_rate: f64) -> CalcResult<()> {
    non_negative("monthlyInvestment", monthly_investment)?;
    percentage("annualRate", annual_rate)
}

fn build_result(
    total_investment: f64,
    future_value: f64,
    yearly_breakdown: Vec<SipYearRow>,
) -> SipResult {
    let estimated_returns = future_value - total_investment;
    SipResult {
        total_investment: round_currency(total_investment),
        estimated_returns: round_currency(estimated_returns),
        future_value: round_currency(future_value),
        returns_percentage: percentage_of(estimated_returns, future_value),
        yearly_breakdown,
    }
}
