use super::error::CalcResult;
use super::schedule::{percentage_of, round_currency};
use super::types::{LumpsumInputs, LumpsumResult, LumpsumYearRow};
use super::validate::{non_negative, years};

/// One-time investment compounded once per year.
pub fn calculate_lumpsum(inputs: &LumpsumInputs) -> CalcResult<LumpsumResult> {
    non_negative("totalInvestment", inputs.total_investment)?;
    non_negative("annualRate", inputs.annual_rate)?;
    years("years", inputs.years)?;

    let annual_rate = inputs.annual_rate / 100.0;
    let mut current = inputs.total_investment;
    let mut yearly_breakdown = Vec::with_capacity(inputs.years as usize);
    for year in 1..=inputs.years {
        let interest = current * annual_rate;
        let year_end = current * (1.0 + annual_rate);
        yearly_breakdown.push(LumpsumYearRow {
            year,
            year_start_value: round_currency(current),
            interest_earned: round_currency(interest),
            year_end_value: round_currency(year_end),
        });
        current = year_end;
    }

    let future_value = inputs.total_investment * (1.0 + annual_rate).powf(inputs.years as f64);
    let estimated_returns = future_value - inputs.total_investment;

    Ok(LumpsumResult {
        total_investment: round_currency(inputs.total_investment),
        estimated_returns: round_currency(estimated_returns),
        future_value: round_currency(future_value),
        returns_percentage: percentage_of(estimated_returns, future_value),
        yearly_breakdown,
    })
}
