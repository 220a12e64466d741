use super::error::CalcResult;
use super::schedule::{StepUpSchedule, monthly_rate, percentage_of, round_currency};
use super::types::{StepUpSwpInputs, SwpInputs, SwpResult, SwpYearRow};
use super::validate::{non_negative, years};

pub fn calculate_swp(inputs: &SwpInputs) -> CalcResult<SwpResult> {
    validate_withdrawals(
        inputs.total_investment,
        inputs.monthly_withdrawal,
        inputs.annual_rate,
    )?;
    years("years", inputs.years)?;
    Ok(simulate_withdrawals(
        inputs.total_investment,
        inputs.monthly_withdrawal,
        inputs.annual_rate,
        inputs.years,
        0.0,
    ))
}

pub fn calculate_step_up_swp(inputs: &StepUpSwpInputs) -> CalcResult<SwpResult> {
    validate_withdrawals(
        inputs.total_investment,
        inputs.monthly_withdrawal,
        inputs.annual_rate,
    )?;
    years("years", inputs.years)?;
    non_negative("stepUpPercent", inputs.step_up_percent)?;
    Ok(simulate_withdrawals(
        inputs.total_investment,
        inputs.monthly_withdrawal,
        inputs.annual_rate,
        inputs.years,
        inputs.step_up_percent,
    ))
}

fn validate_withdrawals(
    total_investment: f64,
    monthly_withdrawal: f64,
    annual_rate: f64,
) -> CalcResult<()> {
    non_negative("totalInvestment", total_investment)?;
    non_negative("monthlyWithdrawal", monthly_withdrawal)?;
    non_negative("annualRate", annual_rate)
}

/// Grows the corpus monthly and takes the withdrawal after growth. The month
/// in which the grown balance cannot cover the withdrawal pays out whatever is
/// left and ends the simulation.
fn simulate_withdrawals(
    total_investment: f64,
    initial_withdrawal: f64,
    annual_rate: f64,
    years: u32,
    step_up_percent: f64,
) -> SwpResult {
    let growth = 1.0 + monthly_rate(annual_rate);
    let mut balance = total_investment;
    let mut total_withdrawn = 0.0;
    let mut total_interest = 0.0;
    let mut depletion_month = None;

    let mut year_start = balance;
    let mut year_withdrawal = 0.0;
    let mut year_interest = 0.0;
    let mut yearly_breakdown = Vec::with_capacity(years as usize);

    for period in StepUpSchedule::new(initial_withdrawal, step_up_percent, years) {
        if period.month == 1 {
            year_start = balance;
        }

        let grown = balance * growth;
        let interest = grown - balance;
        year_interest += interest;
        total_interest += interest;

        let withdrawal = if grown - period.amount <= 0.0 {
            depletion_month = Some(period.index);
            balance = 0.0;
            grown
        } else {
            balance = grown - period.amount;
            period.amount
        };
        year_withdrawal += withdrawal;
        total_withdrawn += withdrawal;

        let depleted = depletion_month.is_some();
        if period.ends_year() || depleted {
            yearly_breakdown.push(SwpYearRow {
                year: period.year,
                withdrawal: round_currency(year_withdrawal),
                total_withdrawn: round_currency(total_withdrawn),
                balance_start: round_currency(year_start),
                balance_end: round_currency(balance),
                interest_earned: round_currency(year_interest),
            });
            year_withdrawal = 0.0;
            year_interest = 0.0;
        }
        if depleted {
            break;
        }
    }

    SwpResult {
        initial_investment: round_currency(total_investment),
        total_withdrawal: round_currency(total_withdrawn),
        total_interest: round_currency(total_interest),
        remaining_balance: round_currency(balance),
        remaining_percentage: percentage_of(balance, total_investment),
        depletion_month,
        yearly_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn swp_default_scenario_survives_the_horizon() {
        let result = calculate_swp(&SwpInputs::default()).expect("valid inputs");

        assert_eq!(result.depletion_month, None);
        assert_eq!(result.total_withdrawal, 6_000_000.0);
        assert_eq!(result.remaining_balance, 3_292_959.0);
        assert_eq!(result.yearly_breakdown.len(), 10);

        let first = result.yearly_breakdown[0];
        assert_eq!(first.balance_start, 5_000_000.0);
        assert_eq!(first.withdrawal, 600_000.0);
        assert_eq!(first.balance_end, 4_895_287.0);
        assert_eq!(first.interest_earned, 495_287.0);
    }

    #[test]
    fn swp_depletion_caps_final_withdrawal() {
        let result = calculate_swp(&SwpInputs {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 100_000.0,
            annual_rate: 8.0,
            years: 5,
        })
        .expect("valid inputs");

        assert_eq!(result.depletion_month, Some(11));
        assert_eq!(result.remaining_balance, 0.0);
        assert_eq!(result.yearly_breakdown.len(), 1);
        assert_eq!(result.total_withdrawal, 1_038_417.0);
        assert_eq!(result.total_withdrawal, result.yearly_breakdown[0].withdrawal);
        assert!(result.total_withdrawal < 100_000.0 * 11.0);
        assert_eq!(result.yearly_breakdown[0].balance_end, 0.0);
    }

    #[test]
    fn swp_remaining_balance_can_exceed_corpus() {
        let result = calculate_swp(&SwpInputs {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 5_000.0,
            annual_rate: 12.0,
            years: 10,
        })
        .expect("valid inputs");

        assert_eq!(result.depletion_month, None);
        assert!(result.remaining_balance > 1_000_000.0);
        assert!(result.remaining_percentage > 100.0);
    }

    #[test]
    fn swp_zero_years_leaves_corpus_untouched() {
        let result = calculate_swp(&SwpInputs {
            years: 0,
            ..SwpInputs::default()
        })
        .expect("valid inputs");

        assert_eq!(result.remaining_balance, 5_000_000.0);
        assert_eq!(result.total_withdrawal, 0.0);
        assert_eq!(result.remaining_percentage, 100.0);
        assert!(result.yearly_breakdown.is_empty());
    }

    #[test]
    fn swp_rejects_negative_withdrawal() {
        let err = calculate_swp(&SwpInputs {
            monthly_withdrawal: -1.0,
            ..SwpInputs::default()
        })
        .expect_err("negative withdrawal must fail");
        assert_eq!(err.field(), "monthlyWithdrawal");
    }

    #[test]
    fn swp_rejects_horizon_beyond_cap() {
        let err = calculate_swp(&SwpInputs {
            years: u32::MAX,
            ..SwpInputs::default()
        })
        .expect_err("unbounded horizon must fail");
        assert_eq!(err.field(), "years");

        let err = calculate_step_up_swp(&StepUpSwpInputs {
            years: 101,
            ..StepUpSwpInputs::default()
        })
        .expect_err("unbounded horizon must fail");
        assert_eq!(err.field(), "years");
    }

    #[test]
    fn step_up_swp_default_scenario() {
        let result = calculate_step_up_swp(&StepUpSwpInputs::default()).expect("valid inputs");

        assert_eq!(result.depletion_month, None);
        assert_eq!(result.total_withdrawal, 6_037_388.0);
        assert_eq!(result.remaining_balance, 3_630_789.0);
        assert_eq!(result.yearly_breakdown[0].withdrawal, 480_000.0);
        assert_eq!(result.yearly_breakdown[9].withdrawal, 744_638.0);
    }

    #[test]
    fn step_up_swp_applies_step_before_first_withdrawal_of_year() {
        let result = calculate_step_up_swp(&StepUpSwpInputs {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 50_000.0,
            annual_rate: 0.0,
            years: 3,
            step_up_percent: 50.0,
        })
        .expect("valid inputs");

        // 12 x 50,000 in year one leaves 400,000; year two draws 75,000 a month
        // and the sixth draw only finds 25,000.
        assert_eq!(result.depletion_month, Some(18));
        assert_eq!(result.yearly_breakdown.len(), 2);
        assert_eq!(result.yearly_breakdown[0].withdrawal, 600_000.0);
        assert_eq!(result.yearly_breakdown[1].withdrawal, 400_000.0);
        assert_eq!(result.total_withdrawal, 1_000_000.0);
    }

    #[test]
    fn step_up_swp_without_step_up_matches_swp() {
        let plain = calculate_swp(&SwpInputs::default()).expect("valid inputs");
        let stepped = calculate_step_up_swp(&StepUpSwpInputs {
            monthly_withdrawal: 50_000.0,
            step_up_percent: 0.0,
            ..StepUpSwpInputs::default()
        })
        .expect("valid inputs");
        assert_eq!(plain, stepped);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_depletion_is_final(
            corpus in 0u32..50_000_000,
            withdrawal in 0u32..500_000,
            rate_bp in 0u32..3001,
            years in 0u32..41,
            step_up in 0u32..51
        ) {
            let result = calculate_step_up_swp(&StepUpSwpInputs {
                total_investment: corpus as f64,
                monthly_withdrawal: withdrawal as f64,
                annual_rate: rate_bp as f64 / 100.0,
                years,
                step_up_percent: step_up as f64,
            }).expect("valid inputs");

            if let Some(month) = result.depletion_month {
                prop_assert!(month >= 1 && month <= years * 12);
                let last = result.yearly_breakdown.last().expect("depletion implies a row");
                prop_assert_eq!(last.year, (month - 1) / 12 + 1);
                prop_assert_eq!(last.balance_end, 0.0);
                prop_assert_eq!(result.remaining_balance, 0.0);
            } else {
                prop_assert_eq!(result.yearly_breakdown.len(), years as usize);
            }
            for pair in result.yearly_breakdown.windows(2) {
                prop_assert!(
                    pair[0].balance_end > 0.0 || pair[0].balance_end == pair[1].balance_start
                );
                prop_assert!(pair[1].total_withdrawn >= pair[0].total_withdrawn);
            }
        }

        #[test]
        fn prop_withdrawals_bounded_by_corpus_and_growth(
            corpus in 0u32..50_000_000,
            withdrawal in 0u32..500_000,
            rate_bp in 0u32..3001,
            years in 0u32..41,
            step_up in 0u32..51
        ) {
            let result = calculate_step_up_swp(&StepUpSwpInputs {
                total_investment: corpus as f64,
                monthly_withdrawal: withdrawal as f64,
                annual_rate: rate_bp as f64 / 100.0,
                years,
                step_up_percent: step_up as f64,
            }).expect("valid inputs");

            prop_assert!(result.total_withdrawal >= 0.0);
            prop_assert!(
                result.total_withdrawal <= result.initial_investment + result.total_interest + 2.0
            );
            prop_assert!(result.remaining_balance >= 0.0);
        }
    }
}
