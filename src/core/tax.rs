use super::error::CalcResult;
use super::schedule::{percentage_of, round_currency};
use super::types::{IncomeTaxInputs, IncomeTaxResult, TaxSlabRow};
use super::validate::non_negative;

const LAKH: f64 = 100_000.0;
const CESS_RATE: f64 = 0.04;

#[derive(Debug, Clone, Copy)]
struct TaxSlab {
    lower: f64,
    /// `None` for the open-ended top slab.
    upper: Option<f64>,
    rate: f64,
}

const SLABS: [TaxSlab; 7] = [
    TaxSlab {
        lower: 0.0,
        upper: Some(400_000.0),
        rate: 0.0,
    },
    TaxSlab {
        lower: 400_000.0,
        upper: Some(800_000.0),
        rate: 5.0,
    },
    TaxSlab {
        lower: 800_000.0,
        upper: Some(1_200_000.0),
        rate: 10.0,
    },
    TaxSlab {
        lower: 1_200_000.0,
        upper: Some(1_600_000.0),
        rate: 15.0,
    },
    TaxSlab {
        lower: 1_600_000.0,
        upper: Some(2_000_000.0),
        rate: 20.0,
    },
    TaxSlab {
        lower: 2_000_000.0,
        upper: Some(2_400_000.0),
        rate: 25.0,
    },
    TaxSlab {
        lower: 2_400_000.0,
        upper: None,
        rate: 30.0,
    },
];

impl TaxSlab {
    fn label(&self) -> String {
        let lower = (self.lower / LAKH).round();
        match self.upper {
            Some(upper) => format!("₹{lower}L - ₹{}L", (upper / LAKH).round()),
            None => format!("Above ₹{lower}L"),
        }
    }

    fn width(&self, remaining: f64) -> f64 {
        match self.upper {
            Some(upper) => remaining.min(upper - self.lower),
            None => remaining,
        }
    }
}

/// Progressive slab tax on income after deductions, plus a flat 4% cess on
/// the slab tax.
pub fn calculate_income_tax(inputs: &IncomeTaxInputs) -> CalcResult<IncomeTaxResult> {
    non_negative("grossIncome", inputs.gross_income)?;
    non_negative("deduction80C", inputs.deduction_80c)?;
    non_negative("deduction80D", inputs.deduction_80d)?;
    non_negative("otherDeductions", inputs.other_deductions)?;

    let total_deductions = inputs.deduction_80c + inputs.deduction_80d + inputs.other_deductions;
    let taxable_income = (inputs.gross_income - total_deductions).max(0.0);

    let mut remaining = taxable_income;
    let mut tax_before_cess = 0.0;
    let mut slab_breakdown = Vec::new();
    for slab in &SLABS {
        if remaining <= 0.0 {
            break;
        }
        let income = slab.width(remaining);
        let tax = income * slab.rate / 100.0;
        tax_before_cess += tax;
        if income > 0.0 {
            slab_breakdown.push(TaxSlabRow {
                slab: slab.label(),
                income: round_currency(income),
                rate: slab.rate,
                tax: round_currency(tax),
            });
        }
        remaining -= income;
    }

    let cess = tax_before_cess * CESS_RATE;
    let total_tax = tax_before_cess + cess;

    Ok(IncomeTaxResult {
        gross_income: round_currency(inputs.gross_income),
        total_deductions: round_currency(total_deductions),
        taxable_income: round_currency(taxable_income),
        tax_before_cess: round_currency(tax_before_cess),
        cess: round_currency(cess),
        total_tax: round_currency(total_tax),
        net_income: round_currency(inputs.gross_income - total_tax),
        effective_tax_rate: percentage_of(total_tax, inputs.gross_income),
        slab_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn twelve_lakh_with_standard_deductions() {
        let result = calculate_income_tax(&IncomeTaxInputs {
            gross_income: 1_200_000.0,
            deduction_80c: 0.0,
            deduction_80d: 25_000.0,
            other_deductions: 50_000.0,
        })
        .expect("valid inputs");

        assert_eq!(result.total_deductions, 75_000.0);
        assert_eq!(result.taxable_income, 1_125_000.0);
        assert_eq!(result.tax_before_cess, 52_500.0);
        assert_eq!(result.cess, 2_100.0);
        assert_eq!(result.total_tax, 54_600.0);
        assert_eq!(result.net_income, 1_145_400.0);
        assert_approx(result.effective_tax_rate, 4.55);

        let slabs: Vec<(&str, f64, f64)> = result
            .slab_breakdown
            .iter()
            .map(|row| (row.slab.as_str(), row.income, row.tax))
            .collect();
        assert_eq!(
            slabs,
            vec![
                ("₹0L - ₹4L", 400_000.0, 0.0),
                ("₹4L - ₹8L", 400_000.0, 20_000.0),
                ("₹8L - ₹12L", 325_000.0, 32_500.0),
            ]
        );
    }

    #[test]
    fn top_slab_is_open_ended() {
        let result = calculate_income_tax(&IncomeTaxInputs {
            gross_income: 3_000_000.0,
            deduction_80c: 0.0,
            deduction_80d: 0.0,
            other_deductions: 0.0,
        })
        .expect("valid inputs");

        assert_eq!(result.slab_breakdown.len(), 7);
        let top = result.slab_breakdown.last().expect("top slab");
        assert_eq!(top.slab, "Above ₹24L");
        assert_eq!(top.income, 600_000.0);
        assert_eq!(top.tax, 180_000.0);
        // 20k + 40k + 60k + 80k + 100k + 180k
        assert_eq!(result.tax_before_cess, 480_000.0);
    }

    #[test]
    fn deductions_beyond_income_floor_at_zero() {
        let result = calculate_income_tax(&IncomeTaxInputs {
            gross_income: 100_000.0,
            deduction_80c: 150_000.0,
            deduction_80d: 0.0,
            other_deductions: 0.0,
        })
        .expect("valid inputs");

        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.total_tax, 0.0);
        assert!(result.slab_breakdown.is_empty());
        assert_eq!(result.net_income, 100_000.0);
    }

    #[test]
    fn zero_gross_income_has_zero_effective_rate() {
        let result = calculate_income_tax(&IncomeTaxInputs {
            gross_income: 0.0,
            ..IncomeTaxInputs::default()
        })
        .expect("valid inputs");
        assert_eq!(result.effective_tax_rate, 0.0);
        assert_eq!(result.total_tax, 0.0);
    }

    #[test]
    fn rejects_negative_deduction() {
        let err = calculate_income_tax(&IncomeTaxInputs {
            deduction_80c: -10.0,
            ..IncomeTaxInputs::default()
        })
        .expect_err("negative deduction must fail");
        assert_eq!(err.field(), "deduction80C");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_tax_is_monotonic_in_income(
            gross in 0u32..10_000_000,
            bump in 0u32..1_000_000,
            deductions in 0u32..500_000
        ) {
            let lower = calculate_income_tax(&IncomeTaxInputs {
                gross_income: gross as f64,
                deduction_80c: deductions as f64,
                deduction_80d: 0.0,
                other_deductions: 0.0,
            }).expect("valid inputs");
            let higher = calculate_income_tax(&IncomeTaxInputs {
                gross_income: (gross + bump) as f64,
                deduction_80c: deductions as f64,
                deduction_80d: 0.0,
                other_deductions: 0.0,
            }).expect("valid inputs");

            prop_assert!(higher.total_tax >= lower.total_tax);
            prop_assert!(higher.total_tax <= higher.taxable_income);
        }

        #[test]
        fn prop_slab_incomes_sum_to_taxable(
            gross in 0u32..10_000_000,
            deductions in 0u32..500_000
        ) {
            let result = calculate_income_tax(&IncomeTaxInputs {
                gross_income: gross as f64,
                deduction_80c: 0.0,
                deduction_80d: 0.0,
                other_deductions: deductions as f64,
            }).expect("valid inputs");

            let income_sum: f64 = result.slab_breakdown.iter().map(|row| row.income).sum();
            let tax_sum: f64 = result.slab_breakdown.iter().map(|row| row.tax).sum();
            prop_assert!((income_sum - result.taxable_income).abs() < 1e-6);
            let rows = result.slab_breakdown.len() as f64;
            prop_assert!((tax_sum - result.tax_before_cess).abs() <= rows);
            prop_assert!((tax_sum * (1.0 + CESS_RATE) - result.total_tax).abs() <= rows + 1.0);
            prop_assert!(result.slab_breakdown.iter().all(|row| row.income > 0.0));
        }
    }
}
