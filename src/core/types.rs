use serde::{Deserialize, Serialize};

// Input records decode from camelCase keys and a missing key keeps its default.

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipInputs {
    pub monthly_investment: f64,
    pub annual_rate: f64,
    pub years: u32,
}

impl Default for SipInputs {
    fn default() -> Self {
        Self {
            monthly_investment: 25_000.0,
            annual_rate: 12.0,
            years: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepUpSipInputs {
    pub monthly_investment: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub step_up_percent: f64,
}

impl Default for StepUpSipInputs {
    fn default() -> Self {
        Self {
            monthly_investment: 25_000.0,
            annual_rate: 12.0,
            years: 10,
            step_up_percent: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LumpsumInputs {
    pub total_investment: f64,
    pub annual_rate: f64,
    pub years: u32,
}

impl Default for LumpsumInputs {
    fn default() -> Self {
        Self {
            total_investment: 1_000_000.0,
            annual_rate: 12.0,
            years: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmiInputs {
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub tenure_years: u32,
}

impl Default for EmiInputs {
    fn default() -> Self {
        Self {
            loan_amount: 5_000_000.0,
            annual_rate: 8.5,
            tenure_years: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepUpEmiInputs {
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub tenure_years: u32,
    pub step_up_percent: f64,
}

impl Default for StepUpEmiInputs {
    fn default() -> Self {
        Self {
            loan_amount: 5_000_000.0,
            annual_rate: 8.5,
            tenure_years: 20,
            step_up_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwpInputs {
    pub total_investment: f64,
    pub monthly_withdrawal: f64,
    pub annual_rate: f64,
    pub years: u32,
}

impl Default for SwpInputs {
    fn default() -> Self {
        Self {
            total_investment: 5_000_000.0,
            monthly_withdrawal: 50_000.0,
            annual_rate: 10.0,
            years: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepUpSwpInputs {
    pub total_investment: f64,
    pub monthly_withdrawal: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub step_up_percent: f64,
}

impl Default for StepUpSwpInputs {
    fn default() -> Self {
        Self {
            total_investment: 5_000_000.0,
            monthly_withdrawal: 40_000.0,
            annual_rate: 10.0,
            years: 10,
            step_up_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeTaxInputs {
    pub gross_income: f64,
    #[serde(rename = "deduction80C", alias = "deduction80c")]
    pub deduction_80c: f64,
    #[serde(rename = "deduction80D", alias = "deduction80d")]
    pub deduction_80d: f64,
    pub other_deductions: f64,
}

impl Default for IncomeTaxInputs {
    fn default() -> Self {
        Self {
            gross_income: 1_200_000.0,
            deduction_80c: 0.0,
            deduction_80d: 25_000.0,
            other_deductions: 50_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYearRow {
    pub year: u32,
    pub investment: f64,
    pub total_invested: f64,
    pub interest_earned: f64,
    pub year_end_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub total_investment: f64,
    pub estimated_returns: f64,
    pub future_value: f64,
    pub returns_percentage: f64,
    pub yearly_breakdown: Vec<SipYearRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumYearRow {
    pub year: u32,
    pub year_start_value: f64,
    pub interest_earned: f64,
    pub year_end_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub total_investment: f64,
    pub estimated_returns: f64,
    pub future_value: f64,
    pub returns_percentage: f64,
    pub yearly_breakdown: Vec<LumpsumYearRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiYearRow {
    pub year: u32,
    /// Installment in effect during this year.
    pub monthly_emi: f64,
    pub emi_paid: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub outstanding_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub loan_amount: f64,
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal_percentage: f64,
    pub interest_percentage: f64,
    pub yearly_breakdown: Vec<EmiYearRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpEmiResult {
    pub loan_amount: f64,
    pub first_month_emi: f64,
    pub last_month_emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal_percentage: f64,
    pub interest_percentage: f64,
    pub converged: bool,
    pub solver_iterations: u32,
    /// Month in which the balance reached zero, if it did within the tenure.
    pub payoff_month: Option<u32>,
    pub yearly_breakdown: Vec<EmiYearRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpYearRow {
    pub year: u32,
    pub withdrawal: f64,
    pub total_withdrawn: f64,
    pub balance_start: f64,
    pub balance_end: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub initial_investment: f64,
    pub total_withdrawal: f64,
    pub total_interest: f64,
    pub remaining_balance: f64,
    /// Remaining balance relative to the starting corpus; exceeds 100 when
    /// growth outpaces withdrawals.
    pub remaining_percentage: f64,
    pub depletion_month: Option<u32>,
    pub yearly_breakdown: Vec<SwpYearRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlabRow {
    pub slab: String,
    pub income: f64,
    pub rate: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxResult {
    pub gross_income: f64,
    pub total_deductions: f64,
    pub taxable_income: f64,
    pub tax_before_cess: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub net_income: f64,
    pub effective_tax_rate: f64,
    pub slab_breakdown: Vec<TaxSlabRow>,
}
