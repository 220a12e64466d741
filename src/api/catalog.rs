//! Calculator catalog served at `/api/calculators`.
//!
//! Bounds mirror the slider ranges of each calculator's input card. They
//! describe sensible inputs for clients; the engines do not clamp to them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBounds {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub inputs: &'static [InputBounds],
}

const fn bounds(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
) -> InputBounds {
    InputBounds {
        name,
        label,
        min,
        max,
        step,
        default,
    }
}

const RETURN_RATE: InputBounds = bounds(
    "annualRate",
    "Expected return rate (p.a)",
    1.0,
    30.0,
    0.5,
    12.0,
);
const TIME_PERIOD: InputBounds = bounds("years", "Time period", 1.0, 40.0, 1.0, 10.0);

const SIP_INPUTS: [InputBounds; 3] = [
    bounds(
        "monthlyInvestment",
        "Monthly investment",
        0.0,
        100_000.0,
        500.0,
        25_000.0,
    ),
    RETURN_RATE,
    TIME_PERIOD,
];

const STEP_UP_SIP_INPUTS: [InputBounds; 4] = [
    bounds(
        "monthlyInvestment",
        "Monthly investment",
        0.0,
        1_000_000.0,
        500.0,
        25_000.0,
    ),
    RETURN_RATE,
    TIME_PERIOD,
    bounds("stepUpPercent", "Annual step up", 0.0, 50.0, 1.0, 10.0),
];

const LUMPSUM_INPUTS: [InputBounds; 3] = [
    bounds(
        "totalInvestment",
        "Total investment",
        0.0,
        100_000_000.0,
        10_000.0,
        1_000_000.0,
    ),
    bounds(
        "annualRate",
        "Expected return rate (p.a)",
        0.0,
        30.0,
        0.5,
        12.0,
    ),
    bounds("years", "Time period", 0.0, 40.0, 1.0, 10.0),
];

const EMI_INPUTS: [InputBounds; 3] = [
    bounds(
        "loanAmount",
        "Loan amount",
        0.0,
        100_000_000.0,
        100_000.0,
        5_000_000.0,
    ),
    bounds("annualRate", "Interest rate (p.a)", 0.0, 30.0, 0.5, 8.5),
    bounds("tenureYears", "Loan tenure", 0.0, 40.0, 1.0, 20.0),
];

const STEP_UP_EMI_INPUTS: [InputBounds; 4] = [
    bounds(
        "loanAmount",
        "Loan amount",
        0.0,
        100_000_000.0,
        100_000.0,
        5_000_000.0,
    ),
    bounds("annualRate", "Interest rate (p.a)", 0.0, 30.0, 0.5, 8.5),
    bounds("tenureYears", "Loan tenure", 0.0, 40.0, 1.0, 20.0),
    bounds("stepUpPercent", "Annual step up", 0.0, 50.0, 1.0, 5.0),
];

const SWP_INPUTS: [InputBounds; 4] = [
    bounds(
        "totalInvestment",
        "Total investment",
        0.0,
        50_000_000.0,
        100_000.0,
        5_000_000.0,
    ),
    bounds(
        "monthlyWithdrawal",
        "Monthly withdrawal",
        0.0,
        500_000.0,
        1_000.0,
        50_000.0,
    ),
    bounds(
        "annualRate",
        "Expected return rate (p.a)",
        0.0,
        30.0,
        0.5,
        10.0,
    ),
    bounds("years", "Time period", 0.0, 40.0, 1.0, 10.0),
];

const STEP_UP_SWP_INPUTS: [InputBounds; 5] = [
    bounds(
        "totalInvestment",
        "Total investment",
        0.0,
        50_000_000.0,
        100_000.0,
        5_000_000.0,
    ),
    bounds(
        "monthlyWithdrawal",
        "Initial monthly withdrawal",
        0.0,
        500_000.0,
        1_000.0,
        40_000.0,
    ),
    bounds("stepUpPercent", "Annual step up", 0.0, 20.0, 1.0, 5.0),
    bounds(
        "annualRate",
        "Expected return rate (p.a)",
        0.0,
        30.0,
        0.5,
        10.0,
    ),
    bounds("years", "Time period", 0.0, 40.0, 1.0, 10.0),
];

const INCOME_TAX_INPUTS: [InputBounds; 4] = [
    bounds(
        "grossIncome",
        "Gross annual income",
        0.0,
        100_000_000.0,
        10_000.0,
        1_200_000.0,
    ),
    bounds(
        "deduction80C",
        "Deduction under 80C",
        0.0,
        150_000.0,
        10_000.0,
        0.0,
    ),
    bounds(
        "deduction80D",
        "Deduction under 80D",
        0.0,
        100_000.0,
        5_000.0,
        25_000.0,
    ),
    bounds(
        "otherDeductions",
        "Other deductions",
        0.0,
        500_000.0,
        10_000.0,
        50_000.0,
    ),
];

pub const CALCULATORS: [CalculatorInfo; 8] = [
    CalculatorInfo {
        slug: "sip",
        title: "SIP Calculator",
        description: "Future value of a fixed monthly investment",
        inputs: &SIP_INPUTS,
    },
    CalculatorInfo {
        slug: "step-up-sip",
        title: "Step-Up SIP Calculator",
        description: "Monthly investment that rises by a fixed percentage every year",
        inputs: &STEP_UP_SIP_INPUTS,
    },
    CalculatorInfo {
        slug: "lumpsum",
        title: "Lumpsum Calculator",
        description: "One-time investment compounded annually",
        inputs: &LUMPSUM_INPUTS,
    },
    CalculatorInfo {
        slug: "emi",
        title: "EMI Calculator",
        description: "Level monthly installment and amortization schedule for a loan",
        inputs: &EMI_INPUTS,
    },
    CalculatorInfo {
        slug: "step-up-emi",
        title: "Step-Up EMI Calculator",
        description: "Loan installment that rises every year and still retires the loan on time",
        inputs: &STEP_UP_EMI_INPUTS,
    },
    CalculatorInfo {
        slug: "swp",
        title: "SWP Calculator",
        description: "Fixed monthly withdrawals from an invested corpus",
        inputs: &SWP_INPUTS,
    },
    CalculatorInfo {
        slug: "step-up-swp",
        title: "Step-Up SWP Calculator",
        description: "Monthly withdrawals that rise by a fixed percentage every year",
        inputs: &STEP_UP_SWP_INPUTS,
    },
    CalculatorInfo {
        slug: "income-tax",
        title: "Income Tax Calculator",
        description: "Progressive slab tax with 4% cess",
        inputs: &INCOME_TAX_INPUTS,
    },
];
