use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

use super::run_http_server;
use crate::core::{
    CalcError, EmiInputs, EmiResult, EmiYearRow, IncomeTaxInputs, IncomeTaxResult, LumpsumInputs,
    LumpsumResult, SipInputs, SipResult, StepUpEmiInputs, StepUpEmiResult, StepUpSipInputs,
    StepUpSwpInputs, SwpInputs, SwpResult, calculate_emi, calculate_income_tax,
    calculate_lumpsum, calculate_sip, calculate_step_up_emi, calculate_step_up_sip,
    calculate_step_up_swp, calculate_swp, format_inr, format_percent,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fincalc",
    about = "Investment, loan and income tax calculators (SIP, lumpsum, EMI, SWP, slab tax)"
)]
pub struct Cli {
    /// Print the full result as JSON instead of a summary table.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(flatten)]
    Calculate(Calculation),
    /// Serve every calculator over HTTP
    Serve(ServeArgs),
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Calculation {
    /// Fixed monthly investment
    Sip(SipArgs),
    /// Monthly investment rising every year
    StepUpSip(StepUpSipArgs),
    /// One-time investment
    Lumpsum(LumpsumArgs),
    /// Level loan installment
    Emi(EmiArgs),
    /// Loan installment rising every year
    StepUpEmi(StepUpEmiArgs),
    /// Fixed monthly withdrawal
    Swp(SwpArgs),
    /// Monthly withdrawal rising every year
    StepUpSwp(StepUpSwpArgs),
    /// Slab income tax with cess
    IncomeTax(IncomeTaxArgs),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SipArgs {
    #[arg(long, default_value_t = 25_000.0)]
    monthly_investment: f64,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
}

impl From<SipArgs> for SipInputs {
    fn from(args: SipArgs) -> Self {
        SipInputs {
            monthly_investment: args.monthly_investment,
            annual_rate: args.annual_rate,
            years: args.years,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct StepUpSipArgs {
    #[arg(long, default_value_t = 25_000.0)]
    monthly_investment: f64,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    #[arg(long, default_value_t = 10.0, help = "Yearly increase of the investment in percent")]
    step_up_percent: f64,
}

impl From<StepUpSipArgs> for StepUpSipInputs {
    fn from(args: StepUpSipArgs) -> Self {
        StepUpSipInputs {
            monthly_investment: args.monthly_investment,
            annual_rate: args.annual_rate,
            years: args.years,
            step_up_percent: args.step_up_percent,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LumpsumArgs {
    #[arg(long, default_value_t = 1_000_000.0)]
    total_investment: f64,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
}

impl From<LumpsumArgs> for LumpsumInputs {
    fn from(args: LumpsumArgs) -> Self {
        LumpsumInputs {
            total_investment: args.total_investment,
            annual_rate: args.annual_rate,
            years: args.years,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct EmiArgs {
    #[arg(long, default_value_t = 5_000_000.0)]
    loan_amount: f64,
    #[arg(long, default_value_t = 8.5, help = "Annual interest rate in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 20)]
    tenure_years: u32,
}

impl From<EmiArgs> for EmiInputs {
    fn from(args: EmiArgs) -> Self {
        EmiInputs {
            loan_amount: args.loan_amount,
            annual_rate: args.annual_rate,
            tenure_years: args.tenure_years,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct StepUpEmiArgs {
    #[arg(long, default_value_t = 5_000_000.0)]
    loan_amount: f64,
    #[arg(long, default_value_t = 8.5, help = "Annual interest rate in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 20)]
    tenure_years: u32,
    #[arg(long, default_value_t = 5.0, help = "Yearly increase of the installment in percent")]
    step_up_percent: f64,
}

impl From<StepUpEmiArgs> for StepUpEmiInputs {
    fn from(args: StepUpEmiArgs) -> Self {
        StepUpEmiInputs {
            loan_amount: args.loan_amount,
            annual_rate: args.annual_rate,
            tenure_years: args.tenure_years,
            step_up_percent: args.step_up_percent,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SwpArgs {
    #[arg(long, default_value_t = 5_000_000.0)]
    total_investment: f64,
    #[arg(long, default_value_t = 50_000.0)]
    monthly_withdrawal: f64,
    #[arg(long, default_value_t = 10.0, help = "Expected annual return in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
}

impl From<SwpArgs> for SwpInputs {
    fn from(args: SwpArgs) -> Self {
        SwpInputs {
            total_investment: args.total_investment,
            monthly_withdrawal: args.monthly_withdrawal,
            annual_rate: args.annual_rate,
            years: args.years,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct StepUpSwpArgs {
    #[arg(long, default_value_t = 5_000_000.0)]
    total_investment: f64,
    #[arg(long, default_value_t = 40_000.0)]
    monthly_withdrawal: f64,
    #[arg(long, default_value_t = 10.0, help = "Expected annual return in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    #[arg(long, default_value_t = 5.0, help = "Yearly increase of the withdrawal in percent")]
    step_up_percent: f64,
}

impl From<StepUpSwpArgs> for StepUpSwpInputs {
    fn from(args: StepUpSwpArgs) -> Self {
        StepUpSwpInputs {
            total_investment: args.total_investment,
            monthly_withdrawal: args.monthly_withdrawal,
            annual_rate: args.annual_rate,
            years: args.years,
            step_up_percent: args.step_up_percent,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct IncomeTaxArgs {
    #[arg(long, default_value_t = 1_200_000.0)]
    gross_income: f64,
    #[arg(long = "deduction-80c", default_value_t = 0.0)]
    deduction_80c: f64,
    #[arg(long = "deduction-80d", default_value_t = 25_000.0)]
    deduction_80d: f64,
    #[arg(long, default_value_t = 50_000.0)]
    other_deductions: f64,
}

impl From<IncomeTaxArgs> for IncomeTaxInputs {
    fn from(args: IncomeTaxArgs) -> Self {
        IncomeTaxInputs {
            gross_income: args.gross_income,
            deduction_80c: args.deduction_80c,
            deduction_80d: args.deduction_80d,
            other_deductions: args.other_deductions,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Calc(#[from] CalcError),
    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run_cli(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve(args) => run_http_server(args.bind, args.port).await?,
        Command::Calculate(calculation) => println!("{}", render(calculation, cli.json)?),
    }
    Ok(())
}

fn render(calculation: Calculation, json: bool) -> Result<String, CliError> {
    match calculation {
        Calculation::Sip(args) => emit(&calculate_sip(&args.into())?, json, render_sip),
        Calculation::StepUpSip(args) => {
            emit(&calculate_step_up_sip(&args.into())?, json, render_sip)
        }
        Calculation::Lumpsum(args) => emit(&calculate_lumpsum(&args.into())?, json, render_lumpsum),
        Calculation::Emi(args) => emit(&calculate_emi(&args.into())?, json, render_emi),
        Calculation::StepUpEmi(args) => {
            emit(&calculate_step_up_emi(&args.into())?, json, render_step_up_emi)
        }
        Calculation::Swp(args) => emit(&calculate_swp(&args.into())?, json, render_swp),
        Calculation::StepUpSwp(args) => {
            emit(&calculate_step_up_swp(&args.into())?, json, render_swp)
        }
        Calculation::IncomeTax(args) => {
            emit(&calculate_income_tax(&args.into())?, json, render_income_tax)
        }
    }
}

fn emit<T: Serialize>(result: &T, json: bool, text: fn(&T) -> String) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(result)?)
    } else {
        Ok(text(result))
    }
}

fn summary(lines: &[(&str, String)]) -> String {
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}

/// First column left aligned, the rest right aligned.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = table_row(headers.iter().copied(), &widths);
    for row in rows {
        out.push_str(&table_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn table_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
            if i == 0 {
                format!("{cell}{pad}")
            } else {
                format!("{pad}{cell}")
            }
        })
        .collect();
    let mut line = padded.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

fn render_sip(result: &SipResult) -> String {
    let head = summary(&[
        ("Invested amount", format_inr(result.total_investment)),
        ("Est. returns", format_inr(result.estimated_returns)),
        ("Total value", format_inr(result.future_value)),
        ("Returns share", format_percent(result.returns_percentage)),
    ]);
    let rows: Vec<Vec<String>> = result
        .yearly_breakdown
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                format_inr(row.investment),
                format_inr(row.total_invested),
                format_inr(row.interest_earned),
                format_inr(row.year_end_value),
            ]
        })
        .collect();
    head + "\n"
        + &table(
            &["Year", "Invested", "Total invested", "Interest", "Value"],
            &rows,
        )
}

fn render_lumpsum(result: &LumpsumResult) -> String {
    let head = summary(&[
        ("Invested amount", format_inr(result.total_investment)),
        ("Est. returns", format_inr(result.estimated_returns)),
        ("Total value", format_inr(result.future_value)),
        ("Returns share", format_percent(result.returns_percentage)),
    ]);
    let rows: Vec<Vec<String>> = result
        .yearly_breakdown
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                format_inr(row.year_start_value),
                format_inr(row.interest_earned),
                format_inr(row.year_end_value),
            ]
        })
        .collect();
    head + "\n" + &table(&["Year", "Start value", "Interest", "End value"], &rows)
}

fn loan_rows(breakdown: &[EmiYearRow]) -> String {
    let rows: Vec<Vec<String>> = breakdown
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                format_inr(row.monthly_emi),
                format_inr(row.emi_paid),
                format_inr(row.principal_paid),
                format_inr(row.interest_paid),
                format_inr(row.outstanding_balance),
            ]
        })
        .collect();
    table(
        &["Year", "EMI", "Paid", "Principal", "Interest", "Balance"],
        &rows,
    )
}

fn render_emi(result: &EmiResult) -> String {
    let head = summary(&[
        ("Monthly EMI", format_inr(result.emi)),
        ("Principal amount", format_inr(result.loan_amount)),
        ("Total interest", format_inr(result.total_interest)),
        ("Total amount", format_inr(result.total_payment)),
        ("Interest share", format_percent(result.interest_percentage)),
    ]);
    head + "\n" + &loan_rows(&result.yearly_breakdown)
}

fn render_step_up_emi(result: &StepUpEmiResult) -> String {
    let solver = if result.converged {
        format!("converged after {} iterations", result.solver_iterations)
    } else {
        format!(
            "stopped after {} iterations without converging",
            result.solver_iterations
        )
    };
    let head = summary(&[
        ("First month EMI", format_inr(result.first_month_emi)),
        ("Last month EMI", format_inr(result.last_month_emi)),
        ("Principal amount", format_inr(result.loan_amount)),
        ("Total interest", format_inr(result.total_interest)),
        ("Total amount", format_inr(result.total_payment)),
        ("Interest share", format_percent(result.interest_percentage)),
        ("Solver", solver),
    ]);
    head + "\n" + &loan_rows(&result.yearly_breakdown)
}

fn render_swp(result: &SwpResult) -> String {
    let mut lines = vec![
        ("Total investment", format_inr(result.initial_investment)),
        ("Total withdrawal", format_inr(result.total_withdrawal)),
        ("Total interest", format_inr(result.total_interest)),
        ("Final value", format_inr(result.remaining_balance)),
        ("Remaining share", format_percent(result.remaining_percentage)),
    ];
    if let Some(month) = result.depletion_month {
        lines.push(("Depleted in month", month.to_string()));
    }
    let rows: Vec<Vec<String>> = result
        .yearly_breakdown
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                format_inr(row.balance_start),
                format_inr(row.withdrawal),
                format_inr(row.interest_earned),
                format_inr(row.balance_end),
                format_inr(row.total_withdrawn),
            ]
        })
        .collect();
    summary(&lines)
        + "\n"
        + &table(
            &["Year", "Start balance", "Withdrawn", "Interest", "End balance", "Total withdrawn"],
            &rows,
        )
}

fn render_income_tax(result: &IncomeTaxResult) -> String {
    let head = summary(&[
        ("Gross income", format_inr(result.gross_income)),
        ("Total deductions", format_inr(result.total_deductions)),
        ("Taxable income", format_inr(result.taxable_income)),
        ("Tax before cess", format_inr(result.tax_before_cess)),
        ("Cess (4%)", format_inr(result.cess)),
        ("Total tax", format_inr(result.total_tax)),
        ("Net income", format_inr(result.net_income)),
        ("Effective tax rate", format_percent(result.effective_tax_rate)),
    ]);
    let rows: Vec<Vec<String>> = result
        .slab_breakdown
        .iter()
        .map(|row| {
            vec![
                row.slab.clone(),
                format_inr(row.income),
                format!("{}%", row.rate),
                format_inr(row.tax),
            ]
        })
        .collect();
    head + "\n" + &table(&["Slab", "Income", "Rate", "Tax"], &rows)
}
