mod emi;
mod error;
mod format;
mod lumpsum;
mod schedule;
mod sip;
mod solver;
mod swp;
mod tax;
mod types;
mod validate;

pub use emi::{calculate_emi, calculate_step_up_emi, calculate_step_up_emi_with, standard_emi};
pub use error::{CalcError, CalcResult};
pub use format::{format_inr, format_inr_compact, format_percent};
pub use lumpsum::calculate_lumpsum;
pub use sip::{calculate_sip, calculate_step_up_sip};
pub use solver::{
    SolveIteration, SolveOutcome, SolverConfig, baseline_installment, leftover_balance,
    solve_initial_installment,
};
pub use swp::{calculate_step_up_swp, calculate_swp};
pub use tax::calculate_income_tax;
pub use types::{
    EmiInputs, EmiResult, EmiYearRow, IncomeTaxInputs, IncomeTaxResult, LumpsumInputs,
    LumpsumResult, LumpsumYearRow, SipInputs, SipResult, SipYearRow, StepUpEmiInputs,
    StepUpEmiResult, StepUpSipInputs, StepUpSwpInputs, SwpInputs, SwpResult, SwpYearRow,
    TaxSlabRow,
};
