use super::error::{CalcError, CalcResult};

pub(crate) fn non_negative(field: &'static str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn percentage(field: &'static str, value: f64) -> CalcResult<()> {
    non_negative(field, value)?;
    if value > 100.0 {
        return Err(CalcError::invalid(field, "must be between 0 and 100"));
    }
    Ok(())
}

/// Longest horizon any calculator will simulate.
pub const MAX_YEARS: u32 = 100;

pub(crate) fn years(field: &'static str, value: u32) -> CalcResult<()> {
    if value > MAX_YEARS {
        return Err(CalcError::invalid(
            field,
            format!("must be at most {MAX_YEARS} years"),
        ));
    }
    Ok(())
}
