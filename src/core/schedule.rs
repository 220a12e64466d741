//! Period arithmetic shared by the monthly engines.
//!
//! Every engine walks the same calendar: `years * 12` months, grouped into
//! 1-indexed years, with a recurring flow that may grow by a fixed
//! percentage at the first month of every year after the first.

pub const MONTHS_PER_YEAR: u32 = 12;

/// Annual percentage (e.g. `8.5`) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

pub fn month_count(years: u32) -> u32 {
    years.saturating_mul(MONTHS_PER_YEAR)
}

pub fn step_up_factor(step_up_percent: f64) -> f64 {
    1.0 + step_up_percent / 100.0
}

/// `(1 + rate)^months - 1`, accurate for rates too small for `powf` to
/// register.
pub fn compound_growth(rate: f64, months: u32) -> f64 {
    (months as f64 * rate.ln_1p()).exp_m1()
}

/// Round half up to a whole currency unit.
pub fn round_currency(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub year: u32,
    pub month: u32,
    /// 1-based month counted from the start of the schedule.
    pub index: u32,
    /// Flow in effect for this month, after any step-up.
    pub amount: f64,
}

impl Period {
    pub fn ends_year(&self) -> bool {
        self.month == MONTHS_PER_YEAR
    }
}

#[derive(Debug, Clone)]
pub struct StepUpSchedule {
    amount: f64,
    factor: f64,
    next: u32,
    months: u32,
}

impl StepUpSchedule {
    pub fn new(initial_amount: f64, step_up_percent: f64, years: u32) -> Self {
        Self {
            amount: initial_amount,
            factor: step_up_factor(step_up_percent),
            next: 0,
            months: month_count(years),
        }
    }
}

impl Iterator for StepUpSchedule {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        if self.next >= self.months {
            return None;
        }
        let offset = self.next;
        self.next += 1;

        let year = offset / MONTHS_PER_YEAR + 1;
        let month = offset % MONTHS_PER_YEAR + 1;
        if year > 1 && month == 1 {
            self.amount *= self.factor;
        }

        Some(Period {
            year,
            month,
            index: offset + 1,
            amount: self.amount,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.months - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StepUpSchedule {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn converts_annual_percent_to_monthly_decimal() {
        assert_approx(monthly_rate(12.0), 0.01);
        assert_approx(monthly_rate(0.0), 0.0);
        assert_eq!(month_count(20), 240);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_currency(43_390.5), 43_391.0);
        assert_eq!(round_currency(43_390.49), 43_390.0);
        assert_eq!(round_currency(-2.5), -2.0);
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(10.0, 0.0), 0.0);
        assert_approx(percentage_of(25.0, 200.0), 12.5);
    }

    #[test]
    fn schedule_steps_up_at_first_month_of_later_years() {
        let periods: Vec<Period> = StepUpSchedule::new(100.0, 10.0, 3).collect();
        assert_eq!(periods.len(), 36);

        assert_eq!(periods[0].year, 1);
        assert_eq!(periods[0].month, 1);
        assert_eq!(periods[0].index, 1);
        assert_approx(periods[11].amount, 100.0);
        assert!(periods[11].ends_year());

        assert_eq!(periods[12].year, 2);
        assert_eq!(periods[12].month, 1);
        assert_approx(periods[12].amount, 110.0);
        assert_approx(periods[35].amount, 121.0);
        assert_eq!(periods[35].index, 36);
    }

    #[test]
    fn level_schedule_keeps_amount_constant() {
        let mut schedule = StepUpSchedule::new(50.0, 0.0, 2);
        assert_eq!(schedule.len(), 24);
        assert!(schedule.all(|p| p.amount == 50.0));
    }

    #[test]
    fn zero_years_yields_nothing() {
        assert_eq!(StepUpSchedule::new(100.0, 5.0, 0).count(), 0);
    }

    #[test]
    fn compound_growth_survives_tiny_rates() {
        assert!((compound_growth(0.01, 12) - (1.01f64.powf(12.0) - 1.0)).abs() < 1e-12);
        let tiny = monthly_rate(1e-14);
        let growth = compound_growth(tiny, 120);
        assert!(growth > 0.0);
        assert!((growth / tiny - 120.0).abs() < 1e-6);
        assert_eq!(compound_growth(0.05, 0), 0.0);
    }
}
