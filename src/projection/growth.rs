//! Closed-form compound growth: future value and present value
//!
//! All functions take a monthly rate and a number of months. A rate of zero (or
//! below) degenerates the annuity factor to a plain count of months.

/// Growth factor (1 + r)^n
pub fn growth_factor(monthly_rate: f64, total_months: u32) -> f64 {
    (1.0 + monthly_rate).powi(total_months as i32)
}

/// Future value of a level monthly contribution paid at the end of each month
pub fn contribution_future_value(contribution: f64, monthly_rate: f64, total_months: u32) -> f64 {
    if monthly_rate > 0.0 {
        contribution * (growth_factor(monthly_rate, total_months) - 1.0) / monthly_rate
    } else {
        contribution * total_months as f64
    }
}

/// Value of an initial amount plus monthly contributions after `total_months`
pub fn future_value(initial: f64, contribution: f64, monthly_rate: f64, total_months: u32) -> f64 {
    initial * growth_factor(monthly_rate, total_months)
        + contribution_future_value(contribution, monthly_rate, total_months)
}

/// Initial amount needed today to reach `target` alongside monthly contributions.
/// Zero when the contributions alone reach the target.
pub fn present_value(target: f64, contribution: f64, monthly_rate: f64, total_months: u32) -> f64 {
    let remaining = target - contribution_future_value(contribution, monthly_rate, total_months);
    (remaining / growth_factor(monthly_rate, total_months)).max(0.0)
}

/// Monthly contribution that alone grows to `target`
pub fn required_contribution(target: f64, monthly_rate: f64, total_months: u32) -> f64 {
    target / contribution_future_value(1.0, monthly_rate, total_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RATE: f64 = 0.07 / 12.0;

    #[test]
    fn test_future_value_reference() {
        let fv = future_value(10_000_000.0, 500_000.0, RATE, 120);
        let g = (1.0_f64 + RATE).powf(120.0);
        let expected = 10_000_000.0 * g + 500_000.0 * (g - 1.0) / RATE;
        assert_relative_eq!(fv, expected, max_relative = 1e-6);
    }

    #[test]
    fn test_present_value_reference() {
        let pv = present_value(100_000_000.0, 0.0, RATE, 120);
        let expected = 100_000_000.0 / (1.0_f64 + RATE).powf(120.0);
        assert_relative_eq!(pv, expected, max_relative = 1e-6);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        assert_eq!(future_value(1_000.0, 50.0, 0.0, 24), 1_000.0 + 50.0 * 24.0);
        assert_eq!(present_value(3_000.0, 50.0, 0.0, 24), 1_800.0);
        assert_eq!(required_contribution(2_400.0, 0.0, 24), 100.0);
    }

    #[test]
    fn test_present_value_inverts_future_value() {
        for &(principal, rate, months) in &[(1.0, 0.001, 1u32), (5e6, 0.004, 60), (1e8, 0.02, 600)] {
            let fv = future_value(principal, 0.0, rate, months);
            assert_relative_eq!(present_value(fv, 0.0, rate, months), principal, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_present_value_floors_at_zero() {
        // Contributions alone overshoot the target
        assert_eq!(present_value(1_000.0, 500.0, RATE, 120), 0.0);
    }

    #[test]
    fn test_future_value_non_decreasing_in_months() {
        let mut previous = future_value(1_000.0, 10.0, RATE, 1);
        for months in 2..=600 {
            let current = future_value(1_000.0, 10.0, RATE, months);
            assert!(current >= previous, "FV decreased at month {}", months);
            previous = current;
        }
    }

    #[test]
    fn test_required_contribution_reaches_target() {
        let monthly = required_contribution(100_000_000.0, RATE, 120);
        assert_relative_eq!(future_value(0.0, monthly, RATE, 120), 100_000_000.0, max_relative = 1e-9);
    }
}
