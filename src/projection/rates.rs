//! Interest rate conventions and conversion to an effective monthly rate

use serde::{Deserialize, Serialize};

/// Upper bound of an annual rate input, in percent
pub const MAX_ANNUAL_RATE_PCT: f64 = 30.0;

/// Upper bound of a monthly rate input, in percent
pub const MAX_MONTHLY_RATE_PCT: f64 = 5.0;

/// Period the stated rate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    Annual,
    Monthly,
}

/// How often interest is compounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Semiannual => 2,
            CompoundingFrequency::Annual => 1,
        }
    }
}

/// Stated rate in annual percent. A monthly rate is annualised by simple multiplication.
pub fn annual_rate_pct(rate_pct: f64, unit: RateUnit) -> f64 {
    match unit {
        RateUnit::Annual => rate_pct,
        RateUnit::Monthly => rate_pct * 12.0,
    }
}

/// Convert a stated rate and compounding convention to a rate for monthly steps.
///
/// With monthly compounding the nominal monthly rate is used as is. Otherwise the
/// periodic rate is spread over the months of its period so that the effective
/// annual yield is unchanged:
/// ```text
/// r_m = (1 + i / k)^(k / 12) - 1
/// ```
/// Rates are expected to be clamped by the caller (0–30 % annual, 0–5 % monthly).
pub fn resolve_effective_monthly_rate(
    rate_pct: f64,
    unit: RateUnit,
    compounding: CompoundingFrequency,
) -> f64 {
    if compounding == CompoundingFrequency::Monthly {
        return match unit {
            RateUnit::Annual => rate_pct / 12.0 / 100.0,
            RateUnit::Monthly => rate_pct / 100.0,
        };
    }

    let periods = compounding.periods_per_year() as f64;
    let periodic_rate = annual_rate_pct(rate_pct, unit) / 100.0 / periods;
    let rate = (1.0 + periodic_rate).powf(1.0 / (12.0 / periods)) - 1.0;

    log::debug!(
        "effective monthly rate {:.8} from {}% {:?} compounded {:?}",
        rate,
        rate_pct,
        unit,
        compounding
    );
    rate
}

/// Effective annual yield of a monthly compounding rate
pub fn effective_annual_yield(monthly_rate: f64) -> f64 {
    (1.0 + monthly_rate).powi(12) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_compounding_uses_nominal_rate() {
        let rate = resolve_effective_monthly_rate(7.0, RateUnit::Annual, CompoundingFrequency::Monthly);
        assert_relative_eq!(rate, 0.07 / 12.0, max_relative = 1e-12);

        let rate = resolve_effective_monthly_rate(0.6, RateUnit::Monthly, CompoundingFrequency::Monthly);
        assert_relative_eq!(rate, 0.006, max_relative = 1e-12);
    }

    #[test]
    fn test_preserves_effective_annual_yield() {
        let cases = [
            (CompoundingFrequency::Quarterly, (1.0_f64 + 0.08 / 4.0).powi(4) - 1.0),
            (CompoundingFrequency::Semiannual, (1.0_f64 + 0.08 / 2.0).powi(2) - 1.0),
            (CompoundingFrequency::Annual, 0.08),
        ];

        for (compounding, expected_yield) in cases {
            let monthly = resolve_effective_monthly_rate(8.0, RateUnit::Annual, compounding);
            assert_relative_eq!(effective_annual_yield(monthly), expected_yield, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_monthly_input_annualised_for_other_compounding() {
        // 0.5 % per month is 6 % per year, compounded quarterly
        let from_monthly = resolve_effective_monthly_rate(0.5, RateUnit::Monthly, CompoundingFrequency::Quarterly);
        let from_annual = resolve_effective_monthly_rate(6.0, RateUnit::Annual, CompoundingFrequency::Quarterly);
        assert_relative_eq!(from_monthly, from_annual, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate() {
        for compounding in [CompoundingFrequency::Monthly, CompoundingFrequency::Annual] {
            assert_eq!(resolve_effective_monthly_rate(0.0, RateUnit::Annual, compounding), 0.0);
        }
    }
}
