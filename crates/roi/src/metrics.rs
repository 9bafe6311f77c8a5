//! Final ROI metrics.
//!
//! Division guards:
//! - `roi_ratio` / `roi_percentage` are 0 when the investment is not positive.
//! - payback is [`PaybackPeriod::Never`] when the monthly benefit is not positive.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::avoidance::CostAvoidance;
use crate::investment::InvestmentBreakdown;

/// Days per month used for the break-even date.
const DAYS_PER_MONTH: f64 = 30.0;

/// Months to recover the investment from avoided cost.
///
/// Serialized as a number, or the string `"never"`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PaybackPeriod {
    Months(f64),
    Never,
}

impl PaybackPeriod {
    pub fn months(&self) -> Option<f64> {
        match self {
            PaybackPeriod::Months(m) => Some(*m),
            PaybackPeriod::Never => None,
        }
    }
}

impl core::fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaybackPeriod::Months(m) => write!(f, "{m:.1} months"),
            PaybackPeriod::Never => f.write_str("never"),
        }
    }
}

const NEVER: &str = "never";

impl Serialize for PaybackPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PaybackPeriod::Months(m) => serializer.serialize_f64(*m),
            PaybackPeriod::Never => serializer.serialize_str(NEVER),
        }
    }
}

impl<'de> Deserialize<'de> for PaybackPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Months(f64),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Months(m) => Ok(PaybackPeriod::Months(m)),
            Repr::Label(s) if s.eq_ignore_ascii_case(NEVER) => Ok(PaybackPeriod::Never),
            Repr::Label(s) => Err(serde::de::Error::custom(format!(
                "expected months or \"{NEVER}\", got {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    pub total_investment_usd: f64,
    pub total_savings_usd: f64,
    pub net_benefit_usd: f64,
    pub roi_ratio: f64,
    pub roi_percentage: f64,
    pub payback_period_months: PaybackPeriod,
    /// `None` when payback never happens.
    pub break_even_date: Option<NaiveDate>,
}

impl RoiMetrics {
    pub fn compute(
        investment: &InvestmentBreakdown,
        avoidance: &CostAvoidance,
        as_of: NaiveDate,
    ) -> Self {
        let total_investment_usd = investment.total_first_year_investment;
        let total_savings_usd = avoidance.aog_costs_avoided;
        let net_benefit_usd = total_savings_usd - total_investment_usd;

        let (roi_ratio, roi_percentage) = if total_investment_usd > 0.0 {
            (
                total_savings_usd / total_investment_usd,
                net_benefit_usd / total_investment_usd * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let payback_period_months = payback_period(total_investment_usd, total_savings_usd);
        let break_even_date = break_even_date(as_of, payback_period_months);

        Self {
            total_investment_usd,
            total_savings_usd,
            net_benefit_usd,
            roi_ratio,
            roi_percentage,
            payback_period_months,
            break_even_date,
        }
    }
}

/// `investment / (savings / 12)`, assuming linear benefit accrual.
pub fn payback_period(investment: f64, annual_savings: f64) -> PaybackPeriod {
    let monthly_benefit = annual_savings / 12.0;
    if monthly_benefit > 0.0 {
        PaybackPeriod::Months(investment / monthly_benefit)
    } else {
        PaybackPeriod::Never
    }
}

/// `as_of + trunc(months × 30)` days; `None` for never or out-of-range dates.
pub fn break_even_date(as_of: NaiveDate, payback: PaybackPeriod) -> Option<NaiveDate> {
    let months = payback.months()?;
    let days = (months * DAYS_PER_MONTH).trunc();
    if !days.is_finite() || days > i32::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_days(days as i64)?;
    as_of.checked_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investment(total: f64) -> InvestmentBreakdown {
        InvestmentBreakdown {
            one_time_setup: 0.0,
            annual_operating_costs: 0.0,
            mitigation_action_costs: total,
            total_first_year_investment: total,
        }
    }

    fn avoidance(avoided: f64) -> CostAvoidance {
        CostAvoidance {
            total_risk_exposure: avoided / 0.06,
            high_risk_components: 3,
            baseline_expected_aog_cost: avoided / 0.06 * 0.08,
            mitigated_expected_aog_cost: avoided / 0.06 * 0.02,
            aog_costs_avoided: avoided,
            risk_reduction_percentage: 75.0,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn zero_investment_yields_zero_ratio() {
        let m = RoiMetrics::compute(&investment(0.0), &avoidance(600_000.0), as_of());
        assert_eq!(m.roi_ratio, 0.0);
        assert_eq!(m.roi_percentage, 0.0);
        assert_eq!(m.payback_period_months, PaybackPeriod::Months(0.0));
        assert_eq!(m.break_even_date, Some(as_of()));
    }

    #[test]
    fn zero_savings_never_pays_back() {
        let m = RoiMetrics::compute(&investment(250_000.0), &avoidance(0.0), as_of());
        assert_eq!(m.payback_period_months, PaybackPeriod::Never);
        assert_eq!(m.break_even_date, None);
        assert_eq!(m.net_benefit_usd, -250_000.0);
    }

    #[test]
    fn ratio_percentage_and_payback() {
        let m = RoiMetrics::compute(&investment(200_000.0), &avoidance(1_200_000.0), as_of());
        assert_eq!(m.roi_ratio, 6.0);
        assert_eq!(m.roi_percentage, 500.0);
        assert_eq!(m.net_benefit_usd, 1_000_000.0);
        // monthly benefit 100k → 2 months → 60 days
        assert_eq!(m.payback_period_months, PaybackPeriod::Months(2.0));
        assert_eq!(m.break_even_date, NaiveDate::from_ymd_opt(2025, 3, 2));
    }

    #[test]
    fn payback_serializes_as_number_or_never() {
        assert_eq!(serde_json::to_string(&PaybackPeriod::Months(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&PaybackPeriod::Never).unwrap(), "\"never\"");

        let back: PaybackPeriod = serde_json::from_str("\"never\"").unwrap();
        assert_eq!(back, PaybackPeriod::Never);
        let back: PaybackPeriod = serde_json::from_str("7.25").unwrap();
        assert_eq!(back, PaybackPeriod::Months(7.25));
        assert!(serde_json::from_str::<PaybackPeriod>("\"soon\"").is_err());
    }

    #[test]
    fn absurd_payback_has_no_break_even_date() {
        assert_eq!(break_even_date(as_of(), PaybackPeriod::Months(1e30)), None);
    }
}
