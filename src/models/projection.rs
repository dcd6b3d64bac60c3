use serde::{Deserialize, Serialize};

/// Typical lifespan of a PV project, in years.
pub const HORIZON_YEARS: u32 = 25;

/// Capital cost per installed megawatt.
pub const INVESTMENT_PER_MW: f64 = 1_000_000.0;
/// Revenue per installed megawatt per year.
pub const REVENUE_PER_MW: f64 = 150_000.0;
/// Operating expenses per installed megawatt per year.
pub const OPEX_PER_MW: f64 = 20_000.0;
/// Net yearly cash per megawatt used for the payback period.
pub const PAYBACK_NET_PER_MW: f64 = 130_000.0;

/// Largest installed capacity accepted, in megawatts.
pub const MAX_CAPACITY_MW: f64 = 1_000_000.0;

/// Cumulative figures at the end of one year of operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub year: u32,
    pub cumulative_revenue: f64,
    pub cumulative_costs: f64,
    pub net_cash_flow: f64,
}

/// Headline figures shown next to the projection chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyIndicators {
    pub initial_investment: f64,
    pub annual_revenue: f64,
    pub annual_opex: f64,
    /// `None` when the capacity is zero and the period is undefined.
    pub payback_years: Option<u32>,
}

impl KeyIndicators {
    pub fn for_capacity(capacity: f64) -> Self {
        Self {
            initial_investment: capacity * INVESTMENT_PER_MW,
            annual_revenue: capacity * REVENUE_PER_MW,
            annual_opex: capacity * OPEX_PER_MW,
            payback_years: payback_years(capacity),
        }
    }

    /// Payback period for display: `"8 years"`, or `"N/A"` when undefined.
    pub fn payback_display(&self) -> String {
        match self.payback_years {
            Some(1) => "1 year".to_string(),
            Some(years) => format!("{} years", years),
            None => "N/A".to_string(),
        }
    }
}

/// Yearly cumulative projection for years `0..=HORIZON_YEARS`.
pub fn project(capacity: f64) -> Vec<ProjectionRow> {
    let initial_investment = capacity * INVESTMENT_PER_MW;
    let annual_revenue = capacity * REVENUE_PER_MW;
    let annual_opex = capacity * OPEX_PER_MW;

    (0..=HORIZON_YEARS)
        .map(|year| {
            let i = f64::from(year);
            let cumulative_revenue = i * annual_revenue;
            let cumulative_costs = initial_investment + i * annual_opex;
            ProjectionRow {
                year,
                cumulative_revenue,
                cumulative_costs,
                net_cash_flow: cumulative_revenue - cumulative_costs,
            }
        })
        .collect()
}

/// Years until the investment is recovered, or `None` when the period is
/// undefined (zero capacity) or not representable.
pub fn payback_years(capacity: f64) -> Option<u32> {
    let yearly_net = capacity * PAYBACK_NET_PER_MW;
    if yearly_net <= 0.0 || !yearly_net.is_finite() {
        return None;
    }
    let years = (capacity * INVESTMENT_PER_MW / yearly_net).ceil();
    if !years.is_finite() || years > f64::from(u32::MAX) {
        return None;
    }
    Some(years as u32)
}

/// Format an amount as whole US dollars with thousands separators.
///
/// Amounts that are not finite print as `N/A`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
