//! Plain-text rendering of projections for terminal output.

use crate::models::{format_usd, KeyIndicators, ProjectionRow};

const HEADERS: [&str; 4] = ["Year", "Cumulative Revenue", "Cumulative Costs", "Net Cash Flow"];

/// Render projection rows as a right-aligned text table.
pub fn render_table(rows: &[ProjectionRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.year.to_string(),
                format_usd(row.cumulative_revenue),
                format_usd(row.cumulative_costs),
                format_usd(row.net_cash_flow),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&rule.join("  "));
    output.push('\n');
    for row in &cells {
        push_row(&mut output, row, &widths);
    }
    output
}

fn push_row(output: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect();
    output.push_str(&padded.join("  "));
    output.push('\n');
}

/// Render the key indicators as `label: value` lines.
pub fn render_indicators(indicators: &KeyIndicators) -> String {
    format!(
        "Initial Investment: {}\nEstimated Annual Revenue: {}\nEstimated Annual OPEX: {}\nPayback Period: {}\n",
        format_usd(indicators.initial_investment),
        format_usd(indicators.annual_revenue),
        format_usd(indicators.annual_opex),
        indicators.payback_display()
    )
}
