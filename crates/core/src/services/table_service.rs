use std::fmt::Write as _;

use crate::models::rendered::TableMarkup;
use crate::models::result::{InvestmentResult, StrategyOutcome};
use crate::services::format_service::format_table_currency;
use crate::view::CHART_CANVAS_ID;

/// Builds the HTML results table.
///
/// Layout:
/// - heading `Investment Results for {symbol}`
/// - one row per echoed request field the backend returned
/// - per strategy: a section row, then `Total Invested` and `Profit/Loss`
/// - the chart canvas after the table
#[derive(Debug, Clone, Copy, Default)]
pub struct TableService;

impl TableService {
    pub fn new() -> Self {
        Self
    }

    pub fn render_table(&self, result: &InvestmentResult) -> TableMarkup {
        let mut html = String::new();

        html.push_str("<div class=\"dca-results\">\n");
        let _ = writeln!(
            html,
            "  <h3>Investment Results for {}</h3>",
            escape_html(&result.symbol)
        );
        html.push_str("  <table>\n");

        for (label, value) in echo_rows(result) {
            let _ = writeln!(
                html,
                "    <tr><th>{}</th><td>{}</td></tr>",
                label,
                escape_html(&value)
            );
        }

        for (strategy, outcome) in result.results.iter() {
            let _ = writeln!(
                html,
                "    <tr class=\"strategy\"><th colspan=\"2\">{} Strategy</th></tr>",
                strategy.label()
            );
            push_outcome_rows(&mut html, outcome);
        }

        html.push_str("  </table>\n");
        let _ = writeln!(
            html,
            "  <div class=\"chart-container\"><canvas id=\"{CHART_CANVAS_ID}\"></canvas></div>"
        );
        html.push_str("</div>\n");

        TableMarkup::new(html)
    }
}

fn echo_rows(result: &InvestmentResult) -> Vec<(&'static str, String)> {
    let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);

    let mut rows = vec![("Symbol", result.symbol.clone())];
    if let Some(amount) = result.amount {
        rows.push(("Amount", format_table_currency(amount)));
    }
    if let Some(frequency) = present(&result.frequency) {
        rows.push(("Frequency", frequency));
    }
    if let Some(start) = present(&result.start_date) {
        rows.push(("Start Date", start));
    }
    if let Some(end) = present(&result.end_date) {
        rows.push(("End Date", end));
    }
    rows
}

fn push_outcome_rows(html: &mut String, outcome: &StrategyOutcome) {
    let class = if outcome.is_favorable() { "profit" } else { "loss" };
    let _ = writeln!(
        html,
        "    <tr><td>Total Invested</td><td>{}</td></tr>",
        format_table_currency(outcome.total_invested)
    );
    let _ = writeln!(
        html,
        "    <tr><td>Profit/Loss</td><td class=\"{class}\">{}</td></tr>",
        format_table_currency(outcome.profit_loss)
    );
}

/// Escape text for element content and double-quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
