use std::io::Write;
use std::path::Path;

use dca_calculator_core::services::table_service::escape_html;
use dca_calculator_core::view::{ResultsArea, ResultsState, CHART_CANVAS_ID, RESULT_CONTAINER_ID};

use crate::cli::OutputFormat;
use crate::error::CliError;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Binds the precomputed tooltip and tick labels into Chart.js callbacks.
/// Ticks are forced to the precomputed values, so labels are looked up by
/// index rather than by matching floats.
const CHART_BOOTSTRAP: &str = r#"
const yAxis = spec.options.scales.y;
const yTicks = yAxis.ticks;
spec.options.plugins.tooltip.callbacks = {
  label: ctx => spec.options.plugins.tooltip.labels[ctx.datasetIndex].labels[ctx.dataIndex]
};
spec.options.scales.y = {
  beginAtZero: yAxis.beginAtZero,
  min: yAxis.min,
  max: yAxis.max,
  afterBuildTicks: axis => { axis.ticks = yTicks.map(t => ({ value: t.value })); },
  ticks: { callback: (value, index) => (yTicks[index] ? yTicks[index].label : value) }
};
new Chart(document.getElementById(CANVAS_ID), spec);
"#;

/// Write whatever the results area holds in the requested format.
pub fn write(area: &ResultsArea, format: OutputFormat, path: Option<&Path>) -> Result<(), CliError> {
    let content = match format {
        OutputFormat::Html => html_page(area)?,
        OutputFormat::Json => json_document(area)?,
    };

    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn json_document(area: &ResultsArea) -> Result<String, CliError> {
    let value = match area.state() {
        ResultsState::Rendered(rendered) => serde_json::to_value(rendered)?,
        ResultsState::Failed(message) => serde_json::json!({ "error": message }),
        ResultsState::Empty => serde_json::Value::Null,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn html_page(area: &ResultsArea) -> Result<String, CliError> {
    let (body, script) = match area.state() {
        ResultsState::Rendered(rendered) => {
            // `</` would end the script element early.
            let spec = rendered.chart.to_json()?.replace("</", "<\\/");
            let script = format!(
                "<script src=\"{CHART_JS_CDN}\"></script>\n<script>\nconst CANVAS_ID = \"{CHART_CANVAS_ID}\";\nconst spec = {spec};{CHART_BOOTSTRAP}</script>\n"
            );
            (rendered.table.to_string(), script)
        }
        ResultsState::Failed(message) => (format!("<p class=\"error\">{}</p>\n", escape_html(message)), String::new()),
        ResultsState::Empty => (String::new(), String::new()),
    };

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>DCA Calculator</title>\n</head>\n<body>\n<div id=\"{RESULT_CONTAINER_ID}\">\n{body}</div>\n{script}</body>\n</html>\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dca_calculator_core::models::result::InvestmentResult;
    use dca_calculator_core::models::settings::Locale;
    use dca_calculator_core::services::render_service::ResultRenderer;
    use dca_calculator_core::view::ResultsView;

    fn rendered_area() -> ResultsArea {
        let result = InvestmentResult::from_json(
            r#"{"symbol":"AAPL","results":{
                "daily":{"total_invested":100,"profit_loss":-5},
                "weekly":{"total_invested":100,"profit_loss":3},
                "monthly":{"total_invested":100,"profit_loss":0}}}"#,
        )
        .unwrap();
        let mut area = ResultsArea::new();
        area.show_results(&ResultRenderer::new(Locale::EnUs).render(&result));
        area
    }

    #[test]
    fn tick_labels_bound_by_index() {
        let page = html_page(&rendered_area()).unwrap();
        assert!(page.contains("afterBuildTicks"));
        assert!(page.contains("yTicks[index]"));
        assert!(!page.contains("ticks.get(value)"));
        assert!(page.contains(r#""label":"-$50""#));
    }

    #[test]
    fn error_page_has_no_chart() {
        let mut area = ResultsArea::new();
        area.show_error("Error: Backend returned HTTP 500");
        let page = html_page(&area).unwrap();
        assert!(page.contains("<p class=\"error\">Error: Backend returned HTTP 500</p>"));
        assert!(!page.contains("new Chart"));
    }

    #[test]
    fn json_document_holds_table_and_chart() {
        let doc: serde_json::Value = serde_json::from_str(&json_document(&rendered_area()).unwrap()).unwrap();
        assert!(doc["table"].as_str().unwrap().contains("$-5.00"));
        assert_eq!(doc["chart"]["type"], "bar");
    }
}
