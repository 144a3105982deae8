use crate::models::rendered::RenderedResults;
use crate::models::result::InvestmentResult;
use crate::models::settings::Locale;
use crate::services::chart_service::ChartService;
use crate::services::format_service::CurrencyFormatter;
use crate::services::table_service::TableService;

/// Turns a backend response into the table and chart shown to the user.
///
/// Pure: the same result and locale always produce the same output.
#[derive(Debug, Clone, Default)]
pub struct ResultRenderer {
    table_service: TableService,
    chart_service: ChartService,
    formatter: CurrencyFormatter,
}

impl ResultRenderer {
    pub fn new(locale: Locale) -> Self {
        Self {
            table_service: TableService::new(),
            chart_service: ChartService::new(),
            formatter: CurrencyFormatter::new(locale),
        }
    }

    pub fn with_chart_service(locale: Locale, chart_service: ChartService) -> Self {
        Self {
            chart_service,
            ..Self::new(locale)
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.formatter.locale()
    }

    /// Table first, then chart; both are returned together.
    pub fn render(&self, result: &InvestmentResult) -> RenderedResults {
        let table = self.table_service.render_table(result);
        let chart = self.chart_service.build_chart(result, &self.formatter);
        RenderedResults { table, chart }
    }
}
