use crate::models::chart::{
    AxisOptions, AxisTick, ChartData, ChartDataset, ChartOptions, ChartSpec, ChartType,
    ColorBinding, DatasetTooltips, PluginOptions, Rgba, ScaleOptions, TitleOptions,
    TooltipOptions,
};
use crate::models::result::{InvestmentResult, Strategy};
use crate::services::format_service::CurrencyFormatter;

pub const TOTAL_INVESTED_LABEL: &str = "Total Invested";
pub const PROFIT_LOSS_LABEL: &str = "Profit/Loss";

/// Number of y-axis intervals the tick algorithm aims for.
const TARGET_TICK_INTERVALS: f64 = 5.0;

/// Colors of the strategy comparison chart. Fills use alpha 0.8, borders 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPalette {
    pub invested: Rgba,
    pub favorable: Rgba,
    pub unfavorable: Rgba,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            invested: Rgba::new(54, 162, 235, 0.8),
            favorable: Rgba::new(75, 192, 192, 0.8),
            unfavorable: Rgba::new(255, 99, 132, 0.8),
        }
    }
}

impl ChartPalette {
    /// Fill color of a profit/loss bar; zero counts as favorable.
    #[must_use]
    pub fn profit_loss_color(&self, profit_loss: f64) -> Rgba {
        if profit_loss >= 0.0 {
            self.favorable
        } else {
            self.unfavorable
        }
    }
}

/// Builds the grouped bar chart comparing the three strategies.
///
/// Two series over the categories Daily/Weekly/Monthly:
/// - "Total Invested", one fixed color, drawn behind (order 2)
/// - "Profit/Loss", colored per bar by sign, drawn in front (order 1)
#[derive(Debug, Clone, Default)]
pub struct ChartService {
    palette: ChartPalette,
}

impl ChartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: ChartPalette) -> Self {
        Self { palette }
    }

    pub fn build_chart(&self, result: &InvestmentResult, formatter: &CurrencyFormatter) -> ChartSpec {
        let labels: Vec<String> = Strategy::ALL.iter().map(|s| s.label().to_string()).collect();

        let invested: Vec<f64> = result.results.iter().map(|(_, o)| o.total_invested).collect();
        let profit_loss: Vec<f64> = result.results.iter().map(|(_, o)| o.profit_loss).collect();

        let pl_fill: Vec<Rgba> = profit_loss
            .iter()
            .map(|v| self.palette.profit_loss_color(*v))
            .collect();
        let pl_border: Vec<Rgba> = pl_fill.iter().map(|c| c.with_alpha(1.0)).collect();

        let tooltips = vec![
            tooltip_labels(TOTAL_INVESTED_LABEL, &invested, formatter),
            tooltip_labels(PROFIT_LOSS_LABEL, &profit_loss, formatter),
        ];

        let datasets = vec![
            ChartDataset {
                label: TOTAL_INVESTED_LABEL.to_string(),
                data: invested.clone(),
                background_color: ColorBinding::Uniform(self.palette.invested),
                border_color: ColorBinding::Uniform(self.palette.invested.with_alpha(1.0)),
                border_width: 1,
                order: 2,
            },
            ChartDataset {
                label: PROFIT_LOSS_LABEL.to_string(),
                data: profit_loss.clone(),
                background_color: ColorBinding::PerBar(pl_fill),
                border_color: ColorBinding::PerBar(pl_border),
                border_width: 1,
                order: 1,
            },
        ];

        let all_values = invested.iter().chain(profit_loss.iter()).copied();
        let y = y_axis(all_values, formatter);

        ChartSpec {
            chart_type: ChartType::Bar,
            data: ChartData { labels, datasets },
            options: ChartOptions {
                responsive: true,
                plugins: PluginOptions {
                    title: TitleOptions {
                        display: true,
                        text: format!("{} DCA Strategy Comparison", result.symbol),
                    },
                    tooltip: TooltipOptions { labels: tooltips },
                },
                scales: ScaleOptions { y },
            },
        }
    }
}

fn tooltip_labels(dataset: &str, values: &[f64], formatter: &CurrencyFormatter) -> DatasetTooltips {
    DatasetTooltips {
        dataset: dataset.to_string(),
        labels: values
            .iter()
            .map(|v| format!("{dataset}: {}", formatter.format(*v)))
            .collect(),
    }
}

fn y_axis(values: impl Iterator<Item = f64>, formatter: &CurrencyFormatter) -> AxisOptions {
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let values = nice_ticks(lo, hi);
    let step = if values.len() > 1 { values[1] - values[0] } else { 1.0 };

    AxisOptions {
        begin_at_zero: true,
        min: values.first().copied().unwrap_or(0.0),
        max: values.last().copied().unwrap_or(1.0),
        step_size: step,
        ticks: values
            .into_iter()
            .map(|value| AxisTick {
                value,
                label: formatter.format_tick(value),
            })
            .collect(),
    }
}

/// Evenly spaced tick values covering `[min(lo, 0), max(hi, 0)]`, with a
/// step of 1, 2 or 5 times a power of ten. Ticks never leave the finite
/// range: one that would overflow is clamped to `f64::MAX`.
#[must_use]
pub fn nice_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return vec![0.0, 1.0];
    }
    let lo = lo.min(0.0);
    let hi = hi.max(0.0);
    if hi <= lo {
        return vec![0.0, 1.0];
    }

    // divided separately so a range wider than f64::MAX stays finite
    let raw_step = hi / TARGET_TICK_INTERVALS - lo / TARGET_TICK_INTERVALS;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;

    let first = (lo / step).floor() as i64;
    let last = (hi / step).ceil() as i64;
    let mut ticks: Vec<f64> = (first..=last).map(|i| snap_tick(i as f64 * step)).collect();
    ticks.dedup();
    ticks
}

fn snap_tick(v: f64) -> f64 {
    if v.is_infinite() {
        f64::MAX.copysign(v)
    } else if v.abs() < 1e15 {
        // strip accumulated binary noise such as 0.30000000000000004
        (v * 1e9).round() / 1e9
    } else {
        v
    }
}
