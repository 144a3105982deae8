use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color, serialized the way canvas/CSS consumers expect it:
/// `"rgba(54, 162, 235, 0.8)"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue, different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("not an rgba() color: {s}"))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 components in {s}"));
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|e| format!("bad channel '{p}': {e}"));
        let a = parts[3]
            .parse::<f32>()
            .map_err(|e| format!("bad alpha '{}': {e}", parts[3]))?;
        if !(0.0..=1.0).contains(&a) {
            return Err(format!("alpha out of range: {a}"));
        }

        Ok(Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fill or border color of a dataset: one color for every bar, or one per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorBinding {
    Uniform(Rgba),
    PerBar(Vec<Rgba>),
}

impl ColorBinding {
    /// Color of the bar at `index`, if there is one.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<Rgba> {
        match self {
            ColorBinding::Uniform(c) => Some(*c),
            ColorBinding::PerBar(colors) => colors.get(index).copied(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
}

/// One bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,

    /// One value per category, in category order.
    pub data: Vec<f64>,

    pub background_color: ColorBinding,

    pub border_color: ColorBinding,

    pub border_width: u32,

    /// Draw order; lower values are drawn in front.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

/// Preformatted tooltip labels for one dataset, one per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetTooltips {
    pub dataset: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub labels: Vec<DatasetTooltips>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    pub title: TitleOptions,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub min: f64,
    pub max: f64,
    pub step_size: f64,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: PluginOptions,
    pub scales: ScaleOptions,
}

/// Everything a bar-chart widget needs to draw the strategy comparison.
///
/// The core computes every number and label; the front end only binds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Look up a dataset by its label.
    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&ChartDataset> {
        self.data.datasets.iter().find(|d| d.label == label)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
