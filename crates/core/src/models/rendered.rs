use serde::{Deserialize, Serialize};
use std::fmt;

use super::chart::ChartSpec;

/// HTML markup of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableMarkup(String);

impl TableMarkup {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TableMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table and chart for one response. Built together, never one without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedResults {
    pub table: TableMarkup,
    pub chart: ChartSpec,
}
