use crate::models::rendered::RenderedResults;

/// Id of the form element whose submit event starts a submission.
pub const FORM_ID: &str = "dateForm";

/// Id of the container that receives the results or the error message.
pub const RESULT_CONTAINER_ID: &str = "result";

/// Id of the canvas the chart is drawn on.
pub const CHART_CANVAS_ID: &str = "investmentChart";

/// The results area of the page, seen from the core.
///
/// A page adapter implements this on top of its document; the core never
/// touches elements itself. Each call replaces whatever was shown before.
pub trait ResultsView {
    /// Show the table, then draw the chart.
    fn show_results(&mut self, results: &RenderedResults);

    /// Replace the results area with an error message (`"Error: ..."`).
    fn show_error(&mut self, message: &str);
}

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
    #[default]
    Empty,
    Rendered(RenderedResults),
    Failed(String),
}

/// In-memory [`ResultsView`]. Later submissions overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ResultsArea {
    state: ResultsState,
}

impl ResultsArea {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    #[must_use]
    pub fn rendered(&self) -> Option<&RenderedResults> {
        match &self.state {
            ResultsState::Rendered(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ResultsState::Failed(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state == ResultsState::Empty
    }
}

impl ResultsView for ResultsArea {
    fn show_results(&mut self, results: &RenderedResults) {
        self.state = ResultsState::Rendered(results.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.state = ResultsState::Failed(message.to_string());
    }
}
