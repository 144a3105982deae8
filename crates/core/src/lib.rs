pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod view;

use chrono::NaiveDate;
use models::{
    rendered::RenderedResults,
    request::{FormState, InvestmentRequest},
    result::InvestmentResult,
    settings::Settings,
};
use providers::{http_backend::HttpSimulationBackend, traits::SimulationBackend};
use services::{render_service::ResultRenderer, request_builder::RequestBuilder};
use tracing::Instrument;
use view::ResultsView;

use errors::{CoreError, ValidationError};

/// Main entry point for the DCA calculator core.
/// Holds the settings, the backend and the services one submission needs.
#[must_use]
pub struct DcaCalculator {
    settings: Settings,
    backend: Box<dyn SimulationBackend>,
    request_builder: RequestBuilder,
    renderer: ResultRenderer,
}

impl std::fmt::Debug for DcaCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcaCalculator")
            .field("settings", &self.settings)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl DcaCalculator {
    /// Create a calculator talking to the HTTP backend at `settings.base_url`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let backend = HttpSimulationBackend::new(&settings)?;
        Ok(Self::with_backend(settings, Box::new(backend)))
    }

    /// Create a calculator with any backend implementation.
    pub fn with_backend(settings: Settings, backend: Box<dyn SimulationBackend>) -> Self {
        let renderer = ResultRenderer::new(settings.locale);
        Self {
            settings,
            backend,
            request_builder: RequestBuilder::new(),
            renderer,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    // ── Form ────────────────────────────────────────────────────────

    /// Form contents on initial load; `today` is the end date.
    pub fn initial_form(&self, today: NaiveDate) -> FormState {
        FormState::with_defaults(today)
    }

    /// Validate and normalize the form into an outbound request.
    pub fn build_request(&self, form: &FormState) -> Result<InvestmentRequest, ValidationError> {
        self.request_builder.build(form)
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Table markup and chart spec for a response.
    pub fn render(&self, result: &InvestmentResult) -> RenderedResults {
        self.renderer.render(result)
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Validate, call the backend once and render.
    /// Nothing is shown anywhere; see [`DcaCalculator::submit`] for that.
    pub async fn fetch(&self, form: &FormState) -> Result<RenderedResults, CoreError> {
        let request = self.build_request(form)?;
        tracing::debug!(
            ticker = %request.ticker,
            amount = request.amount,
            frequency = %request.frequency,
            start = %request.start_date,
            end = %request.end_date,
            backend = self.backend.name(),
            "submitting simulation request"
        );

        let result = self.backend.submit(&request).await?;
        Ok(self.renderer.render(&result))
    }

    /// Run one submission and push its outcome to `view`.
    ///
    /// On success the view gets the table and chart together. On any failure
    /// (invalid input, transport error, non-2xx status, malformed body) it
    /// gets `"Error: {message}"` instead and the error is returned as well.
    /// Overlapping calls are not coordinated: whichever finishes last is what
    /// the view shows.
    pub async fn submit(
        &self,
        form: &FormState,
        view: &mut dyn ResultsView,
    ) -> Result<RenderedResults, CoreError> {
        let span = tracing::info_span!(
            "submission",
            submission_id = %uuid::Uuid::new_v4(),
            ticker = %form.ticker,
        );

        let outcome = self.fetch(form).instrument(span.clone()).await;

        let _entered = span.enter();
        match &outcome {
            Ok(rendered) => {
                tracing::info!("simulation results rendered");
                view.show_results(rendered);
            }
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                view.show_error(&e.display_message());
            }
        }
        outcome
    }
}
