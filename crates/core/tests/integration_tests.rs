use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use chrono::NaiveDate;

use dca_calculator_core::errors::{CoreError, ValidationError};
use dca_calculator_core::models::request::{FormField, FormState, InvestmentRequest};
use dca_calculator_core::models::result::{InvestmentResult, StrategyOutcome, StrategyResults};
use dca_calculator_core::models::settings::{Locale, Settings};
use dca_calculator_core::providers::traits::SimulationBackend;
use dca_calculator_core::services::chart_service::{ChartPalette, PROFIT_LOSS_LABEL};
use dca_calculator_core::view::{ResultsArea, ResultsState, ResultsView};
use dca_calculator_core::DcaCalculator;

// ═══════════════════════════════════════════════════════════════════
// Mock Simulation Backend (for testing without a real service)
// ═══════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail500,
    Malformed,
}

struct MockBackend {
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
    last_ticker: Arc<std::sync::Mutex<Option<String>>>,
}

impl MockBackend {
    fn new(behavior: Behavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = Self {
            behavior,
            calls: calls.clone(),
            last_ticker: Arc::default(),
        };
        (backend, calls)
    }
}

#[async_trait]
impl SimulationBackend for MockBackend {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn submit(&self, request: &InvestmentRequest) -> Result<InvestmentResult, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ticker.lock().unwrap() = Some(request.ticker.clone());
        match self.behavior {
            Behavior::Succeed => Ok(InvestmentResult {
                symbol: request.ticker.clone(),
                amount: Some(request.amount),
                frequency: Some(request.frequency.to_string()),
                start_date: Some(request.start_date.to_string()),
                end_date: Some(request.end_date.to_string()),
                results: StrategyResults {
                    daily: StrategyOutcome::new(100.0, -5.0),
                    weekly: StrategyOutcome::new(100.0, 3.0),
                    monthly: StrategyOutcome::new(100.0, 0.0),
                },
            }),
            Behavior::Fail500 => Err(CoreError::Http {
                status: 500,
                detail: None,
            }),
            Behavior::Malformed => Err(CoreError::MalformedResponse("missing field `results`".into())),
        }
    }
}

/// View that records every call, to check nothing is shown partially.
#[derive(Default)]
struct RecordingView {
    calls: Vec<String>,
}

impl ResultsView for RecordingView {
    fn show_results(&mut self, _results: &dca_calculator_core::models::rendered::RenderedResults) {
        self.calls.push("results".into());
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(format!("error:{message}"));
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn calculator(behavior: Behavior) -> (DcaCalculator, Arc<AtomicUsize>) {
    let (backend, calls) = MockBackend::new(behavior);
    (DcaCalculator::with_backend(Settings::default(), Box::new(backend)), calls)
}

// ═══════════════════════════════════════════════════════════════════
// Form defaults and request building through the facade
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    #[test]
    fn initial_form_is_submittable() {
        let (calc, _) = calculator(Behavior::Succeed);
        let form = calc.initial_form(today());
        let request = calc.build_request(&form).unwrap();
        assert_eq!(request.ticker, "AAPL");
        assert_eq!(request.amount, 10.0);
        assert_eq!(request.end_date, today());
    }

    #[test]
    fn renderer_uses_configured_locale() {
        let (backend, _) = MockBackend::new(Behavior::Succeed);
        let settings = Settings {
            locale: Locale::DeDe,
            ..Settings::default()
        };
        let calc = DcaCalculator::with_backend(settings, Box::new(backend));
        let result = InvestmentResult::from_json(
            r#"{"symbol":"SAP","results":{
                "daily":{"total_invested":1500,"profit_loss":1},
                "weekly":{"total_invested":1500,"profit_loss":1},
                "monthly":{"total_invested":1500,"profit_loss":1}}}"#,
        )
        .unwrap();
        let rendered = calc.render(&result);
        assert_eq!(
            rendered.chart.options.plugins.tooltip.labels[0].labels[0],
            "Total Invested: 1.500,00\u{a0}$"
        );
    }

    #[test]
    fn debug_shows_backend_name() {
        let (calc, _) = calculator(Behavior::Succeed);
        assert!(format!("{calc:?}").contains("Mock"));
        assert_eq!(calc.backend_name(), "Mock");
    }

    #[test]
    fn new_rejects_bad_base_url() {
        let settings = Settings {
            base_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(DcaCalculator::new(settings), Err(CoreError::Config(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Submission flow
// ═══════════════════════════════════════════════════════════════════

mod submission {
    use super::*;

    #[tokio::test]
    async fn success_renders_table_and_chart_together() {
        let (calc, calls) = calculator(Behavior::Succeed);
        let mut form = calc.initial_form(today());
        form.set(FormField::Ticker, "aapl");

        let mut area = ResultsArea::new();
        let rendered = calc.submit(&form, &mut area).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(area.rendered(), Some(&rendered));
        assert!(rendered.table.as_str().contains("$100.00"));
        assert!(rendered.table.as_str().contains("$-5.00"));

        let pl = rendered.chart.dataset(PROFIT_LOSS_LABEL).unwrap();
        assert_eq!(pl.background_color.color_at(0), Some(ChartPalette::default().unfavorable));
    }

    #[tokio::test]
    async fn lowercase_ticker_reaches_backend_uppercased() {
        let (backend, _) = MockBackend::new(Behavior::Succeed);
        let last_ticker = backend.last_ticker.clone();
        let calc = DcaCalculator::with_backend(Settings::default(), Box::new(backend));

        let form = FormState {
            ticker: "aapl".into(),
            ..calc.initial_form(today())
        };
        calc.submit(&form, &mut ResultsArea::new()).await.unwrap();
        assert_eq!(last_ticker.lock().unwrap().as_deref(), Some("AAPL"));
    }

    #[tokio::test]
    async fn invalid_amount_never_calls_backend() {
        let (calc, calls) = calculator(Behavior::Succeed);
        let mut form = calc.initial_form(today());
        form.set(FormField::Amount, "-10");

        let mut area = ResultsArea::new();
        let err = calc.submit(&form, &mut area).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidAmount(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(area.error_message().unwrap().starts_with("Error: Invalid amount"));
    }

    #[tokio::test]
    async fn invalid_frequency_never_calls_backend() {
        let (calc, calls) = calculator(Behavior::Succeed);
        let mut form = calc.initial_form(today());
        form.set(FormField::Frequency, "hourly");

        let err = calc.fetch(&form).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidFrequency(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_failure_shows_error_and_no_chart() {
        let (calc, calls) = calculator(Behavior::Fail500);
        let form = calc.initial_form(today());

        let mut area = ResultsArea::new();
        let err = calc.submit(&form, &mut area).await.unwrap_err();

        assert!(matches!(err, CoreError::Http { status: 500, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(area.rendered().is_none());
        assert_eq!(area.error_message(), Some("Error: Backend returned HTTP 500"));
    }

    #[tokio::test]
    async fn malformed_response_displayed_like_network_error() {
        let (calc, _) = calculator(Behavior::Malformed);
        let mut area = ResultsArea::new();
        calc.submit(&calc.initial_form(today()), &mut area).await.unwrap_err();
        assert!(area.error_message().unwrap().starts_with("Error: Malformed response"));
    }

    #[tokio::test]
    async fn view_gets_exactly_one_call() {
        for behavior in [Behavior::Succeed, Behavior::Fail500, Behavior::Malformed] {
            let (calc, _) = calculator(behavior);
            let mut view = RecordingView::default();
            let _ = calc.submit(&calc.initial_form(today()), &mut view).await;
            assert_eq!(view.calls.len(), 1);
        }
    }

    #[tokio::test]
    async fn later_submission_overwrites_earlier() {
        let (ok_calc, _) = calculator(Behavior::Succeed);
        let (failing_calc, _) = calculator(Behavior::Fail500);
        let form = ok_calc.initial_form(today());
        let mut area = ResultsArea::new();
        assert!(area.is_empty());

        ok_calc.submit(&form, &mut area).await.unwrap();
        assert!(matches!(area.state(), ResultsState::Rendered(_)));

        failing_calc.submit(&form, &mut area).await.unwrap_err();
        assert!(matches!(area.state(), ResultsState::Failed(_)));

        ok_calc.submit(&form, &mut area).await.unwrap();
        assert!(area.rendered().is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════
// End to end over HTTP
// ═══════════════════════════════════════════════════════════════════

mod over_http {
    use super::*;

    async fn spawn(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/api/submit-dates", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn http_500_shows_error_and_draws_nothing() {
        let url = spawn(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let calc = DcaCalculator::new(Settings {
            base_url: url,
            ..Settings::default()
        })
        .unwrap();

        let mut area = ResultsArea::new();
        let result = calc.submit(&calc.initial_form(today()), &mut area).await;

        assert!(result.is_err());
        assert!(area.error_message().unwrap().starts_with("Error: "));
        assert!(area.rendered().is_none());
    }

    #[tokio::test]
    async fn http_success_renders() {
        let url = spawn(
            StatusCode::OK,
            r#"{"symbol":"AAPL","amount":10,"frequency":"daily","start_date":"2024-01-01","end_date":"2024-01-02",
                "results":{"daily":{"total_invested":100,"profit_loss":-5},
                           "weekly":{"total_invested":100,"profit_loss":3},
                           "monthly":{"total_invested":100,"profit_loss":0}}}"#,
        )
        .await;
        let calc = DcaCalculator::new(Settings {
            base_url: url,
            ..Settings::default()
        })
        .unwrap();

        let mut area = ResultsArea::new();
        calc.submit(&calc.initial_form(today()), &mut area).await.unwrap();

        let rendered = area.rendered().unwrap();
        assert!(rendered.table.as_str().contains("Investment Results for AAPL"));
        assert_eq!(rendered.chart.data.labels, ["Daily", "Weekly", "Monthly"]);
    }
}
