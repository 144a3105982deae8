use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::request::InvestmentRequest;
use crate::models::result::InvestmentResult;
use crate::models::settings::Settings;
use super::traits::SimulationBackend;

/// Calls the simulation service over HTTP.
///
/// - **Endpoint**: `POST {base_url}/api/submit-dates` with a JSON body.
/// - **Success**: any 2xx status; the body must parse as [`InvestmentResult`].
/// - **Failure**: any other status. The body is not required to parse, but a
///   `{"detail": ...}` error body is surfaced in the message when present.
/// - No retries. No timeout unless [`Settings::request_timeout_secs`] is set.
pub struct HttpSimulationBackend {
    client: Client,
    endpoint: Url,
}

impl HttpSimulationBackend {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        let endpoint = settings.submit_url()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match settings.request_timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

// ── Error body (FastAPI-style) ──────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SimulationBackend for HttpSimulationBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn submit(&self, request: &InvestmentRequest) -> Result<InvestmentResult, CoreError> {
        tracing::debug!(endpoint = %self.endpoint, ticker = %request.ticker, "POST submit-dates");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body is best-effort on failure.
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            tracing::warn!(status = status.as_u16(), detail = ?detail, "backend rejected request");
            return Err(CoreError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        InvestmentResult::from_json(&body)
    }
}
