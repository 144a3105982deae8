use thiserror::Error;

/// Malformed user input. Never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),
}

/// Unified error type for the entire dca-calculator-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input ───────────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}{}", detail_suffix(.detail))]
    Http {
        status: u16,
        detail: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// The text placed in the results area when a submission fails.
    #[must_use]
    pub fn display_message(&self) -> String {
        format!("Error: {self}")
    }

    /// True for failures that happened after the request left the client.
    #[must_use]
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_) | CoreError::Http { .. } | CoreError::MalformedResponse(_)
        )
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::MalformedResponse(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop any query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
