use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::request::InvestmentRequest;
use crate::models::result::InvestmentResult;

/// The remote service that runs the DCA simulation.
///
/// The calculator only ever talks to the backend through this trait, so the
/// HTTP client can be swapped for an in-memory one in tests or embedders.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SimulationBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Send one request and return the parsed, checked response.
    ///
    /// Exactly one attempt: implementations must not retry.
    async fn submit(&self, request: &InvestmentRequest) -> Result<InvestmentResult, CoreError>;
}
