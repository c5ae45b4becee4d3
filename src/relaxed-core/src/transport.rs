use anyhow::Result;

use crate::binder::PreparedRequest;
use crate::mapper::RawResponse;

/// Sends a prepared request and returns the raw response.
///
/// Connection-level failures are returned as errors; any HTTP status,
/// including 4xx and 5xx, is a successful `RawResponse`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &PreparedRequest) -> Result<RawResponse>;
}
