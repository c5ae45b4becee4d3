use serde_json::Value;
use tracing::Instrument;

use crate::binder::{bind, KeyPolicy, Params, PreparedRequest, Segments};
use crate::endpoint::Endpoint;
use crate::error::{CouchResult, Error, Result};
use crate::mapper::{map_response, RawResponse};
use crate::transport::Transport;

/// Inputs for one call against an endpoint.
#[derive(Debug, Clone, Default)]
pub struct Call {
    pub segments: Segments,
    pub params: Params,
    pub body: Option<Value>,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.segments.insert(name, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Bind, dispatch and map one call.
pub async fn invoke(
    transport: &dyn Transport,
    endpoint: &Endpoint,
    call: Call,
    policy: KeyPolicy,
) -> Result<CouchResult<Value>> {
    let response = invoke_raw(transport, endpoint, call, policy).await?;
    Ok(map_response(&response))
}

/// Bind and dispatch without mapping, for callers that read status or headers.
pub async fn invoke_raw(
    transport: &dyn Transport,
    endpoint: &Endpoint,
    call: Call,
    policy: KeyPolicy,
) -> Result<RawResponse> {
    let request = bind(endpoint, &call.segments, &call.params, call.body, policy)?;
    let span = tracing::debug_span!("couch_request", endpoint = endpoint.name, method = %request.method, path = %request.path);
    dispatch(transport, &request).instrument(span).await
}

async fn dispatch(transport: &dyn Transport, request: &PreparedRequest) -> Result<RawResponse> {
    let response = transport.execute(request).await.map_err(|e| {
        tracing::warn!("Transport failure: {:#}", e);
        Error::Transport(e)
    })?;
    tracing::debug!(status = response.status, "Response received");
    Ok(response)
}
