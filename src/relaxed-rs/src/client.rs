use relaxed_core::{
    invoke, invoke_raw, Call, ClientConfig, CouchResult, Endpoint, Error, RawResponse, Result, Transport,
};
use serde_json::Value;
use std::sync::Arc;

use crate::database::Database;
use crate::server::Server;
use crate::transport::HttpTransport;

/// Document database REST API Client
#[derive(Clone)]
pub struct CouchClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl CouchClient {
    /// Create a client talking HTTP to the server described by `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config).map_err(Error::Transport)?;
        tracing::debug!(base_url = transport.base_url(), "Client created");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Server-level operations
    pub fn server(&self) -> Server<'_> {
        Server::new(self)
    }

    /// Operations scoped to one database
    pub fn database(&self, name: impl Into<String>) -> Database<'_> {
        Database::new(self, name.into())
    }

    /// Run any catalogued endpoint with the configured key policy
    pub async fn invoke(&self, endpoint: &Endpoint, call: Call) -> Result<CouchResult<Value>> {
        invoke(self.transport.as_ref(), endpoint, call, self.config.key_policy).await
    }

    pub(crate) async fn invoke_raw(&self, endpoint: &Endpoint, call: Call) -> Result<RawResponse> {
        invoke_raw(self.transport.as_ref(), endpoint, call, self.config.key_policy).await
    }
}
