use relaxed_core::{catalog, Call, CouchResult, Endpoint, Params, Result, Segments};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::CouchClient;

/// UUIDs handed out by `/_uuids`: a single id is returned bare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uuids {
    One(String),
    Many(Vec<String>),
}

/// Server-level operations. `node_name` defaults to the configured node.
pub struct Server<'a> {
    client: &'a CouchClient,
    predefined: Segments,
}

impl<'a> Server<'a> {
    pub(crate) fn new(client: &'a CouchClient) -> Self {
        let predefined = Segments::new().with("node_name", client.config().node_name.as_str());
        Self { client, predefined }
    }

    async fn call(&self, endpoint: &Endpoint, call: Call) -> Result<CouchResult<Value>> {
        let call = Call {
            segments: call.segments.or_defaults(&self.predefined),
            ..call
        };
        self.client.invoke(endpoint, call).await
    }

    async fn on_node(&self, endpoint: &Endpoint, node: Option<&str>, call: Call) -> Result<CouchResult<Value>> {
        let call = match node {
            Some(node) => call.segment("node_name", node),
            None => call,
        };
        self.call(endpoint, call).await
    }

    /// Welcome document with version and vendor
    pub async fn get_info(&self) -> Result<CouchResult<Value>> {
        self.call(&catalog::INFO, Call::new()).await
    }

    pub async fn get_server_status(&self) -> Result<CouchResult<Value>> {
        self.call(&catalog::UP, Call::new()).await
    }

    pub async fn get_active_tasks(&self) -> Result<CouchResult<Value>> {
        self.call(&catalog::ACTIVE_TASKS, Call::new()).await
    }

    pub async fn get_database_names(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::ALL_DBS, Call::new().params(params)).await
    }

    pub async fn get_databases(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::DBS_INFO, Call::new().params(params)).await
    }

    pub async fn get_cluster_setup(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::CLUSTER_SETUP, Call::new().params(params)).await
    }

    pub async fn configure_cluster_setup(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::CONFIGURE_CLUSTER_SETUP, Call::new().params(params))
            .await
    }

    pub async fn get_database_updates(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::DB_UPDATES, Call::new().params(params)).await
    }

    pub async fn get_membership(&self) -> Result<CouchResult<Value>> {
        self.call(&catalog::MEMBERSHIP, Call::new()).await
    }

    pub async fn replicate(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::REPLICATE, Call::new().params(params)).await
    }

    /// Status of the replication jobs currently active
    pub async fn get_replication_updates(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::SCHEDULER_JOBS, Call::new().params(params)).await
    }

    /// All replication documents
    pub async fn get_replication_docs(&self, params: Params) -> Result<CouchResult<Value>> {
        self.call(&catalog::SCHEDULER_DOCS, Call::new().params(params)).await
    }

    /// Replication documents of one replicator database
    pub async fn get_replicator_docs(&self, db: &str, params: Params) -> Result<CouchResult<Value>> {
        self.call(
            &catalog::SCHEDULER_DB_DOCS,
            Call::new().segment("db", db).params(params),
        )
        .await
    }

    pub async fn get_replicator_doc(&self, db: &str, docid: &str) -> Result<CouchResult<Value>> {
        self.call(
            &catalog::SCHEDULER_DOC,
            Call::new().segment("db", db).segment("docid", docid),
        )
        .await
    }

    pub async fn get_node_server_stats(&self, node: Option<&str>) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::NODE_STATS, node, Call::new()).await
    }

    /// A section or subsection of the node statistics, e.g. `couchdb/request_time`
    pub async fn get_node_server_stat(&self, node: Option<&str>, stat: &str) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::NODE_STAT, node, Call::new().segment("stat", stat))
            .await
    }

    pub async fn get_node_system_stats(&self, node: Option<&str>) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::NODE_SYSTEM, node, Call::new()).await
    }

    pub async fn restart_node(&self, node: Option<&str>) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::RESTART_NODE, node, Call::new()).await
    }

    pub async fn get_server_config(&self, node: Option<&str>) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::SERVER_CONFIG, node, Call::new()).await
    }

    /// Configuration section (`log`) or key (`log/level`)
    pub async fn get_config(&self, node: Option<&str>, key: &str) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::GET_CONFIG, node, Call::new().segment("key", key))
            .await
    }

    /// Create or update a configuration key. The server answers with the previous value.
    pub async fn set_config(&self, node: Option<&str>, key: &str, value: Value) -> Result<CouchResult<Value>> {
        self.on_node(
            &catalog::SET_CONFIG,
            node,
            Call::new().segment("key", key).body(value),
        )
        .await
    }

    pub async fn delete_config(&self, node: Option<&str>, key: &str) -> Result<CouchResult<Value>> {
        self.on_node(&catalog::DELETE_CONFIG, node, Call::new().segment("key", key))
            .await
    }

    /// Fresh UUIDs from the server; `count` defaults to 1 server-side.
    pub async fn generate_uuids(&self, count: Option<u32>) -> Result<CouchResult<Uuids>> {
        let params = match count {
            Some(count) => Params::new().with("count", count),
            None => Params::new(),
        };
        let data = self.call(&catalog::UUIDS, Call::new().params(params)).await?;
        Ok(uuids_from(data))
    }

    /// Seconds the node has been running, or -1 when the server omits `uptime`
    pub async fn get_uptime(&self, node: Option<&str>) -> Result<CouchResult<i64>> {
        let data = self.on_node(&catalog::UPTIME, node, Call::new()).await?;
        Ok(uptime_from(data))
    }
}

pub fn uuids_from(data: CouchResult<Value>) -> CouchResult<Uuids> {
    let data = data?;
    let mut uuids: Vec<String> = data
        .get("uuids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    if uuids.len() == 1 {
        return Ok(Uuids::One(uuids.remove(0)));
    }
    Ok(Uuids::Many(uuids))
}

pub fn uptime_from(data: CouchResult<Value>) -> CouchResult<i64> {
    Ok(data?.get("uptime").and_then(Value::as_i64).unwrap_or(-1))
}
