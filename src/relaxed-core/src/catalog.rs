//! Endpoint catalogue for the server and database APIs.
//!
//! Allow-lists are exhaustive: a key missing here is never sent upstream.

use crate::endpoint::{Endpoint, Method};
use crate::schema::{KeySchema, ValueKind::*};

pub const ALL_DBS_KEYS: KeySchema = KeySchema::new(&[
    ("descending", Bool),
    ("limit", Int),
    ("skip", Int),
    ("startkey", List),
    ("start_key", List),
    ("endkey", List),
    ("end_key", List),
]);

pub const DBS_INFO_KEYS: KeySchema = KeySchema::new(&[("keys", List)]);

pub const CLUSTER_SETUP_GET_KEYS: KeySchema = KeySchema::new(&[("ensure_dbs_exist", List)]);

pub const CLUSTER_SETUP_POST_KEYS: KeySchema = KeySchema::new(&[
    ("action", Str),
    ("bind_address", Str),
    ("host", Str),
    ("port", Int),
    ("node_code", Int),
    ("remote_node", Str),
    ("username", Str),
    ("password", Str),
    ("remote_current_user", Str),
    ("remote_current_password", Str),
    ("ensure_dbs_exist", List),
]);

pub const DB_UPDATES_KEYS: KeySchema = KeySchema::new(&[
    ("feed", Str),
    ("timeout", Int),
    ("heartbeat", Int),
    ("since", Str),
]);

pub const REPLICATE_KEYS: KeySchema = KeySchema::new(&[
    ("cancel", Bool),
    ("continuous", Bool),
    ("create_target", Bool),
    ("doc_ids", List),
    ("filter", Str),
    ("proxy", Str),
    ("source", Object),
    ("target", Object),
]);

pub const SCHEDULER_JOBS_KEYS: KeySchema = KeySchema::new(&[("limit", Int), ("skip", Int)]);
pub const SCHEDULER_DOCS_KEYS: KeySchema = KeySchema::new(&[("limit", Int), ("skip", Int)]);
pub const UUIDS_KEYS: KeySchema = KeySchema::new(&[("count", Int)]);

// Server

pub const INFO: Endpoint = Endpoint::get("get_info", "/");
pub const UP: Endpoint = Endpoint::get("get_server_status", "/_up");
pub const ACTIVE_TASKS: Endpoint = Endpoint::get("get_active_tasks", "/_active_tasks");
pub const ALL_DBS: Endpoint = Endpoint::get("get_database_names", "/_all_dbs").with_keys(ALL_DBS_KEYS);
pub const DBS_INFO: Endpoint = Endpoint::get("get_databases", "/_dbs_info")
    .with_method(Method::Post)
    .with_keys(DBS_INFO_KEYS);
pub const CLUSTER_SETUP: Endpoint =
    Endpoint::get("get_cluster_setup", "/_cluster_setup").with_keys(CLUSTER_SETUP_GET_KEYS);
pub const CONFIGURE_CLUSTER_SETUP: Endpoint = Endpoint::get("configure_cluster_setup", "/_cluster_setup")
    .with_method(Method::Post)
    .with_keys(CLUSTER_SETUP_POST_KEYS);
pub const DB_UPDATES: Endpoint = Endpoint::get("get_database_updates", "/_db_updates")
    .with_method(Method::Post)
    .with_keys(DB_UPDATES_KEYS);
pub const MEMBERSHIP: Endpoint = Endpoint::get("get_membership", "/_membership");
pub const REPLICATE: Endpoint = Endpoint::get("replicate", "/_replicate")
    .with_method(Method::Post)
    .with_keys(REPLICATE_KEYS);
pub const SCHEDULER_JOBS: Endpoint =
    Endpoint::get("get_replication_updates", "/_scheduler/jobs").with_keys(SCHEDULER_JOBS_KEYS);
pub const SCHEDULER_DOCS: Endpoint =
    Endpoint::get("get_replication_docs", "/_scheduler/docs").with_keys(SCHEDULER_DOCS_KEYS);
pub const SCHEDULER_DB_DOCS: Endpoint =
    Endpoint::get("get_replicator_docs", "/_scheduler/docs/:db:").with_keys(SCHEDULER_DOCS_KEYS);
pub const SCHEDULER_DOC: Endpoint = Endpoint::get("get_replicator_doc", "/_scheduler/docs/:db:/:docid:");
pub const NODE_STATS: Endpoint = Endpoint::get("get_node_server_stats", "/_node/:node_name:/_stats");
pub const NODE_STAT: Endpoint = Endpoint::get("get_node_server_stat", "/_node/:node_name:/_stats/:stat:");
pub const NODE_SYSTEM: Endpoint = Endpoint::get("get_node_system_stats", "/_node/:node_name:/_system");
pub const RESTART_NODE: Endpoint =
    Endpoint::get("restart_node", "/_node/:node_name:/_restart").with_method(Method::Post);
pub const SERVER_CONFIG: Endpoint = Endpoint::get("get_server_config", "/_node/:node_name:/_config");
pub const GET_CONFIG: Endpoint = Endpoint::get("get_config", "/_node/:node_name:/_config/:key:");
pub const SET_CONFIG: Endpoint =
    Endpoint::get("set_config", "/_node/:node_name:/_config/:key:").with_method(Method::Put);
pub const DELETE_CONFIG: Endpoint =
    Endpoint::get("delete_config", "/_node/:node_name:/_config/:key:").with_method(Method::Delete);
pub const UUIDS: Endpoint = Endpoint::get("generate_uuids", "/_uuids").with_keys(UUIDS_KEYS);
pub const UPTIME: Endpoint = Endpoint::get("get_uptime", "/_node/:node_name:/_system");

// Database

pub const DB_EXISTS: Endpoint = Endpoint::get("database_exists", "/:db:").with_method(Method::Head);
pub const DOC_INFO: Endpoint = Endpoint::get("get_doc_info", "/:db:/:docid:").with_method(Method::Head);

/// Every catalogued endpoint, in declaration order.
pub const ALL: &[Endpoint] = &[
    INFO,
    UP,
    ACTIVE_TASKS,
    ALL_DBS,
    DBS_INFO,
    CLUSTER_SETUP,
    CONFIGURE_CLUSTER_SETUP,
    DB_UPDATES,
    MEMBERSHIP,
    REPLICATE,
    SCHEDULER_JOBS,
    SCHEDULER_DOCS,
    SCHEDULER_DB_DOCS,
    SCHEDULER_DOC,
    NODE_STATS,
    NODE_STAT,
    NODE_SYSTEM,
    RESTART_NODE,
    SERVER_CONFIG,
    GET_CONFIG,
    SET_CONFIG,
    DELETE_CONFIG,
    UUIDS,
    UPTIME,
    DB_EXISTS,
    DOC_INFO,
];

/// Look up an endpoint by operation name.
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|endpoint| endpoint.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = ALL.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("replicate"), Some(&REPLICATE));
        assert!(find("compact").is_none());
    }

    #[test]
    fn test_probes_take_no_parameters() {
        for endpoint in ALL.iter().filter(|e| e.method == Method::Head) {
            assert!(endpoint.key_schema.is_none(), "{}", endpoint.name);
        }
    }

    #[test]
    fn test_replicate_allow_list_verbatim() {
        let keys: Vec<_> = REPLICATE_KEYS.keys().collect();
        assert_eq!(
            keys,
            vec!["cancel", "continuous", "create_target", "doc_ids", "filter", "proxy", "source", "target"]
        );
    }
}
