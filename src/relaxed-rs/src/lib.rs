//! Relaxed Client Library
//!
//! HTTP client for the document database server API.

mod client;
mod database;
mod server;
mod transport;

pub use client::CouchClient;
pub use database::Database;
pub use server::{uptime_from, uuids_from, Server, Uuids};
pub use transport::HttpTransport;

pub use relaxed_core::{
    catalog, Call, ClientConfig, CouchError, CouchResult, Error, KeyPolicy, Params, Result, Segments, UsageError,
};
