//! Relaxed Core Library
//!
//! Declarative endpoint dispatch for the document database HTTP API:
//! - Endpoint descriptors and parameter allow-lists
//! - Request binding (path placeholders, query strings, bodies)
//! - Response mapping into values or `CouchError`
//! - The transport seam and the generic `invoke` pipeline
//! - The static endpoint catalogue

pub mod binder;
pub mod catalog;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod invoke;
pub mod mapper;
pub mod schema;
pub mod transport;

// Re-export commonly used types
pub use binder::{bind, KeyPolicy, Params, PreparedRequest, Segments};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Method};
pub use error::{CouchError, CouchResult, Error, Result, UsageError};
pub use invoke::{invoke, invoke_raw, Call};
pub use mapper::{map_etag, map_exists, map_response, RawResponse};
pub use schema::{KeySchema, ValueKind};
pub use transport::Transport;
