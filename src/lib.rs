//! gRPC service that derives best ask/bid rates from Grinex order book depth
//! and records them in Postgres.
//!
//! Request flow: `handler` -> `service` -> `adapter` (`grinex` client) ->
//! `depth` validation -> `rate` -> `storage`.

pub mod adapter;
pub mod config;
pub mod depth;
pub mod grinex;
pub mod handler;
pub mod logger;
pub mod proto;
pub mod rate;
pub mod server;
pub mod service;
pub mod storage;

/// Opaque error returned across capability traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
