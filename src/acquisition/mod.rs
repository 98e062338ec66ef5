//! HTTP acquisition: the network boundary for all fetches.

pub mod http_client;
