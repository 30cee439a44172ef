//! Transport module
//!
//! Serves the HTTP API.

pub mod http;

pub use http::{DEFAULT_HTTP_PORT, HttpConfig, run_http, run_http_blocking, serve};
