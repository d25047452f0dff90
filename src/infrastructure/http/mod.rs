//! HTTP transport for the language API

pub mod http_transport;

pub use http_transport::*;
