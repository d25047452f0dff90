//! Infrastructure layer - concrete implementations of the API and cache ports

pub mod http;
pub mod output;

pub use http::*;
pub use output::*;
