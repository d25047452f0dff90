//! langbatch - caches translated language files and applet language XMLs
//! fetched from the language API.
//!
//! The [`application::LanguageBatch`] job drives the run; the transport and the
//! cache writer are injected so they can be swapped in tests.
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod infrastructure;

pub use api::{ApiError, ApiTransport, LanguageApi};
pub use application::{
    BatchReport, CacheWriter, GenerationError, GenerationErrorKind, LanguageBatch,
};
pub use config::BatchConfig;
