//! Application layer - the language batch job and the ports it writes through

pub mod errors;
pub mod language_batch;
pub mod traits;
pub mod types;

pub use errors::*;
pub use language_batch::*;
pub use traits::*;
pub use types::*;
