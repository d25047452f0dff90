//! Language API domain - request shapes, transport port and the validating gateway

pub mod errors;
pub mod gateway;
pub mod traits;
pub mod types;

pub use errors::*;
pub use gateway::*;
pub use traits::*;
pub use types::*;
