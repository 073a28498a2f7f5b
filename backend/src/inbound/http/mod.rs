//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod guests;
pub mod health;
pub mod rejection;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::{ApiResult, json_config};
pub use guests::configure;
pub use rejection::RejectionStatus;
