//! Inbound adapters (driving side).
//!
//! Adapters in this module translate transport concerns into domain calls.

pub mod http;
