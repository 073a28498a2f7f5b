//! Guest list service library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the guest rules and
//! ports, [`inbound`] adapts HTTP requests onto them and [`outbound`] stores
//! guests in PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
