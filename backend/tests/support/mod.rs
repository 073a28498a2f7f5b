//! Embedded PostgreSQL helpers for the Diesel adapter suites.
//!
//! Each test gets its own temporary database on a cluster shared by the test
//! binary, with the embedded migrations applied. Machines that cannot start
//! the cluster skip these suites unless `REQUIRE_TEST_CLUSTER` is truthy, in
//! which case setup failures panic so CI breakage is not masked.

use std::time::Duration;

use guest_list::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 3;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated temporary database and a pool connected to it.
///
/// The database is dropped together with this value.
pub struct MigratedDatabase {
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

/// Returns true when `REQUIRE_TEST_CLUSTER` is "1", "true" or "yes".
fn require_test_cluster() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None`, or panics when
/// `REQUIRE_TEST_CLUSTER` is truthy.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if require_test_cluster() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => {
                return Err(format!("shared cluster: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Creates a fresh database, runs the migrations and opens a pool of
/// `max_size` connections on `runtime`.
pub fn migrated_database(runtime: &Runtime, max_size: u32) -> Result<MigratedDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4()))
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_owned();

    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate: {err}"))?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(max_size)))
        .map_err(|err| format!("pool: {err}"))?;

    Ok(MigratedDatabase {
        pool,
        _database: database,
    })
}
