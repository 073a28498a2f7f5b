//! Integration tests for `DieselGuestRepository` against embedded PostgreSQL.
//!
//! These run the real SQL: the conditional arrival and departure statements,
//! the unique-name constraint and the `created_at` ordering. Tests own a Tokio
//! runtime and block on it so the fixture can stay synchronous.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use futures_util::future::join;
use guest_list::domain::ports::{
    ArrivingEntourage, CheckInRequest, ConditionalWrite, GuestListCommand, GuestRepository,
    GuestRepositoryError,
};
use guest_list::domain::{
    ArrivalTime, Guest, GuestListOutcome, GuestListRejection, GuestListService, GuestName,
};
use guest_list::outbound::persistence::DieselGuestRepository;
use guest_list::test_support::FixedClock;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{MigratedDatabase, handle_cluster_setup_failure, migrated_database};

struct TestContext {
    runtime: Runtime,
    repository: DieselGuestRepository,
    _database: MigratedDatabase,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = migrated_database(&runtime, 4)?;
    let repository = DieselGuestRepository::new(database.pool.clone());
    Ok(TestContext {
        runtime,
        repository,
        _database: database,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn name(raw: &str) -> GuestName {
    GuestName::new(raw).expect("valid guest name")
}

fn guest(raw: &str, table_capacity: u32, accompanying_guests: u32) -> Guest {
    Guest::register(name(raw), table_capacity, accompanying_guests).expect("party fits")
}

fn stamp(hour: u32, minute: u32) -> ArrivalTime {
    ArrivalTime::from_time(&NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time"))
}

#[rstest]
fn inserted_guest_is_found_by_name(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_guest_is_found_by_name skipped");
        return;
    };

    let stored = ctx.block_on(async {
        ctx.repository
            .insert(&guest("Martins", 10, 2))
            .await
            .expect("insert");
        ctx.repository.find_by_name(&name("Martins")).await
    });

    let found = stored.expect("find").expect("guest stored");
    assert_eq!(found, guest("Martins", 10, 2));
    assert!(!found.has_arrived());

    let missing = ctx
        .block_on(ctx.repository.find_by_name(&name("Nobody")))
        .expect("find");
    assert!(missing.is_none());
}

#[rstest]
fn second_insert_under_the_same_name_is_a_duplicate(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: second_insert_under_the_same_name_is_a_duplicate skipped");
        return;
    };

    let second = ctx.block_on(async {
        ctx.repository
            .insert(&guest("Martins", 10, 2))
            .await
            .expect("first insert");
        ctx.repository.insert(&guest("Martins", 4, 0)).await
    });

    assert!(
        matches!(second, Err(GuestRepositoryError::Duplicate { ref name }) if name == "Martins"),
        "unexpected result: {second:?}"
    );
    let kept = ctx
        .block_on(ctx.repository.find_by_name(&name("Martins")))
        .expect("find")
        .expect("guest stored");
    assert_eq!(kept.table_capacity(), 10);
}

#[rstest]
fn arrival_is_recorded_only_once(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: arrival_is_recorded_only_once skipped");
        return;
    };

    let martins = name("Martins");
    let (first, second) = ctx.block_on(async {
        ctx.repository
            .insert(&guest("Martins", 10, 2))
            .await
            .expect("insert");
        let first = ctx
            .repository
            .record_arrival(&martins, 3, &stamp(21, 7))
            .await
            .expect("first arrival");
        let second = ctx
            .repository
            .record_arrival(&martins, 1, &stamp(22, 0))
            .await
            .expect("second arrival");
        (first, second)
    });

    assert_eq!(first, ConditionalWrite::Applied);
    assert_eq!(second, ConditionalWrite::Skipped);

    let arrived = ctx
        .block_on(ctx.repository.find_by_name(&martins))
        .expect("find")
        .expect("guest stored");
    assert_eq!(arrived.accompanying_guests(), 3);
    assert_eq!(arrived.arrival_time().map(ArrivalTime::as_str), Some("21:7"));
}

#[rstest]
fn arrival_of_an_unknown_guest_touches_nothing(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: arrival_of_an_unknown_guest_touches_nothing skipped");
        return;
    };

    let write = ctx
        .block_on(
            ctx.repository
                .record_arrival(&name("Nobody"), 0, &stamp(20, 0)),
        )
        .expect("arrival");
    assert_eq!(write, ConditionalWrite::Skipped);
    assert!(ctx.block_on(ctx.repository.list()).expect("list").is_empty());
}

#[rstest]
fn departure_requires_a_recorded_arrival(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: departure_requires_a_recorded_arrival skipped");
        return;
    };

    let francisco = name("Francisco");
    ctx.block_on(ctx.repository.insert(&guest("Francisco", 6, 5)))
        .expect("insert");

    let early = ctx
        .block_on(ctx.repository.remove_arrived(&francisco))
        .expect("early departure");
    assert_eq!(early, ConditionalWrite::Skipped);
    assert!(
        ctx.block_on(ctx.repository.find_by_name(&francisco))
            .expect("find")
            .is_some(),
        "guest who never arrived stays on the list"
    );

    let departure = ctx.block_on(async {
        ctx.repository
            .record_arrival(&francisco, 5, &stamp(13, 37))
            .await
            .expect("arrival");
        ctx.repository.remove_arrived(&francisco).await
    });
    assert_eq!(departure.expect("departure"), ConditionalWrite::Applied);
    assert!(
        ctx.block_on(ctx.repository.find_by_name(&francisco))
            .expect("find")
            .is_none()
    );

    let repeat = ctx
        .block_on(ctx.repository.remove_arrived(&francisco))
        .expect("repeat departure");
    assert_eq!(repeat, ConditionalWrite::Skipped);
}

#[rstest]
fn list_follows_registration_order(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: list_follows_registration_order skipped");
        return;
    };

    let listed = ctx.block_on(async {
        for (raw, delay) in [("Zoe", 20), ("Ana", 20), ("Martins", 0)] {
            ctx.repository
                .insert(&guest(raw, 4, 1))
                .await
                .expect("insert");
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        ctx.repository.list().await
    });

    let names: Vec<String> = listed
        .expect("list")
        .iter()
        .map(|stored| stored.name().as_str().to_owned())
        .collect();
    assert_eq!(names, ["Zoe", "Ana", "Martins"]);
}

#[rstest]
fn concurrent_check_ins_admit_the_guest_once(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_check_ins_admit_the_guest_once skipped");
        return;
    };

    let repository = Arc::new(ctx.repository.clone());
    let service = GuestListService::new(repository, Arc::new(FixedClock::at(21, 7)));
    let request = |count| CheckInRequest {
        name: name("Martins"),
        entourage: ArrivingEntourage::Counted(count),
    };

    let (left, right) = ctx.block_on(async {
        ctx.repository
            .insert(&guest("Martins", 10, 2))
            .await
            .expect("insert");
        join(service.check_in(request(2)), service.check_in(request(3))).await
    });

    let outcomes = [left.expect("check-in"), right.expect("check-in")];
    let accepted = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, GuestListOutcome::Accepted(_)))
        .count();
    let refused = outcomes
        .iter()
        .filter(|outcome| {
            matches!(
                outcome,
                GuestListOutcome::Rejected(GuestListRejection::AlreadyCheckedIn { .. })
            )
        })
        .count();
    assert_eq!((accepted, refused), (1, 1), "outcomes: {outcomes:?}");
}
