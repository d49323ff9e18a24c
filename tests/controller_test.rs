use chrono::{DateTime, Utc};
use hostel_list_query::clients::{
    AccessHistoryClient, ApiKeyClient, KeyFilter, ListClient, RoomChangeClient,
};
use hostel_list_query::config::ControllerConfig;
use hostel_list_query::framework::mock::MockSource;
use hostel_list_query::framework::{ListError, ListQueryActor, SourceError};
use hostel_list_query::model::{AccessEntry, ApiKey, EntryStatus, RoomChangeRequest};
use hostel_list_query::query::{FetchPhase, ResultOrigin, ViewerZone};
use hostel_list_query::sources::PageMeta;
use hostel_list_query::views;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn at(ts: &str) -> DateTime<Utc> {
    ts.parse().expect("valid RFC 3339 timestamp")
}

fn entry(id: &str, status: EntryStatus, ts: &str) -> AccessEntry {
    AccessEntry::new(id, status, at(ts))
}

fn meta(total: u64, total_pages: u32) -> Option<PageMeta> {
    Some(PageMeta {
        total: Some(total),
        total_pages: Some(total_pages),
    })
}

/// Access-history controller over `mock`, dates read in UTC.
fn access_history(mock: &MockSource<AccessEntry>, config: &ControllerConfig) -> AccessHistoryClient {
    let options = views::access_history::options().zone(ViewerZone::utc());
    let (actor, client) = ListQueryActor::new(options, Arc::new(mock.clone()), config);
    tokio::spawn(actor.run());
    AccessHistoryClient::new(client)
}

/// 37 entries, every third one a check-in: 13 in, 24 out.
fn busy_day() -> Vec<AccessEntry> {
    (0..37)
        .map(|i| {
            let status = if i % 3 == 0 {
                EntryStatus::CheckedIn
            } else {
                EntryStatus::CheckedOut
            };
            entry(&format!("e{i}"), status, "2024-03-05T10:00:00Z")
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn sentinel_filter_value_leaves_query_unchanged() {
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    let untouched = client.inner().query().await.unwrap();
    assert!(untouched.params.is_empty());
    assert_eq!(untouched.page, Some(1));
    assert_eq!(untouched.limit, Some(10));

    client.show_status(None).await.unwrap();
    assert_eq!(client.inner().query().await.unwrap(), untouched);

    client.inner().set_filter("status", "").await.unwrap();
    assert_eq!(client.inner().query().await.unwrap(), untouched);
}

#[tokio::test(start_paused = true)]
async fn filter_changes_return_to_first_page() {
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    client.go_to_page(3).await.unwrap();
    assert_eq!(client.view().await.unwrap().page, 3);

    client.show_status(Some(EntryStatus::CheckedOut)).await.unwrap();
    assert_eq!(client.view().await.unwrap().page, 1);

    client.go_to_page(4).await.unwrap();
    client
        .filter_date("2024-03-05".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(client.view().await.unwrap().page, 1);

    client.go_to_page(2).await.unwrap();
    client.inner().reset_filters().await.unwrap();
    let query = client.inner().query().await.unwrap();
    assert_eq!(query.page, Some(1));
    assert!(query.params.is_empty());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_date_keeps_the_page() {
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    client
        .filter_date("2024-03-05".parse().unwrap())
        .await
        .unwrap();
    client.go_to_page(2).await.unwrap();
    client.clear_date_filter().await.unwrap();

    let query = client.inner().query().await.unwrap();
    assert_eq!(query.page, Some(2));
    assert!(!query.params.contains_key("date"));
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_falls_back_to_cache() {
    let mock = MockSource::new();
    mock.expect_query().return_err(SourceError::Status(503));
    let client = access_history(&mock, &ControllerConfig::default());

    // twelve check-ins among 37 records
    let mut cache = busy_day();
    cache[36].status = EntryStatus::CheckedOut;
    client.use_cached(Some(cache)).await.unwrap();
    client.show_status(Some(EntryStatus::CheckedIn)).await.unwrap();

    let view = client.settled().await.unwrap();
    assert_eq!(view.items.len(), 10);
    assert_eq!(view.total_items, 12);
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.origin, ResultOrigin::Local);
    assert_eq!(view.phase, FetchPhase::Success);
    assert!(view.error.is_none());
    assert!(view
        .items
        .iter()
        .all(|e| e.status == EntryStatus::CheckedIn));

    let counts = view.tab_counts.expect("local results carry tab counts");
    assert_eq!(counts["all"], 37);
    assert_eq!(counts["Checked In"], 12);
    assert_eq!(counts["Checked Out"], 25);

    assert_eq!(mock.calls().len(), 1);
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn rapid_changes_coalesce_into_one_fetch() {
    let mock = MockSource::new();
    mock.expect_query().return_ok(vec![], meta(0, 1));
    let client = access_history(&mock, &ControllerConfig::default());
    client.settled().await.unwrap();

    mock.expect_query().return_ok(vec![], meta(0, 1));
    client.show_status(Some(EntryStatus::CheckedIn)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    client.show_status(Some(EntryStatus::CheckedOut)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    client
        .filter_date("2024-03-05".parse().unwrap())
        .await
        .unwrap();

    let view = client.settled().await.unwrap();
    assert_eq!(view.phase, FetchPhase::Success);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2, "three changes, one fetch");
    let expected: BTreeMap<String, String> = [
        ("date".to_string(), "2024-03-05".to_string()),
        ("status".to_string(), "Checked Out".to_string()),
    ]
    .into();
    assert_eq!(calls[1].params, expected);
    assert_eq!(calls[1].page, Some(1));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn late_result_of_superseded_cycle_is_discarded() {
    let stale = entry("stale", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z");
    let fresh = entry("fresh", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z");

    let mock = MockSource::new();
    mock.expect_query()
        .after(Duration::from_secs(2))
        .return_ok(vec![stale], meta(1, 1));
    mock.expect_query()
        .after(Duration::from_millis(100))
        .return_ok(vec![fresh.clone()], meta(1, 1));
    let client = access_history(&mock, &ControllerConfig::default());

    // cycle 1 is in flight
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(mock.calls().len(), 1);
    assert!(client.view().await.unwrap().loading);

    client.show_status(Some(EntryStatus::CheckedOut)).await.unwrap();
    let view = client.settled().await.unwrap();
    assert_eq!(view.items, vec![fresh.clone()]);

    // cycle 1 answers long after cycle 2
    tokio::time::sleep(Duration::from_secs(3)).await;
    let view = client.view().await.unwrap();
    assert_eq!(view.items, vec![fresh]);
    assert_eq!(view.cycle, 2);
    assert!(!view.loading);
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn offline_with_cache_filters_locally() {
    let cache = vec![
        entry("a1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z"),
        entry("a2", EntryStatus::CheckedIn, "2024-03-05T23:50:00Z"),
        entry("a3", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z"),
        entry("a4", EntryStatus::CheckedOut, "2024-03-05T12:00:00Z"),
        entry("b1", EntryStatus::CheckedIn, "2024-03-06T07:00:00Z"),
        entry("b2", EntryStatus::CheckedOut, "2024-03-06T10:00:00Z"),
        entry("b3", EntryStatus::CheckedOut, "2024-03-06T11:00:00Z"),
        entry("b4", EntryStatus::CheckedOut, "2024-03-06T18:00:00Z"),
    ];
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    client.set_connectivity(false).await.unwrap();
    client.use_cached(Some(cache)).await.unwrap();
    client.show_status(Some(EntryStatus::CheckedIn)).await.unwrap();
    client
        .filter_date("2024-03-05".parse().unwrap())
        .await
        .unwrap();

    let view = client.settled().await.unwrap();
    let ids: Vec<&str> = view.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2"]);
    assert_eq!(view.total_items, 2);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.origin, ResultOrigin::Local);
    assert!(mock.calls().is_empty(), "offline with a cache never hits the network");
}

#[tokio::test(start_paused = true)]
async fn failure_without_cache_keeps_items_visible() {
    let shown = vec![
        entry("x1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z"),
        entry("x2", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z"),
    ];
    let mock = MockSource::new();
    mock.expect_query().return_ok(shown.clone(), meta(2, 1));
    let client = access_history(&mock, &ControllerConfig::default());
    client.settled().await.unwrap();

    mock.expect_query().return_err(SourceError::Status(500));
    client.refresh().await.unwrap();

    let view = client.settled().await.unwrap();
    assert_eq!(view.phase, FetchPhase::Failed);
    assert!(!view.loading);
    assert_eq!(view.items, shown);
    let error = view.error.expect("failure is reported");
    assert_eq!(error.message, "Failed to load access history");
    assert_eq!(error.source, SourceError::Status(500));
}

#[tokio::test(start_paused = true)]
async fn page_beyond_last_is_clamped_and_refetched() {
    let page_two = vec![
        entry("k1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z"),
        entry("k2", EntryStatus::CheckedIn, "2024-03-05T09:00:00Z"),
    ];
    let mock = MockSource::new();
    mock.expect_query().return_ok(vec![], meta(12, 2));
    let client = access_history(&mock, &ControllerConfig::default());
    client.settled().await.unwrap();

    mock.expect_query().return_ok(vec![], meta(12, 2));
    mock.expect_query().return_ok(page_two.clone(), meta(12, 2));
    client.go_to_page(5).await.unwrap();

    let view = client.settled().await.unwrap();
    assert_eq!(view.page, 2);
    assert_eq!(view.items, page_two);

    let calls = mock.calls();
    assert_eq!(calls[1].page, Some(5));
    assert_eq!(calls[2].page, Some(2));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn refresh_skips_the_debounce() {
    let mock = MockSource::new();
    mock.expect_query().return_ok(vec![], meta(0, 1));
    let client = access_history(&mock, &ControllerConfig::default());
    client.settled().await.unwrap();

    mock.expect_query().return_ok(vec![], meta(0, 1));
    let started = Instant::now();
    client.refresh().await.unwrap();
    let view = client.settled().await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(view.cycle, 2);
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let config = ControllerConfig {
        request_timeout: Duration::from_secs(1),
        ..ControllerConfig::default()
    };
    let mock = MockSource::new();
    mock.expect_query()
        .after(Duration::from_secs(30))
        .return_ok(vec![], None);
    let client = access_history(&mock, &config);

    let view = client.settled().await.unwrap();
    assert_eq!(view.phase, FetchPhase::Failed);
    assert_eq!(view.error.unwrap().source, SourceError::Timeout(1000));
}

#[tokio::test(start_paused = true)]
async fn panicking_source_still_clears_loading() {
    let mock = MockSource::new();
    mock.expect_query().panic();
    let client = access_history(&mock, &ControllerConfig::default());

    let view = client.settled().await.unwrap();
    assert!(!view.loading);
    assert_eq!(view.phase, FetchPhase::Failed);
    assert_eq!(view.error.unwrap().source, SourceError::Aborted);
}

#[tokio::test(start_paused = true)]
async fn invalid_inputs_are_rejected() {
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    assert!(matches!(
        client.inner().set_filter("room", "101").await,
        Err(ListError::Validation(_))
    ));
    assert!(matches!(
        client.inner().set_filter("date", "05/03/2024").await,
        Err(ListError::Validation(_))
    ));
    assert!(matches!(client.go_to_page(0).await, Err(ListError::Validation(_))));
    assert!(matches!(
        client.set_items_per_page(7).await,
        Err(ListError::Validation(_))
    ));

    client.set_items_per_page(20).await.unwrap();
    assert_eq!(client.inner().query().await.unwrap().limit, Some(20));
}

#[tokio::test(start_paused = true)]
async fn room_changes_wait_for_a_hostel() {
    let request: RoomChangeRequest = serde_json::from_value(serde_json::json!({
        "_id": "r1",
        "studentName": "Asha Verma",
        "rollNumber": "21CS004",
        "currentRoom": "Room 101",
        "status": "Pending",
        "createdAt": "2024-03-05T10:00:00Z"
    }))
    .unwrap();

    let mock = MockSource::new();
    let (actor, client) =
        views::room_changes::new(Arc::new(mock.clone()), &ControllerConfig::default());
    tokio::spawn(actor.run());

    tokio::time::sleep(Duration::from_secs(1)).await;
    let view = client.view().await.unwrap();
    assert_eq!(view.phase, FetchPhase::Idle);
    assert!(!view.pending);
    assert!(mock.calls().is_empty());

    mock.expect_query().return_ok(vec![request.clone()], meta(1, 1));
    client.select_hostel(Some("hostel_1".into())).await.unwrap();
    let view = client.settled().await.unwrap();
    assert_eq!(view.items, vec![request]);

    let calls = mock.calls();
    assert_eq!(calls[0].scope.as_deref(), Some("hostel_1"));
    assert_eq!(calls[0].params.get("status").map(String::as_str), Some("Pending"));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn room_change_search_and_reset() {
    let mock = MockSource::<RoomChangeRequest>::new();
    let (actor, client): (_, RoomChangeClient) =
        views::room_changes::new(Arc::new(mock.clone()), &ControllerConfig::default());
    tokio::spawn(actor.run());

    client.search("  21CS ").await.unwrap();
    client.show_status(None).await.unwrap();
    let query = client.inner().query().await.unwrap();
    assert_eq!(query.params.get("searchTerm").map(String::as_str), Some("21CS"));
    assert!(!query.params.contains_key("status"));

    client.reset_filters().await.unwrap();
    let query = client.inner().query().await.unwrap();
    assert_eq!(query.params.len(), 1);
    assert_eq!(query.params["status"], "Pending");
}

#[tokio::test(start_paused = true)]
async fn api_keys_filter_and_page_locally() {
    let keys: Vec<ApiKey> = serde_json::from_value(serde_json::json!([
        { "_id": "k1", "name": "Mess kiosk", "isActive": true, "createdAt": "2024-01-01T00:00:00Z" },
        { "_id": "k2", "name": "Gate scanner", "isActive": true, "createdAt": "2024-01-02T00:00:00Z" },
        { "_id": "k3", "name": "Laundry bot", "isActive": false, "createdAt": "2024-01-03T00:00:00Z" }
    ]))
    .unwrap();

    let mock = MockSource::new();
    mock.expect_query().return_ok(keys, None);
    let (actor, client): (_, ApiKeyClient) =
        views::api_keys::new(Arc::new(mock.clone()), &ControllerConfig::default());
    tokio::spawn(actor.run());

    let view = client.settled().await.unwrap();
    assert_eq!(view.items.len(), 3);
    assert_eq!(view.total_pages, 1);
    let counts = view.tab_counts.unwrap();
    assert_eq!(counts["active"], 2);
    assert_eq!(counts["inactive"], 1);

    client.show(KeyFilter::Active).await.unwrap();
    let view = client.view().await.unwrap();
    assert_eq!(view.items.len(), 2);
    assert!(!view.pending, "answered from the working set");

    client.search("GATE").await.unwrap();
    let view = client.view().await.unwrap();
    let names: Vec<&str> = view.items.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["Gate scanner"]);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page, None);
    assert!(calls[0].params.is_empty());
}

#[tokio::test(start_paused = true)]
async fn controller_stops_when_clients_are_dropped() {
    let mock = MockSource::<AccessEntry>::new();
    let options = views::access_history::options();
    let (actor, client) =
        ListQueryActor::new(options, Arc::new(mock), &ControllerConfig::default());
    let handle = tokio::spawn(actor.run());

    let second = client.clone();
    drop(client);
    second.set_page(2).await.unwrap();
    drop(second);

    handle.await.expect("controller exits cleanly");
}

fn key(id: &str, name: &str, is_active: bool) -> ApiKey {
    ApiKey {
        id: id.into(),
        name: name.into(),
        is_active,
        created_at: at("2024-01-01T00:00:00Z"),
        last_used: None,
    }
}

#[tokio::test(start_paused = true)]
async fn answer_for_old_inputs_does_not_clamp_the_new_page() {
    let old = entry("old", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z");
    let wanted = entry("p3", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z");

    let mock = MockSource::new();
    mock.expect_query()
        .after(Duration::from_millis(300))
        .return_ok(vec![old], meta(3, 1));
    mock.expect_query().return_ok(vec![wanted.clone()], meta(30, 3));
    let client = access_history(&mock, &ControllerConfig::default());

    // cycle 1 goes out at 500 ms and answers at 800 ms
    tokio::time::sleep(Duration::from_millis(600)).await;
    client.show_status(Some(EntryStatus::CheckedOut)).await.unwrap();
    client.go_to_page(3).await.unwrap();

    // cycle 1 has answered, the new inputs are still in their quiet period
    tokio::time::sleep(Duration::from_millis(300)).await;
    let view = client.view().await.unwrap();
    assert_eq!(view.page, 3);
    assert!(view.items.is_empty());
    assert_eq!(view.phase, FetchPhase::Fetching);
    assert!(view.pending);

    let view = client.settled().await.unwrap();
    assert_eq!(view.page, 3);
    assert_eq!(view.items, vec![wanted]);
    assert_eq!(view.total_pages, 3);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].params["status"], "Checked Out");
    assert_eq!(calls[1].page, Some(3));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn scope_change_drops_the_previous_working_set() {
    let mock = MockSource::new();
    mock.expect_query()
        .after(Duration::from_millis(300))
        .return_ok(vec![key("old", "Previous hostel key", true)], None);
    mock.expect_query()
        .return_ok(vec![key("new", "Gate scanner", true)], None);
    let (actor, client) =
        views::api_keys::new(Arc::new(mock.clone()), &ControllerConfig::default());
    tokio::spawn(actor.run());

    tokio::time::sleep(Duration::from_millis(600)).await;
    client.inner().set_scope(Some("hostel_2".into())).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    let view = client.view().await.unwrap();
    assert!(view.items.is_empty(), "old scope's keys were installed");
    assert!(view.pending);

    let view = client.settled().await.unwrap();
    let names: Vec<&str> = view.items.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["Gate scanner"]);
    assert_eq!(mock.calls()[1].scope.as_deref(), Some("hostel_2"));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn new_snapshot_while_offline_is_derived_again() {
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    client.set_connectivity(false).await.unwrap();
    client
        .use_cached(Some(vec![entry("c1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z")]))
        .await
        .unwrap();
    let first = client.settled().await.unwrap();
    assert_eq!(first.total_items, 1);

    client
        .use_cached(Some(vec![
            entry("c1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z"),
            entry("c2", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z"),
            entry("c3", EntryStatus::CheckedIn, "2024-03-05T10:00:00Z"),
        ]))
        .await
        .unwrap();
    let view = client.settled().await.unwrap();
    assert_eq!(view.total_items, 3);
    assert_eq!(view.origin, ResultOrigin::Local);
    assert!(view.cycle > first.cycle);
    assert!(mock.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn same_snapshot_again_schedules_nothing() {
    let snapshot: Arc<[AccessEntry]> = Arc::from(vec![
        entry("c1", EntryStatus::CheckedIn, "2024-03-05T08:00:00Z"),
        entry("c2", EntryStatus::CheckedOut, "2024-03-05T09:00:00Z"),
    ]);
    let mock = MockSource::new();
    let client = access_history(&mock, &ControllerConfig::default());

    client.set_connectivity(false).await.unwrap();
    client.inner().set_cache(Some(snapshot.clone())).await.unwrap();
    let before = client.settled().await.unwrap();

    client.inner().set_cache(Some(snapshot.clone())).await.unwrap();
    let view = client.view().await.unwrap();
    assert!(!view.pending);
    assert_eq!(view.cycle, before.cycle);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(client.view().await.unwrap().cycle, before.cycle);
}

#[tokio::test(start_paused = true)]
async fn offline_client_paging_answers_from_the_cache() {
    let mock = MockSource::new();
    mock.expect_query().return_ok(
        vec![
            key("k1", "Mess kiosk", true),
            key("k2", "Gate scanner", true),
            key("k3", "Laundry bot", false),
        ],
        None,
    );
    let (actor, client) =
        views::api_keys::new(Arc::new(mock.clone()), &ControllerConfig::default());
    tokio::spawn(actor.run());
    assert_eq!(client.settled().await.unwrap().origin, ResultOrigin::Remote);

    let cached: Arc<[ApiKey]> = Arc::from(vec![
        key("c1", "Cached kiosk", true),
        key("c2", "Cached gate", false),
    ]);
    client.set_connectivity(false).await.unwrap();
    client.inner().set_cache(Some(cached)).await.unwrap();
    let view = client.settled().await.unwrap();
    assert_eq!(view.origin, ResultOrigin::Local);
    assert_eq!(view.items.len(), 2);

    client.show(KeyFilter::Active).await.unwrap();
    let view = client.settled().await.unwrap();
    let names: Vec<&str> = view.items.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["Cached kiosk"]);
    assert_eq!(view.origin, ResultOrigin::Local);
    assert_eq!(mock.calls().len(), 1);
}
