//! # Hostel List Query Demo
//!
//! Runs the dashboard against in-memory backends and walks through the
//! behaviours a screen relies on:
//! 1.  Loading the first page of access history.
//! 2.  Switching the status tab.
//! 3.  Going offline with a cached snapshot while the backend is down.
//! 4.  Selecting a hostel for the room-change list and filtering API keys.

use chrono::{Duration, Utc};
use hostel_list_query::clients::{KeyFilter, ListClient};
use hostel_list_query::config::ControllerConfig;
use hostel_list_query::lifecycle::{setup_tracing, Dashboard, DashboardSources};
use hostel_list_query::model::{AccessEntry, ApiKey, EntryStatus, RequestStatus, RoomChangeRequest};
use hostel_list_query::query::ViewModel;
use hostel_list_query::sources::StaticSource;
use hostel_list_query::views;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ControllerConfig::from_env();
    info!(debounce_ms = config.debounce.as_millis() as u64, "Starting dashboard demo");

    let entries = sample_entries();
    let access = StaticSource::new(entries.clone(), views::access_history::options().filters);
    let rooms = StaticSource::new(sample_requests(), views::room_changes::options().filters);
    let keys = StaticSource::new(sample_keys(), views::api_keys::options().filters);

    let dashboard = Dashboard::new(
        DashboardSources {
            access_history: Arc::new(access.clone()),
            room_changes: Arc::new(rooms),
            api_keys: Arc::new(keys),
        },
        &config,
    );

    let span = tracing::info_span!("access_history");
    async {
        let history = &dashboard.access_history;
        report("first page", &history.settled().await.map_err(|e| e.to_string())?);

        history
            .show_status(Some(EntryStatus::CheckedIn))
            .await
            .map_err(|e| e.to_string())?;
        report("checked in", &history.settled().await.map_err(|e| e.to_string())?);

        // backend goes down; the screen keeps working from the snapshot
        access.set_reachable(false);
        history
            .use_cached(Some(entries.clone()))
            .await
            .map_err(|e| e.to_string())?;
        dashboard
            .set_connectivity(false)
            .await
            .map_err(|e| e.to_string())?;
        history.go_to_page(2).await.map_err(|e| e.to_string())?;
        report("offline page 2", &history.settled().await.map_err(|e| e.to_string())?);
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    dashboard
        .set_connectivity(true)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("room_changes");
    async {
        let requests = &dashboard.room_changes;
        requests
            .select_hostel(Some("hostel_1".into()))
            .await
            .map_err(|e| e.to_string())?;
        report("pending", &requests.settled().await.map_err(|e| e.to_string())?);

        requests.search("room 1").await.map_err(|e| e.to_string())?;
        requests
            .show_status(None)
            .await
            .map_err(|e| e.to_string())?;
        report("search", &requests.settled().await.map_err(|e| e.to_string())?);
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("api_keys");
    async {
        let keys = &dashboard.api_keys;
        report("all keys", &keys.settled().await.map_err(|e| e.to_string())?);
        keys.show(KeyFilter::Active).await.map_err(|e| e.to_string())?;
        report("active keys", &keys.view().await.map_err(|e| e.to_string())?);
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    dashboard.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

fn report<T>(label: &str, view: &ViewModel<T>) {
    info!(
        label,
        items = view.items.len(),
        page = view.page,
        total_pages = view.total_pages,
        total = view.total_items,
        origin = ?view.origin,
        phase = ?view.phase,
        tabs = ?view.tab_counts,
        "View"
    );
}

fn sample_entries() -> Vec<AccessEntry> {
    let now = Utc::now();
    (0..37)
        .map(|i| {
            let status = if i % 3 == 0 {
                EntryStatus::CheckedIn
            } else {
                EntryStatus::CheckedOut
            };
            AccessEntry::new(format!("entry_{i}"), status, now - Duration::hours(i))
        })
        .collect()
}

fn sample_requests() -> Vec<RoomChangeRequest> {
    let now = Utc::now();
    let students = [
        ("Asha Verma", "21CS004", "Room 101", RequestStatus::Pending),
        ("Rohit Nair", "21EE017", "Room 214", RequestStatus::Approved),
        ("Meera Iyer", "22ME031", "Room 108", RequestStatus::Pending),
        ("Kabir Shah", "20CE002", "Room 305", RequestStatus::Rejected),
    ];
    students
        .into_iter()
        .enumerate()
        .map(|(i, (name, roll, room, status))| RoomChangeRequest {
            id: format!("request_{i}"),
            student_name: name.into(),
            roll_number: roll.into(),
            current_room: room.into(),
            preferred_room: None,
            reason: "Closer to the library".into(),
            status,
            created_at: now - Duration::days(i as i64),
        })
        .collect()
}

fn sample_keys() -> Vec<ApiKey> {
    let now = Utc::now();
    ["Mess kiosk", "Gate scanner", "Laundry bot"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| ApiKey {
            id: format!("key_{i}"),
            name: name.into(),
            is_active: i != 2,
            created_at: now - Duration::weeks(i as i64),
            last_used: None,
        })
        .collect()
}
