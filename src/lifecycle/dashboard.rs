use crate::clients::{AccessHistoryClient, ApiKeyClient, ListClient, RoomChangeClient};
use crate::config::{ApiConfig, ControllerConfig};
use crate::framework::ListError;
use crate::model::{AccessEntry, ApiKey, RoomChangeRequest};
use crate::sources::RemoteSource;
use crate::views;
use std::sync::Arc;
use tracing::{error, info};

/// Backends for the three list views.
pub struct DashboardSources {
    pub access_history: Arc<dyn RemoteSource<AccessEntry>>,
    pub room_changes: Arc<dyn RemoteSource<RoomChangeRequest>>,
    pub api_keys: Arc<dyn RemoteSource<ApiKey>>,
}

impl DashboardSources {
    /// HTTP sources against the configured backend.
    pub fn http(api: &ApiConfig) -> Self {
        Self {
            access_history: Arc::new(views::access_history::http_source(api)),
            room_changes: Arc::new(views::room_changes::http_source(api)),
            api_keys: Arc::new(views::api_keys::http_source(api)),
        }
    }
}

/// Runtime orchestrator for the dashboard's list controllers.
///
/// `Dashboard` starts one controller per view, hands out their clients, and
/// stops them again on [`Dashboard::shutdown`].
///
/// # Example
///
/// ```ignore
/// let dashboard = Dashboard::connect(&ApiConfig::from_env(), &ControllerConfig::from_env());
///
/// dashboard.room_changes.select_hostel(Some(hostel_id)).await?;
/// let view = dashboard.room_changes.settled().await?;
///
/// dashboard.set_connectivity(false).await?;
/// dashboard.shutdown().await?;
/// ```
pub struct Dashboard {
    pub access_history: AccessHistoryClient,
    pub room_changes: RoomChangeClient,
    pub api_keys: ApiKeyClient,

    /// Controller tasks, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Dashboard {
    /// Spawns a controller per view. Must be called inside a Tokio runtime.
    pub fn new(sources: DashboardSources, config: &ControllerConfig) -> Self {
        let (access_actor, access_history) =
            views::access_history::new(sources.access_history, config);
        let (room_actor, room_changes) = views::room_changes::new(sources.room_changes, config);
        let (key_actor, api_keys) = views::api_keys::new(sources.api_keys, config);

        let handles = vec![
            tokio::spawn(access_actor.run()),
            tokio::spawn(room_actor.run()),
            tokio::spawn(key_actor.run()),
        ];
        info!(views = handles.len(), "Dashboard started");

        Self {
            access_history,
            room_changes,
            api_keys,
            handles,
        }
    }

    pub fn connect(api: &ApiConfig, config: &ControllerConfig) -> Self {
        info!(base_url = %api.base_url, "Connecting dashboard");
        Self::new(DashboardSources::http(api), config)
    }

    /// Forwards a connectivity change to every view.
    pub async fn set_connectivity(&self, online: bool) -> Result<(), ListError> {
        info!(online, "Connectivity changed");
        self.access_history.set_connectivity(online).await?;
        self.room_changes.set_connectivity(online).await?;
        self.api_keys.set_connectivity(online).await
    }

    /// Drops every client, then waits for the controllers to exit.
    ///
    /// Clones of a client handed out earlier keep their controller alive, so
    /// drop those first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all controllers stopped cleanly
    /// - `Err(String)` if a controller task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard...");

        drop(self.access_history);
        drop(self.room_changes);
        drop(self.api_keys);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Controller task failed: {:?}", e);
                return Err(format!("Controller task failed: {:?}", e));
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
