use crate::dashboard::model::DashboardModel;
use crate::workflow::catalog;
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

fn bridge_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// Holds the latest dashboard snapshot and optionally serves it over local HTTP.
pub struct DashboardBridge {
    state: Arc<RwLock<DashboardModel>>,
}

impl DashboardBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DashboardModel::default())),
        }
    }

    /// Serves `GET /dashboard` and `GET /tracks` on 127.0.0.1:`port` from a background thread.
    pub fn serve(&self, port: u16) {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());

        let dashboard_route = warp::path("dashboard")
            .and(warp::get())
            .and(state_filter)
            .map(|state: Arc<RwLock<DashboardModel>>| {
                let snapshot = match state.read() {
                    Ok(guard) => guard.clone(),
                    Err(poisoned) => poisoned.into_inner().clone(),
                };
                warp::reply::json(&snapshot)
            });

        let tracks_route = warp::path("tracks").and(warp::get()).map(|| {
            let tracks: Vec<serde_json::Value> = catalog::TRACKS
                .iter()
                .map(|track| serde_json::json!({ "id": track.id, "name": track.display_name }))
                .collect();
            warp::reply::json(&tracks)
        });

        thread::spawn(move || {
            let routes = dashboard_route.or(tracks_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("dashboard bridge runtime failed: {}", err);
                    return;
                }
            };
            info!("dashboard bridge on http://{}/dashboard", bridge_address(port));
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_address(port)).await;
            });
        });
    }

    pub fn publish(&self, model: DashboardModel) {
        match self.state.write() {
            Ok(mut guard) => *guard = model,
            Err(poisoned) => *poisoned.into_inner() = model,
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> DashboardModel {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for DashboardBridge {
    fn default() -> Self {
        Self::new()
    }
}
