use crate::generator::profile::GeneratorConfig;
use crate::publish::model::SweepModel;
use crate::workflow::extractor::SweepSummary;
use crate::workflow::runner::Runner;
use ringsweep::{ImuState, Publisher, RegistrationResult};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Publication sink that keeps the latest sweep and serves it over HTTP.
#[derive(Clone, Default)]
pub struct SweepBridge {
    state: Arc<RwLock<SweepModel>>,
}

impl SweepBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the HTTP endpoint on a background thread.
    ///
    /// `GET /sweep` returns the latest model; `POST /ingest-config` runs a
    /// session from a generator config and publishes its sweeps here.
    pub fn serve(&self, runner: Arc<Runner>) {
        let bridge_for_filter = self.clone();
        let bridge_filter = warp::any().map(move || bridge_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("sweep")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: SweepBridge| warp::reply::json(&bridge.snapshot()));

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig, bridge: SweepBridge, runner: Arc<Runner>| async move {
                    let outcome = runner
                        .session_length(1)
                        .and_then(|sweeps| runner.execute(&config, sweeps, bridge));
                    match outcome {
                        Ok((result, _)) => {
                            if let Some(name) = config.scenario.as_ref() {
                                log::info!("[bridge] scenario {} -> {} sweeps", name, result.delivered);
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "delivered": result.delivered,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            log::error!("ingest-config error: {:#}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(generator_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });
    }

    pub fn publish_status(&self, message: &str) {
        log::info!("[bridge] {}", message);
    }

    pub fn snapshot(&self) -> SweepModel {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Publisher<SweepSummary> for SweepBridge {
    fn publish(
        &mut self,
        features: SweepSummary,
        sweep_time: f64,
        imu_start: Option<&ImuState>,
    ) -> RegistrationResult<()> {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.published += 1;
        guard.sweep_time = sweep_time;
        guard.imu_start = imu_start.copied();
        guard.summary = features;
        log::debug!(
            "[bridge] sweep {:.3}: {} points over {} rings",
            sweep_time,
            guard.summary.total_points,
            guard.summary.ring_counts.len()
        );
        Ok(())
    }
}
