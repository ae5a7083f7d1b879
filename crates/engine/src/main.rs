use std::path::PathBuf;

use metrics_exporter_prometheus::PrometheusBuilder;

use relaunch_common::config::RelaunchConfig;
use relaunch_common::types::AssetRef;
use relaunch_engine::config;
use relaunch_engine::host::SimulatedHost;
use relaunch_engine::{Phase, Relauncher, ShutdownOutcome};

/// Simulated frame time (60 fps).
const FRAME_SECONDS: f64 = 1.0 / 60.0;
/// Upper bound on frames spent waiting for the asset index.
const MAX_STARTUP_FRAMES: u32 = 600;

const TOOLS: [&str; 3] = [
    "/Game/Tools/EUW_Outliner.EUW_Outliner",
    "/Game/Tools/EUW_AssetTagger.EUW_AssetTagger",
    "/Game/Tools/EUW_MenuBuilder.EUW_MenuBuilder",
];

fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Relaunch simulator starting");

    // Config directory is optional; defaults match the stock editor layout.
    let relaunch_config = match std::env::var("RELAUNCH_CONFIG_DIR") {
        Ok(dir) => match config::load_config(&PathBuf::from(dir)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration — refusing to start");
                std::process::exit(1);
            }
        },
        Err(_) => RelaunchConfig::default(),
    };

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let saved_dir = std::env::var("RELAUNCH_SAVED_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("Saved"));

    let mut host = SimulatedHost::new(&saved_dir).with_loading_frames(30);
    for tool in TOOLS {
        host.add_asset(tool);
    }

    // --- Session 1: close a few tools, then quit while one is still tracked ---
    let next_host = host.next_session(45);
    let mut session = match Relauncher::new(host, relaunch_config.clone()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Invalid relaunch configuration");
            std::process::exit(1);
        }
    };
    session.run();
    wait_for_ready(&mut session);

    session.on_tool_closed(AssetRef::from(TOOLS[0]));
    run_for(&mut session, 1.5);
    session.on_tool_closed(AssetRef::from(TOOLS[0]));
    session.on_tool_closed(AssetRef::from(TOOLS[1]));
    run_for(&mut session, 0.6);

    tracing::info!(
        tracked = ?session.cache().snapshot_identifiers(),
        "Editor closing"
    );
    match session.shutdown() {
        Ok(ShutdownOutcome::Saved(path)) => {
            tracing::info!(path = %path.display(), "Session 1 snapshot written")
        }
        Ok(ShutdownOutcome::Skipped) => tracing::warn!("Session 1 closed before post startup"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to write session snapshot");
            std::process::exit(1);
        }
    }

    // --- Session 2: restart and reopen whatever was pending ---
    let mut session = match Relauncher::new(next_host, relaunch_config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Invalid relaunch configuration");
            std::process::exit(1);
        }
    };
    session.run();
    wait_for_ready(&mut session);

    if let Some(report) = session.last_report() {
        tracing::info!(
            opened = ?report.opened,
            failed = report.failed.len(),
            "Session 2 reopened tools"
        );
    }
    if let Err(e) = session.shutdown() {
        tracing::error!(error = %e, "Failed to write session snapshot");
    }

    tracing::info!(metrics = %metrics_handle.render(), "Relaunch simulator finished");
}

fn frame(session: &mut Relauncher<SimulatedHost>) {
    let handles = session.host_mut().begin_frame();
    for handle in handles {
        session.on_tick(handle, FRAME_SECONDS);
    }
}

fn run_for(session: &mut Relauncher<SimulatedHost>, seconds: f64) {
    let frames = (seconds / FRAME_SECONDS).ceil() as u32;
    for _ in 0..frames {
        frame(session);
    }
}

fn wait_for_ready(session: &mut Relauncher<SimulatedHost>) {
    for _ in 0..MAX_STARTUP_FRAMES {
        if session.phase() == Phase::Ready {
            return;
        }
        frame(session);
    }
    tracing::warn!(
        frames = MAX_STARTUP_FRAMES,
        "Asset index never finished loading"
    );
}
