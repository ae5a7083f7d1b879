//! End-to-end sessions against the simulated editor host.
//! Each test uses its own scratch project directory.
use std::path::Path;

use relaunch_common::config::RelaunchConfig;
use relaunch_common::ids::ToolPath;
use relaunch_common::types::AssetRef;
use relaunch_engine::host::SimulatedHost;
use relaunch_engine::snapshot;
use relaunch_engine::{Phase, Relauncher, ShutdownOutcome};

const FRAME: f64 = 1.0 / 60.0;

fn start(host: SimulatedHost) -> Relauncher<SimulatedHost> {
    let mut session = Relauncher::new(host, RelaunchConfig::default()).expect("valid config");
    session.run();
    session
}

fn frame(session: &mut Relauncher<SimulatedHost>, delta: f64) {
    let handles = session.host_mut().begin_frame();
    for handle in handles {
        session.on_tick(handle, delta);
    }
}

fn until_ready(session: &mut Relauncher<SimulatedHost>) {
    for _ in 0..1000 {
        if session.phase() == Phase::Ready {
            return;
        }
        frame(session, FRAME);
    }
    panic!("session never became ready");
}

fn saved(outcome: ShutdownOutcome) -> std::path::PathBuf {
    match outcome {
        ShutdownOutcome::Saved(path) => path,
        ShutdownOutcome::Skipped => panic!("snapshot was not written"),
    }
}

fn project(dir: &Path, tools: &[&str]) -> SimulatedHost {
    let mut host = SimulatedHost::new(dir);
    for tool in tools {
        host.add_asset(*tool);
    }
    host
}

#[test]
fn test_pending_tool_reopens_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let host = project(dir.path(), &["A"]);
    let next = host.next_session(5);

    let mut first = start(host);
    until_ready(&mut first);
    first.on_tool_closed(AssetRef::from("A"));
    frame(&mut first, 1.0);
    assert_eq!(first.cache().snapshot_identifiers(), vec![ToolPath::from("A")]);
    first.shutdown().unwrap();

    let mut second = start(next);
    // Nothing opens while the asset index is loading.
    frame(&mut second, FRAME);
    assert!(second.host().opened_tabs().is_empty());

    until_ready(&mut second);
    assert_eq!(second.host().opened_tabs(), &[ToolPath::from("A")]);
    assert_eq!(second.last_report().unwrap().opened, vec![ToolPath::from("A")]);

    // Startup subscription released exactly once, no stray handles.
    assert_eq!(second.host().unsubscribed().len(), 1);
    assert_eq!(second.host().live_ticks(), 0);

    // More frames never reopen again.
    for _ in 0..10 {
        frame(&mut second, FRAME);
    }
    assert_eq!(second.host().opened_tabs().len(), 1);
}

#[test]
fn test_expired_tool_is_not_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let host = project(dir.path(), &["A", "B"]);
    let next = host.next_session(0);

    let mut first = start(host);
    until_ready(&mut first);
    first.on_tool_closed(AssetRef::from("A"));
    frame(&mut first, 1.0);
    first.on_tool_closed(AssetRef::from("A"));
    first.on_tool_closed(AssetRef::from("B"));
    frame(&mut first, 1.5);

    // A reached 2.5s and expired; B sits at 1.5s.
    assert_eq!(first.cache().snapshot_identifiers(), vec![ToolPath::from("B")]);
    first.shutdown().unwrap();

    let mut second = start(next);
    until_ready(&mut second);
    assert_eq!(second.host().opened_tabs(), &[ToolPath::from("B")]);
}

#[test]
fn test_deleted_asset_is_skipped_others_open() {
    let dir = tempfile::tempdir().unwrap();
    let host = project(dir.path(), &["A", "B", "C"]);

    let mut first = start(host);
    until_ready(&mut first);
    for tool in ["A", "B", "C"] {
        first.on_tool_closed(AssetRef::from(tool));
    }
    first.shutdown().unwrap();

    let mut next = first.host().next_session(0);
    next.remove_asset(&ToolPath::from("B"));

    let mut second = start(next);
    until_ready(&mut second);

    let report = second.last_report().unwrap();
    assert_eq!(report.opened, vec![ToolPath::from("A"), ToolPath::from("C")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, ToolPath::from("B"));
}

#[test]
fn test_tab_failure_does_not_stop_remaining_tools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir
        .path()
        .join("pytemp")
        .join("editor_tool_cache.json");
    snapshot::save(&path, &[ToolPath::from("A"), ToolPath::from("B")]).unwrap();

    let mut host = project(dir.path(), &["A", "B"]);
    host.fail_tab("A");

    let mut session = start(host);
    until_ready(&mut session);

    assert_eq!(session.host().opened_tabs(), &[ToolPath::from("B")]);
    assert_eq!(session.last_report().unwrap().failed.len(), 1);
}

#[test]
fn test_empty_session_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let host = project(dir.path(), &[]);
    let next = host.next_session(0);

    let mut first = start(host);
    until_ready(&mut first);
    let path = saved(first.shutdown().unwrap());
    assert!(path.exists());
    assert!(snapshot::load(&path).unwrap().is_empty());

    let mut second = start(next);
    until_ready(&mut second);
    assert_eq!(second.last_report().unwrap(), &Default::default());
}

#[test]
fn test_custom_snapshot_location() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RelaunchConfig::default();
    config.snapshot.subdir = "relaunch".into();
    config.snapshot.file_name = "pending.json".into();

    let mut session = Relauncher::new(project(dir.path(), &["A"]), config).unwrap();
    session.run();
    until_ready(&mut session);
    session.on_tool_closed(AssetRef::from("A"));
    let path = saved(session.shutdown().unwrap());

    assert_eq!(path, dir.path().join("relaunch").join("pending.json"));
    assert_eq!(snapshot::load(&path).unwrap(), vec![ToolPath::from("A")]);
}

#[test]
fn test_quit_while_asset_index_loading_keeps_pending_tools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir
        .path()
        .join("pytemp")
        .join("editor_tool_cache.json");
    snapshot::save(&path, &[ToolPath::from("A")]).unwrap();

    let host = project(dir.path(), &["A"]).with_loading_frames(100);
    let next = host.next_session(0);

    let mut early = start(host);
    frame(&mut early, FRAME);
    assert!(early.shutdown_hook().is_none());

    assert_eq!(early.shutdown().unwrap(), ShutdownOutcome::Skipped);
    assert_eq!(early.host().live_ticks(), 0);
    assert_eq!(snapshot::load(&path).unwrap(), vec![ToolPath::from("A")]);

    // The list survives into the session that does finish startup.
    let mut second = start(next);
    until_ready(&mut second);
    assert_eq!(second.host().opened_tabs(), &[ToolPath::from("A")]);
}
