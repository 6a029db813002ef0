// tests/command_units.rs

#![cfg(unix)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use modsched::dag::stop_channel;
use modsched::exec::{CommandAction, CommandSpec};
use modsched::unit::{Action, Outcome};
use modsched_test_utils::init_tracing;

fn spec(cmd: &str) -> CommandSpec {
    CommandSpec {
        unit: "sample".to_string(),
        cmd: cmd.to_string(),
        env: BTreeMap::new(),
        workdir: None,
        stop_exit_code: 3,
    }
}

/// Execute an action the way the pipeline does: from a plain thread, with
/// the runtime driven by its own workers.
fn execute(spec: CommandSpec) -> Outcome {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut action = CommandAction::new(spec, rt.handle().clone());
    action.execute()
}

#[test]
fn successful_command_is_success() {
    init_tracing();
    assert_eq!(execute(spec("echo hello")), Outcome::Success);
}

#[test]
fn failing_command_is_error() {
    init_tracing();
    assert_eq!(execute(spec("echo oops >&2; exit 1")), Outcome::Error);
}

#[test]
fn stop_exit_code_requests_chain_stop() {
    init_tracing();
    assert_eq!(execute(spec("exit 3")), Outcome::StopDependencyChain);

    let mut custom = spec("exit 3");
    custom.stop_exit_code = 42;
    assert_eq!(execute(custom), Outcome::Error);
}

#[test]
fn unit_name_and_env_are_passed_to_command() {
    init_tracing();
    let mut with_env = spec(r#"test "$MODSCHED_UNIT" = sample && test "$GREETING" = hi"#);
    with_env.env.insert("GREETING".to_string(), "hi".to_string());

    assert_eq!(execute(with_env), Outcome::Success);
}

#[test]
fn command_runs_in_configured_workdir() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

    let mut in_dir = spec("test -f marker.txt");
    in_dir.workdir = Some(dir.path().to_path_buf());

    assert_eq!(execute(in_dir), Outcome::Success);
}

#[test]
fn spawn_failure_is_error_not_panic() {
    init_tracing();
    let mut bad_dir = spec("echo unreachable");
    bad_dir.workdir = Some(PathBuf::from("/definitely/not/a/real/dir"));

    assert_eq!(execute(bad_dir), Outcome::Error);
}

#[test]
fn stop_signal_kills_running_command() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (stop, signal) = stop_channel();

    let mut slow = spec("sleep 30; echo done > done.txt");
    slow.workdir = Some(dir.path().to_path_buf());
    let mut action = CommandAction::new(slow, rt.handle().clone()).with_stop_signal(signal);

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        stop.stop();
    });

    let began = Instant::now();
    assert_eq!(action.execute(), Outcome::Error);
    assert!(began.elapsed() < Duration::from_secs(10));

    stopper.join().unwrap();
    assert!(!dir.path().join("done.txt").exists());
}
