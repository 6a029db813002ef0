// tests/scheduler_scenarios.rs

use std::collections::BTreeSet;

use modsched::dag::{
    Scheduler, SchedulerOptions, SchedulerStep, UnitStatus, WaitKind, stop_channel,
};
use modsched::errors::ModschedError;
use modsched::unit::{Outcome, Unit};
use modsched_test_utils::fake_action::{CallLog, units_from_table};
use modsched_test_utils::init_tracing;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn single_unit_without_dependencies_completes() {
    init_tracing();
    let log = CallLog::new();

    let report = modsched::dag::run(vec![log.unit("X", Outcome::Success)]).unwrap();

    assert_eq!(report.completed, names(&["X"]));
    assert!(report.failed.is_empty());
    assert_eq!(log.calls(), vec!["X"]);
}

#[test]
fn hard_dependency_runs_first() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("X", Outcome::Success, &[], &[]),
            ("Y", Outcome::Success, &["X"], &[]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert_eq!(report.completed, names(&["X", "Y"]));
    assert!(report.failed.is_empty());
    assert!(log.ran_before("X", "Y"));
}

#[test]
fn failed_hard_dependency_skips_dependent() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("X", Outcome::Error, &[], &[]),
            ("Y", Outcome::Success, &["X"], &[]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert_eq!(report.failed, names(&["X", "Y"]));
    assert!(report.completed.is_empty());
    assert!(!log.was_called("Y"));
    assert_eq!(report.status_of("X"), Some(&UnitStatus::Errored));
    assert_eq!(
        report.status_of("Y"),
        Some(&UnitStatus::Skipped {
            failed_dependency: "X".to_string()
        })
    );
}

#[test]
fn failed_soft_dependency_does_not_block_dependent() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("X", Outcome::Error, &[], &[]),
            ("Y", Outcome::Success, &[], &["X"]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert!(report.failed.contains("X"));
    assert!(report.completed.contains("Y"));
    assert!(log.ran_before("X", "Y"));
}

#[test]
fn chain_of_three_runs_in_dependency_order() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("X", Outcome::Success, &[], &[]),
            ("Y", Outcome::Success, &["X"], &[]),
            ("Z", Outcome::Success, &["Y"], &[]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert_eq!(report.completed, names(&["X", "Y", "Z"]));
    assert_eq!(log.calls(), vec!["X", "Y", "Z"]);
    assert_eq!(report.executed(), vec!["X", "Y", "Z"]);
}

#[test]
fn shared_dependency_executes_once() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("Base", Outcome::Success, &[], &[]),
            ("Left", Outcome::Success, &["Base"], &[]),
            ("Right", Outcome::Success, &["Base"], &[]),
            ("Top", Outcome::Success, &["Left", "Right"], &["Base"]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert_eq!(report.completed.len(), 4);
    for name in ["Base", "Left", "Right", "Top"] {
        assert_eq!(log.count(name), 1, "{name} should run exactly once");
    }
    assert!(log.ran_before("Left", "Top"));
    assert!(log.ran_before("Right", "Top"));
}

#[test]
fn stop_request_cascades_like_an_error_but_is_reported_distinctly() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("Preprocess", Outcome::StopDependencyChain, &[], &[]),
            ("Analyse", Outcome::Success, &["Preprocess"], &[]),
            ("Report", Outcome::Success, &["Analyse"], &[]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert_eq!(report.failed, names(&["Preprocess", "Analyse", "Report"]));
    assert_eq!(log.calls(), vec!["Preprocess"]);
    assert_eq!(report.status_of("Preprocess"), Some(&UnitStatus::StoppedChain));
    assert_eq!(
        report.skipped(),
        vec![("Analyse", "Preprocess"), ("Report", "Analyse")]
    );
}

#[test]
fn soft_dependency_on_skipped_unit_still_runs() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("Loader", Outcome::Error, &[], &[]),
            ("Water", Outcome::Success, &["Loader"], &[]),
            ("Report", Outcome::Success, &[], &["Water"]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    assert!(!log.was_called("Water"));
    assert!(log.was_called("Report"));
    assert_eq!(report.completed, names(&["Report"]));
    assert_eq!(report.failed, names(&["Loader", "Water"]));
}

#[test]
fn independent_units_all_settle() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("A", Outcome::Success, &[], &[]),
            ("B", Outcome::Error, &[], &[]),
            ("C", Outcome::Success, &[], &[]),
        ],
    );

    let report = modsched::dag::run(units).unwrap();

    // Only membership is asserted; relative order of independent units is
    // not part of the contract.
    assert_eq!(report.completed, names(&["A", "C"]));
    assert_eq!(report.failed, names(&["B"]));
    assert_eq!(log.calls().len(), 3);
}

#[test]
fn manual_steps_show_requeue_and_discard() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("X", Outcome::Success, &[], &[]),
            ("Y", Outcome::Success, &["X"], &[]),
        ],
    );
    let mut scheduler = Scheduler::new(units).unwrap();

    assert_eq!(
        scheduler.step(),
        Some(SchedulerStep::Requeued {
            unit: "Y".to_string(),
            wait: WaitKind::Hard,
            waiting_on: vec!["X".to_string()],
        })
    );
    assert_eq!(
        scheduler.step(),
        Some(SchedulerStep::Executed {
            unit: "X".to_string(),
            outcome: Outcome::Success,
        })
    );
    assert_eq!(
        scheduler.step(),
        Some(SchedulerStep::Discarded {
            unit: "X".to_string()
        })
    );
    assert_eq!(
        scheduler.step(),
        Some(SchedulerStep::Executed {
            unit: "Y".to_string(),
            outcome: Outcome::Success,
        })
    );
    assert_eq!(scheduler.step(), None);
    assert!(scheduler.is_idle());
    assert_eq!(scheduler.completed().len(), 2);
}

#[test]
fn independent_schedulers_do_not_share_state() {
    init_tracing();
    let first_log = CallLog::new();
    let second_log = CallLog::new();

    let first = Scheduler::new(vec![first_log.unit("X", Outcome::Error)]).unwrap();
    let second = Scheduler::new(vec![second_log.unit("X", Outcome::Success)]).unwrap();

    let first_report = first.run();
    let second_report = second.run();

    assert_eq!(first_report.failed, names(&["X"]));
    assert_eq!(second_report.completed, names(&["X"]));
}

#[test]
fn duplicate_unit_names_are_rejected() {
    let log = CallLog::new();
    let result = Scheduler::new(vec![
        log.unit("X", Outcome::Success),
        log.unit("X", Outcome::Success),
    ]);

    match result {
        Err(ModschedError::DuplicateUnit(name)) => assert_eq!(name, "X"),
        other => panic!("expected DuplicateUnit, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn unknown_dependency_is_rejected() {
    let result = Scheduler::new(vec![
        Unit::new("Y", || Outcome::Success).soft_dependency("Missing"),
    ]);

    match result {
        Err(ModschedError::UnknownDependency { unit, dependency }) => {
            assert_eq!(unit, "Y");
            assert_eq!(dependency, "Missing");
        }
        other => panic!("expected UnknownDependency, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn requeue_limit_breaks_hard_cycle() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("A", Outcome::Success, &["B"], &[]),
            ("B", Outcome::Success, &["A"], &[]),
        ],
    );
    let options = SchedulerOptions {
        max_requeues: Some(2),
    };

    let report = Scheduler::with_options(units, options).unwrap().run();

    assert!(log.calls().is_empty());
    assert_eq!(report.failed, names(&["A", "B"]));
    assert_eq!(report.status_of("B"), Some(&UnitStatus::Stalled { requeues: 2 }));
    assert_eq!(
        report.status_of("A"),
        Some(&UnitStatus::Skipped {
            failed_dependency: "B".to_string()
        })
    );
}

#[test]
fn requeue_limit_on_soft_cycle_lets_one_side_run() {
    init_tracing();
    let log = CallLog::new();
    let units = units_from_table(
        &log,
        &[
            ("A", Outcome::Success, &[], &["B"]),
            ("B", Outcome::Success, &[], &["A"]),
        ],
    );
    let options = SchedulerOptions {
        max_requeues: Some(1),
    };

    let report = Scheduler::with_options(units, options).unwrap().run();

    assert_eq!(report.completed, names(&["A"]));
    assert_eq!(report.failed, names(&["B"]));
    assert_eq!(log.calls(), vec!["A"]);
}

#[test]
fn stop_request_leaves_remaining_units_unsettled() {
    init_tracing();
    let log = CallLog::new();
    let (stop, signal) = stop_channel();

    let units = vec![
        Unit::new("A", move || {
            stop.stop();
            Outcome::Success
        }),
        log.unit("B", Outcome::Success).hard_dependency("A"),
    ];

    let report = Scheduler::new(units)
        .unwrap()
        .with_stop_signal(signal)
        .run();

    assert_eq!(report.completed, names(&["A"]));
    assert!(report.failed.is_empty());
    assert_eq!(report.status_of("B"), None);
    assert!(report.interrupted);
    assert!(!report.is_success());
    assert!(!log.was_called("B"));
}

#[test]
fn unit_cut_short_by_stop_is_not_reported_as_failed() {
    init_tracing();
    let log = CallLog::new();
    let (stop, signal) = stop_channel();

    let units = vec![
        Unit::new("A", move || {
            stop.stop();
            Outcome::Error
        }),
        log.unit("B", Outcome::Success).hard_dependency("A"),
    ];
    let mut scheduler = Scheduler::new(units).unwrap().with_stop_signal(signal);

    assert!(matches!(
        scheduler.step(),
        Some(SchedulerStep::Requeued { ref unit, .. }) if unit == "B"
    ));
    assert_eq!(
        scheduler.step(),
        Some(SchedulerStep::Interrupted {
            unit: "A".to_string()
        })
    );
    assert_eq!(scheduler.step(), None);

    let report = scheduler.report();
    assert!(report.completed.is_empty());
    assert!(report.failed.is_empty());
    assert!(report.skipped().is_empty());
    assert!(report.interrupted);
    assert!(!log.was_called("B"));
}

#[test]
fn stop_after_last_unit_settles_is_not_an_interruption() {
    init_tracing();
    let (stop, signal) = stop_channel();

    let units = vec![Unit::new("X", move || {
        stop.stop();
        Outcome::Success
    })];

    let report = Scheduler::new(units)
        .unwrap()
        .with_stop_signal(signal)
        .run();

    assert_eq!(report.completed, names(&["X"]));
    assert!(!report.interrupted);
    assert!(report.is_success());
}
