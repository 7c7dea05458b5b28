// tests/integration_group.rs
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use taskspin::{Config, GroupPhase, Outcome, Recorder, SpinnerError, SpinnerGroup, TermOp};

fn fast_config() -> Config {
    Config {
        frame_interval_ms: 10,
        tick_interval_ms: 5,
        settle_delay_ms: 0,
        ..Config::default()
    }
}

fn recorded_group() -> (SpinnerGroup, Arc<Recorder>) {
    let rec = Arc::new(Recorder::new());
    let group = SpinnerGroup::with_terminal(fast_config(), rec.clone());
    (group, rec)
}

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn test_three_outcomes_render_in_order() {
    let (g, rec) = recorded_group();
    let sp1 = g.add("Loading...", "Done");
    let sp2 = g.add("Processing...", "Failed");
    let sp3 = g.add("Warning...", "Disrupted");
    g.start();

    sp1.stop();
    sp2.stop_with_outcome("failure", "Failed");
    sp3.stop_with_outcome("disruption", "Disrupted");

    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();

    let last = rec.last_frame(3);
    assert_eq!(last.len(), 3);
    assert!(last[0].contains('✔') && last[0].contains("Done"));
    assert!(last[1].contains('✘') && last[1].contains("Failed"));
    assert!(last[2].contains('!') && last[2].contains("Disrupted"));
}

#[test]
fn test_disrupt_all_stops_running_spinners() {
    let (g, _rec) = recorded_group();
    let spinners: Vec<_> = (1..=4)
        .map(|i| g.add(format!("Task {i}"), format!("Done {i}")))
        .collect();
    g.start();

    assert!(g.disrupt_all("context cancelled"));
    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();

    for sp in &spinners {
        let c = sp.completion().unwrap();
        assert_eq!(c.outcome, Outcome::Disrupted);
        assert_eq!(c.message, "context cancelled");
    }
    assert_eq!(g.disruption_reason().as_deref(), Some("context cancelled"));
}

#[test]
fn test_disrupt_all_keeps_finished_outcomes() {
    let (g, _rec) = recorded_group();
    let done = g.add("A", "A done");
    let failed = g.add("B", "B done");
    let running = g.add("C", "C done");
    g.start();
    done.stop();
    failed.stop_with_outcome("failure", "B broke");

    g.disrupt_all("shutting down");
    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();

    assert_eq!(done.completion().unwrap().outcome, Outcome::Done);
    let f = failed.completion().unwrap();
    assert_eq!(f.outcome, Outcome::Failure);
    assert_eq!(f.message, "B broke");
    let r = running.completion().unwrap();
    assert_eq!(r.outcome, Outcome::Disrupted);
    assert_eq!(r.message, "shutting down");
}

#[test]
fn test_disrupt_all_is_one_shot() {
    let (g, _rec) = recorded_group();
    let sp = g.add("Task", "Done");
    g.start();
    assert!(g.disrupt_all("first"));
    assert!(!g.disrupt_all("second"));
    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();
    assert_eq!(sp.completion().unwrap().message, "first");
}

#[test]
fn test_disrupt_all_leaves_pending_until_started() {
    let (g, _rec) = recorded_group();
    let sp = g.add("Task", "Done");
    g.disrupt_all("early");
    thread::sleep(Duration::from_millis(40));
    assert!(!sp.is_stopped());

    g.start();
    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();
    assert_eq!(sp.completion().unwrap().outcome, Outcome::Disrupted);
    assert_eq!(sp.completion().unwrap().message, "early");
}

#[test]
fn test_disrupt_all_not_completed_is_synchronous() {
    let (g, _rec) = recorded_group();
    let finished = g.add("A", "A done");
    let running = g.add("B", "B done");
    g.start();
    finished.stop_with_outcome("success", "A ok");
    let quick = g.add("C", "C done");
    quick.stop();
    // Registered after start, so already running.
    let late = g.add("D", "D done");

    let count = g.disrupt_all_not_completed("aborted");
    assert_eq!(count, 2);
    assert!(running.is_stopped());
    assert!(late.is_stopped());
    assert_eq!(running.completion().unwrap().message, "aborted");
    assert_eq!(finished.completion().unwrap().outcome, Outcome::Success);
    assert_eq!(g.disrupt_all_not_completed("again"), 0);
    g.stop();
}

#[test]
fn test_disrupt_all_not_completed_covers_pending() {
    let (g, _rec) = recorded_group();
    let sp = g.add("Never started", "Done");
    assert_eq!(g.disrupt_all_not_completed("cancelled"), 1);
    assert_eq!(sp.completion().unwrap().outcome, Outcome::Disrupted);
    g.wait_for_completion();
}

#[test]
fn test_wait_for_completion_any_order() {
    let (g, _rec) = recorded_group();
    let spinners: Vec<_> = (0..5).map(|i| g.add(format!("T{i}"), "ok")).collect();
    g.start();

    let workers: Vec<_> = spinners
        .into_iter()
        .enumerate()
        .map(|(i, sp)| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10 * (5 - i as u64)));
                sp.stop();
            })
        })
        .collect();

    assert!(g.wait_for_completion_timeout(WAIT));
    for w in workers {
        w.join().unwrap();
    }
    assert!(g.spinners().iter().all(|s| s.is_stopped()));
    g.stop();
}

#[test]
fn test_wait_does_not_return_early() {
    let (g, _rec) = recorded_group();
    let a = g.add("A", "ok");
    let _b = g.add("B", "ok");
    g.start();
    a.stop();
    assert!(!g.wait_for_completion_timeout(Duration::from_millis(50)));
    g.disrupt_all_not_completed("done waiting");
    assert!(g.wait_for_completion_timeout(WAIT));
    g.stop();
}

#[test]
fn test_wait_sees_late_registration() {
    let (g, _rec) = recorded_group();
    let first = g.add("First", "ok");
    g.start();

    let waiter = {
        let g = g.clone();
        thread::spawn(move || g.wait_for_completion_timeout(WAIT))
    };

    thread::sleep(Duration::from_millis(20));
    let late = g.add("Late", "ok");
    assert!(late.is_running());
    first.stop();
    thread::sleep(Duration::from_millis(50));
    assert!(!waiter.is_finished());

    late.stop();
    assert!(waiter.join().unwrap());
    g.stop();
}

#[test]
fn test_wait_on_empty_group_returns() {
    let (g, _rec) = recorded_group();
    g.wait_for_completion();
    assert!(g.is_empty());
}

#[test]
fn test_late_spinner_is_rendered() {
    let (g, rec) = recorded_group();
    let a = g.add("A", "A done");
    g.start();
    let b = g.add("B", "B done");
    thread::sleep(Duration::from_millis(30));
    a.stop();
    b.stop();
    g.finish();

    let last = rec.last_frame(2);
    assert!(last[0].contains("A done"));
    assert!(last[1].contains("B done"));
}

#[test]
fn test_find_by_name() {
    let (g, _rec) = recorded_group();
    let sp = g.add_named("build", "Building", "Built").unwrap();
    assert_eq!(sp.name(), Some("build"));
    let found = g.find("build").unwrap();
    found.stop();
    assert!(sp.is_stopped());
    assert!(g.find("deploy").is_none());
}

#[test]
fn test_duplicate_name_rejected() {
    let (g, _rec) = recorded_group();
    g.add_named("build", "Building", "Built").unwrap();
    let err = g.add_named("build", "Again", "Again").unwrap_err();
    assert!(matches!(err, SpinnerError::DuplicateName(ref n) if n == "build"));
    assert_eq!(g.len(), 1);
}

#[test]
fn test_start_is_idempotent() {
    let (g, rec) = recorded_group();
    let sp = g.add("A", "ok");
    g.start();
    g.start();
    assert_eq!(g.phase(), GroupPhase::Started);
    sp.stop();
    g.finish();
    assert_eq!(rec.count(|op| *op == TermOp::HideCursor), 1);
}

#[test]
fn test_stop_twice_restores_cursor_once() {
    let (g, rec) = recorded_group();
    let sp = g.add("A", "ok");
    g.start();
    sp.stop();
    g.stop();
    g.stop();
    assert_eq!(g.phase(), GroupPhase::Stopped);
    assert_eq!(rec.count(|op| *op == TermOp::HideCursor), 1);
    assert_eq!(rec.count(|op| *op == TermOp::ShowCursor), 1);
    assert_eq!(rec.ops().last(), Some(&TermOp::ShowCursor));
}

#[test]
fn test_stop_without_start_touches_nothing() {
    let (g, rec) = recorded_group();
    g.add("A", "ok");
    g.stop();
    g.start();
    assert_eq!(g.phase(), GroupPhase::Stopped);
    assert!(rec.ops().is_empty());
}

#[test]
fn test_no_writes_after_stop() {
    let (g, rec) = recorded_group();
    let sp = g.add("A", "ok");
    g.start();
    sp.stop();
    g.stop();
    let before = rec.ops().len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(rec.ops().len(), before);
}

#[test]
fn test_drop_without_stop_restores_cursor() {
    let (g, rec) = recorded_group();
    let sp = g.add("A", "ok");
    g.start();
    drop(g);

    assert_eq!(rec.count(|op| *op == TermOp::ShowCursor), 1);
    assert_eq!(rec.ops().last(), Some(&TermOp::ShowCursor));
    assert!(sp.is_stopped());
}

#[test]
fn test_zero_intervals_do_not_busy_loop() {
    let rec = Arc::new(Recorder::new());
    let config = Config {
        frame_interval_ms: 0,
        tick_interval_ms: 0,
        settle_delay_ms: 0,
        ..Config::default()
    };
    let g = SpinnerGroup::with_terminal(config, rec.clone());
    let sp = g.add("A", "ok");
    g.start();
    thread::sleep(Duration::from_millis(50));
    sp.stop();
    g.stop();

    // A 1 ms floor allows roughly one redraw per millisecond.
    let redraws = rec.count(|op| *op == TermOp::Flush);
    assert!(redraws >= 2);
    assert!(redraws < 500, "{redraws} redraws in 50 ms");
}

#[test]
fn test_multiline_message_keeps_block_height() {
    let (g, rec) = recorded_group();
    let sp1 = g.add("one\ntwo", "ok");
    let sp2 = g.add("B", "ok");
    g.start();
    thread::sleep(Duration::from_millis(20));
    sp1.stop_with_outcome("failure", "bad\nworse");
    sp2.stop();
    g.finish();

    assert_eq!(
        rec.count(|op| matches!(op, TermOp::Line(l) if l.contains('\n'))),
        0
    );
    assert_eq!(
        rec.count(|op| matches!(op, TermOp::MoveUp(n) if *n != 2)),
        0
    );
}
