//! Tests for the sequencer module.
//!
//! All tests run on a paused clock: the runtime jumps straight to the next
//! timer whenever every task is idle, so intervals elapse instantly and
//! deterministically.

use std::time::Duration;

use tokio::{
    sync::broadcast::{
        error::{RecvError, TryRecvError},
        Receiver,
    },
    time::{sleep, Instant},
};

use super::*;
use crate::models::StepStatus;

const INTERVAL: Duration = Duration::from_millis(1500);

fn create_test_controller(len: usize) -> SequencerController {
    let definitions = (1..=len)
        .map(|i| StepDefinition::new(format!("Step {i}"), format!("Description {i}")))
        .collect();
    SequencerController::new(definitions, INTERVAL)
}

/// Receives the next snapshot and checks its invariant.
async fn next_snapshot(events: &mut Receiver<Snapshot>) -> Snapshot {
    let snapshot = events.recv().await.expect("Failed to receive snapshot");
    snapshot
        .check_invariant()
        .expect("Snapshot violates the sequence invariant");
    snapshot
}

fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(5),
        "expected ~{expected:?} to elapse, got {elapsed:?}"
    );
}

fn statuses(snapshot: &Snapshot) -> Vec<StepStatus> {
    snapshot.steps.iter().map(|step| step.status).collect()
}

#[tokio::test(start_paused = true)]
async fn test_initial_snapshot_is_idle() {
    let controller = create_test_controller(6);
    let snapshot = controller.snapshot().await;

    assert_eq!(snapshot.state, RunState::Idle);
    assert_eq!(snapshot.cursor, 0);
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.len(), 6);
    assert_eq!(snapshot.interval_ms, 1500);
    assert!(snapshot
        .steps
        .iter()
        .all(|step| step.status == StepStatus::Pending));
    assert_eq!(
        snapshot.steps.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
    assert_eq!(controller.len(), 6);
    assert_eq!(controller.interval(), INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn test_six_step_scenario_runs_to_completion() {
    use StepStatus::*;

    let controller = create_test_controller(6);
    let mut events = controller.subscribe();

    controller.play().await;
    let started = next_snapshot(&mut events).await;
    assert_eq!(started.state, RunState::Running);
    assert_eq!(started.cursor, 0);
    assert!(started.is_playing);
    assert_eq!(statuses(&started), vec![Pending; 6]);

    let first = Instant::now();
    let after_one = next_snapshot(&mut events).await;
    assert_elapsed(first, INTERVAL);
    assert_eq!(after_one.cursor, 1);
    assert_eq!(
        statuses(&after_one),
        vec![Active, Pending, Pending, Pending, Pending, Pending]
    );

    let after_two = next_snapshot(&mut events).await;
    assert_elapsed(first, INTERVAL * 2);
    assert_eq!(after_two.cursor, 2);
    assert_eq!(
        statuses(&after_two),
        vec![Completed, Active, Pending, Pending, Pending, Pending]
    );

    for cursor in 3..=5 {
        let snapshot = next_snapshot(&mut events).await;
        assert_eq!(snapshot.cursor, cursor);
        assert_eq!(snapshot.state, RunState::Running);
        assert_eq!(snapshot.active_step().map(|s| s.id), Some(cursor as u64));
    }

    let finished = next_snapshot(&mut events).await;
    assert_elapsed(first, INTERVAL * 6);
    assert_eq!(finished.cursor, 6);
    assert_eq!(finished.state, RunState::Finished);
    assert!(!finished.is_playing);
    assert_eq!(statuses(&finished), vec![Completed; 6]);

    // No further tick is scheduled once finished
    sleep(INTERVAL * 5).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.snapshot().await, finished);
}

#[tokio::test(start_paused = true)]
async fn test_cursor_never_decreases_within_a_run() {
    let controller = create_test_controller(4);
    let mut events = controller.subscribe();

    controller.play().await;
    let mut last_cursor = 0;
    loop {
        let snapshot = next_snapshot(&mut events).await;
        assert!(snapshot.cursor >= last_cursor);
        assert!(snapshot.cursor <= last_cursor + 1);
        assert!(
            snapshot
                .steps
                .iter()
                .filter(|s| s.status == StepStatus::Active)
                .count()
                <= 1
        );
        last_cursor = snapshot.cursor;
        if snapshot.is_finished() {
            break;
        }
    }
    assert_eq!(last_cursor, 4);
}

#[tokio::test(start_paused = true)]
async fn test_pause_is_idempotent() {
    let controller = create_test_controller(6);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    next_snapshot(&mut events).await;

    controller.pause().await;
    let paused = next_snapshot(&mut events).await;
    assert_eq!(paused.state, RunState::Paused);
    assert_eq!(paused.cursor, 1);
    assert!(!paused.is_playing);

    controller.pause().await;
    assert_eq!(controller.snapshot().await, paused);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    // The cancelled tick never fires
    sleep(INTERVAL * 4).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.snapshot().await, paused);
}

#[tokio::test(start_paused = true)]
async fn test_reset_is_idempotent_and_restores_idle() {
    let controller = create_test_controller(6);
    let initial = controller.snapshot().await;
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    next_snapshot(&mut events).await;
    next_snapshot(&mut events).await;

    controller.reset().await;
    let once = controller.snapshot().await;
    controller.reset().await;
    let twice = controller.snapshot().await;

    assert_eq!(once, initial);
    assert_eq!(twice, initial);
    assert_eq!(next_snapshot(&mut events).await, initial);
    assert_eq!(next_snapshot(&mut events).await, initial);

    sleep(INTERVAL * 4).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.snapshot().await, initial);
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_every_state_restores_idle() {
    let controller = create_test_controller(2);
    let initial = controller.snapshot().await;

    // Idle
    controller.reset().await;
    assert_eq!(controller.snapshot().await, initial);

    // Running
    controller.play().await;
    controller.reset().await;
    assert_eq!(controller.snapshot().await, initial);

    // Paused
    controller.play().await;
    controller.pause().await;
    controller.reset().await;
    assert_eq!(controller.snapshot().await, initial);

    // Finished
    let mut events = controller.subscribe();
    controller.play().await;
    while !next_snapshot(&mut events).await.is_finished() {}
    controller.reset().await;
    assert_eq!(controller.snapshot().await, initial);
}

#[tokio::test(start_paused = true)]
async fn test_pause_then_play_resumes_without_skipping() {
    use StepStatus::*;

    let controller = create_test_controller(6);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    let ticked = next_snapshot(&mut events).await;
    assert_eq!(ticked.active_step().map(|s| s.id), Some(1));

    controller.pause().await;
    next_snapshot(&mut events).await;
    sleep(INTERVAL * 3).await;

    controller.play().await;
    let resumed = next_snapshot(&mut events).await;
    assert_eq!(resumed.state, RunState::Running);
    assert_eq!(resumed.cursor, 1);
    assert_eq!(resumed.active_step().map(|s| s.id), Some(1));

    let start = Instant::now();
    let next = next_snapshot(&mut events).await;
    assert_elapsed(start, INTERVAL);
    assert_eq!(next.cursor, 2);
    assert_eq!(
        statuses(&next),
        vec![Completed, Active, Pending, Pending, Pending, Pending]
    );
}

#[tokio::test(start_paused = true)]
async fn test_pause_before_first_tick() {
    let controller = create_test_controller(3);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    sleep(INTERVAL / 2).await;
    controller.pause().await;

    let paused = next_snapshot(&mut events).await;
    assert_eq!(paused.state, RunState::Paused);
    assert_eq!(paused.cursor, 0);

    sleep(INTERVAL * 3).await;
    assert_eq!(controller.snapshot().await, paused);

    controller.play().await;
    next_snapshot(&mut events).await;
    let start = Instant::now();
    let first = next_snapshot(&mut events).await;
    assert_elapsed(start, INTERVAL);
    assert_eq!(first.cursor, 1);
}

#[tokio::test(start_paused = true)]
async fn test_play_while_running_is_noop() {
    let controller = create_test_controller(3);
    let mut events = controller.subscribe();

    let start = Instant::now();
    controller.play().await;
    next_snapshot(&mut events).await;

    sleep(INTERVAL / 2).await;
    controller.play().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    // The original schedule is kept, not restarted
    let first = next_snapshot(&mut events).await;
    assert_elapsed(start, INTERVAL);
    assert_eq!(first.cursor, 1);
}

#[tokio::test(start_paused = true)]
async fn test_play_after_finish_replays_from_start() {
    let controller = create_test_controller(2);
    let mut events = controller.subscribe();

    controller.play().await;
    while !next_snapshot(&mut events).await.is_finished() {}
    assert!(!controller.snapshot().await.can_play());

    controller.play().await;
    let replay = next_snapshot(&mut events).await;
    assert_eq!(replay.state, RunState::Running);
    assert_eq!(replay.cursor, 0);
    assert!(replay
        .steps
        .iter()
        .all(|step| step.status == StepStatus::Pending));

    let first = next_snapshot(&mut events).await;
    assert_eq!(first.cursor, 1);
    assert_eq!(first.steps[0].status, StepStatus::Active);
}

#[tokio::test(start_paused = true)]
async fn test_reset_mid_interval_discards_pending_tick() {
    let controller = create_test_controller(3);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    sleep(INTERVAL / 2).await;

    controller.reset().await;
    controller.play().await;
    assert_eq!(next_snapshot(&mut events).await.state, RunState::Idle);
    assert_eq!(next_snapshot(&mut events).await.state, RunState::Running);

    // The first run's tick would have fired at INTERVAL / 2 from here
    let restarted = Instant::now();
    let first = next_snapshot(&mut events).await;
    assert_elapsed(restarted, INTERVAL);
    assert_eq!(first.cursor, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_generation_tick_is_discarded() {
    let controller = create_test_controller(3);
    controller.play().await;
    let stale = controller.shared.inner.lock().await.generation;

    controller.reset().await;
    controller.play().await;
    let current = controller.shared.inner.lock().await.generation;
    assert_ne!(stale, current);

    assert_eq!(controller.shared.tick(stale).await, TickOutcome::Stale);
    assert_eq!(controller.snapshot().await.cursor, 0);

    assert_eq!(controller.shared.tick(current).await, TickOutcome::Scheduled);
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.cursor, 1);
    snapshot.check_invariant().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_tick_while_paused_is_discarded() {
    let controller = create_test_controller(3);
    controller.play().await;
    let generation = controller.shared.inner.lock().await.generation;
    controller.pause().await;

    assert_eq!(controller.shared.tick(generation).await, TickOutcome::Stale);
    assert_eq!(controller.snapshot().await.state, RunState::Paused);
}

#[tokio::test(start_paused = true)]
async fn test_single_step_sequence() {
    let controller = create_test_controller(1);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    let finished = next_snapshot(&mut events).await;

    assert_eq!(finished.state, RunState::Finished);
    assert_eq!(finished.cursor, 1);
    assert_eq!(finished.steps[0].status, StepStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_and_apply() {
    let controller = create_test_controller(3);

    controller.toggle().await;
    assert_eq!(controller.snapshot().await.state, RunState::Running);

    controller.toggle().await;
    assert_eq!(controller.snapshot().await.state, RunState::Paused);

    controller.apply(Action::Play).await;
    assert_eq!(controller.snapshot().await.state, RunState::Running);

    controller.apply(Action::Pause).await;
    assert_eq!(controller.snapshot().await.state, RunState::Paused);

    controller.apply(Action::Reset).await;
    assert_eq!(controller.snapshot().await.state, RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_pause_when_not_running_is_noop() {
    let controller = create_test_controller(2);
    let mut events = controller.subscribe();

    controller.pause().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.snapshot().await.state, RunState::Idle);

    controller.play().await;
    while !next_snapshot(&mut events).await.is_finished() {}
    controller.pause().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(controller.snapshot().await.state, RunState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_clones_control_the_same_run() {
    let controller = create_test_controller(3);
    let other = controller.clone();

    other.play().await;
    assert_eq!(controller.snapshot().await.state, RunState::Running);

    controller.pause().await;
    assert_eq!(other.snapshot().await.state, RunState::Paused);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_stops_ticking() {
    let controller = create_test_controller(3);
    let mut events = controller.subscribe();

    controller.play().await;
    next_snapshot(&mut events).await;
    drop(controller);

    assert!(matches!(events.recv().await, Err(RecvError::Closed)));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_keeps_finished_run_finished() {
    let controller = create_test_controller(2);
    let mut events = controller.subscribe();

    controller.play().await;
    while !next_snapshot(&mut events).await.is_finished() {}
    let finished = controller.snapshot().await;
    assert!(!finished.can_play());

    let toggled = controller.toggle().await;
    assert_eq!(toggled, finished);
    assert_eq!(toggled.state, RunState::Finished);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    sleep(INTERVAL * 3).await;
    assert_eq!(controller.snapshot().await, finished);

    // After a reset the control is enabled again
    controller.reset().await;
    assert_eq!(controller.toggle().await.state, RunState::Running);
}

#[tokio::test(start_paused = true)]
async fn test_controls_return_post_transition_snapshot() {
    let controller = create_test_controller(3);
    let mut events = controller.subscribe();

    let played = controller.play().await;
    assert_eq!(played.state, RunState::Running);
    assert_eq!(played.cursor, 0);
    assert_eq!(next_snapshot(&mut events).await, played);

    next_snapshot(&mut events).await;
    let paused = controller.apply(Action::Pause).await;
    assert_eq!(paused.state, RunState::Paused);
    assert_eq!(paused.cursor, 1);
    assert_eq!(next_snapshot(&mut events).await, paused);

    // A no-op still reports the current state
    assert_eq!(controller.pause().await, paused);

    let reset = controller.reset().await;
    assert_eq!(reset.state, RunState::Idle);
    assert_eq!(reset.cursor, 0);
    reset.check_invariant().unwrap();
}
