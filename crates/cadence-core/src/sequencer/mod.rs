//! Timed step-sequencer driving a run over a fixed tick interval.
//!
//! The [`SequencerController`] exclusively owns the live run. Callers drive
//! it with [`play`](SequencerController::play),
//! [`pause`](SequencerController::pause) and
//! [`reset`](SequencerController::reset), and observe it through immutable
//! [`Snapshot`]s, either on demand or as a stream of transitions.
//!
//! ```text
//!            play                 tick (cursor < N)
//!   ┌──────┐ ───▶ ┌─────────┐ ◀──────────────┐
//!   │ Idle │      │ Running │ ───────────────┘
//!   └──────┘      └─────────┘ ── tick (cursor == N) ──▶ ┌──────────┐
//!       ▲          │     ▲                               │ Finished │
//!       │    pause │     │ play                          └──────────┘
//!       │          ▼     │                                 │
//!       │         ┌────────┐                               │ play (implicit reset)
//!       │         │ Paused │                               ▼
//!       │         └────────┘                            Running
//!       └──── reset (from any state)
//! ```
//!
//! # Timers
//!
//! At most one tick task is outstanding. Every transition that stops or
//! restarts the run aborts that task and bumps a generation token; a tick
//! compares its own generation against the current one after taking the
//! run lock and discards itself when they differ. All mutations and snapshot
//! emissions happen while holding the run lock, so subscribers observe
//! transitions in order.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use cadence_core::{RunState, SequencerBuilder, StepDefinition};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SequencerBuilder::new()
//!     .with_steps(vec![
//!         StepDefinition::new("Fetch", "Download the inputs"),
//!         StepDefinition::new("Build", "Compile everything"),
//!     ])
//!     .with_interval(Duration::from_millis(10))
//!     .build()
//!     .await?;
//!
//! let mut events = controller.subscribe();
//! controller.play().await;
//! while let Ok(snapshot) = events.recv().await {
//!     if snapshot.state == RunState::Finished {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use log::{debug, info, warn};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};

use crate::models::{Action, RunState, Snapshot, StepDefinition};

pub mod builder;
mod run;

#[cfg(test)]
mod tests;

pub use builder::{load_steps_file, SequencerBuilder};
use run::SequenceRun;

/// Delay between two ticks unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1500);

/// Snapshots buffered per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 64;

/// Owner of a run and its tick timer.
///
/// Cloning is cheap and every clone controls the same run. The pending tick
/// is cancelled once the last clone is dropped.
#[derive(Clone)]
pub struct SequencerController {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    events: broadcast::Sender<Snapshot>,
    interval: Duration,
    interval_ms: u64,
    len: usize,
}

struct Inner {
    definitions: Vec<StepDefinition>,
    run: SequenceRun,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Scheduled,
    Finished,
    Stale,
}

impl SequencerController {
    /// Creates a controller in the `Idle` state.
    ///
    /// `definitions` must be non-empty; [`SequencerBuilder`] enforces this.
    pub(crate) fn new(definitions: Vec<StepDefinition>, interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let len = definitions.len();
        let run = SequenceRun::new(&definitions);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    definitions,
                    run,
                    generation: 0,
                    timer: None,
                }),
                events,
                interval,
                interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
                len,
            }),
        }
    }

    /// Starts or resumes the run and returns the resulting snapshot.
    ///
    /// A finished run is reset first and replayed from the first step. Does
    /// nothing while already running. Must be called from within a Tokio
    /// runtime.
    pub async fn play(&self) -> Snapshot {
        let mut inner = self.shared.inner.lock().await;
        self.shared.play_locked(&mut inner);
        inner.run.snapshot(self.shared.interval_ms)
    }

    /// Stops the run at its current cursor and cancels the pending tick.
    ///
    /// Does nothing unless running.
    pub async fn pause(&self) -> Snapshot {
        let mut inner = self.shared.inner.lock().await;
        self.shared.pause_locked(&mut inner);
        inner.run.snapshot(self.shared.interval_ms)
    }

    /// Cancels any pending tick and restores the `Idle` run.
    pub async fn reset(&self) -> Snapshot {
        let mut inner = self.shared.inner.lock().await;
        Shared::reset_locked(&mut inner);
        info!("sequence reset");
        self.shared.emit(&inner);
        inner.run.snapshot(self.shared.interval_ms)
    }

    /// Pauses while running, plays while idle or paused.
    ///
    /// Unlike [`play`](Self::play), a finished run stays finished until it
    /// is reset; the play/pause control is disabled at that point.
    pub async fn toggle(&self) -> Snapshot {
        let mut inner = self.shared.inner.lock().await;
        match inner.run.state() {
            RunState::Running => self.shared.pause_locked(&mut inner),
            RunState::Idle | RunState::Paused => self.shared.play_locked(&mut inner),
            RunState::Finished => debug!("toggle ignored: sequence finished"),
        }
        inner.run.snapshot(self.shared.interval_ms)
    }

    /// Applies a control action and returns the snapshot it produced.
    ///
    /// The snapshot is taken under the same lock as the transition, so a
    /// tick cannot land in between.
    pub async fn apply(&self, action: Action) -> Snapshot {
        match action {
            Action::Play => self.play().await,
            Action::Pause => self.pause().await,
            Action::Reset => self.reset().await,
            Action::Toggle => self.toggle().await,
        }
    }

    /// Current state of the run.
    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.shared.inner.lock().await;
        inner.run.snapshot(self.shared.interval_ms)
    }

    /// Subscribes to every snapshot emitted from now on, in emission order.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.shared.events.subscribe()
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Number of steps in the sequence.
    pub fn len(&self) -> usize {
        self.shared.len
    }

    pub fn is_empty(&self) -> bool {
        self.shared.len == 0
    }
}

impl Shared {
    fn emit(&self, inner: &Inner) {
        let snapshot = inner.run.snapshot(self.interval_ms);
        debug!(
            "emitting snapshot: {} at {}/{}",
            snapshot.state,
            snapshot.cursor,
            snapshot.len()
        );
        // Having no subscribers is not an error.
        let _ = self.events.send(snapshot);
    }

    fn cancel_timer(inner: &mut Inner) {
        inner.generation = inner.generation.wrapping_add(1);
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
    }

    fn reset_locked(inner: &mut Inner) {
        Self::cancel_timer(inner);
        inner.run = SequenceRun::new(&inner.definitions);
    }

    fn play_locked(self: &Arc<Self>, inner: &mut Inner) {
        match inner.run.state() {
            RunState::Running => {
                debug!("play ignored: sequence already running");
                return;
            }
            RunState::Finished => {
                info!("replaying finished sequence from the first step");
                Self::reset_locked(inner);
            }
            RunState::Idle | RunState::Paused => {}
        }

        Self::cancel_timer(inner);
        inner.run.start();
        inner.timer = Some(self.spawn_ticker(inner.generation));
        info!("sequence playing (generation {})", inner.generation);
        self.emit(inner);
    }

    fn pause_locked(&self, inner: &mut Inner) {
        if inner.run.state() != RunState::Running {
            debug!("pause ignored: sequence is {}", inner.run.state());
            return;
        }

        Self::cancel_timer(inner);
        inner.run.stop();
        info!("sequence paused");
        self.emit(inner);
    }

    fn spawn_ticker(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                if shared.tick(generation).await != TickOutcome::Scheduled {
                    return;
                }
            }
        })
    }

    async fn tick(&self, generation: u64) -> TickOutcome {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation || inner.run.state() != RunState::Running {
            warn!(
                "discarding stale tick from generation {generation} (current {})",
                inner.generation
            );
            return TickOutcome::Stale;
        }

        let more = inner.run.advance();
        self.emit(&inner);

        if more {
            TickOutcome::Scheduled
        } else {
            inner.timer = None;
            info!("sequence finished after {} steps", self.len);
            TickOutcome::Finished
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.get_mut().timer.take() {
            timer.abort();
        }
    }
}
