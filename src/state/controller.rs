//! Countdown timer controller
//!
//! Owns all timer state behind a single mutex and exposes the command
//! surface (`configure`, `start`, `toggle_pause`, `stop`, `tick`). State
//! changes are published on a watch channel for renderers; session events
//! (start/pause/resume/completion/cancellation) go out on a broadcast
//! channel that also drives the ticker task.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::error::CommandError;
use super::session::{SessionPhase, TimerSnapshot, MAX_SESSION_MINUTES};

/// Session lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A configured session began counting down
    Started,
    /// A running countdown was frozen
    Paused,
    /// A paused countdown picked up again
    Resumed,
    /// The countdown reached zero naturally; emitted exactly once per session
    Completed,
    /// An active session was stopped before completion
    Cancelled,
}

/// Result of delivering one tick to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented by one second; countdown continues
    Running(u64),
    /// Decremented to zero; session finished and the completion event fired
    Completed,
    /// The controller was not running; the tick had no effect
    Skipped,
}

#[derive(Debug)]
struct ControllerInner {
    phase: SessionPhase,
    pending_minutes: Option<u32>,
    remaining_seconds: u64,
    has_started: bool,
}

impl ControllerInner {
    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            configured_minutes: self.pending_minutes,
            has_started: self.has_started,
        }
    }
}

/// Countdown timer state machine: `Idle`, `Running`, `Paused`, `Finished`
///
/// One controller manages one session at a time. Commands and ticks both
/// mutate state under the same lock, so decrement-and-check is a single
/// logical step with respect to concurrently arriving commands.
#[derive(Debug)]
pub struct TimerController {
    inner: Mutex<ControllerInner>,
    event_tx: broadcast::Sender<SessionEvent>,
    update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _update_rx: watch::Receiver<TimerSnapshot>,
}

impl TimerController {
    /// Create an idle controller with no pending configuration
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(32);
        let (update_tx, update_rx) = watch::channel(TimerSnapshot::idle());

        Self {
            inner: Mutex::new(ControllerInner {
                phase: SessionPhase::Idle,
                pending_minutes: None,
                remaining_seconds: 0,
                has_started: false,
            }),
            event_tx,
            update_tx,
            _update_rx: update_rx,
        }
    }

    /// Subscribe to session events (start, pause, resume, completion,
    /// cancellation)
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the observable timer state; updated after every command and tick
    pub fn watch_updates(&self) -> watch::Receiver<TimerSnapshot> {
        self.update_tx.subscribe()
    }

    /// Current observable state
    pub fn snapshot(&self) -> TimerSnapshot {
        self.lock().snapshot()
    }

    /// Set the pending session length from raw client text
    ///
    /// Only valid while `Idle`; the configuration is immutable once a
    /// session is underway. Validation happens before any mutation, so a
    /// rejected configure leaves the previous configuration in place.
    pub fn configure(&self, raw: &str) -> Result<u32, CommandError> {
        let mut inner = self.lock();

        if inner.phase != SessionPhase::Idle {
            return Err(CommandError::InvalidTransition {
                command: "configure",
                phase: inner.phase,
            });
        }

        let minutes = parse_minutes(raw)?;
        inner.pending_minutes = Some(minutes);
        self.publish(&inner);

        debug!("Session length configured: {} minutes", minutes);
        Ok(minutes)
    }

    /// Begin the countdown for the pending configuration
    pub fn start(&self) -> Result<TimerSnapshot, CommandError> {
        let mut inner = self.lock();

        if inner.phase != SessionPhase::Idle {
            return Err(CommandError::InvalidTransition {
                command: "start",
                phase: inner.phase,
            });
        }

        let minutes = inner.pending_minutes.ok_or(CommandError::NoConfig)?;
        inner.remaining_seconds = u64::from(minutes) * 60;
        inner.phase = SessionPhase::Running;
        inner.has_started = true;

        let snapshot = inner.snapshot();
        self.publish(&inner);
        self.emit(SessionEvent::Started);

        info!("Session started: {} minutes", minutes);
        Ok(snapshot)
    }

    /// Flip between `Running` and `Paused`
    pub fn toggle_pause(&self) -> Result<SessionPhase, CommandError> {
        let mut inner = self.lock();

        let (next, event) = match inner.phase {
            SessionPhase::Running => (SessionPhase::Paused, SessionEvent::Paused),
            SessionPhase::Paused => (SessionPhase::Running, SessionEvent::Resumed),
            phase => {
                return Err(CommandError::InvalidTransition {
                    command: "pause",
                    phase,
                })
            }
        };

        inner.phase = next;
        self.publish(&inner);
        self.emit(event);

        info!(
            "Session {} with {} seconds remaining",
            next.label(),
            inner.remaining_seconds
        );
        Ok(next)
    }

    /// Reset to `Idle`, zeroing the remaining time
    ///
    /// Idempotent from every phase. Stopping an active session emits the
    /// cancellation event; stopping from `Finished` only acknowledges the
    /// completion, and stopping while already `Idle` emits nothing. The
    /// pending configuration survives so a new session can start without
    /// reconfiguring.
    pub fn stop(&self) -> TimerSnapshot {
        let mut inner = self.lock();

        let was_active = matches!(inner.phase, SessionPhase::Running | SessionPhase::Paused);
        inner.phase = SessionPhase::Idle;
        inner.remaining_seconds = 0;
        inner.has_started = false;

        let snapshot = inner.snapshot();
        self.publish(&inner);

        if was_active {
            self.emit(SessionEvent::Cancelled);
            info!("Session cancelled before completion");
        }

        snapshot
    }

    /// Apply one one-second tick
    ///
    /// Decrement-and-check runs as a single step under the lock: triggers
    /// that fire after the state left `Running` are skipped, and the
    /// completion event cannot fire twice.
    pub fn tick(&self) -> TickOutcome {
        let mut inner = self.lock();

        if inner.phase != SessionPhase::Running || inner.remaining_seconds == 0 {
            return TickOutcome::Skipped;
        }

        inner.remaining_seconds -= 1;

        if inner.remaining_seconds == 0 {
            inner.phase = SessionPhase::Finished;
            self.publish(&inner);
            self.emit(SessionEvent::Completed);
            info!("Session completed");
            TickOutcome::Completed
        } else {
            let remaining = inner.remaining_seconds;
            self.publish(&inner);
            TickOutcome::Running(remaining)
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        // A poisoned lock still holds consistent state; recover it
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, inner: &ControllerInner) {
        // send_replace never fails; the controller holds a receiver
        self.update_tx.send_replace(inner.snapshot());
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; events are best-effort notifications
        let _ = self.event_tx.send(event);
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse raw client text as a session length in minutes
fn parse_minutes(raw: &str) -> Result<u32, CommandError> {
    let trimmed = raw.trim();

    let invalid = || CommandError::InvalidInput {
        input: raw.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let minutes: u32 = trimmed.parse().map_err(|_| invalid())?;
    if minutes == 0 {
        return Err(invalid());
    }
    if minutes > MAX_SESSION_MINUTES {
        return Err(CommandError::ExceedsMaximum {
            minutes,
            maximum: MAX_SESSION_MINUTES,
        });
    }

    Ok(minutes)
}
