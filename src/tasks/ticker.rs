//! Session ticker background task

use std::{sync::Arc, time::Duration};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, SessionEvent, TickOutcome};

/// Real-time spacing between countdown decrements
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that drives the one-second countdown ticks
///
/// Waits for the controller to enter the running phase, then delivers one
/// tick per second until the session pauses, is cancelled, or completes.
/// The interval only exists inside the countdown loop, so no trigger is
/// left pending whenever the state is not running.
pub async fn session_ticker_task(state: Arc<AppState>) {
    info!("Starting session ticker task");

    let mut events = state.controller.subscribe_events();

    loop {
        // Wait for a session to start or resume
        match events.recv().await {
            Ok(SessionEvent::Started | SessionEvent::Resumed) => {
                debug!("Countdown active, ticking every {:?}", TICK_INTERVAL);
                run_countdown(&state, &mut events).await;
            }
            Ok(event) => {
                debug!("Ticker ignoring event outside a countdown: {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                error!("Ticker lagged {} events behind, resynchronizing", skipped);
                // Recover from the current state rather than the missed events
                if state.controller.snapshot().is_running() {
                    run_countdown(&state, &mut events).await;
                }
            }
            Err(RecvError::Closed) => {
                info!("Controller dropped, ticker task exiting");
                break;
            }
        }
    }
}

/// Tick once per second until the state leaves the running phase
async fn run_countdown(
    state: &Arc<AppState>,
    events: &mut tokio::sync::broadcast::Receiver<SessionEvent>,
) {
    // First decrement lands one full interval after entry, never immediately
    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

    loop {
        tokio::select! {
            // Timer trigger - apply one decrement
            _ = interval.tick() => {
                match state.controller.tick() {
                    TickOutcome::Running(remaining) => {
                        debug!("Tick: {} seconds remaining", remaining);
                    }
                    TickOutcome::Completed => {
                        info!("Countdown reached zero, completion signaled");
                        break;
                    }
                    TickOutcome::Skipped => {
                        // State left running between notifications
                        debug!("Tick skipped, stopping trigger");
                        break;
                    }
                }
            }

            // Command event - check if the countdown should stop
            event = events.recv() => {
                match event {
                    Ok(SessionEvent::Paused) => {
                        info!("Session paused, stopping trigger");
                        break;
                    }
                    Ok(SessionEvent::Cancelled) => {
                        info!("Session cancelled, stopping trigger");
                        break;
                    }
                    Ok(event) => {
                        debug!("Ticker ignoring event during countdown: {:?}", event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        error!("Ticker lagged {} events during countdown", skipped);
                        if !state.controller.snapshot().is_running() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionPhase;
    use tokio::time::advance;

    fn test_state() -> Arc<AppState> {
        AppState::shared(20553, "127.0.0.1".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_decrements_once_per_second() {
        let state = test_state();
        tokio::spawn(session_ticker_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.configure("2").unwrap();
        state.start().unwrap();
        tokio::task::yield_now().await;

        for _ in 0..3 {
            advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        let snapshot = state.get_timer_snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Running);
        assert_eq!(snapshot.remaining_seconds, 117);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_the_countdown_and_resume_continues_it() {
        let state = test_state();
        tokio::spawn(session_ticker_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.configure("25").unwrap();
        state.start().unwrap();
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(state.get_timer_snapshot().remaining_seconds, 1499);

        state.toggle_pause().unwrap();
        tokio::task::yield_now().await;
        advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        let snapshot = state.get_timer_snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Paused);
        assert_eq!(snapshot.remaining_seconds, 1499);

        state.toggle_pause().unwrap();
        tokio::task::yield_now().await;
        for _ in 0..2 {
            advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(state.get_timer_snapshot().remaining_seconds, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn one_minute_session_completes_exactly_once() {
        let state = test_state();
        let mut events = state.controller.subscribe_events();
        tokio::spawn(session_ticker_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.configure("1").unwrap();
        state.start().unwrap();
        tokio::task::yield_now().await;

        // Run well past the end of the session
        for _ in 0..90 {
            advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        let snapshot = state.get_timer_snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Finished);
        assert_eq!(snapshot.remaining_seconds, 0);

        let mut completions = 0;
        while let Ok(event) = events.try_recv() {
            if event == SessionEvent::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_the_trigger() {
        let state = test_state();
        tokio::spawn(session_ticker_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.configure("2").unwrap();
        state.start().unwrap();
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        state.stop();
        advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        let snapshot = state.get_timer_snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Idle);
        assert_eq!(snapshot.remaining_seconds, 0);
    }
}
