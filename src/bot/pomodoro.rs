//! Pomodoro timer registry
//!
//! Each session owns at most one timer: a background task firing the
//! "work over" and "break over" reminders on fixed intervals until it is
//! cancelled. Starting a timer that is already running is a no-op.

use crate::config::{
    minutes_to_duration, POMODORO_BREAK_MINUTES, POMODORO_MAX_MINUTES, POMODORO_WORK_MINUTES,
};
use crate::services::MessageSink;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Sent every break interval
pub const BREAK_OVER_MESSAGE: &str = "Break time is over. Time to work!";

/// Sent every work interval
#[must_use]
pub fn work_over_message(rest: Duration) -> String {
    format!(
        "Work session is over. Take a {}-minute break!",
        rest.as_secs() / 60
    )
}

/// Result of [`PomodoroScheduler::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new timer was spawned
    Started,
    /// The session already had a running timer; nothing was spawned
    AlreadyRunning,
}

struct PomodoroTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Registry of running Pomodoro timers keyed by session id
pub struct PomodoroScheduler {
    timers: RwLock<HashMap<i64, PomodoroTimer>>,
    sink: Arc<dyn MessageSink>,
    work: Duration,
    rest: Duration,
}

impl PomodoroScheduler {
    /// Create a scheduler delivering reminders through `sink`
    ///
    /// A zero interval, or one longer than a day, is replaced by the default
    /// length so the timer task always has a valid period.
    pub fn new(sink: Arc<dyn MessageSink>, work: Duration, rest: Duration) -> Self {
        Self {
            timers: RwLock::new(HashMap::new()),
            sink,
            work: valid_interval(work, POMODORO_WORK_MINUTES),
            rest: valid_interval(rest, POMODORO_BREAK_MINUTES),
        }
    }

    /// Work interval in whole minutes
    #[must_use]
    pub const fn work_minutes(&self) -> u64 {
        self.work.as_secs() / 60
    }

    /// Break interval in whole minutes
    #[must_use]
    pub const fn break_minutes(&self) -> u64 {
        self.rest.as_secs() / 60
    }

    /// Start the timer for a session, reminding in `chat_id`
    pub async fn start(&self, session_id: i64, chat_id: i64) -> StartOutcome {
        let mut timers = self.timers.write().await;

        if timers
            .get(&session_id)
            .is_some_and(|timer| !timer.handle.is_finished())
        {
            return StartOutcome::AlreadyRunning;
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(run_timer(
            self.sink.clone(),
            chat_id,
            self.work,
            self.rest,
            token.clone(),
        ));
        timers.insert(session_id, PomodoroTimer { token, handle });
        info!(session_id, chat_id, "Pomodoro timer started");

        StartOutcome::Started
    }

    /// Cancel the timer for a session
    ///
    /// Returns `true` if a running timer was cancelled
    pub async fn stop(&self, session_id: i64) -> bool {
        let removed = self.timers.write().await.remove(&session_id);
        match removed {
            Some(timer) => {
                timer.token.cancel();
                info!(session_id, "Pomodoro timer stopped");
                !timer.handle.is_finished()
            }
            None => false,
        }
    }

    /// Check if a timer is currently running for this session
    pub async fn is_running(&self, session_id: i64) -> bool {
        self.timers
            .read()
            .await
            .get(&session_id)
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    /// Number of running timers
    pub async fn running_count(&self) -> usize {
        self.timers
            .read()
            .await
            .values()
            .filter(|timer| !timer.handle.is_finished())
            .count()
    }

    /// Cancel every timer
    pub async fn shutdown(&self) {
        let mut timers = self.timers.write().await;
        for (_, timer) in timers.drain() {
            timer.token.cancel();
        }
    }
}

fn valid_interval(interval: Duration, default_minutes: u64) -> Duration {
    if interval.is_zero() || interval > minutes_to_duration(POMODORO_MAX_MINUTES, 0) {
        warn!("Invalid Pomodoro interval {interval:?}, using {default_minutes} minutes");
        minutes_to_duration(default_minutes, 0)
    } else {
        interval
    }
}

async fn run_timer(
    sink: Arc<dyn MessageSink>,
    chat_id: i64,
    work: Duration,
    rest: Duration,
    token: CancellationToken,
) {
    let now = Instant::now();
    let mut work_over = interval_at(now + work, work);
    let mut break_over = interval_at(now + rest, rest);
    work_over.set_missed_tick_behavior(MissedTickBehavior::Delay);
    break_over.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let work_over_text = work_over_message(rest);

    loop {
        let text = tokio::select! {
            () = token.cancelled() => break,
            _ = work_over.tick() => work_over_text.as_str(),
            _ = break_over.tick() => BREAK_OVER_MESSAGE,
        };

        if let Err(e) = sink.send_text(chat_id, text).await {
            warn!("Failed to deliver Pomodoro reminder to chat {chat_id}: {e}");
        }
    }
}
