//! Session-scoped state for the stateful commands: stopwatch, countdown,
//! reminders and the two games.
//!
//! Times are Unix milliseconds from the session's clock. Nothing here
//! schedules anything; the session polls [`SessionState::take_due`].

use crate::games::{RpsScore, TicTacToe};

/// Render milliseconds as seconds with two decimals.
pub fn format_seconds(millis: u64) -> String {
    format!("{:.2}", millis as f64 / 1000.0)
}

// ---------------------------------------------------------------------------
// Stopwatch
// ---------------------------------------------------------------------------

/// Idle or running. Elapsed time is always derived from the start stamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<u64>,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start at `now`. Returns false if already running.
    pub fn start(&mut self, now: u64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Stop and return the elapsed milliseconds, or `None` if idle.
    pub fn stop(&mut self, now: u64) -> Option<u64> {
        self.started_at
            .take()
            .map(|start| now.saturating_sub(start))
    }

    pub fn elapsed(&self, now: u64) -> Option<u64> {
        self.started_at.map(|start| now.saturating_sub(start))
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// At most one countdown is active at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    due_at: Option<u64>,
}

impl Countdown {
    pub fn is_active(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn start(&mut self, now: u64, seconds: u64) {
        self.due_at = Some(now.saturating_add(seconds.saturating_mul(1000)));
    }

    /// Cancel the active countdown. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.due_at.take().is_some()
    }

    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.due_at.map(|due| due.saturating_sub(now))
    }
}

/// A one-shot message shown once its time comes. Not cancellable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub due_at: u64,
    pub message: String,
}

/// Something a background timer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    CountdownFinished,
    Reminder(String),
}

impl TimerEvent {
    pub fn message(&self) -> String {
        match self {
            Self::CountdownFinished => "Timer finished!".to_string(),
            Self::Reminder(message) => format!("Reminder: {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything the stateful commands keep between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// When the session started, for `uptime`.
    pub started_at: u64,
    pub stopwatch: Stopwatch,
    pub countdown: Countdown,
    reminders: Vec<Reminder>,
    pub ttt: TicTacToe,
    pub rps: RpsScore,
}

impl SessionState {
    pub fn new(started_at: u64, rps: RpsScore) -> Self {
        Self {
            started_at,
            stopwatch: Stopwatch::default(),
            countdown: Countdown::default(),
            reminders: Vec::new(),
            ttt: TicTacToe::new(),
            rps,
        }
    }

    pub fn add_reminder(&mut self, due_at: u64, message: String) {
        self.reminders.push(Reminder { due_at, message });
    }

    pub fn pending_reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Remove and return every event due at `now`, earliest first. A
    /// countdown and a reminder due at the same instant fire countdown
    /// first.
    pub fn take_due(&mut self, now: u64) -> Vec<TimerEvent> {
        let mut due: Vec<(u64, TimerEvent)> = Vec::new();

        if let Some(at) = self.countdown.due_at
            && at <= now
        {
            self.countdown.due_at = None;
            due.push((at, TimerEvent::CountdownFinished));
        }

        let (fired, pending): (Vec<Reminder>, Vec<Reminder>) = std::mem::take(&mut self.reminders)
            .into_iter()
            .partition(|r| r.due_at <= now);
        self.reminders = pending;
        due.extend(
            fired
                .into_iter()
                .map(|r| (r.due_at, TimerEvent::Reminder(r.message))),
        );

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, event)| event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_start_stop() {
        let mut sw = Stopwatch::default();
        assert!(sw.start(1_000));
        assert!(!sw.start(2_000));
        assert_eq!(sw.elapsed(1_250), Some(250));
        assert_eq!(sw.stop(3_345), Some(2_345));
        assert!(!sw.is_running());
        assert_eq!(sw.stop(4_000), None);
    }

    #[test]
    fn format_two_decimals() {
        assert_eq!(format_seconds(2_345), "2.35");
        assert_eq!(format_seconds(0), "0.00");
        assert_eq!(format_seconds(61_000), "61.00");
    }

    #[test]
    fn countdown_fires_once() {
        let mut state = SessionState::new(0, RpsScore::default());
        state.countdown.start(0, 5);
        assert!(state.take_due(4_999).is_empty());
        assert_eq!(state.take_due(5_000), [TimerEvent::CountdownFinished]);
        assert!(state.take_due(10_000).is_empty());
        assert!(!state.countdown.is_active());
    }

    #[test]
    fn countdown_cancel() {
        let mut c = Countdown::default();
        assert!(!c.cancel());
        c.start(0, 1);
        assert_eq!(c.remaining(400), Some(600));
        assert!(c.cancel());
        assert!(!c.is_active());
    }

    #[test]
    fn reminders_fire_in_due_order() {
        let mut state = SessionState::new(0, RpsScore::default());
        state.add_reminder(3_000, "later".into());
        state.add_reminder(1_000, "sooner".into());
        state.add_reminder(9_000, "much later".into());
        let fired = state.take_due(5_000);
        assert_eq!(
            fired,
            [
                TimerEvent::Reminder("sooner".into()),
                TimerEvent::Reminder("later".into()),
            ]
        );
        assert_eq!(state.pending_reminders().len(), 1);
    }

    #[test]
    fn event_messages() {
        assert_eq!(TimerEvent::CountdownFinished.message(), "Timer finished!");
        assert_eq!(TimerEvent::Reminder("tea".into()).message(), "Reminder: tea");
    }
}
