use chrono::{DateTime, Duration, Utc};

/// A single cancellable deferred task: at most one deadline is ever pending.
///
/// The owner drives it from its event loop with [`Debouncer::fire_if_due`];
/// nothing here blocks or sleeps.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending deadline without rescheduling. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Consume the pending deadline if it has elapsed at `now`.
    pub fn fire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
