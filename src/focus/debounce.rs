use std::time::Duration;
use tokio::time::Instant;

/// A single-slot pending task that runs once its trigger has been quiet for
/// `delay`.
///
/// Scheduling again before the deadline replaces the pending payload and
/// pushes the deadline out, so only the most recent trigger of a burst fires.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `payload` to fire at `now + delay`, returning the payload it replaced
    pub fn schedule(&mut self, now: Instant, payload: T) -> Option<T> {
        self.pending
            .replace((now + self.delay, payload))
            .map(|(_, replaced)| replaced)
    }

    /// Drop the pending payload without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload if its deadline has passed
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiescence() {
        let start = Instant::now();
        let mut slot = Debounce::new(Duration::from_millis(100));
        assert!(slot.schedule(start, 1).is_none());
        assert_eq!(slot.fire(start + Duration::from_millis(99)), None);
        assert_eq!(slot.fire(start + Duration::from_millis(100)), Some(1));
        assert!(!slot.is_pending());
        assert_eq!(slot.fire(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_reschedule_replaces_and_postpones() {
        let start = Instant::now();
        let mut slot = Debounce::new(Duration::from_millis(100));
        slot.schedule(start, "first");
        let replaced = slot.schedule(start + Duration::from_millis(80), "second");
        assert_eq!(replaced, Some("first"));
        assert_eq!(slot.deadline(), Some(start + Duration::from_millis(180)));
        assert_eq!(slot.fire(start + Duration::from_millis(120)), None);
        assert_eq!(slot.fire(start + Duration::from_millis(180)), Some("second"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut slot = Debounce::new(Duration::from_millis(10));
        slot.schedule(start, 7);
        assert_eq!(slot.cancel(), Some(7));
        assert_eq!(slot.deadline(), None);
        assert_eq!(slot.fire(start + Duration::from_secs(1)), None);
    }
}
