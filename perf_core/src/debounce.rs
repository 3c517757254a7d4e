use std::time::{Duration, Instant};

/// A value whose changes only take effect once input has been quiet for
/// `delay`. Time is passed in so the caller's frame clock drives it.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    committed: T,
    pending: T,
    deadline: Option<Instant>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(value: T, delay: Duration) -> Self {
        Self {
            committed: value.clone(),
            pending: value,
            deadline: None,
            delay,
        }
    }

    /// Value consumers should render with.
    pub fn value(&self) -> &T {
        &self.committed
    }

    /// Latest value requested, committed or not.
    pub fn pending(&self) -> &T {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut T {
        &mut self.pending
    }

    pub fn is_settled(&self) -> bool {
        self.deadline.is_none()
    }

    /// Request `value`; restarts the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = value;
        self.touch(now);
    }

    /// Restart the quiet period after `pending_mut` was edited in place.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = (self.pending != self.committed).then(|| now + self.delay);
    }

    /// Commit the pending value if the quiet period elapsed. Returns whether
    /// the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.committed = self.pending.clone();
                true
            }
            _ => false,
        }
    }

    /// Time left before the pending value commits.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn commits_only_after_quiet_period() {
        let start = Instant::now();
        let mut rows = Debounced::new(50usize, DELAY);
        rows.set(60, start);
        assert!(!rows.poll(start + Duration::from_millis(299)));
        assert_eq!(*rows.value(), 50);
        assert!(rows.poll(start + DELAY));
        assert_eq!(*rows.value(), 60);
        assert!(rows.is_settled());
    }

    #[test]
    fn each_set_restarts_the_timer() {
        let start = Instant::now();
        let mut rows = Debounced::new(50usize, DELAY);
        rows.set(51, start);
        rows.set(52, start + Duration::from_millis(200));
        assert!(!rows.poll(start + Duration::from_millis(400)));
        assert!(rows.poll(start + Duration::from_millis(500)));
        assert_eq!(*rows.value(), 52);
    }

    #[test]
    fn setting_back_to_committed_cancels() {
        let start = Instant::now();
        let mut rows = Debounced::new(50usize, DELAY);
        rows.set(70, start);
        rows.set(50, start);
        assert!(rows.is_settled());
        assert!(!rows.poll(start + DELAY));
    }

    #[test]
    fn in_place_edit_then_touch() {
        let start = Instant::now();
        let mut columns = Debounced::new(10usize, DELAY);
        *columns.pending_mut() = 12;
        columns.touch(start);
        assert_eq!(columns.remaining(start), Some(DELAY));
        assert!(columns.poll(start + DELAY));
        assert_eq!(*columns.value(), 12);
    }
}
