//! Screen fetch state machine.
//!
//! Each user action (search submit, locate, app start) begins one fetch
//! cycle. State is an explicit tagged value replaced wholesale on each
//! transition. A monotonic ticket guards against overlapping fetches: a
//! completion carrying a stale ticket is dropped, so an older in-flight
//! response can never overwrite a newer one.

/// State of the weather screen across one fetch cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Tracks the current fetch state plus the newest issued ticket.
#[derive(Debug, Default)]
pub struct FetchTracker<T> {
    state: FetchState<T>,
    latest: u64,
}

impl<T> FetchTracker<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            latest: 0,
        }
    }

    /// Begin a new fetch cycle. The returned ticket must accompany the
    /// completion; beginning a newer fetch invalidates all older tickets.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.state = FetchState::Loading;
        self.latest
    }

    /// Complete a fetch cycle. Returns false if the ticket is stale, in
    /// which case the state is left untouched.
    pub fn complete(&mut self, ticket: u64, result: Result<T, String>) -> bool {
        if ticket != self.latest {
            tracing::debug!(
                "Dropping stale fetch completion (ticket {} < {})",
                ticket,
                self.latest
            );
            return false;
        }

        self.state = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(message) => FetchState::Failed(message),
        };
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let tracker: FetchTracker<i32> = FetchTracker::new();
        assert_eq!(*tracker.state(), FetchState::Idle);
    }

    #[test]
    fn begin_moves_to_loading() {
        let mut tracker: FetchTracker<i32> = FetchTracker::new();
        tracker.begin();
        assert!(tracker.state().is_loading());
    }

    #[test]
    fn complete_success_moves_to_loaded() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, Ok(42)));
        assert_eq!(tracker.state().loaded(), Some(&42));
    }

    #[test]
    fn complete_failure_moves_to_failed() {
        let mut tracker: FetchTracker<i32> = FetchTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket, Err("boom".to_string())));
        assert_eq!(tracker.state().error(), Some("boom"));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut tracker = FetchTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        // The older fetch finishes after the newer one began.
        assert!(!tracker.complete(first, Ok(1)));
        assert!(tracker.state().is_loading());

        assert!(tracker.complete(second, Ok(2)));
        assert_eq!(tracker.state().loaded(), Some(&2));
    }

    #[test]
    fn stale_completion_cannot_overwrite_newer_result() {
        let mut tracker = FetchTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(tracker.complete(second, Ok(2)));
        assert!(!tracker.complete(first, Ok(1)));
        assert_eq!(tracker.state().loaded(), Some(&2));
    }

    #[test]
    fn new_fetch_replaces_failed_state() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.begin();
        tracker.complete(ticket, Err("offline".to_string()));

        let ticket = tracker.begin();
        assert!(tracker.state().is_loading());
        tracker.complete(ticket, Ok(7));
        assert_eq!(tracker.state().loaded(), Some(&7));
    }
}
