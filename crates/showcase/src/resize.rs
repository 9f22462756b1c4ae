//! Debounce for viewport resizes. The camera is re-homed only once resizes
//! have stopped for a short window, so transient resizes don't jitter it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ResizeDebounce {
    window: Duration,
    last_resize: Option<Instant>,
}

impl ResizeDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_resize: None,
        }
    }

    /// Records a resize; restarts the quiet window.
    pub fn notify(&mut self, now: Instant) {
        self.last_resize = Some(now);
    }

    /// Returns true once per burst of resizes, when the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_resize {
            Some(at) if now.saturating_duration_since(at) >= self.window => {
                self.last_resize = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_resize.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_window() {
        let t0 = Instant::now();
        let mut debounce = ResizeDebounce::new(Duration::from_millis(200));

        debounce.notify(t0);
        debounce.notify(t0 + Duration::from_millis(150));
        assert!(!debounce.poll(t0 + Duration::from_millis(250)));
        assert!(debounce.poll(t0 + Duration::from_millis(350)));
        assert!(!debounce.poll(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn idle_never_fires() {
        let mut debounce = ResizeDebounce::new(Duration::from_millis(200));
        assert!(!debounce.poll(Instant::now()));
        assert!(!debounce.is_pending());
    }
}
