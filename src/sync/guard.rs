/// Default suppression window after a sync, in milliseconds.
pub const DEFAULT_SUPPRESS_MS: u64 = 150;

/// Timed re-entrancy flag for scroll synchronization.
///
/// Scrolling the preview programmatically can echo back as scroll events;
/// while a window is open those events are dropped. Time is supplied by the
/// caller so the guard never reads a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollGuard {
    window_ms: u64,
    open_until: Option<u64>,
}

impl ScrollGuard {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            open_until: None,
        }
    }

    /// Claim the guard at `now_ms`.
    ///
    /// Returns `false` while a previous window is still open. Otherwise opens
    /// a new window and returns `true`.
    pub fn try_enter(&mut self, now_ms: u64) -> bool {
        if self.is_suppressed(now_ms) {
            return false;
        }
        self.open_until = Some(now_ms.saturating_add(self.window_ms));
        true
    }

    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        self.open_until.is_some_and(|until| now_ms < until)
    }

    pub const fn reset(&mut self) {
        self.open_until = None;
    }

    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

impl Default for ScrollGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPRESS_MS)
    }
}
