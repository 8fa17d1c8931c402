//! Time source and the transient "saved" indicator.
//!
//! The indicator stores a deadline instead of scheduling a reset, so there is
//! nothing to cancel when the session goes away and a second save simply
//! pushes the deadline out.

/// Millisecond wall clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Host clock: `Date.now()` in the browser, `SystemTime` natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Deadline-based feedback flag.
#[derive(Debug, Clone)]
pub struct SavedIndicator {
    duration_ms: f64,
    visible_until: Option<f64>,
}

impl SavedIndicator {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            visible_until: None,
        }
    }

    /// Show the indicator from `now_ms`, restarting any running window.
    pub fn trigger(&mut self, now_ms: f64) {
        self.visible_until = Some(now_ms + self.duration_ms);
    }

    /// Whether the indicator is still showing at `now_ms`.
    pub fn is_visible(&self, now_ms: f64) -> bool {
        self.visible_until.is_some_and(|until| now_ms < until)
    }

    pub fn clear(&mut self) {
        self.visible_until = None;
    }
}

/// Manually advanced clock for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<f64>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
