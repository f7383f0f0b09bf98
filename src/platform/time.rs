//! Clock sources

use std::cell::Cell;
use std::rc::Rc;

/// Wall-clock time in seconds
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Real time: `Date.now()` in the browser, system time natively
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        js_sys::Date::now() / 1000.0
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Hand-advanced clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self(Rc::new(Cell::new(start_secs)))
    }

    pub fn advance(&self, secs: f64) {
        self.0.set(self.0.get() + secs);
    }

    pub fn set(&self, secs: f64) {
        self.0.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.0.get()
    }
}
