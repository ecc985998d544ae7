//! Frame timing
//!
//! A [`TickSource`] calls back once per frame with the clamped elapsed time.
//! The browser drives it from requestAnimationFrame; tests and the headless
//! runner drive [`ManualTicks`] with synthetic frame lengths.

/// Per-frame callback; receives the frame delta in seconds
pub type TickCallback = Box<dyn FnMut(f32)>;

/// Something that invokes a callback once per frame
pub trait TickSource {
    /// Register the frame callback. Replaces any earlier one.
    fn on_tick(&mut self, callback: TickCallback);
}

/// Turns frame timestamps into clamped deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt_ms: f64,
}

impl FrameClock {
    pub fn new(max_dt_ms: f64) -> Self {
        Self {
            last_ms: None,
            max_dt_ms: max_dt_ms.max(0.0),
        }
    }

    /// Set the reference timestamp without producing a delta
    pub fn start(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous timestamp, capped at the maximum.
    ///
    /// The first call after construction yields 0. Timestamps going backwards
    /// yield 0 as well.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed_ms = match self.last_ms {
            Some(last) if now_ms.is_finite() => (now_ms - last).clamp(0.0, self.max_dt_ms),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        (elapsed_ms / 1000.0) as f32
    }
}

/// Tick source stepped by hand with synthetic frame lengths
pub struct ManualTicks {
    clock: FrameClock,
    now_ms: f64,
    callback: Option<TickCallback>,
}

impl ManualTicks {
    pub fn new(max_dt_ms: f64) -> Self {
        Self {
            clock: FrameClock::new(max_dt_ms),
            now_ms: 0.0,
            callback: None,
        }
    }

    /// Let `elapsed_ms` pass and run one frame.
    ///
    /// Returns the delta handed to the callback, or `None` when nothing is
    /// registered.
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<f32> {
        self.now_ms += elapsed_ms.max(0.0);
        let dt = self.clock.advance(self.now_ms);
        let callback = self.callback.as_mut()?;
        callback(dt);
        Some(dt)
    }

    /// Run `frames` frames of equal length
    pub fn run(&mut self, frames: u32, frame_ms: f64) {
        for _ in 0..frames {
            if self.advance(frame_ms).is_none() {
                return;
            }
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl TickSource for ManualTicks {
    fn on_tick(&mut self, callback: TickCallback) {
        self.clock.start(self.now_ms);
        self.callback = Some(callback);
    }
}
