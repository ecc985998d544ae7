//! Browser tick source

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::time::{FrameClock, TickCallback, TickSource};

/// Tick source backed by `requestAnimationFrame`.
///
/// Keeps rescheduling itself forever; the game decides what a frame does.
pub struct AnimationFrameTicks {
    max_dt_ms: f64,
}

impl AnimationFrameTicks {
    pub fn new(max_dt_ms: f64) -> Self {
        Self { max_dt_ms }
    }
}

struct FrameLoop {
    clock: FrameClock,
    callback: TickCallback,
}

impl TickSource for AnimationFrameTicks {
    fn on_tick(&mut self, callback: TickCallback) {
        let mut clock = FrameClock::new(self.max_dt_ms);
        if let Some(now) = now_ms() {
            clock.start(now);
        }
        schedule(Rc::new(RefCell::new(FrameLoop { clock, callback })));
    }
}

fn now_ms() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
}

fn schedule(frame_loop: Rc<RefCell<FrameLoop>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; frame loop stopped");
        return;
    };

    let closure = Closure::once(move |time: f64| {
        {
            let mut l = frame_loop.borrow_mut();
            let dt = l.clock.advance(time);
            (l.callback)(dt);
        }
        schedule(frame_loop);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}
