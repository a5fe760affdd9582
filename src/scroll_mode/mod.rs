//! Scroll controller
//!
//! Continuous scrolling while j/k is held, driven by a per-frame tick, and
//! discrete half/full page jumps that queue while one is still in flight.

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::scheduler::{Scheduler, Signal, Task, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

impl ScrollDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
        }
    }
}

/// Result of one continuous-scroll frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Scrolled (or waiting for the first delta); next frame requested
    Continue,
    /// No direction held
    Idle,
    /// Position stopped changing at a boundary; loop halted, keys released
    Stalled,
}

#[derive(Debug, Default)]
pub struct ScrollController {
    down_held: bool,
    up_held: bool,
    frame: Option<TaskHandle>,
    last_frame_time: Option<f64>,
    stalled_frames: u32,
    discrete_pending: bool,
    discrete_queue: f64,
    completion: Option<TaskHandle>,
    watchdog: Option<TaskHandle>,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// +1 down, -1 up, 0 when neither or both are held
    pub fn direction(&self) -> i32 {
        (self.down_held as i32) - (self.up_held as i32)
    }

    pub fn is_held(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Down => self.down_held,
            ScrollDirection::Up => self.up_held,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.frame.is_some()
    }

    pub fn is_discrete_pending(&self) -> bool {
        self.discrete_pending
    }

    /// Key pressed: hold the direction and make sure the loop runs
    pub fn start(&mut self, direction: ScrollDirection, scheduler: &mut Scheduler) {
        match direction {
            ScrollDirection::Down => self.down_held = true,
            ScrollDirection::Up => self.up_held = true,
        }
        self.ensure_loop(scheduler);
    }

    /// Key released: stop the loop once no direction remains
    pub fn release(&mut self, direction: ScrollDirection, scheduler: &mut Scheduler) {
        match direction {
            ScrollDirection::Down => self.down_held = false,
            ScrollDirection::Up => self.up_held = false,
        }
        if self.direction() == 0 {
            self.stop_loop(scheduler);
        } else {
            // the other key is still held
            self.ensure_loop(scheduler);
        }
    }

    fn ensure_loop(&mut self, scheduler: &mut Scheduler) {
        if self.direction() == 0 || self.frame.is_some() {
            return;
        }
        self.stalled_frames = 0;
        self.frame = Some(scheduler.request_frame(Task::ScrollTick));
    }

    fn stop_loop(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel(handle);
        }
        self.last_frame_time = None;
        self.stalled_frames = 0;
    }

    /// Frame callback for the continuous loop
    pub fn tick(
        &mut self,
        timestamp: f64,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) -> TickResult {
        self.frame = None;
        let direction = self.direction();
        if direction == 0 {
            self.stop_loop(scheduler);
            return TickResult::Idle;
        }

        let last = self.last_frame_time.unwrap_or(timestamp);
        let elapsed_ms = (timestamp - last).clamp(0.0, config.max_frame_delta_ms);
        self.last_frame_time = Some(timestamp);

        let distance = direction as f64 * config.scroll_pixels_per_second * (elapsed_ms / 1000.0);
        if distance != 0.0 {
            let before = doc.scroll_y();
            doc.scroll_by(distance, false);
            if doc.scroll_y() == before {
                self.stalled_frames += 1;
                if self.stalled_frames >= config.boundary_stall_frames {
                    log::debug!("Scroll loop stalled at {}px, releasing keys", before);
                    self.down_held = false;
                    self.up_held = false;
                    self.stop_loop(scheduler);
                    return TickResult::Stalled;
                }
            } else {
                self.stalled_frames = 0;
            }
        }

        self.frame = Some(scheduler.request_frame(Task::ScrollTick));
        TickResult::Continue
    }

    /// Release held keys and stop the loop; discrete scrolls keep going
    pub fn stop_continuous(&mut self, scheduler: &mut Scheduler) {
        self.down_held = false;
        self.up_held = false;
        self.stop_loop(scheduler);
    }

    /// Full reset: continuous loop, in-flight and queued discrete scrolls
    pub fn clear(&mut self, scheduler: &mut Scheduler) {
        self.stop_continuous(scheduler);
        self.discrete_pending = false;
        self.discrete_queue = 0.0;
        self.cancel_completion(scheduler);
    }

    fn cancel_completion(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.completion.take() {
            scheduler.cancel(handle);
        }
        if let Some(handle) = self.watchdog.take() {
            scheduler.cancel(handle);
        }
    }

    /// Scroll by `delta_y`, queueing if a previous discrete scroll is in flight
    pub fn discrete(
        &mut self,
        delta_y: f64,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        if self.discrete_pending {
            self.discrete_queue += delta_y;
            return;
        }
        self.discrete_pending = true;
        self.discrete_queue = 0.0;

        let smooth = doc.capabilities.scroll_end && !doc.prefers_reduced_motion;
        if smooth {
            self.completion =
                Some(scheduler.on_completion(Signal::ScrollEnd, Task::DiscreteScrollSettled));
            self.watchdog = Some(
                scheduler.set_timeout(config.discrete_scroll_watchdog_ms, Task::DiscreteScrollWatchdog),
            );
        }
        doc.scroll_by(delta_y, smooth);
        if !smooth {
            self.finish_discrete(doc, scheduler, config);
        }
    }

    fn finish_discrete(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.discrete_pending = false;
        self.cancel_completion(scheduler);
        if self.discrete_queue != 0.0 {
            let queued = std::mem::take(&mut self.discrete_queue);
            self.discrete(queued, doc, scheduler, config);
        }
    }

    /// Scroll-end signal arrived
    pub fn on_settled(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.completion = None;
        if self.discrete_pending {
            self.finish_discrete(doc, scheduler, config);
        }
    }

    /// Watchdog fired before the scroll-end signal
    pub fn on_watchdog(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.watchdog = None;
        if self.discrete_pending {
            log::debug!("Scroll-end never arrived, finishing discrete scroll");
            self.finish_discrete(doc, scheduler, config);
        }
    }

    pub fn half_page(
        &mut self,
        direction: ScrollDirection,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.stop_continuous(scheduler);
        let delta = (doc.viewport.height / 2.0).max(1.0);
        self.discrete(direction.sign() * delta, doc, scheduler, config);
    }

    pub fn full_page(
        &mut self,
        direction: ScrollDirection,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.stop_continuous(scheduler);
        let delta = doc.viewport.height.max(1.0);
        self.discrete(direction.sign() * delta, doc, scheduler, config);
    }

    pub fn scroll_to_top(&mut self, doc: &mut Document, scheduler: &mut Scheduler) {
        self.clear(scheduler);
        doc.scroll_to(0.0, false);
    }

    pub fn scroll_to_bottom(&mut self, doc: &mut Document, scheduler: &mut Scheduler) {
        self.clear(scheduler);
        let bottom = doc.scroll_height();
        doc.scroll_to(bottom, false);
    }
}
