//! The whole mutable state of the running device in one place.
//!
//! One call to [`Device::run_cycle`] is one iteration of the poll loop:
//! sample, debounce, step, render. The same `now` is used throughout.

use crate::config::TimerConfig;
use crate::state::{DeviceMode, DeviceStateMachine, Transitions};
use crate::time::wall_clock::WallClock;
use crate::time::Instant;
use crate::ui::input_logic::{InputDebouncer, InputFrame, RawSample};
use crate::ui::render::{self, RenderRequest};
use crate::ui::{DisplaySurface, RawInputSource};

/// What happened in one cycle, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub frame: InputFrame,
    pub transitions: Transitions,
    /// Set when the surface was redrawn.
    pub rendered: Option<RenderRequest>,
}

pub struct Device {
    debouncer: InputDebouncer,
    machine: DeviceStateMachine,
    clock: WallClock,
    last_render: Option<RenderRequest>,
}

impl Device {
    /// `initial` is the line state at start-up; see [`InputDebouncer::new`].
    pub fn new(config: &TimerConfig, clock: WallClock, initial: RawSample) -> Self {
        Self {
            debouncer: InputDebouncer::new(config.double_click_ms, initial),
            machine: DeviceStateMachine::new(config),
            clock,
            last_render: None,
        }
    }

    pub fn run_cycle<I, S>(&mut self, input: &mut I, surface: &mut S, now: Instant) -> CycleReport
    where
        I: RawInputSource,
        S: DisplaySurface,
    {
        let frame = self.debouncer.poll(RawSample::read(input), now);
        let transitions = self.machine.step(&frame, now);

        let request = self.machine.render_request(now, &self.clock);
        let rendered = if self.last_render != Some(request) {
            render::draw(surface, &request);
            self.last_render = Some(request);
            Some(request)
        } else {
            None
        };

        CycleReport {
            frame,
            transitions,
            rendered,
        }
    }

    /// Forget what is on screen so the next cycle redraws.
    pub fn invalidate_render(&mut self) {
        self.last_render = None;
    }

    pub fn mode(&self) -> DeviceMode {
        self.machine.mode()
    }

    pub fn machine(&self) -> &DeviceStateMachine {
        &self.machine
    }

    /// For re-anchoring after a sync.
    pub fn clock_mut(&mut self) -> &mut WallClock {
        &mut self.clock
    }
}
