//! Device modes and the transition function between them.
//!
//! Everything the device shows is a function of the current mode, the
//! selected duration and `now`.

use super::events::{cycle_events, Event};
use crate::config::TimerConfig;
use crate::time::wall_clock::WallClock;
use crate::time::Instant;
use crate::ui::input_logic::{select_next, select_prev, InputFrame};
use crate::ui::render::RenderRequest;

/// A running countdown. Dropped when the mode is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownState {
    pub start: Instant,
    pub duration_ms: u64,
}

impl CountdownState {
    /// `max(0, duration - (now - start))`
    pub fn remaining_ms(&self, now: Instant) -> u64 {
        self.duration_ms.saturating_sub(now.millis_since(self.start))
    }

    pub fn is_elapsed(&self, now: Instant) -> bool {
        self.remaining_ms(now) == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMode {
    /// Clock face
    Standby,
    /// Picking a duration with the encoder
    Selecting,
    CountingDown(CountdownState),
    /// Countdown ran out at `since`; blinking until acknowledged
    Finished { since: Instant },
}

/// [`DeviceMode`] without its data, for logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Standby,
    Selecting,
    CountingDown,
    Finished,
}

impl DeviceMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            DeviceMode::Standby => ModeKind::Standby,
            DeviceMode::Selecting => ModeKind::Selecting,
            DeviceMode::CountingDown(_) => ModeKind::CountingDown,
            DeviceMode::Finished { .. } => ModeKind::Finished,
        }
    }

    /// Process an event and return the next mode.
    ///
    /// `selected_ms` is the duration a countdown started by this event gets.
    /// Rotation never changes the mode.
    pub fn transition(self, event: Event, now: Instant, selected_ms: u64) -> Self {
        use DeviceMode::*;

        match (self, event) {
            (Standby, Event::DoubleClick) => Selecting,
            // any other mode: double click puts the device to standby
            (_, Event::DoubleClick) => Standby,

            (Selecting, Event::Click) => CountingDown(CountdownState {
                start: now,
                duration_ms: selected_ms,
            }),

            (CountingDown(_), Event::Click) => Selecting,
            (CountingDown(countdown), Event::Tick) if countdown.is_elapsed(now) => {
                Finished { since: now }
            }

            (Finished { .. }, Event::Click) => Selecting,

            _ => self,
        }
    }
}

/// `true` for the first half of every blink period after `since`.
pub fn blink_visible(since: Instant, now: Instant, interval_ms: u64) -> bool {
    if interval_ms == 0 {
        return true;
    }
    (now.millis_since(since) / interval_ms) % 2 == 0
}

/// Index into the configured durations. Always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSelection {
    options: &'static [u32],
    index: usize,
}

impl TimerSelection {
    pub fn new(options: &'static [u32]) -> Self {
        Self { options, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn minutes(&self) -> u32 {
        self.options.get(self.index).copied().unwrap_or(0)
    }

    pub fn duration_ms(&self) -> u64 {
        u64::from(self.minutes()) * 60_000
    }

    pub fn next(&mut self) {
        self.index = select_next(self.index, self.options.len());
    }

    pub fn prev(&mut self) {
        self.index = select_prev(self.index, self.options.len());
    }

    /// Jump to the option equal to `minutes`, if configured.
    pub fn select_minutes(&mut self, minutes: u32) -> bool {
        match self.options.iter().position(|&m| m == minutes) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }
}

/// One mode change and the event that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: ModeKind,
    pub to: ModeKind,
    pub event: Event,
}

pub type Transitions = heapless::Vec<Transition, 3>;

pub struct DeviceStateMachine {
    mode: DeviceMode,
    selection: TimerSelection,
    blink_interval_ms: u64,
}

impl DeviceStateMachine {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            mode: DeviceMode::Standby,
            selection: TimerSelection::new(config.options()),
            blink_interval_ms: config.blink_interval_ms,
        }
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn selection(&self) -> &TimerSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut TimerSelection {
        &mut self.selection
    }

    /// Apply one event. Returns the mode change, if any.
    pub fn handle(&mut self, event: Event, now: Instant) -> Option<Transition> {
        if self.mode == DeviceMode::Selecting {
            match event {
                Event::RotateCw => self.selection.next(),
                Event::RotateCcw => self.selection.prev(),
                _ => {}
            }
        }

        let from = self.mode.kind();
        self.mode = self
            .mode
            .transition(event, now, self.selection.duration_ms());
        let to = self.mode.kind();

        (from != to).then_some(Transition { from, to, event })
    }

    /// Apply everything one poll cycle produced, ending with a tick.
    pub fn step(&mut self, frame: &InputFrame, now: Instant) -> Transitions {
        let mut transitions = Transitions::new();
        for event in cycle_events(frame) {
            if let Some(t) = self.handle(event, now) {
                let _ = transitions.push(t);
            }
        }
        transitions
    }

    pub fn render_request(&self, now: Instant, clock: &WallClock) -> RenderRequest {
        match self.mode {
            DeviceMode::Standby => RenderRequest::Clock(clock.read(now)),
            DeviceMode::Selecting => RenderRequest::Selection {
                minutes: self.selection.minutes(),
            },
            DeviceMode::CountingDown(countdown) => {
                RenderRequest::remaining_from_millis(countdown.remaining_ms(now))
            }
            DeviceMode::Finished { since } => RenderRequest::Finished {
                visible: blink_visible(since, now, self.blink_interval_ms),
            },
        }
    }
}
