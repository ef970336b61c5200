//! Recording and scripted stand-ins for the hardware collaborators.

use embedded_hal_async::delay::DelayNs;

use crate::error::{ConnectError, SyncError};
use crate::time::sync::{ConnectivityProvider, NetworkTimeSource};
use crate::time::{Instant, MonotonicClock, UtcInstant};
use crate::ui::input_logic::RawSample;
use crate::ui::{DisplaySurface, FontClass, RawInputSource};

/// Monotonic clock stuck at one instant.
pub struct FakeClock(pub Instant);

impl FakeClock {
    pub fn at(ms: u64) -> Self {
        Self(Instant::from_millis(ms))
    }
}

impl MonotonicClock for FakeClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// Returns immediately, adds up the milliseconds it was asked to wait.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ms: u64,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Text(i32, i32, FontClass, String),
    Frame(i32, i32, u32, u32, u32),
    Present,
}

/// Remembers every call. Glyphs are 6, 9 and 10 px wide.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn showed(&self, text: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, _, t) if t == text))
    }

    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Present).count()
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_text(&mut self, x: i32, y: i32, font: FontClass, text: &str) {
        self.ops.push(Op::Text(x, y, font, text.into()));
    }

    fn draw_rounded_frame(&mut self, x: i32, y: i32, width: u32, height: u32, radius: u32) {
        self.ops.push(Op::Frame(x, y, width, height, radius));
    }

    fn present(&mut self) {
        self.ops.push(Op::Present);
    }

    fn text_width(&self, font: FontClass, text: &str) -> i32 {
        let glyph = match font {
            FontClass::Small => 6,
            FontClass::Medium => 9,
            FontClass::Large => 10,
        };
        glyph * text.chars().count() as i32
    }
}

/// Link whose behaviour is fixed up front.
pub struct ScriptedLink {
    up: bool,
    peer_present: bool,
    failures_left: usize,
    sample: Option<i64>,
    pub connect_calls: usize,
    pub fetch_calls: usize,
}

impl ScriptedLink {
    fn new(peer_present: bool, sample: Option<i64>) -> Self {
        Self {
            up: false,
            peer_present,
            failures_left: 0,
            sample,
            connect_calls: 0,
            fetch_calls: 0,
        }
    }

    /// No peer to connect to.
    pub fn offline() -> Self {
        Self::new(false, None)
    }

    /// Connects, but never answers a time request.
    pub fn unreachable() -> Self {
        Self::new(true, None)
    }

    pub fn serving(unix_seconds: i64) -> Self {
        Self::new(true, Some(unix_seconds))
    }

    pub fn failing_first(mut self, attempts: usize) -> Self {
        self.failures_left = attempts;
        self
    }

    pub fn already_up(mut self) -> Self {
        self.up = true;
        self
    }
}

impl ConnectivityProvider for ScriptedLink {
    fn is_up(&self) -> bool {
        self.up
    }

    async fn connect(&mut self) -> Result<(), ConnectError> {
        self.connect_calls += 1;
        if !self.peer_present {
            return Err(ConnectError::NoPeer);
        }
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(ConnectError::LinkFailed);
        }
        self.up = true;
        Ok(())
    }
}

impl NetworkTimeSource for ScriptedLink {
    async fn fetch(&mut self) -> Result<UtcInstant, SyncError> {
        self.fetch_calls += 1;
        self.sample
            .map(UtcInstant::from_unix_seconds)
            .ok_or(SyncError::Unreachable)
    }
}

/// Encoder and switch whose line levels are set by the test.
pub struct FakeInput {
    pub sample: RawSample,
}

impl FakeInput {
    pub fn idle() -> Self {
        Self {
            sample: RawSample::IDLE,
        }
    }

    pub fn press(&mut self) {
        self.sample.button = false;
    }

    pub fn release(&mut self) {
        self.sample.button = true;
    }
}

impl RawInputSource for FakeInput {
    fn read_encoder_clock_line(&mut self) -> bool {
        self.sample.encoder_clock
    }

    fn read_encoder_data_line(&mut self) -> bool {
        self.sample.encoder_data
    }

    fn read_button_line(&mut self) -> bool {
        self.sample.button
    }
}
