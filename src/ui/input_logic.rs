//! Edge detection and click classification for the encoder and its switch.
//!
//! Pure and clocked by the caller: every poll hands in one [`RawSample`]
//! and the cycle's `now`. There is no minimum-stable-duration filter, so
//! a bouncing switch can register as a double click.

use crate::time::Instant;
use crate::ui::{ClickGesture, EncoderEvent, RawInputSource};

/// Move selection cursor one item back, wrapping to the last item.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else if selected == 0 {
        item_count - 1
    } else {
        (selected - 1).min(item_count - 1)
    }
}

/// Move selection cursor one item forward, wrapping to the first item.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        (selected + 1) % item_count
    }
}

/// Levels of the three input lines in one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub encoder_clock: bool,
    pub encoder_data: bool,
    pub button: bool,
}

impl RawSample {
    /// All lines released.
    pub const IDLE: RawSample = RawSample {
        encoder_clock: true,
        encoder_data: true,
        button: true,
    };

    pub fn read<S: RawInputSource>(source: &mut S) -> Self {
        Self {
            encoder_clock: source.read_encoder_clock_line(),
            encoder_data: source.read_encoder_data_line(),
            button: source.read_button_line(),
        }
    }
}

/// Output of one poll: at most one rotation, one button edge and one gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFrame {
    pub rotation: Option<EncoderEvent>,
    pub button: Option<EncoderEvent>,
    pub gesture: Option<ClickGesture>,
}

impl InputFrame {
    pub fn is_empty(&self) -> bool {
        self.rotation.is_none() && self.button.is_none() && self.gesture.is_none()
    }
}

pub struct InputDebouncer {
    double_click_ms: u64,
    last_clock: bool,
    last_button: bool,
    last_press: Option<Instant>,
}

impl InputDebouncer {
    /// `initial` seeds edge detection so a line held at boot is not an edge.
    pub fn new(double_click_ms: u64, initial: RawSample) -> Self {
        Self {
            double_click_ms,
            last_clock: initial.encoder_clock,
            last_button: initial.button,
            last_press: None,
        }
    }

    pub fn poll(&mut self, sample: RawSample, now: Instant) -> InputFrame {
        let mut frame = InputFrame::default();

        if sample.encoder_clock && !self.last_clock {
            frame.rotation = Some(if sample.encoder_data {
                EncoderEvent::RotateCw
            } else {
                EncoderEvent::RotateCcw
            });
        }
        self.last_clock = sample.encoder_clock;

        if sample.button != self.last_button {
            if sample.button {
                frame.button = Some(EncoderEvent::ButtonUp);
            } else {
                frame.button = Some(EncoderEvent::ButtonDown);
                frame.gesture = Some(self.classify_press(now));
            }
        }
        self.last_button = sample.button;

        frame
    }

    fn classify_press(&mut self, now: Instant) -> ClickGesture {
        let gesture = match self.last_press {
            Some(previous) if now.millis_since(previous) < self.double_click_ms => {
                ClickGesture::DoubleClick
            }
            _ => ClickGesture::SingleClick,
        };
        self.last_press = Some(now);
        gesture
    }
}
