//! GPIO lines of the rotary encoder and its push switch.
//!
//! All three lines are active-low with internal pull-ups and are read
//! level by level from the poll loop; no interrupts.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::ui::RawInputSource;

pub struct EncoderPins {
    clk: Input<'static>,
    dt: Input<'static>,
    sw: Input<'static>,
}

impl EncoderPins {
    pub fn new(clk: AnyPin, dt: AnyPin, sw: AnyPin) -> Self {
        Self {
            clk: Input::new(clk, Pull::Up),
            dt: Input::new(dt, Pull::Up),
            sw: Input::new(sw, Pull::Up),
        }
    }
}

impl RawInputSource for EncoderPins {
    fn read_encoder_clock_line(&mut self) -> bool {
        self.clk.is_high()
    }

    fn read_encoder_data_line(&mut self) -> bool {
        self.dt.is_high()
    }

    fn read_button_line(&mut self) -> bool {
        self.sw.is_high()
    }
}
