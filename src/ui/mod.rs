//! User interface subsystem - OLED display + rotary encoder.
//!
//! The pure half (`input_logic`, `render`) turns raw line levels into
//! gestures and render requests into drawing commands. The hardware half
//! (`display`, `encoder`) only exists with the `embedded` feature.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Encoder**: KY-040 style rotary encoder (CLK, DT) with a push switch (SW)

#[cfg(feature = "embedded")]
pub mod display;
#[cfg(feature = "embedded")]
pub mod encoder;
pub mod input_logic;
pub mod render;

/// Text size classes a surface must be able to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontClass {
    Small,
    Medium,
    Large,
}

/// Drawing target for render requests.
///
/// Nothing is visible until [`present`](DisplaySurface::present).
/// Coordinates are pixels; text `y` is the baseline.
pub trait DisplaySurface {
    fn clear(&mut self);
    fn draw_text(&mut self, x: i32, y: i32, font: FontClass, text: &str);
    fn draw_rounded_frame(&mut self, x: i32, y: i32, width: u32, height: u32, radius: u32);
    fn present(&mut self);
    /// Width in pixels `text` would take in `font`.
    fn text_width(&self, font: FontClass, text: &str) -> i32;
}

/// Line levels polled once per cycle. All lines idle high.
pub trait RawInputSource {
    fn read_encoder_clock_line(&mut self) -> bool;
    fn read_encoder_data_line(&mut self) -> bool;
    fn read_button_line(&mut self) -> bool;
}

/// Edge-level events seen in one poll cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderEvent {
    RotateCw,
    RotateCcw,
    ButtonDown,
    ButtonUp,
}

/// Button press classified by its distance to the previous press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickGesture {
    SingleClick,
    DoubleClick,
}
