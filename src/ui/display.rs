//! SSD1306 OLED display wrapper.

use defmt::warn;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::ui::{DisplaySurface, FontClass};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        warn!("SSD1306 init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn font(class: FontClass) -> &'static MonoFont<'static> {
    match class {
        FontClass::Small => &FONT_6X10,
        FontClass::Medium => &FONT_9X18_BOLD,
        FontClass::Large => &FONT_10X20,
    }
}

/// [`DisplaySurface`] over the buffered SSD1306 driver.
pub struct OledSurface<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { display: init(i2c) }
    }
}

impl<I2C> DisplaySurface for OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, class: FontClass, text: &str) {
        let style = MonoTextStyle::new(font(class), BinaryColor::On);
        let _ = Text::new(text, Point::new(x, y), style).draw(&mut self.display);
    }

    fn draw_rounded_frame(&mut self, x: i32, y: i32, width: u32, height: u32, radius: u32) {
        let _ = RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(x, y), Size::new(width, height)),
            Size::new(radius, radius),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut self.display);
    }

    fn present(&mut self) {
        if self.display.flush().is_err() {
            warn!("display flush failed");
        }
    }

    fn text_width(&self, class: FontClass, text: &str) -> i32 {
        let f = font(class);
        let glyphs = text.chars().count() as u32;
        let width = f.character_size.width * glyphs + f.character_spacing * glyphs.saturating_sub(1);
        width as i32
    }
}
