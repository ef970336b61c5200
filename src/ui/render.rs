//! What the screen should show, and the drawing commands for it.

use core::fmt::Write;

use crate::config::DISPLAY_WIDTH;
use crate::time::sync::BootStatus;
use crate::time::wall_clock::WallTime;
use crate::ui::{DisplaySurface, FontClass};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderRequest {
    Clock(WallTime),
    Selection { minutes: u32 },
    Remaining { hours: u32, minutes: u8, seconds: u8 },
    Finished { visible: bool },
    Status(BootStatus),
}

impl RenderRequest {
    pub fn remaining_from_millis(ms: u64) -> Self {
        let total = ms / 1_000;
        RenderRequest::Remaining {
            hours: (total / 3_600) as u32,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

type Line = heapless::String<24>;

pub fn draw<S: DisplaySurface>(surface: &mut S, request: &RenderRequest) {
    surface.clear();
    match *request {
        RenderRequest::Clock(time) => {
            let mut text = Line::new();
            let _ = write!(text, "{}", time);
            draw_centered(surface, 40, FontClass::Large, &text);
        }
        RenderRequest::Selection { minutes } => {
            draw_double_frame(surface);
            draw_centered(surface, 18, FontClass::Small, "Select Time:");
            let mut text = Line::new();
            let _ = write!(text, "{} min", minutes);
            draw_centered(surface, 50, FontClass::Medium, &text);
        }
        RenderRequest::Remaining {
            hours,
            minutes,
            seconds,
        } => {
            draw_double_frame(surface);
            let mut text = Line::new();
            let _ = write!(text, "{:02}:{:02}:{:02}", hours, minutes, seconds);
            draw_centered(surface, 45, FontClass::Large, &text);
        }
        RenderRequest::Finished { visible: true } => {
            draw_double_frame(surface);
            draw_centered(surface, 45, FontClass::Large, "00:00:00");
        }
        RenderRequest::Finished { visible: false } => {}
        RenderRequest::Status(status) => {
            surface.draw_text(0, 15, FontClass::Small, status.message());
        }
    }
    surface.present();
}

fn draw_centered<S: DisplaySurface>(surface: &mut S, y: i32, font: FontClass, text: &str) {
    let x = (DISPLAY_WIDTH - surface.text_width(font, text)) / 2;
    surface.draw_text(x, y, font, text);
}

fn draw_double_frame<S: DisplaySurface>(surface: &mut S) {
    surface.draw_rounded_frame(0, 0, 128, 64, 8);
    surface.draw_rounded_frame(2, 2, 124, 60, 6);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Op, RecordingSurface};

    #[test]
    fn clock_is_centered_large_text() {
        let mut surface = RecordingSurface::default();
        draw(&mut surface, &RenderRequest::Clock(WallTime::new(9, 5, 7)));
        // 8 glyphs * 10 px = 80 px wide
        assert_eq!(
            surface.ops.as_slice(),
            &[
                Op::Clear,
                Op::Text(24, 40, FontClass::Large, "09:05:07".into()),
                Op::Present,
            ]
        );
    }

    #[test]
    fn selection_sits_in_double_frame() {
        let mut surface = RecordingSurface::default();
        draw(&mut surface, &RenderRequest::Selection { minutes: 120 });
        assert_eq!(
            surface.ops.as_slice(),
            &[
                Op::Clear,
                Op::Frame(0, 0, 128, 64, 8),
                Op::Frame(2, 2, 124, 60, 6),
                Op::Text(28, 18, FontClass::Small, "Select Time:".into()),
                Op::Text(32, 50, FontClass::Medium, "120 min".into()),
                Op::Present,
            ]
        );
    }

    #[test]
    fn remaining_hours_are_not_wrapped() {
        let mut surface = RecordingSurface::default();
        draw(
            &mut surface,
            &RenderRequest::remaining_from_millis(4 * 3_600_000),
        );
        assert!(surface.showed("04:00:00"));
    }

    #[test]
    fn remaining_rounds_down_to_whole_seconds() {
        assert_eq!(
            RenderRequest::remaining_from_millis(599_999),
            RenderRequest::Remaining {
                hours: 0,
                minutes: 9,
                seconds: 59
            }
        );
    }

    #[test]
    fn blank_finished_frame_only_clears() {
        let mut surface = RecordingSurface::default();
        draw(&mut surface, &RenderRequest::Finished { visible: false });
        assert_eq!(surface.ops.as_slice(), &[Op::Clear, Op::Present]);
    }

    #[test]
    fn visible_finished_frame_shows_zero() {
        let mut surface = RecordingSurface::default();
        draw(&mut surface, &RenderRequest::Finished { visible: true });
        assert!(surface.showed("00:00:00"));
        assert_eq!(surface.ops.len(), 5);
    }

    #[test]
    fn status_is_left_aligned() {
        let mut surface = RecordingSurface::default();
        draw(&mut surface, &RenderRequest::Status(BootStatus::Connecting));
        assert_eq!(
            surface.ops[1],
            Op::Text(0, 15, FontClass::Small, "Connecting...".into())
        );
    }
}
