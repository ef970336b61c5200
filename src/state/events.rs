//! Events that drive the device state machine

use crate::ui::input_logic::InputFrame;
use crate::ui::{ClickGesture, EncoderEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Encoder turned one detent clockwise
    RotateCw,
    /// Encoder turned one detent counter-clockwise
    RotateCcw,
    /// Button press not close to the previous one
    Click,
    /// Button press shortly after the previous one
    DoubleClick,
    /// Time passed; fired once per poll cycle
    Tick,
}

impl Event {
    pub fn from_gesture(gesture: ClickGesture) -> Self {
        match gesture {
            ClickGesture::SingleClick => Event::Click,
            ClickGesture::DoubleClick => Event::DoubleClick,
        }
    }

    /// Button edges carry no meaning for the state machine.
    pub fn from_encoder(event: EncoderEvent) -> Option<Self> {
        match event {
            EncoderEvent::RotateCw => Some(Event::RotateCw),
            EncoderEvent::RotateCcw => Some(Event::RotateCcw),
            EncoderEvent::ButtonDown | EncoderEvent::ButtonUp => None,
        }
    }
}

/// Events of one poll cycle, in the order they are applied:
/// gesture, then rotation, then the tick.
pub fn cycle_events(frame: &InputFrame) -> heapless::Vec<Event, 3> {
    let mut events = heapless::Vec::new();
    if let Some(gesture) = frame.gesture {
        let _ = events.push(Event::from_gesture(gesture));
    }
    if let Some(rotation) = frame.rotation.and_then(Event::from_encoder) {
        let _ = events.push(rotation);
    }
    let _ = events.push(Event::Tick);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_are_not_events() {
        assert_eq!(Event::from_encoder(EncoderEvent::ButtonDown), None);
        assert_eq!(Event::from_encoder(EncoderEvent::ButtonUp), None);
        assert_eq!(
            Event::from_encoder(EncoderEvent::RotateCw),
            Some(Event::RotateCw)
        );
    }

    #[test]
    fn test_empty_frame_is_just_a_tick() {
        assert_eq!(cycle_events(&InputFrame::default()).as_slice(), &[Event::Tick]);
    }

    #[test]
    fn test_cycle_order() {
        let frame = InputFrame {
            rotation: Some(EncoderEvent::RotateCcw),
            button: Some(EncoderEvent::ButtonDown),
            gesture: Some(ClickGesture::DoubleClick),
        };
        assert_eq!(
            cycle_events(&frame).as_slice(),
            &[Event::DoubleClick, Event::RotateCcw, Event::Tick]
        );
    }
}
