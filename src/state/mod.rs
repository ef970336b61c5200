//! Device state machine
//!
//! The mode is an explicit tagged variant and every transition goes
//! through one total function, so the behaviour can be tested without
//! any hardware.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{
    CountdownState, DeviceMode, DeviceStateMachine, ModeKind, TimerSelection, Transition,
    Transitions,
};
