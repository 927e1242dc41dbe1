//! Per-frame keyboard polling mapped onto parameter-controller events.
//!
//! A/S switch the shader time update on/off, Z/X switch scene animation
//! on/off, Q/E step the octave count (debounced by the controller), and
//! Escape requests exit. Keys are polled, not event-driven, so holding a
//! key reasserts its event every frame; the controller's semantics
//! (last-writer-wins toggles, debounced steps) absorb the repetition.

use glfw::{Action, Key, Window};
use noisebed_core::params::{OctaveStep, ParameterController};

/// Snapshot of the control keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub time_on: bool,
    pub time_off: bool,
    pub animate_on: bool,
    pub animate_off: bool,
    pub octaves_up: bool,
    pub octaves_down: bool,
    pub quit: bool,
}

impl InputState {
    /// Reads the polled key state for one frame.
    pub fn poll(window: &Window) -> Self {
        let down = |key| window.get_key(key) == Action::Press;
        Self {
            time_on: down(Key::A),
            time_off: down(Key::S),
            animate_on: down(Key::Z),
            animate_off: down(Key::X),
            octaves_up: down(Key::Q),
            octaves_down: down(Key::E),
            quit: down(Key::Escape),
        }
    }
}

/// Applies one frame of input to the controller.
///
/// The "off" key of each toggle pair is applied after the "on" key, so
/// holding both lands on off.
pub fn apply(input: &InputState, controller: &mut ParameterController, now: f64) {
    if input.time_on {
        controller.set_update_time(true);
    }
    if input.time_off {
        controller.set_update_time(false);
    }
    if input.animate_on {
        controller.set_animate(true);
    }
    if input.animate_off {
        controller.set_animate(false);
    }
    if input.octaves_up {
        controller.step_octaves(OctaveStep::Increment, now);
    }
    if input.octaves_down {
        controller.step_octaves(OctaveStep::Decrement, now);
    }
}
