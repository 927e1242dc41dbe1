//! Mutable run-time render parameters and their input-event controller.
//!
//! Toggles apply immediately, last writer wins. Octave stepping is
//! debounced: the keys are polled once per rendered frame at display
//! refresh rate, and an unthrottled step would sweep the whole octave
//! range in a fraction of a second.

use serde::{Deserialize, Serialize};

/// Lower bound for the fBm octave count.
pub const OCTAVES_MIN: u32 = 2;
/// Upper bound for the fBm octave count.
pub const OCTAVES_MAX: u32 = 32;
/// Minimum seconds between accepted octave changes.
pub const OCTAVE_STEP_INTERVAL: f64 = 0.5;

/// Run-time parameters read by the frame renderer every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderParameters {
    /// Number of noise layers the shading program sums.
    pub octaves: u32,
    /// Whether the `time` uniform advances each frame.
    pub update_time: bool,
    /// Whether the scene rotation advances each frame.
    pub animate: bool,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            octaves: 8,
            update_time: true,
            animate: true,
        }
    }
}

/// Direction of a requested octave change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveStep {
    Increment,
    Decrement,
}

/// Owns [`RenderParameters`] and applies external input events to them.
///
/// All timing is injected through the `now` arguments (seconds of
/// wall-clock time), so the debounce behavior is fully deterministic
/// under test.
#[derive(Debug)]
pub struct ParameterController {
    params: RenderParameters,
    last_octave_change: f64,
}

impl ParameterController {
    /// Creates a controller with the given initial octave count, clamped
    /// into `[OCTAVES_MIN, OCTAVES_MAX]`, and both toggles on.
    pub fn new(initial_octaves: u32) -> Self {
        Self {
            params: RenderParameters {
                octaves: initial_octaves.clamp(OCTAVES_MIN, OCTAVES_MAX),
                ..RenderParameters::default()
            },
            last_octave_change: 0.0,
        }
    }

    /// Current parameter values.
    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    /// Sets whether the shader `time` uniform advances. Applies
    /// immediately, no debounce.
    pub fn set_update_time(&mut self, on: bool) {
        self.params.update_time = on;
    }

    /// Sets whether the scene animates. Applies immediately, no debounce.
    pub fn set_animate(&mut self, on: bool) {
        self.params.animate = on;
    }

    /// Applies a debounced octave step at wall-clock time `now`.
    ///
    /// The step is accepted only when more than [`OCTAVE_STEP_INTERVAL`]
    /// seconds have passed since the last accepted step. On acceptance the
    /// count moves one octave and is clamped to the valid range; a step
    /// accepted at the range boundary still resets the debounce clock.
    /// Returns whether the step was accepted.
    pub fn step_octaves(&mut self, step: OctaveStep, now: f64) -> bool {
        if now - self.last_octave_change <= OCTAVE_STEP_INTERVAL {
            return false;
        }
        self.params.octaves = match step {
            OctaveStep::Increment => (self.params.octaves + 1).min(OCTAVES_MAX),
            OctaveStep::Decrement => self.params.octaves.saturating_sub(1).max(OCTAVES_MIN),
        };
        self.last_octave_change = now;
        true
    }
}
