//! Frame-rate bookkeeping for the window title.
//!
//! `FpsCounter` counts frames between samples and produces a fresh title
//! string at most once per second, so the title bar stays readable
//! instead of flickering at display refresh rate.

/// Seconds between title updates.
const SAMPLE_INTERVAL: f64 = 1.0;

/// Counts frames and formats the window title.
///
/// Timing is injected through `tick`'s `now` argument (seconds of
/// wall-clock time), so the update gating is deterministic under test.
#[derive(Debug)]
pub struct FpsCounter {
    label: String,
    t0: f64,
    frames: u32,
}

impl FpsCounter {
    /// Creates a counter whose titles start with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            t0: 0.0,
            frames: 0,
        }
    }

    /// Registers one frame at time `now`.
    ///
    /// Returns a new title of the form `"<label> (<fps> FPS), <octaves>
    /// octaves"` when the sampling interval has elapsed or on the very
    /// first frame; otherwise `None`. Each returned title resets the frame
    /// counter and the sample clock.
    pub fn tick(&mut self, now: f64, octaves: u32) -> Option<String> {
        let title = if now - self.t0 > SAMPLE_INTERVAL || self.frames == 0 {
            let elapsed = now - self.t0;
            let fps = if elapsed > 0.0 {
                f64::from(self.frames) / elapsed
            } else {
                0.0
            };
            let title = format!("{} ({fps:.1} FPS), {octaves} octaves", self.label);
            self.t0 = now;
            self.frames = 0;
            Some(title)
        } else {
            None
        };
        self.frames += 1;
        title
    }
}
