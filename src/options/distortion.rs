use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Distortion", inline)]
#[serde(default)]
/// Velocity-driven distortion strength fed to both shader stages.
pub struct DistortionOptions {
    /// Scale applied to `(current - last) / screen_width`.
    #[schemars(title = "Intensity", range(min = 0.0, max = 40.0), extend("step" = 0.5))]
    pub velocity_scale: f32,
    /// Whether the strength is clamped to `±max_strength`.
    #[schemars(title = "Clamp")]
    pub clamp: bool,
    /// Magnitude limit used when `clamp` is set.
    #[schemars(title = "Max Strength", range(min = 0.0, max = 50.0), extend("step" = 0.5))]
    pub max_strength: f32,
}

impl Default for DistortionOptions {
    fn default() -> Self {
        Self {
            velocity_scale: 10.0,
            clamp: true,
            max_strength: 15.0,
        }
    }
}

impl DistortionOptions {
    /// Strength for a frame that moved `delta` scroll pixels on a screen
    /// `screen_width` pixels wide.
    #[must_use]
    pub fn strength(&self, delta: f32, screen_width: f32) -> f32 {
        if screen_width <= 0.0 {
            return 0.0;
        }
        let raw = delta / screen_width * self.velocity_scale;
        if self.clamp {
            let limit = self.max_strength.abs();
            raw.clamp(-limit, limit)
        } else {
            raw
        }
    }
}
