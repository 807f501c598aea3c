use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll", inline)]
#[serde(default)]
/// Scroll easing and input sensitivity.
pub struct ScrollOptions {
    /// Fraction of the remaining distance `current` covers each frame.
    #[schemars(title = "Ease", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub ease: f32,
    /// Constant drift added to the scroll target every frame.
    #[schemars(title = "Auto Scroll Speed", range(min = 0.0, max = 10.0), extend("step" = 0.5))]
    pub ambient_speed: f32,
    /// Multiplier applied to wheel `deltaY`.
    #[schemars(title = "Wheel Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub wheel_multiplier: f32,
    /// Multiplier applied to drag distance (sign inverted).
    #[schemars(title = "Drag Speed", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub drag_multiplier: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            ease: 0.05,
            ambient_speed: 2.0,
            wheel_multiplier: 0.5,
            drag_multiplier: 2.0,
        }
    }
}
