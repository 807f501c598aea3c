use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Named slot arrangement for the grid layout host.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GridPreset {
    /// Staggered two-column composition.
    #[default]
    Default,
    /// Wider spacing, alternating sides.
    Alternative,
    /// Narrow single-column zigzag.
    Mobile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Geometry of the grid layout host used outside the browser.
pub struct LayoutOptions {
    /// Slot arrangement.
    #[schemars(title = "Preset")]
    pub preset: GridPreset,
    /// Number of grid columns across the window.
    #[schemars(skip)]
    pub columns: u32,
    /// Height of one grid row, in percent of the window height.
    #[schemars(title = "Row Height (vh)", range(min = 5.0, max = 100.0), extend("step" = 1.0))]
    pub row_height_vh: f32,
    /// Slot height divided by slot width.
    #[schemars(title = "Slot Aspect", range(min = 0.5, max = 2.0), extend("step" = 0.05))]
    pub slot_aspect: f32,
    /// Extra space below the last slot, in percent of the window height.
    #[schemars(skip)]
    pub bottom_padding_vh: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            preset: GridPreset::Default,
            columns: 12,
            row_height_vh: 30.0,
            slot_aspect: 1.25,
            bottom_padding_vh: 20.0,
        }
    }
}
