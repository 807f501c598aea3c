use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gallery", inline)]
#[serde(default)]
/// Host-facing gallery settings.
pub struct GalleryOptions {
    /// CSS selector matching the image slots inside the gallery container.
    #[schemars(skip)]
    pub selector: String,
    /// Delay between the first layout pass and media creation, letting the
    /// host's layout and image elements settle.
    #[schemars(title = "Settle Delay (ms)", range(min = 0, max = 2000))]
    pub settle_delay_ms: u32,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            selector: ".image-container".to_owned(),
            settle_delay_ms: 200,
        }
    }
}
