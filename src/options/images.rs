use serde::{Deserialize, Serialize};

const PROFILE: &str = "/assets/images/profile.jpg";
const BLANK: &str = "/assets/images/blank.webp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Image sources, cycled by slot index.
pub struct ImageOptions {
    /// Primary image URLs (or paths relative to the viewer's asset root).
    pub urls: Vec<String>,
    /// Substitutes tried once when the primary image fails to load.
    pub fallback: Vec<String>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            urls: vec![PROFILE.to_owned(); 6],
            fallback: vec![BLANK.to_owned(); 6],
        }
    }
}

impl ImageOptions {
    /// URL for the slot at `index`, wrapping around the list.
    #[must_use]
    pub fn url_for(&self, index: usize) -> Option<&str> {
        cycle(&self.urls, index)
    }

    /// Fallback URL for the slot at `index`, wrapping around the list.
    #[must_use]
    pub fn fallback_for(&self, index: usize) -> Option<&str> {
        cycle(&self.fallback, index)
    }
}

fn cycle(list: &[String], index: usize) -> Option<&str> {
    if list.is_empty() {
        None
    } else {
        Some(list[index % list.len()].as_str())
    }
}
