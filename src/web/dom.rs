//! DOM-backed layout host.

use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::layout::{LayoutElement, LayoutHost, Rect};
use crate::viewport::Size;

/// A DOM element measured with `getBoundingClientRect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(pub Element);

impl LayoutElement for DomElement {
    fn bounding_rect(&self) -> Option<Rect> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        Some(Rect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}

/// Layout host over the page: the browser window plus the gallery
/// container whose descendants are the slots.
#[derive(Debug, Clone)]
pub struct DomHost {
    window: Window,
    gallery: DomElement,
}

impl DomHost {
    /// Host measuring `gallery` inside `window`.
    #[must_use]
    pub fn new(window: Window, gallery: Element) -> Self {
        Self {
            window,
            gallery: DomElement(gallery),
        }
    }
}

impl LayoutHost for DomHost {
    type Element = DomElement;

    fn window_size(&self) -> Size {
        let read = |value: Result<wasm_bindgen::JsValue, _>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Size::new(
            read(self.window.inner_width()),
            read(self.window.inner_height()),
        )
    }

    fn gallery_rect(&self) -> Option<Rect> {
        self.gallery.bounding_rect()
    }

    fn query_slots(&self, selector: &str) -> Vec<DomElement> {
        let list = match self.gallery.0.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("invalid slot selector '{selector}': {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement)
            .collect()
    }

    fn find_image(&self, slot: &DomElement) -> Option<DomElement> {
        slot.0.query_selector("img").ok().flatten().map(DomElement)
    }
}
