//! Slot layout computed from a grid preset.
//!
//! Mirrors the CSS grid the site uses: a fixed number of columns across
//! the window, rows of a fixed fraction of the window height, and a per-slot
//! top margin in `vh`. Elements are live views into shared state, so
//! [`GridLayout::set_window_size`] moves every slot the way a browser reflow
//! would.

use std::cell::Cell;
use std::rc::Rc;

use super::{LayoutElement, LayoutHost, Rect};
use crate::options::{GridPreset, LayoutOptions};
use crate::viewport::Size;

/// One slot of a preset: `grid-column: start / span n`, `grid-row`,
/// `margin-top` in vh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacement {
    /// 1-based first column.
    pub column_start: u32,
    /// Number of columns spanned.
    pub column_span: u32,
    /// 1-based row.
    pub row: u32,
    /// Top margin in percent of window height.
    pub margin_top_vh: f32,
}

const fn place(column_start: u32, column_span: u32, row: u32, margin_top_vh: f32) -> GridPlacement {
    GridPlacement {
        column_start,
        column_span,
        row,
        margin_top_vh,
    }
}

const DEFAULT: [GridPlacement; 6] = [
    place(2, 4, 1, 5.0),
    place(8, 4, 2, 20.0),
    place(4, 5, 3, 30.0),
    place(2, 3, 5, 15.0),
    place(7, 4, 6, 25.0),
    place(3, 5, 8, 20.0),
];

const ALTERNATIVE: [GridPlacement; 6] = [
    place(2, 5, 1, 10.0),
    place(7, 3, 3, 15.0),
    place(3, 4, 5, 25.0),
    place(8, 3, 7, 12.0),
    place(2, 3, 9, 20.0),
    place(6, 4, 11, 15.0),
];

const MOBILE: [GridPlacement; 6] = [
    place(1, 4, 1, 5.0),
    place(2, 4, 3, 10.0),
    place(1, 4, 5, 10.0),
    place(2, 4, 7, 10.0),
    place(1, 4, 9, 10.0),
    place(2, 4, 11, 10.0),
];

impl GridPreset {
    /// Slot placements of this preset.
    #[must_use]
    pub fn placements(self) -> &'static [GridPlacement] {
        match self {
            Self::Default => &DEFAULT,
            Self::Alternative => &ALTERNATIVE,
            Self::Mobile => &MOBILE,
        }
    }
}

#[derive(Debug)]
struct GridState {
    window: Cell<Size>,
    options: LayoutOptions,
    placements: Vec<GridPlacement>,
    selector: String,
    imageless: Vec<usize>,
}

impl GridState {
    fn slot_rect(&self, index: usize) -> Option<Rect> {
        let placement = self.placements.get(index)?;
        let window = self.window.get();
        if !window.is_positive() {
            return None;
        }
        let column = window.width / self.options.columns.max(1) as f32;
        let row = window.height * self.options.row_height_vh / 100.0;
        let width = column * placement.column_span as f32;
        Some(Rect {
            left: column * placement.column_start.saturating_sub(1) as f32,
            top: row * placement.row.saturating_sub(1) as f32
                + window.height * placement.margin_top_vh / 100.0,
            width,
            height: width * self.options.slot_aspect,
        })
    }
}

/// Layout host backed by a grid preset instead of a DOM.
///
/// Cloning shares the underlying state, so a window owner can keep a clone
/// to push resizes while the gallery owns another.
#[derive(Debug, Clone)]
pub struct GridLayout {
    state: Rc<GridState>,
}

impl GridLayout {
    /// Layout for the preset in `options`, answering queries for `selector`.
    #[must_use]
    pub fn new(options: &LayoutOptions, selector: &str, window: Size) -> Self {
        Self::with_placements(options, selector, window, options.preset.placements())
    }

    /// Layout from explicit placements.
    #[must_use]
    pub fn with_placements(
        options: &LayoutOptions,
        selector: &str,
        window: Size,
        placements: &[GridPlacement],
    ) -> Self {
        Self {
            state: Rc::new(GridState {
                window: Cell::new(window),
                options: options.clone(),
                placements: placements.to_vec(),
                selector: selector.to_owned(),
                imageless: Vec::new(),
            }),
        }
    }

    /// Mark slot `index` as having no image element. Only affects layouts
    /// not yet shared.
    #[must_use]
    pub fn without_image(mut self, index: usize) -> Self {
        if let Some(state) = Rc::get_mut(&mut self.state) {
            state.imageless.push(index);
        } else {
            log::warn!("grid layout already shared, ignoring imageless slot {index}");
        }
        self
    }

    /// Apply a window resize; every element re-measures from it.
    pub fn set_window_size(&self, window: Size) {
        self.state.window.set(window);
    }

    /// Rectangle of slot `index` at the current window size.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        self.state.slot_rect(index)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.placements.len()
    }

    /// Whether the layout has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.placements.is_empty()
    }
}

impl LayoutHost for GridLayout {
    type Element = GridSlot;

    fn window_size(&self) -> Size {
        self.state.window.get()
    }

    fn gallery_rect(&self) -> Option<Rect> {
        let window = self.state.window.get();
        if !window.is_positive() {
            return None;
        }
        let content = (0..self.len())
            .filter_map(|i| self.state.slot_rect(i))
            .map(|rect| rect.bottom())
            .fold(0.0_f32, f32::max);
        let padding = window.height * self.state.options.bottom_padding_vh / 100.0;
        Some(Rect::new(0.0, 0.0, window.width, content + padding))
    }

    fn query_slots(&self, selector: &str) -> Vec<GridSlot> {
        if selector != self.state.selector {
            log::warn!(
                "selector {selector:?} does not match grid slots ({:?})",
                self.state.selector
            );
            return Vec::new();
        }
        (0..self.len())
            .map(|index| GridSlot {
                state: Rc::clone(&self.state),
                index,
            })
            .collect()
    }

    fn find_image(&self, slot: &GridSlot) -> Option<GridSlot> {
        if self.state.imageless.contains(&slot.index) {
            return None;
        }
        Some(GridSlot {
            state: Rc::clone(&slot.state),
            index: slot.index,
        })
    }
}

/// A slot (or the image filling it) in a [`GridLayout`].
#[derive(Debug, Clone)]
pub struct GridSlot {
    state: Rc<GridState>,
    index: usize,
}

impl GridSlot {
    /// Position of the slot in its preset.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl LayoutElement for GridSlot {
    fn bounding_rect(&self) -> Option<Rect> {
        self.state.slot_rect(self.index)
    }
}
