use std::sync::Arc;

use crate::layout::sprite::Mask;

/// A ranked word after sizing: weight mapped to a font size and a rotation
/// drawn once from the configured bucket set.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedWord {
    pub text: String,
    pub weight: u32,
    pub font_size: f32,
    /// Degrees, counter-clockwise negative in SVG terms.
    pub rotation: f32,
}

/// A word with a final position. `x`/`y` are the center offset from the
/// canvas center in pixels; `anchor` is the top-left cell of the translated
/// mask in the canvas grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub weight: u32,
    pub font_size: f32,
    pub rotation: f32,
    pub x: f32,
    pub y: f32,
    pub anchor: (i32, i32),
    pub mask: Arc<Mask>,
}

impl PlacedWord {
    /// Canvas-relative bounding box `(x, y, width, height)` of the placed
    /// mask, padding included.
    pub fn bbox(&self) -> (f32, f32, f32, f32) {
        let cell = self.mask.cell;
        (
            self.anchor.0 as f32 * cell,
            self.anchor.1 as f32 * cell,
            self.mask.cols as f32 * cell,
            self.mask.rows as f32 * cell,
        )
    }
}

/// Outcome of one layout run. `placed` keeps processing order (descending
/// weight) and is pairwise mask-disjoint; `truncated` marks a run cut short
/// by the iteration budget or deadline rather than finished.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub placed: Vec<PlacedWord>,
    pub unplaced: Vec<SizedWord>,
    pub truncated: bool,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self {
            placed: Vec::new(),
            unplaced: Vec::new(),
            truncated: false,
        }
    }
}
