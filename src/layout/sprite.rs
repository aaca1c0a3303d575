use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::{GlyphMetrics, LayoutConfig};
use crate::layout::text::measure_word;
use crate::layout::types::SizedWord;

static SPRITE_CACHE: Lazy<Mutex<HashMap<SpriteKey, Arc<Mask>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Discretized occupancy footprint of a word at its size and rotation,
/// independent of position.
///
/// The footprint is the measured text rectangle, inflated by the configured
/// padding, rotated about its center. A rotated rectangle is convex, so each
/// grid row is covered by exactly one horizontal span; spans are stored
/// half-open `[start, end)` in columns relative to the mask's left edge.
/// Rounding is outward, never dropping covered cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    /// Canvas pixels per grid cell.
    pub cell: f32,
    pub cols: i32,
    pub rows: i32,
    pub spans: Vec<(i32, i32)>,
}

impl Mask {
    /// True if this mask at `anchor` shares at least one occupied cell with
    /// `other` at `other_anchor`. Anchors are top-left cells in a common
    /// grid.
    pub fn overlaps_at(&self, anchor: (i32, i32), other: &Mask, other_anchor: (i32, i32)) -> bool {
        let top = anchor.1.max(other_anchor.1);
        let bottom = (anchor.1 + self.rows).min(other_anchor.1 + other.rows);
        for row in top..bottom {
            let (a0, a1) = self.spans[(row - anchor.1) as usize];
            let (b0, b1) = other.spans[(row - other_anchor.1) as usize];
            let lo = (a0 + anchor.0).max(b0 + other_anchor.0);
            let hi = (a1 + anchor.0).min(b1 + other_anchor.0);
            if lo < hi {
                return true;
            }
        }
        false
    }

    /// Number of occupied cells, mostly useful in tests.
    pub fn area(&self) -> u64 {
        self.spans
            .iter()
            .map(|(start, end)| (end - start).max(0) as u64)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SpriteKey {
    text: String,
    font_size: u32,
    rotation: u32,
    cell: u32,
    padding: u32,
    metrics: GlyphMetrics,
    family: String,
}

/// Mask for `word` under `config`, served from the global cache when the
/// same (text, size, rotation) was sampled before. The cache is written at
/// most once per key; concurrent runs share the same `Arc`.
pub fn sprite(word: &SizedWord, family: &str, config: &LayoutConfig) -> Arc<Mask> {
    let key = SpriteKey {
        text: word.text.clone(),
        font_size: word.font_size.to_bits(),
        rotation: word.rotation.to_bits(),
        cell: config.cell_size.to_bits(),
        padding: config.padding.to_bits(),
        metrics: config.glyph_metrics,
        family: family.to_string(),
    };

    if let Ok(cache) = SPRITE_CACHE.lock() {
        if let Some(mask) = cache.get(&key) {
            return Arc::clone(mask);
        }
    }

    let mask = Arc::new(rasterize(
        &word.text,
        word.font_size,
        word.rotation,
        config.glyph_metrics,
        family,
        config.cell_size,
        config.padding,
    ));

    if let Ok(mut cache) = SPRITE_CACHE.lock() {
        return Arc::clone(cache.entry(key).or_insert(mask));
    }
    mask
}

fn rasterize(
    text: &str,
    font_size: f32,
    rotation_deg: f32,
    metrics: GlyphMetrics,
    family: &str,
    cell: f32,
    padding: f32,
) -> Mask {
    let extent = measure_word(text, font_size, metrics, family);
    let half_w = (extent.width + 2.0 * padding) / 2.0;
    let half_h = (extent.height + 2.0 * padding) / 2.0;

    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let corners = [
        rotate(-half_w, -half_h, sin, cos),
        rotate(half_w, -half_h, sin, cos),
        rotate(half_w, half_h, sin, cos),
        rotate(-half_w, half_h, sin, cos),
    ];

    let mut x_min = f32::INFINITY;
    let mut x_max = f32::NEG_INFINITY;
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;
    for (x, y) in corners {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let cols = (((x_max - x_min) / cell).ceil() as i32).max(1);
    let rows = (((y_max - y_min) / cell).ceil() as i32).max(1);

    let mut spans = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let y0 = y_min + row as f32 * cell;
        let y1 = y0 + cell;
        match slab_x_extent(&corners, y0, y1) {
            Some((sx0, sx1)) => {
                let start = (((sx0 - x_min) / cell).floor() as i32).clamp(0, cols);
                let end = (((sx1 - x_min) / cell).ceil() as i32).clamp(0, cols);
                spans.push((start, end));
            }
            None => spans.push((0, 0)),
        }
    }

    Mask {
        cell,
        cols,
        rows,
        spans,
    }
}

fn rotate(x: f32, y: f32, sin: f32, cos: f32) -> (f32, f32) {
    (x * cos - y * sin, x * sin + y * cos)
}

// Horizontal extent of a convex quadrilateral within the slab [y0, y1]:
// vertices inside the slab plus edge crossings of either boundary.
fn slab_x_extent(quad: &[(f32, f32); 4], y0: f32, y1: f32) -> Option<(f32, f32)> {
    let mut x_min = f32::INFINITY;
    let mut x_max = f32::NEG_INFINITY;
    let mut seen = false;

    for i in 0..4 {
        let (ax, ay) = quad[i];
        let (bx, by) = quad[(i + 1) % 4];

        if ay >= y0 && ay <= y1 {
            x_min = x_min.min(ax);
            x_max = x_max.max(ax);
            seen = true;
        }

        for boundary in [y0, y1] {
            if (ay - boundary) * (by - boundary) < 0.0 {
                let t = (boundary - ay) / (by - ay);
                let x = ax + t * (bx - ax);
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                seen = true;
            }
        }
    }

    if seen { Some((x_min, x_max)) } else { None }
}
