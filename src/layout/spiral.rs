use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::LayoutConfig;
use crate::layout::spatial::SpatialIndex;
use crate::layout::sprite::{Mask, sprite};
use crate::layout::types::{LayoutResult, PlacedWord, SizedWord};

/// Archimedean spiral around the canvas center, stretched horizontally by
/// the canvas aspect ratio. Yields `(dx, dy, radius)` in pixels.
struct Spiral {
    step: f32,
    growth: f32,
    aspect: f32,
    index: u64,
}

impl Spiral {
    fn new(config: &LayoutConfig) -> Self {
        Self {
            step: config.spiral_step,
            growth: config.spiral_growth,
            aspect: config.width / config.height,
            index: 0,
        }
    }
}

impl Iterator for Spiral {
    type Item = (f32, f32, f32);

    fn next(&mut self) -> Option<(f32, f32, f32)> {
        let t = self.index as f32 * self.step;
        self.index += 1;
        let r = self.growth * t;
        Some((r * t.cos() * self.aspect, r * t.sin(), r))
    }
}

/// Places words one by one, heaviest first, walking the spiral outward from
/// the center until the word's mask fits without touching anything already
/// placed.
///
/// A word whose spiral walk exceeds the radius cap goes to `unplaced` and
/// the run continues with the next word. Exhausting the candidate budget or
/// the deadline stops the run instead: the current and all remaining words
/// go to `unplaced` and the result is marked truncated.
pub fn place(sized_words: Vec<SizedWord>, family: &str, config: &LayoutConfig) -> LayoutResult {
    let cell = config.cell_size;
    let canvas_cols = ((config.width / cell).floor() as i32).max(1);
    let canvas_rows = ((config.height / cell).floor() as i32).max(1);
    let center_x = config.width / 2.0;
    let center_y = config.height / 2.0;
    let max_radius = config.max_radius_factor * config.width.max(config.height);

    let mut index = SpatialIndex::new(canvas_cols, canvas_rows);
    let mut placed = Vec::new();
    let mut unplaced = Vec::new();
    let mut truncated = false;

    let mut budget = config.run_budget;
    let deadline = config
        .deadline_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let mut pending = sized_words.into_iter();
    'words: while let Some(word) = pending.next() {
        let mask = sprite(&word, family, config);
        if mask.cols > canvas_cols || mask.rows > canvas_rows {
            unplaced.push(word);
            continue;
        }

        let mut fit = None;
        let mut last_cell = None;
        for (dx, dy, radius) in Spiral::new(config) {
            if radius > max_radius {
                break;
            }
            if out_of_budget(&mut budget) || past_deadline(deadline) {
                truncated = true;
                unplaced.push(word);
                unplaced.extend(pending.by_ref());
                break 'words;
            }

            let col = ((center_x + dx) / cell).round() as i32;
            let row = ((center_y + dy) / cell).round() as i32;
            if last_cell == Some((col, row)) {
                continue;
            }
            last_cell = Some((col, row));

            let anchor = (col - mask.cols / 2, row - mask.rows / 2);
            if anchor.0 < 0
                || anchor.1 < 0
                || anchor.0 + mask.cols > canvas_cols
                || anchor.1 + mask.rows > canvas_rows
            {
                continue;
            }
            if !index.overlaps(&mask, anchor) {
                fit = Some(anchor);
                break;
            }
        }

        match fit {
            Some(anchor) => {
                index.insert(Arc::clone(&mask), anchor);
                placed.push(placed_word(word, mask, anchor, cell, center_x, center_y));
            }
            None => unplaced.push(word),
        }
    }

    LayoutResult {
        placed,
        unplaced,
        truncated,
    }
}

fn placed_word(
    word: SizedWord,
    mask: Arc<Mask>,
    anchor: (i32, i32),
    cell: f32,
    center_x: f32,
    center_y: f32,
) -> PlacedWord {
    PlacedWord {
        text: word.text,
        weight: word.weight,
        font_size: word.font_size,
        rotation: word.rotation,
        x: (anchor.0 as f32 + mask.cols as f32 / 2.0) * cell - center_x,
        y: (anchor.1 as f32 + mask.rows as f32 / 2.0) * cell - center_y,
        anchor,
        mask,
    }
}

fn out_of_budget(budget: &mut Option<u64>) -> bool {
    match budget {
        Some(0) => true,
        Some(n) => {
            *n -= 1;
            false
        }
        None => false,
    }
}

fn past_deadline(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}
