use std::sync::Arc;

use crate::layout::sprite::Mask;

const SPLIT_THRESHOLD: usize = 8;
const MAX_DEPTH: u32 = 8;

/// Axis-aligned cell rectangle, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CellRect {
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn contains(&self, other: &CellRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }
}

struct Entry {
    anchor: (i32, i32),
    mask: Arc<Mask>,
}

struct Node {
    bounds: CellRect,
    items: Vec<(usize, CellRect)>,
    children: Option<Box<[Node; 4]>>,
}

/// Quadtree over the canvas grid holding the masks placed so far.
///
/// Bounding boxes prune the search; the exact span test against the stored
/// masks decides. Entries live in a flat arena, the tree only stores
/// indices, so iteration order and results match a plain linear scan.
pub struct SpatialIndex {
    root: Node,
    entries: Vec<Entry>,
}

impl SpatialIndex {
    pub fn new(canvas_cols: i32, canvas_rows: i32) -> Self {
        Self {
            root: Node {
                bounds: CellRect {
                    x: 0,
                    y: 0,
                    w: canvas_cols.max(1),
                    h: canvas_rows.max(1),
                },
                items: Vec::new(),
                children: None,
            },
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, mask: Arc<Mask>, anchor: (i32, i32)) {
        let bbox = CellRect {
            x: anchor.0,
            y: anchor.1,
            w: mask.cols,
            h: mask.rows,
        };
        let index = self.entries.len();
        self.entries.push(Entry { anchor, mask });
        self.root.insert(index, bbox, 0);
    }

    /// True if `mask` at `anchor` collides with any placed mask.
    pub fn overlaps(&self, mask: &Mask, anchor: (i32, i32)) -> bool {
        let bbox = CellRect {
            x: anchor.0,
            y: anchor.1,
            w: mask.cols,
            h: mask.rows,
        };
        self.root.overlaps(&bbox, mask, anchor, &self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Node {
    fn insert(&mut self, index: usize, bbox: CellRect, depth: u32) {
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.bounds.contains(&bbox) {
                    child.insert(index, bbox, depth + 1);
                    return;
                }
            }
            // spans a quadrant boundary, keep it here
            self.items.push((index, bbox));
            return;
        }

        self.items.push((index, bbox));
        if self.items.len() > SPLIT_THRESHOLD
            && depth < MAX_DEPTH
            && self.bounds.w >= 2
            && self.bounds.h >= 2
        {
            self.split(depth);
        }
    }

    fn split(&mut self, depth: u32) {
        let CellRect { x, y, w, h } = self.bounds;
        let w0 = w / 2;
        let h0 = h / 2;
        let quadrant = |x, y, w, h| Node {
            bounds: CellRect { x, y, w, h },
            items: Vec::new(),
            children: None,
        };
        let mut children = Box::new([
            quadrant(x, y, w0, h0),
            quadrant(x + w0, y, w - w0, h0),
            quadrant(x, y + h0, w0, h - h0),
            quadrant(x + w0, y + h0, w - w0, h - h0),
        ]);

        let items = std::mem::take(&mut self.items);
        for (index, bbox) in items {
            let child = children.iter_mut().find(|c| c.bounds.contains(&bbox));
            match child {
                Some(child) => child.insert(index, bbox, depth + 1),
                None => self.items.push((index, bbox)),
            }
        }
        self.children = Some(children);
    }

    fn overlaps(
        &self,
        bbox: &CellRect,
        mask: &Mask,
        anchor: (i32, i32),
        entries: &[Entry],
    ) -> bool {
        for (index, item_bbox) in &self.items {
            if item_bbox.intersects(bbox) {
                let entry = &entries[*index];
                if mask.overlaps_at(anchor, &entry.mask, entry.anchor) {
                    return true;
                }
            }
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                if child.bounds.intersects(bbox) && child.overlaps(bbox, mask, anchor, entries) {
                    return true;
                }
            }
        }
        false
    }
}
