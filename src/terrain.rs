//! Destructible terrain - solid-cell grid, carving, and collision queries.
//!
//! The terrain is a grid of boolean "solid" cells built once from a
//! deterministic rolling-hill height curve. Explosions carve circular
//! craters out of it; bodies collide against whatever solid cells remain.
//! Cells never become solid again.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Non-empty intersection test. Degenerate rectangles overlap nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && other.w > 0.0
            && other.h > 0.0
            && self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Grid of destructible solid cells covering the play area.
///
/// Grid dimensions are `ceil(width / cell_size) x ceil(height / cell_size)`;
/// every index computed from world coordinates is clamped into range, and
/// queries outside the grid report "not solid".
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    cols: usize,
    rows: usize,
    cell_size: f32,
    /// Row-major solidity flags.
    solid: Vec<bool>,
}

impl TerrainGrid {
    /// Build rolling-hill terrain for a `width x height` play area.
    ///
    /// The surface is a sum of two sine terms over the column index, so the
    /// silhouette is fully determined by the dimensions. Cells below the
    /// surface start solid.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let mut grid = Self::empty(width, height, cell_size);
        let height = grid.rows as f32 * grid.cell_size;

        for col in 0..grid.cols {
            let x = col as f32;
            let surface = height * 0.5
                + (x * 0.1).sin() * (height / 6.0)
                + (x * 0.05).sin() * (height / 12.0);
            grid.fill_column_below(col, surface);
        }
        grid
    }

    /// Build terrain with a uniform surface height. Handy for tests and
    /// scripted demos where the hill silhouette would just get in the way.
    pub fn flat(width: f32, height: f32, cell_size: f32, surface_y: f32) -> Self {
        let mut grid = Self::empty(width, height, cell_size);
        for col in 0..grid.cols {
            grid.fill_column_below(col, surface_y);
        }
        grid
    }

    /// All-empty grid of the right dimensions.
    fn empty(width: f32, height: f32, cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        debug_assert!(width > 0.0 && height > 0.0, "play area must be non-empty");
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        let width = width.max(cell_size);
        let height = height.max(cell_size);

        let cols = (width / cell_size).ceil() as usize;
        let rows = (height / cell_size).ceil() as usize;
        Self {
            cols,
            rows,
            cell_size,
            solid: vec![false; cols * rows],
        }
    }

    fn fill_column_below(&mut self, col: usize, surface_y: f32) {
        let start = ((surface_y / self.cell_size) as i32).max(0) as usize;
        for row in start.min(self.rows)..self.rows {
            self.solid[row * self.cols + col] = true;
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn clamp_col(&self, col: i32) -> usize {
        col.clamp(0, self.cols as i32 - 1) as usize
    }

    fn clamp_row(&self, row: i32) -> usize {
        row.clamp(0, self.rows as i32 - 1) as usize
    }

    /// Whether the cell at the given indices is solid. Out-of-range
    /// indices are not solid.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return false;
        }
        self.solid[row as usize * self.cols + col as usize]
    }

    /// World-space rectangle of a cell.
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            col as f32 * self.cell_size,
            row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Clear every cell whose center lies strictly within `radius` of the
    /// carve center. Idempotent, and cells never regrow.
    pub fn carve(&mut self, center_x: f32, center_y: f32, radius: f32) {
        debug_assert!(radius >= 0.0, "carve radius must not be negative");
        let radius = radius.max(0.0);
        if radius == 0.0 {
            return;
        }

        let c0 = self.clamp_col(((center_x - radius) / self.cell_size) as i32);
        let c1 = self.clamp_col(((center_x + radius) / self.cell_size) as i32);
        let r0 = self.clamp_row(((center_y - radius) / self.cell_size) as i32);
        let r1 = self.clamp_row(((center_y + radius) / self.cell_size) as i32);

        for row in r0..=r1 {
            for col in c0..=c1 {
                let dx = (col as f32 + 0.5) * self.cell_size - center_x;
                let dy = (row as f32 + 0.5) * self.cell_size - center_y;
                if (dx * dx + dy * dy).sqrt() < radius {
                    self.solid[row * self.cols + col] = false;
                }
            }
        }
    }

    /// True iff any solid cell's rectangle has non-empty intersection with
    /// `rect`. Only cells under `rect`'s bounding box are tested, so the
    /// cost is bounded by the rectangle's footprint in cells.
    pub fn intersects(&self, rect: &Rect) -> bool {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return false;
        }

        let c0 = self.clamp_col((rect.x / self.cell_size) as i32);
        let c1 = self.clamp_col(((rect.x + rect.w) / self.cell_size) as i32);
        let r0 = self.clamp_row((rect.y / self.cell_size) as i32);
        let r1 = self.clamp_row(((rect.y + rect.h) / self.cell_size) as i32);

        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.solid[row * self.cols + col] && self.cell_rect(col, row).overlaps(rect) {
                    return true;
                }
            }
        }
        false
    }

    /// Enumerate `(col, row)` indices of all solid cells, for renderers.
    /// Reflects the latest carve.
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.solid
            .iter()
            .enumerate()
            .filter(|(_, solid)| **solid)
            .map(move |(i, _)| (i % cols, i / cols))
    }

    /// Number of solid cells left.
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }
}

/// Snapshot of the terrain for serialization to a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
    /// Row-major solidity flags, one byte per cell.
    pub solid: Vec<u8>,
}

impl TerrainSnapshot {
    pub fn from_grid(grid: &TerrainGrid) -> Self {
        Self {
            cols: grid.cols,
            rows: grid.rows,
            cell_size: grid.cell_size,
            solid: grid.solid.iter().map(|s| *s as u8).collect(),
        }
    }
}
