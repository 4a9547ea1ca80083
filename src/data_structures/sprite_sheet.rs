//! Sprite-sheet grids and frame selection.
//!
//! A sprite sheet is a single texture split into `columns * rows` equally sized cells.
//! Frames are addressed by a linear index, row by row, starting at the texture-space
//! origin (bottom-left, as textures are flipped on load).
//!
//! The vertex shader (`pipelines/sprite.wgsl`) does the actual UV computation on the GPU.
//! The functions here mirror it on the CPU so that frame selection can be inspected and
//! tested without a device.

use anyhow::ensure;
use cgmath::Vector2;

/// Grid layout of a sprite sheet. Both dimensions are at least one and the cell count fits
/// the shader's `i32` inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    columns: u32,
    rows: u32,
}

impl SpriteSheet {
    /// A sheet with a single cell covering the whole texture.
    pub const SINGLE: SpriteSheet = SpriteSheet {
        columns: 1,
        rows: 1,
    };

    pub fn new(columns: u32, rows: u32) -> anyhow::Result<Self> {
        ensure!(
            columns >= 1 && rows >= 1,
            "a sprite sheet needs at least one column and one row, got {columns}x{rows}"
        );
        let cells = columns.checked_mul(rows);
        ensure!(
            cells.is_some_and(|cells| cells <= i32::MAX as u32),
            "a {columns}x{rows} sprite sheet has too many cells"
        );
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells in the grid. Valid frame indices are `0..frame_count()`.
    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Column and row of a frame. The row uses integer division, so it truncates.
    pub fn frame_cell(&self, frame_index: u32) -> (u32, u32) {
        (frame_index % self.columns, frame_index / self.columns)
    }

    /// Size of one cell in UV space.
    pub fn cell_size(&self) -> Vector2<f32> {
        Vector2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32)
    }

    /// UV offset of the cell's origin.
    pub fn frame_offset(&self, frame_index: u32) -> Vector2<f32> {
        let (column, row) = self.frame_cell(frame_index);
        let cell = self.cell_size();
        Vector2::new(column as f32 * cell.x, row as f32 * cell.y)
    }

    /// Final texture coordinate for a vertex of the unit quad.
    ///
    /// `base_uv * cell_size + frame_offset + scroll_offset`, identical to the shader.
    pub fn frame_uv(
        &self,
        base_uv: Vector2<f32>,
        frame_index: u32,
        scroll_offset: Vector2<f32>,
    ) -> Vector2<f32> {
        let cell = self.cell_size();
        let offset = self.frame_offset(frame_index);
        Vector2::new(base_uv.x * cell.x, base_uv.y * cell.y) + offset + scroll_offset
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::SINGLE
    }
}
