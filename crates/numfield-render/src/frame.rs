#![forbid(unsafe_code)]

//! Frame = buffer + cursor + hit-test grid for one render pass.
//!
//! The [`Frame`] is the target `view()` writes to. Besides the cell grid it
//! carries the hardware cursor position and a [`HitGrid`] mapping screen
//! cells back to the control that drew them, so mouse events can be routed
//! without the model re-deriving layout.

use crate::buffer::Buffer;
use numfield_core::geometry::Rect;

/// Identifier for a control in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a hit ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Region tag for a hit area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Clickable button.
    Button,
    /// Editable field.
    Field,
    /// Toggle option.
    Toggle,
}

/// One cell of the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Control that registered this cell, if any.
    pub id: Option<HitId>,
    /// Region tag.
    pub region: HitRegion,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    #[must_use]
    pub const fn new(id: HitId, region: HitRegion) -> Self {
        Self {
            id: Some(id),
            region,
        }
    }

    /// Check if the cell is unclaimed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// Hit-testing grid mapping screen positions to controls.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty hit grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    /// Claim a rectangle for a control. Later claims win on overlap.
    pub fn claim(&mut self, area: Rect, id: HitId, region: HitRegion) {
        let claimed = HitCell::new(id, region);
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.cells[y as usize * self.width as usize + x as usize] = claimed;
            }
        }
    }

    /// Look up the control at a position.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> HitCell {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize]
        } else {
            HitCell::default()
        }
    }

    /// Clear all claims.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Render target for one pass: cell grid, cursor, and hit grid.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid.
    pub buffer: Buffer,
    /// Hardware cursor position, if a focused control wants one.
    pub cursor_position: Option<(u16, u16)>,
    /// Mouse hit-test grid for this frame.
    pub hit_grid: HitGrid,
}

impl Frame {
    /// Create a blank frame.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor_position: None,
            hit_grid: HitGrid::new(width, height),
        }
    }

    /// Full frame area.
    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.buffer.width(), self.buffer.height())
    }

    /// Set (or hide) the hardware cursor.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    /// Reset buffer, cursor, and hit grid for the next pass.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor_position = None;
        self.hit_grid.clear();
    }

    /// Resize to a new terminal size, clearing contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
        self.hit_grid = HitGrid::new(width, height);
        self.cursor_position = None;
    }
}
