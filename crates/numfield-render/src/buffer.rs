#![forbid(unsafe_code)]

//! Row-major cell grid.

use crate::cell::Cell;

/// A rectangular grid of [`Cell`]s, stored row-major.
///
/// Out-of-bounds access is a silent no-op for writes and `None` for reads;
/// widgets clip themselves against their area, the buffer is the backstop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at a position.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at a position.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell at a position. Out of bounds is a no-op.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer, clearing its contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    /// Borrow a full row of cells, if in bounds.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = y as usize * self.width as usize;
            Some(&self.cells[start..start + self.width as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.get(3, 1).unwrap().ch, ' ');
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(10, 3);
        buf.set(2, 1, Cell::from_char('z'));
        assert_eq!(buf.get(2, 1).unwrap().ch, 'z');
    }

    #[test]
    fn out_of_bounds_is_harmless() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('!'));
        assert!(buf.get(5, 5).is_none());
        assert!(buf.get_mut(2, 0).is_none());
    }

    #[test]
    fn resize_clears() {
        let mut buf = Buffer::new(2, 2);
        buf.set(0, 0, Cell::from_char('a'));
        buf.resize(3, 3);
        assert_eq!(buf.get(0, 0).unwrap().ch, ' ');
        assert_eq!(buf.width(), 3);
    }

    #[test]
    fn rows_are_contiguous() {
        let mut buf = Buffer::new(3, 2);
        buf.set(0, 1, Cell::from_char('a'));
        buf.set(2, 1, Cell::from_char('b'));
        let row: Vec<char> = buf.row(1).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(row, vec!['a', ' ', 'b']);
        assert!(buf.row(2).is_none());
    }
}
