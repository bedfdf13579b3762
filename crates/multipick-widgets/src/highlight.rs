//! Keyboard highlight over the rows of an open dropdown list.
//!
//! Tracks which row is highlighted and the first row on screen, so lists
//! longer than the visible height scroll with the highlight.

#[derive(Debug, Clone)]
pub struct Highlight {
    row: usize,
    offset: usize,
    rows: usize,
    visible: usize,
}

impl Highlight {
    pub fn new(rows: usize, visible: usize) -> Self {
        Self {
            row: 0,
            offset: 0,
            rows,
            visible,
        }
    }

    /// The highlighted row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The first row on screen.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of rows that fit on screen; the offset follows.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.scroll_into_view();
    }

    /// Move up one row, wrapping to the last.
    pub fn up(&mut self) {
        if self.rows == 0 {
            return;
        }
        self.row = self.row.checked_sub(1).unwrap_or(self.rows - 1);
        self.scroll_into_view();
    }

    /// Move down one row, wrapping to the first.
    pub fn down(&mut self) {
        if self.rows == 0 {
            return;
        }
        self.row = (self.row + 1) % self.rows;
        self.scroll_into_view();
    }

    pub fn first(&mut self) {
        self.row = 0;
        self.scroll_into_view();
    }

    pub fn last(&mut self) {
        self.row = self.rows.saturating_sub(1);
        self.scroll_into_view();
    }

    /// Highlight `row`, clamped to the last row.
    pub fn set(&mut self, row: usize) {
        if self.rows == 0 {
            return;
        }
        self.row = row.min(self.rows - 1);
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        if self.rows == 0 || self.visible == 0 {
            return;
        }
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + self.visible {
            self.offset = self.row + 1 - self.visible;
        }
        // Shrinking lists must not leave blank rows below the last one.
        self.offset = self.offset.min(self.rows.saturating_sub(self.visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_wraps() {
        let mut h = Highlight::new(3, 10);
        h.down();
        h.down();
        assert_eq!(h.row(), 2);
        h.down();
        assert_eq!(h.row(), 0);
    }

    #[test]
    fn up_wraps() {
        let mut h = Highlight::new(3, 10);
        h.up();
        assert_eq!(h.row(), 2);
        h.up();
        assert_eq!(h.row(), 1);
    }

    #[test]
    fn first_and_last() {
        let mut h = Highlight::new(10, 5);
        h.last();
        assert_eq!(h.row(), 9);
        assert_eq!(h.offset(), 5);
        h.first();
        assert_eq!((h.row(), h.offset()), (0, 0));
    }

    #[test]
    fn set_clamps() {
        let mut h = Highlight::new(5, 3);
        h.set(100);
        assert_eq!(h.row(), 4);
        assert_eq!(h.offset(), 2);
    }

    #[test]
    fn empty_is_noop() {
        let mut h = Highlight::new(0, 5);
        h.down();
        h.up();
        h.last();
        assert_eq!(h.row(), 0);
    }

    #[test]
    fn scrolling_follows_highlight() {
        let mut h = Highlight::new(4, 2);
        h.down();
        assert_eq!(h.offset(), 0);
        h.down();
        assert_eq!(h.offset(), 1);
        h.down();
        assert_eq!(h.offset(), 2);
        h.down();
        assert_eq!((h.row(), h.offset()), (0, 0));
    }

    #[test]
    fn shrinking_visible_scrolls_to_row() {
        let mut h = Highlight::new(6, 8);
        h.set(3);
        assert_eq!(h.offset(), 0);
        h.set_visible(2);
        assert_eq!(h.offset(), 2);
    }

    #[test]
    fn growing_visible_pulls_offset_back() {
        let mut h = Highlight::new(6, 2);
        h.last();
        assert_eq!(h.offset(), 4);
        h.set_visible(6);
        assert_eq!(h.offset(), 0);
    }
}
