//! Row windowing.
//!
//! [`RowWindow`] owns the start index of the materialized slice and derives
//! the range to render from the page size and the data length. It is a plain
//! value; the [`ScrollCoordinator`](crate::scroll::ScrollCoordinator) is the
//! only writer in a mounted grid.

use std::ops::Range;

/// The contiguous window of rows currently materialized.
///
/// Invariant: `0 <= start_row_index <= max(0, data_length - rows_per_page)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    start_row_index: usize,
    rows_per_page: usize,
    data_length: usize,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl RowWindow {
    /// A window at the top of the data. A zero page size is floored to 1.
    pub fn new(rows_per_page: usize, data_length: usize) -> Self {
        Self {
            start_row_index: 0,
            rows_per_page: rows_per_page.max(1),
            data_length,
        }
    }

    pub fn start_row_index(&self) -> usize {
        self.start_row_index
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Largest start index that still fills a page (0 when the data fits).
    pub fn max_start_row_index(&self) -> usize {
        self.data_length.saturating_sub(self.rows_per_page)
    }

    /// Clamp `requested` into range and store it. Returns the applied value.
    pub fn set_start_row_index(&mut self, requested: usize) -> usize {
        let applied = requested.min(self.max_start_row_index());
        if applied != requested {
            log::trace!(
                "[window] start {} clamped to {} (len {}, page {})",
                requested,
                applied,
                self.data_length,
                self.rows_per_page
            );
        }
        self.start_row_index = applied;
        applied
    }

    /// Half-open range of row indices to render.
    pub fn range(&self) -> Range<usize> {
        let end = (self.start_row_index + self.rows_per_page).min(self.data_length);
        self.start_row_index.min(end)..end
    }

    /// Number of rows in the window.
    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` is currently materialized.
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Replace the data length and re-clamp the start.
    pub fn set_data_length(&mut self, data_length: usize) {
        self.data_length = data_length;
        self.set_start_row_index(self.start_row_index);
    }

    /// Replace the page size (floored to 1) and re-clamp the start.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.set_start_row_index(self.start_row_index);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move the start by `delta` rows. Returns whether it changed.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let target = self.start_row_index.saturating_add_signed(delta);
        self.move_to(target)
    }

    pub fn page_down(&mut self) -> bool {
        self.move_to(self.start_row_index.saturating_add(self.rows_per_page))
    }

    pub fn page_up(&mut self) -> bool {
        self.move_to(self.start_row_index.saturating_sub(self.rows_per_page))
    }

    pub fn to_top(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn to_bottom(&mut self) -> bool {
        self.move_to(self.max_start_row_index())
    }

    fn move_to(&mut self, target: usize) -> bool {
        let previous = self.start_row_index;
        self.set_start_row_index(target) != previous
    }

    // -------------------------------------------------------------------------
    // Scrollbar mapping
    // -------------------------------------------------------------------------

    /// Position of the window within the data, `0.0` at the top and `1.0`
    /// at the last full page.
    pub fn thumb_ratio(&self) -> f64 {
        self.start_row_index as f64 / self.max_start_row_index().max(1) as f64
    }

    /// Start index for a track fraction: `floor(clamp(ratio) * max_start)`.
    pub fn index_for_ratio(&self, ratio: f64) -> usize {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        (ratio * self.max_start_row_index() as f64).floor() as usize
    }
}

/// Page size for a viewport `height` cells tall with rows `row_height` tall.
/// Never less than 1.
pub fn rows_per_page_for(height: u16, row_height: u16) -> usize {
    (height / row_height.max(1)).max(1) as usize
}
