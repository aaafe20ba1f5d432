//! Synthetic scrollbar geometry.
//!
//! The thumb reflects the virtual position of the row window, not a native
//! scroll offset.

use crate::geometry::Rect;
use crate::window::RowWindow;

/// Track and thumb placement for the vertical scrollbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollbarGeometry {
    /// Screen bounds of the track.
    pub track: Rect,
    /// Offset of the thumb from the top of the track.
    pub handle_pos: u16,
    /// Length of the thumb, at least one cell.
    pub handle_size: u16,
}

impl ScrollbarGeometry {
    /// Place the thumb for `window` inside `track`.
    ///
    /// The thumb length is proportional to `rows_per_page / data_length`
    /// and fills the track when everything fits.
    pub fn compute(track: Rect, window: &RowWindow) -> Self {
        let height = track.height;
        if height == 0 {
            return Self {
                track,
                handle_pos: 0,
                handle_size: 0,
            };
        }

        let len = window.data_length();
        let page = window.rows_per_page();
        let handle_size = if len <= page {
            height
        } else {
            ((height as f64 * page as f64 / len as f64).round() as u16).clamp(1, height)
        };

        let travel = height - handle_size;
        let handle_pos = (window.thumb_ratio() * travel as f64).round() as u16;

        Self {
            track,
            handle_pos: handle_pos.min(travel),
            handle_size,
        }
    }

    /// Whether a point lies in the track.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.track.contains(x, y)
    }

    /// Whether a point lies on the thumb.
    pub fn handle_contains(&self, x: u16, y: u16) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let rel_y = y - self.track.y;
        rel_y >= self.handle_pos && rel_y < self.handle_pos + self.handle_size
    }

    /// Screen bounds of the thumb.
    pub fn handle_rect(&self) -> Rect {
        Rect::new(
            self.track.x,
            self.track.y + self.handle_pos,
            self.track.width,
            self.handle_size,
        )
    }
}

/// Fraction of the way down `track` that `y` lies, clamped to `[0, 1]`.
///
/// The first track cell maps to 0 and the last one to 1; rows outside the
/// track clamp to the nearer end. An empty track maps everything to 0.
pub fn track_fraction(track: Rect, y: u16) -> f64 {
    if track.height == 0 {
        return 0.0;
    }
    let span = track.height.saturating_sub(1).max(1);
    ((y as f64 - track.y as f64) / span as f64).clamp(0.0, 1.0)
}
