//! Screen layout of a grid: regions, header slots and the options menu.

use unicode_width::UnicodeWidthStr;

use crate::columns::{HeaderCell, MenuEntry};
use crate::event::Position;
use crate::geometry::Rect;

/// Glyph drawn in the last cell of each header to open the options menu.
pub const OPTIONS_GLYPH: char = '▾';

/// Screen areas of a mounted grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Everything the grid may draw in, menu included.
    pub area: Rect,
    /// One row of column headers.
    pub header: Rect,
    /// Row viewport.
    pub body: Rect,
    /// Vertical scrollbar track beside the body.
    pub scrollbar: Rect,
}

impl GridLayout {
    /// Header on top, scrollbar on the right of the body.
    pub fn split(area: Rect, scrollbar_width: u16) -> Self {
        let (header, rest) = area.split_top(1);
        let (body, scrollbar) = rest.split_right(scrollbar_width);
        Self {
            area,
            header,
            body,
            scrollbar,
        }
    }
}

/// A visible column's placement in header content coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSlot {
    pub key: String,
    pub label: String,
    /// Offset of the column's first cell from the content origin.
    pub start: usize,
    pub width: u16,
}

impl HeaderSlot {
    pub fn end(&self) -> usize {
        self.start + self.width as usize
    }

    /// Clip to a region showing content columns `[left, left + bounds.width)`.
    pub fn screen_cell(&self, bounds: Rect, left: usize) -> Option<HeaderCell> {
        let right = left + bounds.width as usize;
        if self.end() <= left || self.start >= right {
            return None;
        }
        let x0 = self.start.max(left) - left;
        let x1 = self.end().min(right) - left;
        Some(HeaderCell::new(
            self.key.clone(),
            Rect::new(bounds.x + x0 as u16, bounds.y, (x1 - x0) as u16, bounds.height),
        ))
    }

    /// Screen column of this slot's options glyph, when it is in view.
    pub fn glyph_x(&self, bounds: Rect, left: usize) -> Option<u16> {
        let glyph = self.end().checked_sub(1)?;
        (glyph >= left && glyph < left + bounds.width as usize)
            .then(|| bounds.x + (glyph - left) as u16)
    }
}

/// What a menu line does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Toggle(String),
    ShowAll,
}

/// One laid-out menu line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub text: String,
    pub bounds: Rect,
}

/// The options menu as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub bounds: Rect,
    pub items: Vec<MenuItem>,
}

impl MenuLayout {
    /// Lay out `entries` below `anchor`, kept inside `area`.
    pub fn new(entries: &[MenuEntry], anchor: Rect, area: Rect) -> Self {
        let mut lines: Vec<(MenuAction, String)> = entries
            .iter()
            .map(|e| {
                let mark = if e.visible { 'x' } else { ' ' };
                (MenuAction::Toggle(e.key.clone()), format!("[{mark}] {}", e.label))
            })
            .collect();
        lines.push((MenuAction::ShowAll, "Show all".to_string()));

        let widest = lines.iter().map(|(_, t)| t.width()).max().unwrap_or(0);
        let width = (widest as u16 + 2).min(area.width);
        let y = anchor.bottom().max(area.y);
        let height = (lines.len() as u16).min(area.bottom().saturating_sub(y));
        let x = anchor.x.min(area.right().saturating_sub(width)).max(area.x);
        let bounds = Rect::new(x, y, width, height);

        let items = lines
            .into_iter()
            .take(height as usize)
            .enumerate()
            .map(|(i, (action, text))| MenuItem {
                action,
                text,
                bounds: Rect::new(x, y + i as u16, width, 1),
            })
            .collect();

        Self { bounds, items }
    }

    pub fn item_at(&self, position: Position) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.bounds.contains_point(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: usize, width: u16) -> HeaderSlot {
        HeaderSlot {
            key: "k".into(),
            label: "K".into(),
            start,
            width,
        }
    }

    #[test]
    fn slot_clips_to_scrolled_region() {
        let header = Rect::new(2, 0, 10, 1);
        let cell = slot(5, 6).screen_cell(header, 8).unwrap();
        assert_eq!(cell.bounds, Rect::new(2, 0, 3, 1));
        assert!(slot(0, 4).screen_cell(header, 8).is_none());
    }

    #[test]
    fn glyph_only_when_last_cell_visible() {
        let header = Rect::new(0, 0, 10, 1);
        assert_eq!(slot(0, 4).glyph_x(header, 0), Some(3));
        assert_eq!(slot(8, 6).glyph_x(header, 0), None);
    }
}
