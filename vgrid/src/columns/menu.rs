//! Header-side transient state: the options menu, header hit regions and
//! the reorder ghost.

use crate::event::Position;
use crate::geometry::Rect;

/// The per-column options menu.
///
/// `bounds` is unknown until the host lays the menu out; outside-click
/// dismissal only applies once it is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsMenu {
    anchor: Option<String>,
    bounds: Option<Rect>,
}

impl OptionsMenu {
    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    /// Key of the column whose header opened the menu.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn open(&mut self, key: impl Into<String>) {
        self.anchor = Some(key.into());
        self.bounds = None;
    }

    pub fn close(&mut self) {
        self.anchor = None;
        self.bounds = None;
    }

    /// Record where the menu was drawn. Ignored while closed.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.is_open() {
            self.bounds = Some(bounds);
        }
    }

    /// Whether `position` lands outside known bounds.
    pub fn is_outside(&self, position: Position) -> bool {
        self.bounds
            .is_some_and(|bounds| !bounds.contains_point(position))
    }
}

/// One line of the options menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    pub visible: bool,
}

/// Screen area of one rendered header cell, used for hit testing and for
/// resolving reorder drop targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub bounds: Rect,
}

impl HeaderCell {
    pub fn new(key: impl Into<String>, bounds: Rect) -> Self {
        Self {
            key: key.into(),
            bounds,
        }
    }

    /// Whether `x` falls in this cell's column span.
    pub fn spans_x(&self, x: u16) -> bool {
        x >= self.bounds.left() && x < self.bounds.right()
    }
}

/// Floating copy of a header that follows the pointer while a column is
/// being dragged to a new position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderGhost {
    pub key: String,
    pub label: String,
    pub position: Position,
}

/// The key of the header cell under `x`, if any.
pub fn drop_target(cells: &[HeaderCell], x: u16) -> Option<&str> {
    cells
        .iter()
        .find(|cell| cell.spans_x(x))
        .map(|cell| cell.key.as_str())
}
