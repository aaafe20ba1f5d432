//! Drag gesture state.

use crate::event::Position;

/// The single active drag gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    /// Dragging the synthetic scrollbar; the pointer's row drives the window.
    Scrollbar,
    /// Panning the body; `last` is the previous pointer position.
    Table { last: Position },
}

impl DragMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragMode::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DragMode::None => "none",
            DragMode::Scrollbar => "scrollbar",
            DragMode::Table { .. } => "table",
        }
    }
}

/// Pointer movement from `last` to `current`, in cells.
pub fn pointer_delta(last: Position, current: Position) -> (isize, isize) {
    (
        current.x as isize - last.x as isize,
        current.y as isize - last.y as isize,
    )
}
