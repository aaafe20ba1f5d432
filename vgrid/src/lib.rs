//! Headless virtualized table engine.
//!
//! - [`window`]: the row window over a large in-memory dataset.
//! - [`scroll`]: scroll regions, the synthetic scrollbar, and the
//!   coordinator folding wheel, scrollbar drag and pan-drag into the window.
//! - [`columns`]: visibility and ordering projection, options menu and
//!   reorder ghost.
//! - [`grid`]: all three composed for one rendered table.
//!
//! Components are handles over shared state. Gesture listeners are attached
//! to a [`Document`](listeners::Document) at commit time and released as
//! soon as the gesture ends or the component unmounts.

pub mod columns;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod listeners;
pub mod row;
pub mod scroll;
pub mod window;

pub use columns::{ColumnDescriptor, ColumnManager, ColumnProjection};
pub use config::GridConfig;
pub use error::ConfigError;
pub use event::{Event, EventResult, Key, PointerEvent, PointerKind, Position, WheelEvent};
pub use geometry::Rect;
pub use grid::{GridLayout, VirtualGrid};
pub use listeners::{Document, Listeners, Subscription};
pub use row::{CellRenderer, CellValue, Row, RowKey};
pub use scroll::{DragMode, ScrollCoordinator, ScrollOffset, ScrollRegion, ScrollbarGeometry};
pub use window::RowWindow;

/// Commonly used types.
pub mod prelude {
    pub use crate::columns::{ColumnDescriptor, ColumnManager};
    pub use crate::config::GridConfig;
    pub use crate::event::{Event, EventResult, Key, PointerEvent, Position, WheelEvent};
    pub use crate::geometry::Rect;
    pub use crate::grid::{GridLayout, VirtualGrid};
    pub use crate::row::{CellRenderer, CellValue, Row};
    pub use crate::window::RowWindow;
}
