//! Column projection: visibility, ordering, options menu and reorder ghost.

mod item;
mod manager;
mod menu;
mod projection;

pub use item::ColumnDescriptor;
pub use manager::ColumnManager;
pub use menu::{HeaderCell, MenuEntry, OptionsMenu, ReorderGhost, drop_target};
pub use projection::{ColumnProjection, sanitize_order};
