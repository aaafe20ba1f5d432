//! A grid composing the row window, the column manager and the scroll
//! coordinator.

mod events;
mod layout;
mod state;

pub use layout::{GridLayout, HeaderSlot, MenuAction, MenuItem, MenuLayout, OPTIONS_GLYPH};
pub use state::VirtualGrid;
