//! Scroll regions, the synthetic scrollbar, and the coordinator that owns
//! the row window.

mod coordinator;
mod drag;
mod region;
mod scrollbar;

pub use coordinator::{ScrollCoordinator, WeakCoordinator};
pub use drag::{DragMode, pointer_delta};
pub use region::{ScrollChange, ScrollOffset, ScrollRegion};
pub use scrollbar::{ScrollbarGeometry, track_fraction};
