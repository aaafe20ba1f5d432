//! Scroll and drag coordination.
//!
//! The coordinator is the only writer of the row window's start index. It
//! folds three input sources into it (wheel and native body scroll,
//! scrollbar drag, body pan-drag) and mirrors the body's horizontal offset
//! onto the header.
//!
//! The body's vertical offset is kept equal to the start index: its content
//! height is `max_start + viewport height`, so the two ranges coincide. A
//! write that only mirrors the current value back is a no-op, which keeps
//! the scrollbar and the body from feeding each other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::event::{EventResult, PointerEvent, PointerKind, WheelEvent};
use crate::geometry::Rect;
use crate::listeners::{Document, Subscription};
use crate::window::RowWindow;

use super::drag::{DragMode, pointer_delta};
use super::region::{ScrollChange, ScrollRegion};
use super::scrollbar::{ScrollbarGeometry, track_fraction};

/// Internal state for the coordinator.
#[derive(Debug)]
struct CoordinatorInner {
    window: RowWindow,
    drag: DragMode,
    /// Scrollbar track bounds; `None` until mounted.
    track: Option<Rect>,
    wheel_step: usize,
    pan_enabled: bool,
}

/// Subscriptions held while their predicates are true.
#[derive(Default)]
struct Effects {
    /// Body scroll listener, while mounted.
    sync: Option<Subscription>,
    /// Document move/up listeners, while a drag is active.
    drag_move: Option<Subscription>,
    drag_up: Option<Subscription>,
}

impl Effects {
    fn count(&self) -> usize {
        [&self.sync, &self.drag_move, &self.drag_up]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }
}

/// Owner of the row window and the drag state for one grid.
///
/// Cloning shares the state. Listener closures hold a [`WeakCoordinator`],
/// so they never keep the coordinator alive and always read current state.
#[derive(Clone)]
pub struct ScrollCoordinator {
    inner: Arc<RwLock<CoordinatorInner>>,
    body: ScrollRegion,
    header: ScrollRegion,
    effects: Arc<Mutex<Effects>>,
    dirty: Arc<AtomicBool>,
}

impl std::fmt::Debug for ScrollCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("inner", &self.inner)
            .field("body", &self.body)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Non-owning handle used inside listener closures.
#[derive(Clone)]
pub struct WeakCoordinator {
    inner: Weak<RwLock<CoordinatorInner>>,
    effects: Weak<Mutex<Effects>>,
    body: ScrollRegion,
    header: ScrollRegion,
    dirty: Arc<AtomicBool>,
}

impl WeakCoordinator {
    /// The coordinator, if it is still alive.
    pub fn upgrade(&self) -> Option<ScrollCoordinator> {
        Some(ScrollCoordinator {
            inner: self.inner.upgrade()?,
            effects: self.effects.upgrade()?,
            body: self.body.clone(),
            header: self.header.clone(),
            dirty: Arc::clone(&self.dirty),
        })
    }
}

impl ScrollCoordinator {
    pub fn new(window: RowWindow) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CoordinatorInner {
                window,
                drag: DragMode::None,
                track: None,
                wheel_step: 3,
                pan_enabled: true,
            })),
            body: ScrollRegion::new("body"),
            header: ScrollRegion::new("header"),
            effects: Arc::new(Mutex::new(Effects::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Rows per wheel notch (floored to 1).
    pub fn with_wheel_step(self, step: usize) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.wheel_step = step.max(1);
        }
        self
    }

    /// Enable or disable pan-drag on the body.
    pub fn with_pan(self, enabled: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.pan_enabled = enabled;
        }
        self
    }

    pub fn downgrade(&self) -> WeakCoordinator {
        WeakCoordinator {
            inner: Arc::downgrade(&self.inner),
            effects: Arc::downgrade(&self.effects),
            body: self.body.clone(),
            header: self.header.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }

    pub fn body(&self) -> &ScrollRegion {
        &self.body
    }

    pub fn header(&self) -> &ScrollRegion {
        &self.header
    }

    // -------------------------------------------------------------------------
    // Window
    // -------------------------------------------------------------------------

    /// Snapshot of the row window.
    pub fn window(&self) -> RowWindow {
        self.inner.read().map(|g| g.window).unwrap_or_default()
    }

    pub fn start_row_index(&self) -> usize {
        self.window().start_row_index()
    }

    /// Request a start index. Returns the clamped value actually applied.
    pub fn set_start_row_index(&self, requested: usize) -> usize {
        self.update_window(|w| {
            w.set_start_row_index(requested);
        })
    }

    /// Replace the data length, re-clamping the start.
    pub fn set_data_length(&self, len: usize) {
        self.update_window(|w| w.set_data_length(len));
        self.sync_body_extent();
    }

    /// Replace the page size, re-clamping the start.
    pub fn set_rows_per_page(&self, rows_per_page: usize) {
        self.update_window(|w| w.set_rows_per_page(rows_per_page));
        self.sync_body_extent();
    }

    /// Move the window by whole rows. Returns whether it moved.
    pub fn scroll_rows(&self, delta: isize) -> bool {
        self.navigate(|w| w.scroll_by(delta))
    }

    pub fn page_down(&self) -> bool {
        self.navigate(RowWindow::page_down)
    }

    pub fn page_up(&self) -> bool {
        self.navigate(RowWindow::page_up)
    }

    pub fn to_top(&self) -> bool {
        self.navigate(RowWindow::to_top)
    }

    pub fn to_bottom(&self) -> bool {
        self.navigate(RowWindow::to_bottom)
    }

    fn navigate(&self, f: impl FnOnce(&mut RowWindow) -> bool) -> bool {
        let before = self.start_row_index();
        self.update_window(|w| {
            f(w);
        }) != before
    }

    /// Apply `f` to the window, then mirror the start onto the body.
    /// Returns the resulting start index.
    fn update_window(&self, f: impl FnOnce(&mut RowWindow)) -> usize {
        let (before, after) = match self.inner.write() {
            Ok(mut guard) => {
                let before = guard.window;
                f(&mut guard.window);
                (before, guard.window)
            }
            Err(_) => return 0,
        };
        if before != after {
            self.dirty.store(true, Ordering::SeqCst);
        }
        self.body.set_scroll_top(after.start_row_index());
        after.start_row_index()
    }

    /// Keep the body's vertical range equal to the window's start range.
    fn sync_body_extent(&self) {
        let window = self.window();
        let height = window.max_start_row_index() + self.body.viewport_height();
        self.body.set_content_height(height);
        self.body.set_scroll_top(window.start_row_index());
    }

    // -------------------------------------------------------------------------
    // Mounting
    // -------------------------------------------------------------------------

    /// Attach header, body and scrollbar track. Subscriptions follow at the
    /// next [`commit`](Self::commit). Mounting again while mounted moves
    /// the elements without moving the window.
    pub fn mount(&self, header: Rect, body: Rect, track: Rect) {
        log::debug!("[scroll] mount body={:?} track={:?}", body, track);
        self.header.mount(header);
        // Size the body for its new bounds before they apply, so the
        // re-clamp on mount cannot pull the offset below the start index.
        self.body.unmount();
        self.body
            .set_content_height(self.window().max_start_row_index() + body.height as usize);
        self.body.mount(body);
        if let Ok(mut guard) = self.inner.write() {
            guard.track = Some(track);
        }
        self.sync_body_extent();
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Detach every element and drop every subscription. Any drag ends.
    pub fn unmount(&self) {
        log::debug!("[scroll] unmount");
        if let Ok(mut guard) = self.inner.write() {
            guard.track = None;
            guard.drag = DragMode::None;
        }
        self.header.unmount();
        self.body.unmount();
        self.release();
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.body.is_mounted()
    }

    pub fn track(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| g.track)
    }

    /// Thumb placement, or `None` while unmounted.
    pub fn scrollbar(&self) -> Option<ScrollbarGeometry> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.track.map(|track| ScrollbarGeometry::compute(track, &g.window)))
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    pub fn drag_mode(&self) -> DragMode {
        self.inner.read().map(|g| g.drag).unwrap_or_default()
    }

    /// Element-level pointer-down. Starts a scrollbar drag on the track or a
    /// pan-drag on the body; starting one replaces any other.
    pub fn on_pointer_down(&self, event: &PointerEvent) -> EventResult {
        if event.kind != PointerKind::Down || !event.is_primary() {
            return EventResult::Ignored;
        }
        let position = event.position;

        let mode = {
            let Ok(mut guard) = self.inner.write() else {
                return EventResult::Ignored;
            };
            let mode = if guard.track.is_some_and(|t| t.contains_point(position)) {
                DragMode::Scrollbar
            } else if guard.pan_enabled && self.body.contains(position.x, position.y) {
                DragMode::Table { last: position }
            } else {
                return EventResult::Ignored;
            };
            if guard.drag.is_active() {
                log::debug!("[scroll] {} drag replaced", guard.drag.label());
            }
            guard.drag = mode;
            mode
        };

        log::debug!("[scroll] {} drag start at {:?}", mode.label(), position);
        self.dirty.store(true, Ordering::SeqCst);
        if mode == DragMode::Scrollbar {
            self.drag_scrollbar_to(position.y);
        }
        EventResult::StartDrag
    }

    /// Pointer-move while a drag is active. Registered on the document at
    /// commit, so it keeps tracking outside the grid.
    pub fn on_pointer_move(&self, event: &PointerEvent) {
        match self.drag_mode() {
            DragMode::None => {}
            DragMode::Scrollbar => {
                self.drag_scrollbar_to(event.position.y);
            }
            DragMode::Table { last } => {
                let (dx, dy) = pointer_delta(last, event.position);
                if let Ok(mut guard) = self.inner.write()
                    && matches!(guard.drag, DragMode::Table { .. })
                {
                    guard.drag = DragMode::Table {
                        last: event.position,
                    };
                }
                if dx != 0 || dy != 0 {
                    // The viewport moves opposite to the pointer.
                    self.body.scroll_by(-dx, -dy);
                }
            }
        }
    }

    /// Pointer-up ends any drag.
    pub fn on_pointer_up(&self, _event: &PointerEvent) {
        if let Ok(mut guard) = self.inner.write()
            && guard.drag.is_active()
        {
            log::debug!("[scroll] {} drag end", guard.drag.label());
            guard.drag = DragMode::None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Map a pointer row on the track to a start index. Does nothing while
    /// the track is unmounted or when the index would not change.
    fn drag_scrollbar_to(&self, y: u16) {
        let (track, window) = match self.inner.read() {
            Ok(guard) => match guard.track {
                Some(track) => (track, guard.window),
                None => return,
            },
            Err(_) => return,
        };
        let index = window.index_for_ratio(track_fraction(track, y));
        if index != window.start_row_index() && index <= window.max_start_row_index() {
            log::trace!("[scroll] scrollbar -> {}", index);
            self.set_start_row_index(index);
        }
    }

    /// Wheel over the body or the track. Vertical notches move the window
    /// by `wheel_step` rows; horizontal notches (or shift+wheel) scroll the
    /// body sideways.
    pub fn on_wheel(&self, event: &WheelEvent) -> EventResult {
        let (step, over_track) = match self.inner.read() {
            Ok(g) => (
                g.wheel_step as isize,
                g.track.is_some_and(|t| t.contains_point(event.position)),
            ),
            Err(_) => return EventResult::Ignored,
        };
        let over_body = self.body.contains(event.position.x, event.position.y);
        if !over_body && !over_track {
            return EventResult::Ignored;
        }

        let (dx, dy) = if event.modifiers.shift && event.delta_x == 0 {
            (event.delta_y as isize, 0)
        } else {
            (event.delta_x as isize, event.delta_y as isize)
        };
        if dy != 0 {
            self.scroll_rows(dy * step);
        }
        if dx != 0 {
            self.body.scroll_by(dx * step, 0);
        }
        EventResult::Consumed
    }

    /// Scroll the body horizontally to `left`; the header follows.
    pub fn set_scroll_left(&self, left: usize) -> bool {
        self.body.set_scroll_left(left)
    }

    /// Body offsets changed: move the header, and the window when the body
    /// moved vertically.
    fn on_body_scroll(&self, change: &ScrollChange) {
        if change.horizontal() {
            self.header.set_scroll_left(change.current.left);
        }
        if change.vertical() {
            let applied = match self.inner.write() {
                Ok(mut guard) => {
                    let previous = guard.window.start_row_index();
                    let applied = guard.window.set_start_row_index(change.current.top);
                    (applied != previous).then_some(applied)
                }
                Err(_) => None,
            };
            if let Some(applied) = applied {
                log::trace!("[scroll] body scroll -> start {}", applied);
            }
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    /// Reconcile subscriptions with current state: body scroll sync while
    /// mounted, document move/up listeners while a drag is active.
    pub fn commit(&self, document: &Document) {
        let mounted = self.is_mounted();
        let dragging = self.drag_mode().is_active();

        let synced = {
            let Ok(mut effects) = self.effects.lock() else {
                return;
            };

            let synced = match (mounted, effects.sync.is_some()) {
                (true, false) => {
                    let weak = self.downgrade();
                    effects.sync = Some(self.body.on_scroll(move |change| {
                        if let Some(this) = weak.upgrade() {
                            this.on_body_scroll(change);
                        }
                    }));
                    log::trace!("[scroll] body sync attached");
                    true
                }
                (false, true) => {
                    effects.sync = None;
                    log::trace!("[scroll] body sync detached");
                    false
                }
                _ => false,
            };

            match (dragging, effects.drag_move.is_some()) {
                (true, false) => {
                    let weak = self.downgrade();
                    effects.drag_move = Some(document.subscribe(PointerKind::Move, move |event| {
                        if let Some(this) = weak.upgrade() {
                            this.on_pointer_move(event);
                        }
                    }));
                    let weak = self.downgrade();
                    effects.drag_up = Some(document.subscribe(PointerKind::Up, move |event| {
                        if let Some(this) = weak.upgrade() {
                            this.on_pointer_up(event);
                        }
                    }));
                }
                (false, true) => {
                    effects.drag_move = None;
                    effects.drag_up = None;
                    log::trace!("[scroll] drag listeners released");
                }
                _ => {}
            }
            synced
        };

        // A freshly attached sync starts from the body's current offset.
        if synced {
            self.header.set_scroll_left(self.body.scroll_left());
        }
    }

    /// Drop every subscription.
    pub fn release(&self) {
        if let Ok(mut effects) = self.effects.lock() {
            *effects = Effects::default();
        }
    }

    /// Live subscriptions held by the coordinator (body sync included).
    pub fn listener_count(&self) -> usize {
        self.effects.lock().map(|e| e.count()).unwrap_or(0)
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&self) -> bool {
        let body = self.body.take_dirty();
        let header = self.header.take_dirty();
        self.dirty.swap(false, Ordering::SeqCst) | body | header
    }
}
