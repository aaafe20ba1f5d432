//! Column manager handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::event::{PointerEvent, PointerKind, Position};
use crate::geometry::Rect;
use crate::listeners::{Document, Subscription};

use super::item::ColumnDescriptor;
use super::menu::{HeaderCell, MenuEntry, OptionsMenu, ReorderGhost, drop_target};
use super::projection::ColumnProjection;

/// Internal state for the column manager.
#[derive(Debug)]
struct ColumnInner {
    /// The caller's descriptors. Identity matters: replacing them with a
    /// different allocation resets the projection.
    descriptors: Arc<[ColumnDescriptor]>,
    projection: ColumnProjection,
    menu: OptionsMenu,
    ghost: Option<ReorderGhost>,
    /// Rendered header cells, in screen coordinates.
    header_cells: Vec<HeaderCell>,
}

impl ColumnInner {
    fn new(descriptors: Arc<[ColumnDescriptor]>) -> Self {
        Self {
            projection: ColumnProjection::new(&descriptors),
            descriptors,
            menu: OptionsMenu::default(),
            ghost: None,
            header_cells: Vec::new(),
        }
    }

    /// Finish a reorder at `x`. Returns whether the order changed.
    fn drop_ghost(&mut self, x: u16) -> bool {
        let Some(ghost) = self.ghost.take() else {
            return false;
        };
        let Some(target) = drop_target(&self.header_cells, x).map(str::to_string) else {
            log::debug!("[columns] reorder of {} dropped outside the header", ghost.key);
            return false;
        };
        if target == ghost.key {
            return false;
        }
        let order = self.projection.effective_order(&self.descriptors);
        let Some(to) = order.iter().position(|k| *k == target) else {
            return false;
        };
        let moved = self.projection.move_key(&ghost.key, to, &self.descriptors);
        if moved {
            log::debug!("[columns] moved {} to {} (position of {})", ghost.key, to, target);
        }
        moved
    }
}

/// Document subscriptions the manager holds while its predicates are true.
#[derive(Default)]
struct Effects {
    outside_click: Option<Subscription>,
    ghost_move: Option<Subscription>,
    ghost_up: Option<Subscription>,
}

impl Effects {
    fn count(&self) -> usize {
        [&self.outside_click, &self.ghost_move, &self.ghost_up]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }
}

/// Per-column visibility and ordering over a shared descriptor list, plus
/// the header's options menu and reorder ghost.
///
/// Cloning the handle shares the state. Document listeners are reconciled
/// in [`commit`](Self::commit) and released when the last handle drops.
#[derive(Clone)]
pub struct ColumnManager {
    inner: Arc<RwLock<ColumnInner>>,
    effects: Arc<Mutex<Effects>>,
    dirty: Arc<AtomicBool>,
}

impl std::fmt::Debug for ColumnManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnManager")
            .field("inner", &self.inner)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ColumnManager {
    pub fn new(descriptors: impl Into<Arc<[ColumnDescriptor]>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ColumnInner::new(descriptors.into()))),
            effects: Arc::new(Mutex::new(Effects::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Descriptors
    // -------------------------------------------------------------------------

    pub fn descriptors(&self) -> Arc<[ColumnDescriptor]> {
        self.inner
            .read()
            .map(|g| Arc::clone(&g.descriptors))
            .unwrap_or_else(|_| Arc::from(Vec::new()))
    }

    /// Replace the descriptor list. A different allocation resets every
    /// column to visible, clears the explicit order and closes the menu and
    /// any reorder in progress; the same `Arc` is a no-op. Returns whether a
    /// reset happened.
    pub fn set_descriptors(&self, descriptors: Arc<[ColumnDescriptor]>) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            if Arc::ptr_eq(&guard.descriptors, &descriptors) {
                return false;
            }
            log::debug!("[columns] descriptors replaced ({} columns)", descriptors.len());
            *guard = ColumnInner::new(descriptors);
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn is_visible(&self, key: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.projection.is_visible(key))
            .unwrap_or(true)
    }

    /// Flip one column's visibility. Unknown keys are inserted, hidden.
    /// Returns the new visibility.
    pub fn toggle_visibility(&self, key: &str) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let visible = guard.projection.toggle(key);
            log::debug!("[columns] {} -> {}", key, if visible { "shown" } else { "hidden" });
            self.dirty.store(true, Ordering::SeqCst);
            return visible;
        }
        true
    }

    pub fn set_visible(&self, key: &str, visible: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.projection.set_visible(key, visible);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Make every known column visible.
    pub fn show_all(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.projection.show_all();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.projection.hidden_count())
            .unwrap_or(0)
    }

    /// Snapshot of the projection.
    pub fn projection(&self) -> ColumnProjection {
        self.inner
            .read()
            .map(|g| g.projection.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    /// Visible columns in display order. A non-empty `explicit_order` takes
    /// precedence over the stored order.
    pub fn visible_ordered_columns<S: AsRef<str>>(
        &self,
        explicit_order: &[S],
    ) -> Vec<ColumnDescriptor> {
        self.inner
            .read()
            .map(|g| g.projection.visible_ordered(&g.descriptors, explicit_order))
            .unwrap_or_default()
    }

    /// Visible columns in the stored (or declared) order.
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        self.visible_ordered_columns::<&str>(&[])
    }

    /// Every key in display order, hidden ones included.
    pub fn order(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.projection.effective_order(&g.descriptors))
            .unwrap_or_default()
    }

    /// Establish an explicit order. Unknown and repeated keys are dropped,
    /// missing keys are appended in declared order.
    pub fn set_order<S: AsRef<str>>(&self, keys: &[S]) {
        if let Ok(mut guard) = self.inner.write() {
            let ColumnInner {
                descriptors,
                projection,
                ..
            } = &mut *guard;
            projection.set_order(keys, descriptors);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move `key` to `to_index` in the full order. Returns whether it moved.
    pub fn move_column(&self, key: &str, to_index: usize) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let ColumnInner {
                descriptors,
                projection,
                ..
            } = &mut *guard;
            if projection.move_key(key, to_index, descriptors) {
                self.dirty.store(true, Ordering::SeqCst);
                return true;
            }
        }
        false
    }

    /// Return to declared order.
    pub fn reset_order(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.projection.clear_order();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Header hit regions
    // -------------------------------------------------------------------------

    /// Record where header cells were drawn.
    pub fn set_header_cells(&self, cells: Vec<HeaderCell>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.header_cells = cells;
        }
    }

    pub fn header_cells(&self) -> Vec<HeaderCell> {
        self.inner
            .read()
            .map(|g| g.header_cells.clone())
            .unwrap_or_default()
    }

    /// The header cell containing `position`.
    pub fn header_cell_at(&self, position: Position) -> Option<HeaderCell> {
        self.inner.read().ok().and_then(|g| {
            g.header_cells
                .iter()
                .find(|cell| cell.bounds.contains_point(position))
                .cloned()
        })
    }

    // -------------------------------------------------------------------------
    // Options menu
    // -------------------------------------------------------------------------

    pub fn is_menu_open(&self) -> bool {
        self.inner.read().map(|g| g.menu.is_open()).unwrap_or(false)
    }

    pub fn menu_anchor(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.menu.anchor().map(str::to_string))
    }

    pub fn menu_bounds(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| g.menu.bounds())
    }

    pub fn open_menu(&self, key: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.menu.open(key);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn close_menu(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.menu.is_open()
        {
            guard.menu.close();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Open the menu for `key`, or close it when it is already open for `key`.
    pub fn toggle_menu(&self, key: &str) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.menu.anchor() == Some(key) {
                guard.menu.close();
            } else {
                guard.menu.open(key);
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Record where the menu was drawn; enables outside-click dismissal.
    pub fn set_menu_bounds(&self, bounds: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.menu.set_bounds(bounds);
        }
    }

    /// Every column with its visibility, in declared order, so hidden
    /// columns can be re-shown.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.inner
            .read()
            .map(|g| {
                g.descriptors
                    .iter()
                    .map(|d| MenuEntry {
                        key: d.key.clone(),
                        label: d.label.clone(),
                        visible: g.projection.is_visible(&d.key),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Reorder ghost
    // -------------------------------------------------------------------------

    /// Start dragging `key`'s header. Returns false for unknown keys.
    pub fn begin_reorder(&self, key: &str, position: Position) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let Some(label) = guard
                .descriptors
                .iter()
                .find(|d| d.key == key)
                .map(|d| d.label.clone())
            else {
                return false;
            };
            log::debug!("[columns] reorder start {}", key);
            guard.ghost = Some(ReorderGhost {
                key: key.to_string(),
                label,
                position,
            });
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }

    pub fn ghost(&self) -> Option<ReorderGhost> {
        self.inner.read().ok().and_then(|g| g.ghost.clone())
    }

    pub fn is_reordering(&self) -> bool {
        self.inner.read().map(|g| g.ghost.is_some()).unwrap_or(false)
    }

    /// Drop the ghost without reordering.
    pub fn cancel_reorder(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.ghost.take().is_some()
        {
            log::debug!("[columns] reorder cancelled");
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Finish the reorder at `x`. The dragged column takes the position of
    /// the header under the pointer, so neighbours shift toward where it
    /// came from. Returns whether the order changed.
    pub fn finish_reorder(&self, x: u16) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.ghost.is_some()
        {
            self.dirty.store(true, Ordering::SeqCst);
            return guard.drop_ghost(x);
        }
        false
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    /// Reconcile document listeners with current state: an outside-click
    /// listener while the menu is open, move/up listeners while a reorder
    /// is in progress. Listeners added here see only later dispatches.
    pub fn commit(&self, document: &Document) {
        let (menu_open, reordering) = self
            .inner
            .read()
            .map(|g| (g.menu.is_open(), g.ghost.is_some()))
            .unwrap_or((false, false));

        let Ok(mut effects) = self.effects.lock() else {
            return;
        };

        match (menu_open, effects.outside_click.is_some()) {
            (true, false) => {
                effects.outside_click = Some(self.subscribe_outside_click(document));
            }
            (false, true) => {
                log::trace!("[columns] outside-click listener released");
                effects.outside_click = None;
            }
            _ => {}
        }

        match (reordering, effects.ghost_move.is_some()) {
            (true, false) => {
                effects.ghost_move = Some(self.subscribe_ghost(document, PointerKind::Move));
                effects.ghost_up = Some(self.subscribe_ghost(document, PointerKind::Up));
            }
            (false, true) => {
                log::trace!("[columns] reorder listeners released");
                effects.ghost_move = None;
                effects.ghost_up = None;
            }
            _ => {}
        }
    }

    /// Drop every document listener, e.g. when the header unmounts.
    pub fn release(&self) {
        if let Ok(mut effects) = self.effects.lock() {
            *effects = Effects::default();
        }
    }

    /// Live document listeners held by this manager.
    pub fn listener_count(&self) -> usize {
        self.effects.lock().map(|e| e.count()).unwrap_or(0)
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    fn subscribe_outside_click(&self, document: &Document) -> Subscription {
        let weak = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        document.subscribe(PointerKind::Down, move |event| {
            with_inner(&weak, |inner| {
                if inner.menu.is_open() && inner.menu.is_outside(event.position) {
                    log::debug!("[columns] outside click closes menu");
                    inner.menu.close();
                    dirty.store(true, Ordering::SeqCst);
                }
            });
        })
    }

    fn subscribe_ghost(&self, document: &Document, kind: PointerKind) -> Subscription {
        let weak = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        document.subscribe(kind, move |event: &PointerEvent| {
            with_inner(&weak, |inner| match event.kind {
                PointerKind::Move => {
                    if let Some(ghost) = inner.ghost.as_mut()
                        && ghost.position != event.position
                    {
                        ghost.position = event.position;
                        dirty.store(true, Ordering::SeqCst);
                    }
                }
                PointerKind::Up => {
                    if inner.ghost.is_some() {
                        inner.drop_ghost(event.position.x);
                        dirty.store(true, Ordering::SeqCst);
                    }
                }
                PointerKind::Down => {}
            });
        })
    }
}

/// Run `f` against live state. Does nothing once the manager is gone.
fn with_inner(weak: &Weak<RwLock<ColumnInner>>, f: impl FnOnce(&mut ColumnInner)) {
    if let Some(inner) = weak.upgrade()
        && let Ok(mut guard) = inner.write()
    {
        f(&mut guard);
    }
}
