//! Independently scrollable regions (the header and the body).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::geometry::Rect;
use crate::listeners::{Listeners, Subscription};

/// Scroll offset of a region, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ScrollOffset {
    pub left: usize,
    pub top: usize,
}

impl ScrollOffset {
    pub const fn new(left: usize, top: usize) -> Self {
        Self { left, top }
    }
}

/// Emitted by a region whenever its offset changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChange {
    pub previous: ScrollOffset,
    pub current: ScrollOffset,
}

impl ScrollChange {
    pub fn horizontal(&self) -> bool {
        self.previous.left != self.current.left
    }

    pub fn vertical(&self) -> bool {
        self.previous.top != self.current.top
    }
}

#[derive(Debug, Default)]
struct RegionInner {
    name: &'static str,
    /// Screen bounds; `None` until mounted.
    bounds: Option<Rect>,
    content_width: usize,
    content_height: usize,
    offset: ScrollOffset,
}

impl RegionInner {
    fn max_offset(&self, bounds: Rect) -> ScrollOffset {
        ScrollOffset {
            left: self.content_width.saturating_sub(bounds.width as usize),
            top: self.content_height.saturating_sub(bounds.height as usize),
        }
    }

    fn clamp(&self, offset: ScrollOffset, bounds: Rect) -> ScrollOffset {
        let max = self.max_offset(bounds);
        ScrollOffset {
            left: offset.left.min(max.left),
            top: offset.top.min(max.top),
        }
    }
}

/// A mounted element with its own scroll offsets.
///
/// Offsets can only change while the region is mounted: scrolling an
/// unmounted region is a silent no-op, as are bounds reads.
#[derive(Debug, Clone)]
pub struct ScrollRegion {
    inner: Arc<RwLock<RegionInner>>,
    on_scroll: Listeners<ScrollChange>,
    dirty: Arc<AtomicBool>,
}

impl ScrollRegion {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegionInner {
                name,
                ..RegionInner::default()
            })),
            on_scroll: Listeners::new(),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.read().map(|g| g.name).unwrap_or("region")
    }

    // -------------------------------------------------------------------------
    // Mounting
    // -------------------------------------------------------------------------

    /// Attach the region at `bounds`. The offset is re-clamped.
    pub fn mount(&self, bounds: Rect) {
        let change = if let Ok(mut guard) = self.inner.write() {
            guard.bounds = Some(bounds);
            let previous = guard.offset;
            guard.offset = guard.clamp(previous, bounds);
            self.dirty.store(true, Ordering::SeqCst);
            (previous != guard.offset).then_some(ScrollChange {
                previous,
                current: guard.offset,
            })
        } else {
            None
        };
        if let Some(change) = change {
            self.on_scroll.emit(&change);
        }
    }

    /// Detach the region. The offset is kept for a later mount.
    pub fn unmount(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.bounds = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| g.bounds)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.bounds().is_some_and(|b| b.contains(x, y))
    }

    /// Visible height in rows, 0 while unmounted.
    pub fn viewport_height(&self) -> usize {
        self.bounds().map(|b| b.height as usize).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    pub fn content_size(&self) -> (usize, usize) {
        self.inner
            .read()
            .map(|g| (g.content_width, g.content_height))
            .unwrap_or((0, 0))
    }

    /// Set the scrollable extent. The offset is re-clamped when mounted.
    pub fn set_content_size(&self, width: usize, height: usize) {
        let change = if let Ok(mut guard) = self.inner.write() {
            guard.content_width = width;
            guard.content_height = height;
            let previous = guard.offset;
            if let Some(bounds) = guard.bounds {
                guard.offset = guard.clamp(previous, bounds);
            }
            (previous != guard.offset).then_some(ScrollChange {
                previous,
                current: guard.offset,
            })
        } else {
            None
        };
        if let Some(change) = change {
            self.dirty.store(true, Ordering::SeqCst);
            self.on_scroll.emit(&change);
        }
    }

    pub fn set_content_width(&self, width: usize) {
        let (_, height) = self.content_size();
        self.set_content_size(width, height);
    }

    pub fn set_content_height(&self, height: usize) {
        let (width, _) = self.content_size();
        self.set_content_size(width, height);
    }

    // -------------------------------------------------------------------------
    // Offsets
    // -------------------------------------------------------------------------

    pub fn offset(&self) -> ScrollOffset {
        self.inner.read().map(|g| g.offset).unwrap_or_default()
    }

    pub fn scroll_left(&self) -> usize {
        self.offset().left
    }

    pub fn scroll_top(&self) -> usize {
        self.offset().top
    }

    /// Largest reachable offset, or `None` while unmounted.
    pub fn max_offset(&self) -> Option<ScrollOffset> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.bounds.map(|b| g.max_offset(b)))
    }

    /// Scroll to `offset`, clamped to the content. Returns whether the
    /// offset changed. Listeners run after the state lock is released.
    pub fn scroll_to(&self, offset: ScrollOffset) -> bool {
        let change = match self.inner.write() {
            Ok(mut guard) => {
                let Some(bounds) = guard.bounds else {
                    return false;
                };
                let previous = guard.offset;
                let current = guard.clamp(offset, bounds);
                if current == previous {
                    return false;
                }
                guard.offset = current;
                ScrollChange { previous, current }
            }
            Err(_) => return false,
        };
        self.dirty.store(true, Ordering::SeqCst);
        self.on_scroll.emit(&change);
        true
    }

    /// Scroll by a signed delta on each axis.
    pub fn scroll_by(&self, dx: isize, dy: isize) -> bool {
        let current = self.offset();
        self.scroll_to(ScrollOffset {
            left: current.left.saturating_add_signed(dx),
            top: current.top.saturating_add_signed(dy),
        })
    }

    pub fn set_scroll_left(&self, left: usize) -> bool {
        let current = self.offset();
        self.scroll_to(ScrollOffset { left, ..current })
    }

    pub fn set_scroll_top(&self, top: usize) -> bool {
        let current = self.offset();
        self.scroll_to(ScrollOffset { top, ..current })
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register for offset changes.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_scroll(&self, callback: impl Fn(&ScrollChange) + Send + Sync + 'static) -> Subscription {
        self.on_scroll.subscribe(callback)
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.on_scroll.len()
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }
}
