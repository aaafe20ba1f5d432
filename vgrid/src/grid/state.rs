//! Grid state: rows, the column manager and the scroll coordinator for one
//! rendered table.

use std::sync::Arc;

use crate::columns::{ColumnDescriptor, ColumnManager, HeaderCell};
use crate::config::GridConfig;
use crate::geometry::Rect;
use crate::listeners::Document;
use crate::row::{Row, clip_columns, derive_descriptors, fit_to_width};
use crate::scroll::{ScrollCoordinator, ScrollbarGeometry};
use crate::window::{RowWindow, rows_per_page_for};

use super::layout::{GridLayout, HeaderSlot, MenuLayout, OPTIONS_GLYPH};

/// A virtualized table: only the rows in the current window are
/// materialized.
#[derive(Debug)]
pub struct VirtualGrid {
    rows: Arc<[Row]>,
    /// Whether the descriptors came from the first row rather than the caller.
    derived_columns: bool,
    pub(super) columns: ColumnManager,
    pub(super) scroll: ScrollCoordinator,
    pub(super) document: Document,
    pub(super) config: GridConfig,
    pub(super) layout: Option<GridLayout>,
}

impl VirtualGrid {
    /// Build a grid over `rows`. Without descriptors, columns are the first
    /// row's keys in order.
    pub fn new(
        rows: impl Into<Arc<[Row]>>,
        descriptors: Option<Arc<[ColumnDescriptor]>>,
        config: GridConfig,
    ) -> Self {
        let rows: Arc<[Row]> = rows.into();
        let derived_columns = descriptors.is_none();
        let descriptors = descriptors.unwrap_or_else(|| derive_descriptors(&rows).into());
        let window = RowWindow::new(config.rows_per_page, rows.len());
        let scroll = ScrollCoordinator::new(window)
            .with_wheel_step(config.wheel_step)
            .with_pan(config.pan_enabled);

        log::debug!(
            "[grid] new: {} rows, {} columns{}",
            rows.len(),
            descriptors.len(),
            if derived_columns { " (derived)" } else { "" }
        );

        Self {
            rows,
            derived_columns,
            columns: ColumnManager::new(descriptors),
            scroll,
            document: Document::new(),
            config,
            layout: None,
        }
    }

    pub fn columns(&self) -> &ColumnManager {
        &self.columns
    }

    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &Arc<[Row]> {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the data. The window is re-clamped; derived columns are
    /// re-derived when the first row's keys changed.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[Row]>>) {
        self.rows = rows.into();
        log::debug!("[grid] set_rows: {}", self.rows.len());
        if self.derived_columns {
            let derived = derive_descriptors(&self.rows);
            let current = self.columns.descriptors();
            let same_keys = derived.len() == current.len()
                && derived.iter().zip(current.iter()).all(|(a, b)| a.key == b.key);
            if !same_keys {
                self.columns.set_descriptors(derived.into());
            }
        }
        self.scroll.set_data_length(self.rows.len());
        self.commit();
    }

    /// Replace the descriptors; `None` derives them from the rows. A
    /// different list resets visibility and order.
    pub fn set_descriptors(&mut self, descriptors: Option<Arc<[ColumnDescriptor]>>) {
        self.derived_columns = descriptors.is_none();
        let descriptors = descriptors.unwrap_or_else(|| derive_descriptors(&self.rows).into());
        self.columns.set_descriptors(descriptors);
        self.commit();
    }

    // -------------------------------------------------------------------------
    // Window
    // -------------------------------------------------------------------------

    pub fn window(&self) -> RowWindow {
        self.scroll.window()
    }

    /// Rows in the current window with their indices.
    pub fn visible_rows(&self) -> Vec<(usize, &Row)> {
        let range = self.window().range();
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        (start..end).zip(self.rows[start..end].iter()).collect()
    }

    pub fn scrollbar(&self) -> Option<ScrollbarGeometry> {
        self.scroll.scrollbar()
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Visible columns in display order.
    pub fn header_columns(&self) -> Vec<ColumnDescriptor> {
        self.columns.columns()
    }

    pub fn column_width(&self, descriptor: &ColumnDescriptor) -> u16 {
        descriptor.resolved_width(self.config.default_column_width)
    }

    /// Visible columns placed left to right in content coordinates.
    pub fn header_slots(&self) -> Vec<HeaderSlot> {
        let mut start = 0;
        self.header_columns()
            .into_iter()
            .map(|d| {
                let width = self.column_width(&d);
                let slot = HeaderSlot {
                    key: d.key,
                    label: d.label,
                    start,
                    width,
                };
                start += width as usize;
                slot
            })
            .collect()
    }

    /// Total width of the visible columns.
    pub fn content_width(&self) -> usize {
        self.header_slots().last().map(HeaderSlot::end).unwrap_or(0)
    }

    /// Header cells as currently on screen. Empty while unmounted.
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        let Some(layout) = self.layout else {
            return Vec::new();
        };
        let left = self.scroll.header().scroll_left();
        self.header_slots()
            .iter()
            .filter_map(|slot| slot.screen_cell(layout.header, left))
            .collect()
    }

    /// The options menu as it would be drawn, while open and mounted.
    pub fn menu_layout(&self) -> Option<MenuLayout> {
        let layout = self.layout?;
        let anchor_key = self.columns.menu_anchor()?;
        let anchor = self
            .header_cells()
            .into_iter()
            .find(|cell| cell.key == anchor_key)
            .map(|cell| cell.bounds)
            .unwrap_or(layout.header);
        Some(MenuLayout::new(&self.columns.menu_entries(), anchor, layout.area))
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// One cell fitted to `width`, leaving the last column as a gap.
    pub fn cell_text(&self, row: &Row, key: &str, width: u16) -> String {
        let width = width as usize;
        let mut text = row.cell_text(key, width.saturating_sub(1));
        if width > 0 {
            text.push(' ');
        }
        text
    }

    /// The header line as seen through the header region.
    pub fn header_text(&self) -> String {
        let line: String = self
            .header_slots()
            .iter()
            .map(|slot| {
                let width = slot.width as usize;
                let mut text = fit_to_width(&slot.label, width.saturating_sub(1));
                if width > 0 {
                    text.push(OPTIONS_GLYPH);
                }
                text
            })
            .collect();
        self.clip_to(&line, self.scroll.header().scroll_left(), self.layout.map(|l| l.header))
    }

    /// A body line as seen through the body region.
    pub fn row_text(&self, row: &Row) -> String {
        let line: String = self
            .header_slots()
            .iter()
            .map(|slot| self.cell_text(row, &slot.key, slot.width))
            .collect();
        self.clip_to(&line, self.scroll.body().scroll_left(), self.layout.map(|l| l.body))
    }

    fn clip_to(&self, line: &str, left: usize, bounds: Option<Rect>) -> String {
        match bounds {
            Some(bounds) => clip_columns(line, left, bounds.width as usize),
            None => line.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Mounting
    // -------------------------------------------------------------------------

    /// Attach the grid to screen areas. With `fit_to_viewport` the page size
    /// follows the body height.
    pub fn mount(&mut self, layout: GridLayout) {
        log::debug!("[grid] mount {:?}", layout.area);
        self.layout = Some(layout);
        self.scroll.mount(layout.header, layout.body, layout.scrollbar);
        if self.config.fit_to_viewport {
            self.scroll.set_rows_per_page(rows_per_page_for(layout.body.height, 1));
        }
        self.commit();
    }

    /// Detach from the screen, dropping every listener.
    pub fn unmount(&mut self) {
        log::debug!("[grid] unmount");
        self.layout = None;
        self.columns.cancel_reorder();
        self.columns.close_menu();
        self.columns.set_header_cells(Vec::new());
        self.columns.release();
        self.scroll.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.layout.is_some()
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    /// The effect boundary: refresh derived geometry, then reconcile every
    /// document and scroll subscription with current state.
    pub fn commit(&self) {
        if self.layout.is_some() {
            let width = self.content_width();
            self.scroll.body().set_content_width(width);
            self.scroll.header().set_content_width(width);
        }
        self.columns.set_header_cells(self.header_cells());
        if let Some(menu) = self.menu_layout() {
            self.columns.set_menu_bounds(menu.bounds);
        }
        self.columns.commit(&self.document);
        self.scroll.commit(&self.document);
    }

    /// Document listeners plus scroll subscriptions currently held.
    pub fn listener_count(&self) -> usize {
        self.columns.listener_count() + self.scroll.listener_count()
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&self) -> bool {
        let columns = self.columns.take_dirty();
        self.scroll.take_dirty() | columns
    }
}
