//! Event routing for [`VirtualGrid`].
//!
//! Element-level handlers run first, in stacking order (menu, scrollbar and
//! body, header). Pointer events then go to the document listeners
//! registered at the previous commit, and the event ends with a commit.

use crate::event::{Event, EventResult, Key, PointerEvent, PointerKind};

use super::layout::MenuAction;
use super::state::VirtualGrid;

impl VirtualGrid {
    /// Route one input event, then commit.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        let result = match event {
            Event::Pointer(pointer) => {
                let element = if pointer.kind == PointerKind::Down {
                    self.pointer_down(pointer)
                } else {
                    EventResult::Ignored
                };
                let delivered = self.document.dispatch(pointer);
                if delivered > 0 && !element.is_handled() && pointer.kind != PointerKind::Down {
                    EventResult::Consumed
                } else {
                    element
                }
            }
            Event::Wheel(wheel) => self.scroll.on_wheel(wheel),
            Event::Key { key, .. } => self.key(*key),
            Event::Resize { .. } => EventResult::Ignored,
        };
        self.commit();
        result
    }

    fn pointer_down(&self, event: &PointerEvent) -> EventResult {
        if !event.is_primary() {
            return EventResult::Ignored;
        }
        self.menu_click(event)
            .or_else(|| self.scroll.on_pointer_down(event))
            .or_else(|| self.header_click(event))
    }

    /// A click on an open menu line.
    fn menu_click(&self, event: &PointerEvent) -> EventResult {
        let Some(menu) = self.menu_layout() else {
            return EventResult::Ignored;
        };
        if !menu.bounds.contains_point(event.position) {
            return EventResult::Ignored;
        }
        match menu.item_at(event.position).map(|item| &item.action) {
            Some(MenuAction::Toggle(key)) => {
                self.columns.toggle_visibility(key);
            }
            Some(MenuAction::ShowAll) => self.columns.show_all(),
            None => {}
        }
        EventResult::Consumed
    }

    /// The options glyph toggles the menu; anywhere else on a header starts
    /// a reorder.
    fn header_click(&self, event: &PointerEvent) -> EventResult {
        let Some(layout) = self.layout else {
            return EventResult::Ignored;
        };
        if !layout.header.contains_point(event.position) {
            return EventResult::Ignored;
        }
        let left = self.scroll.header().scroll_left();
        let Some(slot) = self.header_slots().into_iter().find(|slot| {
            slot.screen_cell(layout.header, left)
                .is_some_and(|cell| cell.bounds.contains_point(event.position))
        }) else {
            return EventResult::Ignored;
        };

        if slot.glyph_x(layout.header, left) == Some(event.position.x) {
            self.columns.toggle_menu(&slot.key);
            EventResult::Consumed
        } else if self.columns.begin_reorder(&slot.key, event.position) {
            EventResult::StartDrag
        } else {
            EventResult::Ignored
        }
    }

    fn key(&self, key: Key) -> EventResult {
        let step = self.config.wheel_step as isize;
        let handled = match key {
            Key::Up | Key::Char('k') => self.scroll.scroll_rows(-1),
            Key::Down | Key::Char('j') => self.scroll.scroll_rows(1),
            Key::PageUp => self.scroll.page_up(),
            Key::PageDown | Key::Char(' ') => self.scroll.page_down(),
            Key::Home | Key::Char('g') => self.scroll.to_top(),
            Key::End | Key::Char('G') => self.scroll.to_bottom(),
            Key::Left | Key::Char('h') => self.scroll.body().scroll_by(-step, 0),
            Key::Right | Key::Char('l') => self.scroll.body().scroll_by(step, 0),
            Key::Escape => {
                if self.columns.is_menu_open() {
                    self.columns.close_menu();
                    true
                } else if self.columns.is_reordering() {
                    self.columns.cancel_reorder();
                    true
                } else {
                    false
                }
            }
            _ => return EventResult::Ignored,
        };
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
