use std::sync::Arc;

use vgrid::columns::{ColumnDescriptor, ColumnManager, HeaderCell};
use vgrid::event::{PointerEvent, PointerKind, Position};
use vgrid::geometry::Rect;
use vgrid::listeners::Document;

fn descriptors(keys: &[&str]) -> Arc<[ColumnDescriptor]> {
    keys.iter()
        .map(|k| ColumnDescriptor::new(*k, k.to_uppercase()))
        .collect::<Vec<_>>()
        .into()
}

fn keys(columns: &[ColumnDescriptor]) -> Vec<&str> {
    columns.iter().map(|c| c.key.as_str()).collect()
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_all_columns_start_visible() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    assert_eq!(keys(&manager.columns()), ["a", "b", "c"]);
    assert_eq!(manager.hidden_count(), 0);
}

#[test]
fn test_toggle_hides_and_explicit_order_drops_hidden() {
    let manager = ColumnManager::new(descriptors(&["A", "B", "C"]));
    assert!(!manager.toggle_visibility("B"));
    let columns = manager.visible_ordered_columns(&["C", "B", "A"]);
    assert_eq!(keys(&columns), ["C", "A"]);
}

#[test]
fn test_double_toggle_restores_and_leaves_others() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.toggle_visibility("c");
    let before = manager.projection();

    manager.toggle_visibility("a");
    manager.toggle_visibility("a");

    assert_eq!(manager.projection(), before);
    assert!(manager.is_visible("a"));
    assert!(!manager.is_visible("c"));
}

#[test]
fn test_toggle_unknown_key_inserts_it() {
    let manager = ColumnManager::new(descriptors(&["a"]));
    assert!(manager.is_visible("ghost"));
    assert!(!manager.toggle_visibility("ghost"));
    assert!(!manager.is_visible("ghost"));
    assert!(manager.toggle_visibility("ghost"));
    // Unknown keys never show up as columns.
    assert_eq!(keys(&manager.columns()), ["a"]);
}

#[test]
fn test_show_all() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.toggle_visibility("a");
    manager.toggle_visibility("b");
    manager.show_all();
    assert_eq!(keys(&manager.columns()), ["a", "b", "c"]);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_explicit_order_drops_unknown_and_repeated_keys() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    let columns = manager.visible_ordered_columns(&["c", "zzz", "a", "c"]);
    assert_eq!(keys(&columns), ["c", "a"]);
}

#[test]
fn test_explicit_order_never_contains_hidden_and_keeps_relative_order() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c", "d", "e"]));
    manager.toggle_visibility("b");
    manager.toggle_visibility("e");
    let order = ["e", "d", "c", "b", "a"];
    let columns = manager.visible_ordered_columns(&order);
    assert_eq!(keys(&columns), ["d", "c", "a"]);
}

#[test]
fn test_set_order_sanitizes_to_permutation() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.set_order(&["c", "c", "x"]);
    assert_eq!(manager.order(), ["c", "a", "b"]);
    assert_eq!(keys(&manager.columns()), ["c", "a", "b"]);
}

#[test]
fn test_empty_explicit_order_uses_stored_order() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.move_column("a", 2);
    let columns = manager.visible_ordered_columns::<&str>(&[]);
    assert_eq!(keys(&columns), ["b", "c", "a"]);
    manager.reset_order();
    assert_eq!(keys(&manager.columns()), ["a", "b", "c"]);
}

// ============================================================================
// Descriptor replacement
// ============================================================================

#[test]
fn test_new_descriptor_list_resets_visibility_and_order() {
    let manager = ColumnManager::new(descriptors(&["a", "b"]));
    manager.toggle_visibility("a");
    manager.move_column("b", 0);

    assert!(manager.set_descriptors(descriptors(&["a", "b", "c"])));
    assert_eq!(keys(&manager.columns()), ["a", "b", "c"]);
    assert_eq!(manager.hidden_count(), 0);
}

#[test]
fn test_same_descriptor_list_is_noop() {
    let list = descriptors(&["a", "b"]);
    let manager = ColumnManager::new(Arc::clone(&list));
    manager.toggle_visibility("a");
    assert!(!manager.set_descriptors(list));
    assert!(!manager.is_visible("a"));
}

// ============================================================================
// Options menu
// ============================================================================

#[test]
fn test_outside_click_closes_menu_and_listener_follows_state() {
    let document = Document::new();
    let manager = ColumnManager::new(descriptors(&["a", "b"]));
    manager.commit(&document);
    assert_eq!(document.total_listeners(), 0);

    manager.open_menu("a");
    manager.set_menu_bounds(Rect::new(10, 2, 12, 4));
    manager.commit(&document);
    assert_eq!(document.listener_count(PointerKind::Down), 1);

    // Inside the menu: stays open.
    document.dispatch(&PointerEvent::down(12, 3));
    assert!(manager.is_menu_open());

    // Outside: closes.
    document.dispatch(&PointerEvent::down(0, 0));
    assert!(!manager.is_menu_open());

    manager.commit(&document);
    assert_eq!(document.total_listeners(), 0);
}

#[test]
fn test_outside_click_ignored_until_menu_is_laid_out() {
    let document = Document::new();
    let manager = ColumnManager::new(descriptors(&["a"]));
    manager.open_menu("a");
    manager.commit(&document);
    document.dispatch(&PointerEvent::down(0, 0));
    assert!(manager.is_menu_open());
}

#[test]
fn test_toggle_menu_same_key_closes() {
    let manager = ColumnManager::new(descriptors(&["a", "b"]));
    manager.toggle_menu("a");
    assert_eq!(manager.menu_anchor().as_deref(), Some("a"));
    manager.toggle_menu("b");
    assert_eq!(manager.menu_anchor().as_deref(), Some("b"));
    manager.toggle_menu("b");
    assert!(!manager.is_menu_open());
}

#[test]
fn test_menu_entries_list_hidden_columns() {
    let manager = ColumnManager::new(descriptors(&["a", "b"]));
    manager.toggle_visibility("b");
    let entries = manager.menu_entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].visible);
    assert!(!entries[1].visible);
    assert_eq!(entries[1].label, "B");
}

#[test]
fn test_dropping_manager_releases_listeners() {
    let document = Document::new();
    let manager = ColumnManager::new(descriptors(&["a"]));
    manager.open_menu("a");
    manager.commit(&document);
    assert_eq!(document.total_listeners(), 1);
    drop(manager);
    assert_eq!(document.total_listeners(), 0);
}

// ============================================================================
// Reorder ghost
// ============================================================================

fn header_cells() -> Vec<HeaderCell> {
    vec![
        HeaderCell::new("a", Rect::new(0, 0, 10, 1)),
        HeaderCell::new("b", Rect::new(10, 0, 10, 1)),
        HeaderCell::new("c", Rect::new(20, 0, 10, 1)),
    ]
}

#[test]
fn test_ghost_follows_pointer_and_drop_reorders() {
    let document = Document::new();
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.set_header_cells(header_cells());

    assert!(manager.begin_reorder("a", Position::new(2, 0)));
    manager.commit(&document);
    assert_eq!(document.listener_count(PointerKind::Move), 1);
    assert_eq!(document.listener_count(PointerKind::Up), 1);

    document.dispatch(&PointerEvent::moved(15, 3));
    assert_eq!(manager.ghost().map(|g| g.position), Some(Position::new(15, 3)));

    document.dispatch(&PointerEvent::up(25, 0));
    assert!(!manager.is_reordering());
    assert_eq!(manager.order(), ["b", "c", "a"]);

    manager.commit(&document);
    assert_eq!(document.total_listeners(), 0);
}

#[test]
fn test_dropped_column_takes_target_position() {
    // Rightward: the target and everything between shift left.
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.set_header_cells(header_cells());
    manager.begin_reorder("a", Position::new(2, 0));
    assert!(manager.finish_reorder(15));
    assert_eq!(manager.order(), ["b", "a", "c"]);

    // Leftward: the target and everything between shift right.
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.set_header_cells(header_cells());
    manager.begin_reorder("c", Position::new(22, 0));
    assert!(manager.finish_reorder(5));
    assert_eq!(manager.order(), ["c", "a", "b"]);

    // Onto itself: nothing moves.
    manager.begin_reorder("c", Position::new(22, 0));
    assert!(!manager.finish_reorder(25));
    assert_eq!(manager.order(), ["c", "a", "b"]);
}

#[test]
fn test_drop_outside_header_keeps_order() {
    let manager = ColumnManager::new(descriptors(&["a", "b", "c"]));
    manager.set_header_cells(header_cells());
    manager.begin_reorder("c", Position::new(22, 0));
    assert!(!manager.finish_reorder(90));
    assert_eq!(manager.order(), ["a", "b", "c"]);
}

#[test]
fn test_cancel_reorder() {
    let manager = ColumnManager::new(descriptors(&["a", "b"]));
    assert!(!manager.begin_reorder("nope", Position::new(0, 0)));
    assert!(manager.begin_reorder("b", Position::new(0, 0)));
    assert_eq!(manager.ghost().map(|g| g.label), Some("B".to_string()));
    manager.cancel_reorder();
    assert!(manager.ghost().is_none());
}
