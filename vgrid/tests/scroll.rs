use vgrid::event::{EventResult, PointerEvent, PointerKind, WheelEvent};
use vgrid::geometry::Rect;
use vgrid::listeners::Document;
use vgrid::scroll::{
    DragMode, ScrollCoordinator, ScrollOffset, ScrollRegion, ScrollbarGeometry, track_fraction,
};
use vgrid::window::RowWindow;

const HEADER: Rect = Rect::new(0, 0, 80, 1);
const BODY: Rect = Rect::new(0, 1, 79, 100);
/// 101 cells, so the middle cell (y = 51) is exactly half way.
const TRACK: Rect = Rect::new(79, 1, 1, 101);

/// 10000 rows, 50 per page, mounted and committed.
fn mounted() -> (ScrollCoordinator, Document) {
    let coordinator = ScrollCoordinator::new(RowWindow::new(50, 10000));
    let document = Document::new();
    coordinator.mount(HEADER, BODY, TRACK);
    coordinator.body().set_content_width(400);
    coordinator.header().set_content_width(400);
    coordinator.commit(&document);
    (coordinator, document)
}

// ============================================================================
// Scrollbar drag
// ============================================================================

#[test]
fn test_scrollbar_drag_to_half_track() {
    let (coordinator, document) = mounted();
    let result = coordinator.on_pointer_down(&PointerEvent::down(79, 1));
    assert_eq!(result, EventResult::StartDrag);
    assert_eq!(coordinator.drag_mode(), DragMode::Scrollbar);
    coordinator.commit(&document);

    document.dispatch(&PointerEvent::moved(79, 51));
    assert_eq!(coordinator.start_row_index(), 4975);
}

#[test]
fn test_scrollbar_drag_extremes() {
    let (coordinator, document) = mounted();
    coordinator.on_pointer_down(&PointerEvent::down(79, 30));
    coordinator.commit(&document);

    // The last track cell reaches the end.
    document.dispatch(&PointerEvent::moved(79, TRACK.bottom() - 1));
    assert_eq!(coordinator.start_row_index(), 9950);

    document.dispatch(&PointerEvent::moved(79, TRACK.y));
    assert_eq!(coordinator.start_row_index(), 0);

    // Outside the track, even outside the grid, clamps to the nearer end.
    document.dispatch(&PointerEvent::moved(3, 400));
    assert_eq!(coordinator.start_row_index(), 9950);
    document.dispatch(&PointerEvent::moved(79, 0));
    assert_eq!(coordinator.start_row_index(), 0);
}

#[test]
fn test_click_on_last_track_cell_reaches_end() {
    let coordinator = ScrollCoordinator::new(RowWindow::new(50, 10000));
    let track = Rect::new(79, 1, 1, 20);
    coordinator.mount(HEADER, Rect::new(0, 1, 79, 20), track);
    coordinator.on_pointer_down(&PointerEvent::down(79, track.bottom() - 1));
    assert_eq!(coordinator.start_row_index(), 9950);
}

#[test]
fn test_track_fraction_spans_first_to_last_cell() {
    let track = Rect::new(0, 5, 1, 11);
    assert_eq!(track_fraction(track, 5), 0.0);
    assert_eq!(track_fraction(track, 10), 0.5);
    assert_eq!(track_fraction(track, 15), 1.0);
    assert_eq!(track_fraction(track, 2), 0.0);
    assert_eq!(track_fraction(track, 99), 1.0);
    assert_eq!(track_fraction(Rect::new(0, 5, 1, 1), 5), 0.0);
    assert_eq!(track_fraction(Rect::new(0, 5, 1, 0), 7), 0.0);
}

#[test]
fn test_scrollbar_drag_is_monotonic() {
    let (coordinator, document) = mounted();
    coordinator.on_pointer_down(&PointerEvent::down(79, 1));
    coordinator.commit(&document);

    let mut previous = 0;
    for y in TRACK.y..TRACK.bottom() {
        document.dispatch(&PointerEvent::moved(79, y));
        let start = coordinator.start_row_index();
        assert!(start >= previous, "y={y}: {start} < {previous}");
        previous = start;
    }
    assert_eq!(previous, 9950);
}

#[test]
fn test_scrollbar_drag_mirrors_onto_body() {
    let (coordinator, document) = mounted();
    coordinator.on_pointer_down(&PointerEvent::down(79, 1));
    coordinator.commit(&document);
    document.dispatch(&PointerEvent::moved(79, 51));
    assert_eq!(coordinator.body().scroll_top(), 4975);
}

#[test]
fn test_remount_keeps_start_index() {
    let (coordinator, document) = mounted();
    assert!(coordinator.to_bottom());

    coordinator.mount(HEADER, Rect::new(0, 1, 79, 40), TRACK);
    coordinator.commit(&document);
    assert_eq!(coordinator.start_row_index(), 9950);

    coordinator.mount(HEADER, Rect::new(0, 1, 79, 140), TRACK);
    coordinator.commit(&document);
    assert_eq!(coordinator.start_row_index(), 9950);
    assert_eq!(coordinator.body().scroll_top(), 9950);
}

#[test]
fn test_drag_ignored_while_unmounted() {
    let coordinator = ScrollCoordinator::new(RowWindow::new(50, 10000));
    let result = coordinator.on_pointer_down(&PointerEvent::down(79, 50));
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(coordinator.start_row_index(), 0);
    assert!(coordinator.scrollbar().is_none());
}

// ============================================================================
// Pan drag
// ============================================================================

#[test]
fn test_pan_subtracts_pointer_delta() {
    let (coordinator, document) = mounted();
    coordinator.body().scroll_to(ScrollOffset::new(100, 200));

    let result = coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    assert_eq!(result, EventResult::StartDrag);
    coordinator.commit(&document);

    document.dispatch(&PointerEvent::moved(30, 15));
    assert_eq!(coordinator.body().offset(), ScrollOffset::new(90, 205));
    assert_eq!(coordinator.start_row_index(), 205);
}

#[test]
fn test_pan_tracks_incrementally() {
    let (coordinator, document) = mounted();
    coordinator.body().scroll_to(ScrollOffset::new(100, 200));
    coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    coordinator.commit(&document);

    document.dispatch(&PointerEvent::moved(25, 20));
    document.dispatch(&PointerEvent::moved(30, 20));
    assert_eq!(coordinator.body().scroll_left(), 90);
    assert_eq!(coordinator.drag_mode(), DragMode::Table { last: vgrid::Position::new(30, 20) });
}

#[test]
fn test_pan_disabled() {
    let coordinator = ScrollCoordinator::new(RowWindow::new(50, 10000)).with_pan(false);
    coordinator.mount(HEADER, BODY, TRACK);
    let result = coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(coordinator.drag_mode(), DragMode::None);
}

#[test]
fn test_starting_one_drag_replaces_the_other() {
    let (coordinator, _document) = mounted();
    coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    coordinator.on_pointer_down(&PointerEvent::down(79, 10));
    assert_eq!(coordinator.drag_mode(), DragMode::Scrollbar);
}

// ============================================================================
// Drag listeners
// ============================================================================

#[test]
fn test_drag_listeners_exist_only_while_dragging() {
    let (coordinator, document) = mounted();
    assert_eq!(document.total_listeners(), 0);

    coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    // Not registered until the commit boundary.
    assert_eq!(document.total_listeners(), 0);
    coordinator.commit(&document);
    assert_eq!(document.listener_count(PointerKind::Move), 1);
    assert_eq!(document.listener_count(PointerKind::Up), 1);

    document.dispatch(&PointerEvent::up(20, 20));
    assert_eq!(coordinator.drag_mode(), DragMode::None);
    coordinator.commit(&document);
    assert_eq!(document.total_listeners(), 0);
}

#[test]
fn test_unmount_releases_everything() {
    let (coordinator, document) = mounted();
    coordinator.on_pointer_down(&PointerEvent::down(20, 20));
    coordinator.commit(&document);
    assert!(coordinator.listener_count() > 0);

    coordinator.unmount();
    assert_eq!(coordinator.listener_count(), 0);
    assert_eq!(document.total_listeners(), 0);
    assert_eq!(coordinator.drag_mode(), DragMode::None);
}

#[test]
fn test_moves_without_drag_do_nothing() {
    let (coordinator, _document) = mounted();
    coordinator.on_pointer_move(&PointerEvent::moved(10, 10));
    assert_eq!(coordinator.body().offset(), ScrollOffset::default());
}

// ============================================================================
// Horizontal sync
// ============================================================================

#[test]
fn test_header_follows_body_horizontally() {
    let (coordinator, _document) = mounted();
    coordinator.set_scroll_left(37);
    assert_eq!(coordinator.header().scroll_left(), 37);

    coordinator.on_wheel(&WheelEvent::horizontal(10, 10, 2));
    assert_eq!(coordinator.body().scroll_left(), 43);
    assert_eq!(coordinator.header().scroll_left(), 43);
}

#[test]
fn test_header_never_drives_body() {
    let (coordinator, _document) = mounted();
    coordinator.header().set_scroll_left(12);
    assert_eq!(coordinator.body().scroll_left(), 0);
}

#[test]
fn test_header_stops_following_after_unmount() {
    let (coordinator, document) = mounted();
    coordinator.unmount();
    coordinator.commit(&document);
    assert_eq!(coordinator.body().scroll_listener_count(), 0);
    // Unmounted regions cannot scroll at all.
    assert!(!coordinator.set_scroll_left(10));
    assert_eq!(coordinator.header().scroll_left(), 0);
}

#[test]
fn test_sync_catches_up_on_commit() {
    let coordinator = ScrollCoordinator::new(RowWindow::new(50, 10000));
    coordinator.mount(HEADER, BODY, TRACK);
    coordinator.body().set_content_width(400);
    coordinator.header().set_content_width(400);
    coordinator.set_scroll_left(9);
    assert_eq!(coordinator.header().scroll_left(), 0);
    coordinator.commit(&Document::new());
    assert_eq!(coordinator.header().scroll_left(), 9);
}

// ============================================================================
// Wheel and navigation
// ============================================================================

#[test]
fn test_wheel_moves_window_by_step() {
    let (coordinator, _document) = mounted();
    let coordinator = coordinator.with_wheel_step(5);
    assert_eq!(coordinator.on_wheel(&WheelEvent::vertical(10, 10, 2)), EventResult::Consumed);
    assert_eq!(coordinator.start_row_index(), 10);
    assert_eq!(coordinator.body().scroll_top(), 10);
    coordinator.on_wheel(&WheelEvent::vertical(10, 10, -9));
    assert_eq!(coordinator.start_row_index(), 0);
}

#[test]
fn test_wheel_outside_is_ignored() {
    let (coordinator, _document) = mounted();
    assert_eq!(coordinator.on_wheel(&WheelEvent::vertical(10, 0, 1)), EventResult::Ignored);
}

#[test]
fn test_body_vertical_scroll_drives_window() {
    let (coordinator, _document) = mounted();
    coordinator.body().set_scroll_top(123);
    assert_eq!(coordinator.start_row_index(), 123);
}

#[test]
fn test_set_start_returns_clamped_value() {
    let (coordinator, _document) = mounted();
    assert_eq!(coordinator.set_start_row_index(1_000_000), 9950);
    assert!(coordinator.to_top());
    assert!(coordinator.page_down());
    assert_eq!(coordinator.start_row_index(), 50);
}

#[test]
fn test_take_dirty() {
    let (coordinator, _document) = mounted();
    coordinator.take_dirty();
    assert!(!coordinator.take_dirty());
    coordinator.scroll_rows(1);
    assert!(coordinator.take_dirty());
    assert!(!coordinator.take_dirty());
}

// ============================================================================
// Regions and thumb
// ============================================================================

#[test]
fn test_region_clamps_to_content() {
    let region = ScrollRegion::new("body");
    assert!(!region.scroll_to(ScrollOffset::new(5, 5)));
    region.mount(Rect::new(0, 0, 10, 5));
    region.set_content_size(30, 8);
    assert!(region.scroll_to(ScrollOffset::new(100, 100)));
    assert_eq!(region.offset(), ScrollOffset::new(20, 3));
    assert!(!region.scroll_to(ScrollOffset::new(20, 3)));
}

#[test]
fn test_thumb_geometry() {
    let mut window = RowWindow::new(10, 100);
    let track = Rect::new(0, 0, 1, 20);
    let top = ScrollbarGeometry::compute(track, &window);
    assert_eq!((top.handle_pos, top.handle_size), (0, 2));

    window.to_bottom();
    let bottom = ScrollbarGeometry::compute(track, &window);
    assert_eq!(bottom.handle_pos, 18);
    assert!(bottom.handle_contains(0, 19));
    assert!(!bottom.handle_contains(0, 17));

    let fits = ScrollbarGeometry::compute(track, &RowWindow::new(10, 5));
    assert_eq!(fits.handle_size, 20);
}

#[test]
fn test_thumb_is_at_least_one_cell() {
    let geometry = ScrollbarGeometry::compute(Rect::new(0, 0, 1, 10), &RowWindow::new(1, 1_000_000));
    assert_eq!(geometry.handle_size, 1);
}
