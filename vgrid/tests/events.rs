use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtButton,
    MouseEvent, MouseEventKind,
};
use vgrid::event::{Event, EventResult, Key, MouseButton, PointerKind};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// ============================================================================
// Crossterm conversion
// ============================================================================

#[test]
fn test_drag_becomes_move_with_button() {
    let Event::Pointer(pointer) = Event::from(mouse(MouseEventKind::Drag(CtButton::Left), 4, 7)) else {
        panic!("expected pointer event");
    };
    assert_eq!(pointer.kind, PointerKind::Move);
    assert_eq!(pointer.button, Some(MouseButton::Left));
    assert_eq!((pointer.position.x, pointer.position.y), (4, 7));
}

#[test]
fn test_hover_has_no_button() {
    let Event::Pointer(pointer) = Event::from(mouse(MouseEventKind::Moved, 1, 1)) else {
        panic!("expected pointer event");
    };
    assert_eq!(pointer.button, None);
    assert!(!pointer.is_primary());
}

#[test]
fn test_scroll_becomes_wheel() {
    let Event::Wheel(wheel) = Event::from(mouse(MouseEventKind::ScrollUp, 0, 0)) else {
        panic!("expected wheel event");
    };
    assert_eq!((wheel.delta_x, wheel.delta_y), (0, -1));
}

#[test]
fn test_shift_is_carried() {
    let mut event = mouse(MouseEventKind::ScrollDown, 0, 0);
    event.modifiers = KeyModifiers::SHIFT;
    let Event::Wheel(wheel) = Event::from(event) else {
        panic!("expected wheel event");
    };
    assert!(wheel.modifiers.shift);
}

#[test]
fn test_key_release_is_dropped() {
    let mut key = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
    assert!(matches!(
        Event::from_crossterm(&CtEvent::Key(key)),
        Some(Event::Key { key: Key::PageDown, .. })
    ));
    key.kind = KeyEventKind::Release;
    assert_eq!(Event::from_crossterm(&CtEvent::Key(key)), None);
    assert_eq!(Event::from_crossterm(&CtEvent::FocusGained), None);
}

#[test]
fn test_resize() {
    assert_eq!(
        Event::from_crossterm(&CtEvent::Resize(80, 24)),
        Some(Event::Resize { width: 80, height: 24 })
    );
}

// ============================================================================
// EventResult
// ============================================================================

#[test]
fn test_or_else_keeps_first_handled() {
    assert_eq!(
        EventResult::Consumed.or_else(|| EventResult::StartDrag),
        EventResult::Consumed
    );
    assert_eq!(
        EventResult::Ignored.or_else(|| EventResult::StartDrag),
        EventResult::StartDrag
    );
}
