//! Input events consumed by the grid, and conversion from crossterm.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};

/// A point in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<CtMouseButton> for MouseButton {
    fn from(button: CtMouseButton) -> Self {
        match button {
            CtMouseButton::Left => MouseButton::Left,
            CtMouseButton::Right => MouseButton::Right,
            CtMouseButton::Middle => MouseButton::Middle,
        }
    }
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event. `button` is `None` for plain hover moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Position,
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Left-button press at `(x, y)`.
    pub fn down(x: u16, y: u16) -> Self {
        Self {
            kind: PointerKind::Down,
            position: Position::new(x, y),
            button: Some(MouseButton::Left),
            modifiers: Modifiers::default(),
        }
    }

    /// Move to `(x, y)` with the left button held.
    pub fn moved(x: u16, y: u16) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Position::new(x, y),
            button: Some(MouseButton::Left),
            modifiers: Modifiers::default(),
        }
    }

    /// Left-button release at `(x, y)`.
    pub fn up(x: u16, y: u16) -> Self {
        Self {
            kind: PointerKind::Up,
            position: Position::new(x, y),
            button: Some(MouseButton::Left),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_button(mut self, button: Option<MouseButton>) -> Self {
        self.button = button;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == Some(MouseButton::Left)
    }
}

/// Mouse wheel event. Positive `delta_y` scrolls down, positive `delta_x` right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub position: Position,
    pub delta_x: i16,
    pub delta_y: i16,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    pub fn vertical(x: u16, y: u16, delta_y: i16) -> Self {
        Self {
            position: Position::new(x, y),
            delta_x: 0,
            delta_y,
            modifiers: Modifiers::default(),
        }
    }

    pub fn horizontal(x: u16, y: u16, delta_x: i16) -> Self {
        Self {
            position: Position::new(x, y),
            delta_x,
            delta_y: 0,
            modifiers: Modifiers::default(),
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

/// Events routed through a [`VirtualGrid`](crate::grid::VirtualGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
    Key { key: Key, modifiers: Modifiers },
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Convert a raw crossterm event. Returns `None` for events the grid
    /// has no use for (focus changes, paste, key releases, unmapped keys).
    pub fn from_crossterm(event: &CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Mouse(mouse) => Some(Self::from(*mouse)),
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Key::from_code(key.code).map(|k| Event::Key {
                    key: k,
                    modifiers: key.modifiers.into(),
                })
            }
            CrosstermEvent::Resize(width, height) => Some(Event::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl From<MouseEvent> for Event {
    fn from(mouse: MouseEvent) -> Self {
        let position = Position::new(mouse.column, mouse.row);
        let modifiers = Modifiers::from(mouse.modifiers);
        let pointer = |kind, button: Option<CtMouseButton>| {
            Event::Pointer(PointerEvent {
                kind,
                position,
                button: button.map(MouseButton::from),
                modifiers,
            })
        };
        let wheel = |delta_x, delta_y| {
            Event::Wheel(WheelEvent {
                position,
                delta_x,
                delta_y,
                modifiers,
            })
        };

        match mouse.kind {
            MouseEventKind::Down(button) => pointer(PointerKind::Down, Some(button)),
            MouseEventKind::Up(button) => pointer(PointerKind::Up, Some(button)),
            MouseEventKind::Drag(button) => pointer(PointerKind::Move, Some(button)),
            MouseEventKind::Moved => pointer(PointerKind::Move, None),
            MouseEventKind::ScrollDown => wheel(0, 1),
            MouseEventKind::ScrollUp => wheel(0, -1),
            MouseEventKind::ScrollRight => wheel(1, 0),
            MouseEventKind::ScrollLeft => wheel(-1, 0),
        }
    }
}

/// Outcome of routing an event to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// The component did not handle the event.
    #[default]
    Ignored,
    /// The event was handled; default behavior (e.g. text selection) is suppressed.
    Consumed,
    /// The event started a drag gesture owned by the component.
    StartDrag,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// Keep the first handled result.
    pub fn or_else(self, f: impl FnOnce() -> EventResult) -> EventResult {
        if self.is_handled() { self } else { f() }
    }
}
