use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CtButton, MouseEvent, MouseEventKind,
};
use log::trace;

/// Input events after conversion from the terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to document-level key listeners.
    Key(KeyEvent),
    /// Mouse button pressed at a cell.
    Click { x: u16, y: u16, button: MouseButton },
    /// Mouse moved (used for hover).
    MouseMove { x: u16, y: u16 },
    /// Terminal resized.
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
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

impl From<CtButton> for MouseButton {
    fn from(btn: CtButton) -> Self {
        match btn {
            CtButton::Left => MouseButton::Left,
            CtButton::Right => MouseButton::Right,
            CtButton::Middle => MouseButton::Middle,
        }
    }
}

fn convert_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
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

fn convert_key_event(event: CtKeyEvent) -> Option<KeyEvent> {
    // Only presses; release and repeat reports would double-fire listeners.
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = convert_key(event.code)?;
    Some(KeyEvent::new(key, event.modifiers.into()))
}

fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(button) => Some(Event::Click {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Moved => Some(Event::MouseMove { x, y }),
        _ => None,
    }
}

/// Convert a crossterm event. Returns None for events we do not handle.
pub fn convert_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) => {
            trace!(
                "Key event: code={:?}, modifiers={:?}, kind={:?}",
                key_event.code,
                key_event.modifiers,
                key_event.kind
            );
            convert_key_event(key_event).map(Event::Key)
        }
        CtEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
