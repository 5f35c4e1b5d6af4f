//! Input events consumed by the select engine.
//!
//! The host translates its native keyboard, pointer and focus events into
//! these types and feeds them to [`Select`](crate::select::Select). Only the
//! keys the engine reacts to have dedicated variants.

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Whether any modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Keys the select engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    /// A printable character. Typing goes through
    /// [`handle_input_change`](crate::select::Select::handle_input_change)
    /// instead, so these are passed through unhandled.
    Character(char),
    /// Any other key.
    Other,
}

/// Key press event, sent when a key is pressed while the control has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether the keystroke belongs to an in-progress IME composition.
    pub is_composing: bool,
}

impl KeyPressEvent {
    /// Create a key press with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
            is_composing: false,
        }
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the keystroke as part of an IME composition.
    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }
}

impl From<Key> for KeyPressEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Where inside the control a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The text input itself.
    Input,
    /// Any other part of the control (value container, padding, indicators
    /// without their own handler).
    Control,
}

impl PointerTarget {
    /// Whether the pointer-down landed outside the text input.
    pub fn is_outside_input(self) -> bool {
        matches!(self, PointerTarget::Control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_builders() {
        let event = KeyPressEvent::new(Key::Tab).with_modifiers(KeyboardModifiers::SHIFT);
        assert!(event.modifiers.shift);
        assert!(event.modifiers.any());
        assert!(!event.is_composing);

        let event: KeyPressEvent = Key::Enter.into();
        assert_eq!(event.modifiers, KeyboardModifiers::NONE);
        assert!(event.composing().is_composing);
    }

    #[test]
    fn test_pointer_target() {
        assert!(PointerTarget::Control.is_outside_input());
        assert!(!PointerTarget::Input.is_outside_input());
    }
}
