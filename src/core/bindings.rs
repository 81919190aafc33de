//! Key and mouse binding types and how they map to user actions.
use crate::{
    core::State,
    pure::geometry::Point,
    x::XConn,
    Error, Result, Xid,
};
use std::collections::HashMap;
use strum::EnumIter;

/// Some action to be run in response to a key press.
///
/// The blanket impl for closures is usually all that is needed: see
/// [key_handler][crate::builtin::actions::key_handler].
pub trait KeyEventHandler<X: XConn> {
    /// Run this action against the current window manager state.
    fn call(&mut self, state: &mut State<X>, x: &X) -> Result<()>;
}

impl<F, X: XConn> KeyEventHandler<X> for F
where
    F: FnMut(&mut State<X>, &X) -> Result<()>,
{
    fn call(&mut self, state: &mut State<X>, x: &X) -> Result<()> {
        (self)(state, x)
    }
}

/// User defined key bindings
pub type KeyBindings<X> = HashMap<KeyCode, Box<dyn KeyEventHandler<X>>>;

/// A key press and the held modifier mask
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct KeyCode {
    /// The held modifier mask
    pub mask: u16,
    /// The key code that was held
    pub code: u8,
}

impl KeyCode {
    /// Create a new KeyCode from an existing one, removing the given
    /// modifier mask
    pub fn ignoring_modifier(&self, mask: u16) -> KeyCode {
        KeyCode {
            mask: self.mask & !mask,
            code: self.code,
        }
    }
}

/// Known mouse buttons for binding actions
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MouseButton {
    /// 1
    Left,
    /// 2
    Middle,
    /// 3
    Right,
    /// 4
    ScrollUp,
    /// 5
    ScrollDown,
}

impl From<MouseButton> for u8 {
    fn from(b: MouseButton) -> u8 {
        match b {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::ScrollUp => 4,
            MouseButton::ScrollDown => 5,
        }
    }
}

impl TryFrom<u8> for MouseButton {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self> {
        match n {
            1 => Ok(Self::Left),
            2 => Ok(Self::Middle),
            3 => Ok(Self::Right),
            4 => Ok(Self::ScrollUp),
            5 => Ok(Self::ScrollDown),
            _ => Err(Error::UnknownMouseButton(n)),
        }
    }
}

/// Known modifier keys for bindings
#[derive(Debug, EnumIter, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ModifierKey {
    /// Control
    Ctrl,
    /// Alt
    Alt,
    /// Shift
    Shift,
    /// Meta / super / windows
    Meta,
}

impl ModifierKey {
    /// Whether this modifier was held in the given state mask.
    pub fn was_held(&self, mask: u16) -> bool {
        mask & u16::from(*self) > 0
    }
}

// Core X11 protocol modifier mask values (Alt is Mod1, Meta is Mod4).
impl From<ModifierKey> for u16 {
    fn from(m: ModifierKey) -> u16 {
        match m {
            ModifierKey::Shift => 1 << 0,
            ModifierKey::Ctrl => 1 << 2,
            ModifierKey::Alt => 1 << 3,
            ModifierKey::Meta => 1 << 6,
        }
    }
}

impl TryFrom<&str> for ModifierKey {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "C" => Ok(Self::Ctrl),
            "A" => Ok(Self::Alt),
            "S" => Ok(Self::Shift),
            "M" => Ok(Self::Meta),
            _ => Err(Error::Custom(format!("unknown modifier {s}"))),
        }
    }
}

/// A mouse state specification indicating the button and modifiers held
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct MouseState {
    button: MouseButton,
    modifiers: Vec<ModifierKey>,
}

impl MouseState {
    /// Construct a new MouseState
    pub fn new(button: MouseButton, modifiers: Vec<ModifierKey>) -> Self {
        Self { button, modifiers }
    }

    /// Parse a raw button number and modifier mask as reported by the X
    /// server.
    pub fn from_detail_and_state(detail: u8, mask: u16) -> Result<Self> {
        use strum::IntoEnumIterator;

        Ok(Self {
            button: MouseButton::try_from(detail)?,
            modifiers: ModifierKey::iter().filter(|m| m.was_held(mask)).collect(),
        })
    }

    /// The button held for this state
    pub fn button(&self) -> MouseButton {
        self.button
    }

    /// Whether `m` was held as part of this state
    pub fn holds(&self, m: ModifierKey) -> bool {
        self.modifiers.contains(&m)
    }

    /// The modifier mask for this state
    pub fn mask(&self) -> u16 {
        self.modifiers
            .iter()
            .fold(0, |acc, &val| acc | u16::from(val))
    }
}

/// The types of mouse events represented by a MouseEvent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// A button was pressed
    Press,
    /// A button was released
    Release,
    /// The mouse was moved while a button was held
    Motion,
}

/// A mouse movement or button event
#[derive(Debug, Clone)]
pub struct MouseEvent {
    /// The ID of the window that contained the event
    pub id: Xid,
    /// Absolute coordinate of the event
    pub rpt: Point,
    /// The modifier and button code that was received
    pub state: MouseState,
    /// Was this press, release or motion?
    pub kind: MouseEventKind,
}

impl MouseEvent {
    /// Construct a new MouseEvent
    pub fn new(id: Xid, rpt: Point, state: MouseState, kind: MouseEventKind) -> Self {
        Self {
            id,
            rpt,
            state,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(1 << 3, &[ModifierKey::Alt]; "alt only")]
    #[test_case((1 << 3) | (1 << 0), &[ModifierKey::Alt, ModifierKey::Shift]; "alt shift")]
    #[test_case(0, &[]; "no modifiers")]
    #[test]
    fn mouse_state_parses_held_modifiers(mask: u16, expected: &[ModifierKey]) {
        let ms = MouseState::from_detail_and_state(1, mask).expect("known button");

        assert_eq!(ms.button(), MouseButton::Left);
        for m in expected {
            assert!(ms.holds(*m));
        }
        assert_eq!(ms.mask(), mask);
    }

    #[test]
    fn unknown_buttons_are_rejected()  {
        assert!(matches!(
            MouseState::from_detail_and_state(9, 0),
            Err(Error::UnknownMouseButton(9))
        ));
    }

    #[test]
    fn ignoring_modifier_strips_the_mask() {
        let k = KeyCode { mask: 0b1001, code: 42 };

        assert_eq!(k.ignoring_modifier(0b1000), KeyCode { mask: 0b0001, code: 42 });
    }
}
