//! Data types for working with X events
use crate::{
    core::bindings::{KeyCode, MouseEvent},
    pure::geometry::{Point, Rect},
    Xid,
};
use std::fmt;

/// Wrapper around the event types that the core event loop reacts to.
///
/// A real backend will receive many more event types than this from the
/// server: anything that does not map onto one of these variants can simply
/// not be surfaced through [next_event][crate::x::XConn::next_event].
#[derive(Debug, Clone)]
pub enum XEvent {
    /// A client is requesting to be repositioned
    ConfigureRequest(ConfigureEvent),
    /// A client window has been destroyed
    Destroy(Xid),
    /// The pointer has entered a client window
    Enter(PointerChange),
    /// A grabbed key combination was pressed
    KeyPress(KeyCode),
    /// The pointer has left a client window
    Leave(PointerChange),
    /// A client is requesting to be mapped to the screen
    MapRequest(Xid),
    /// A grabbed mouse button was pressed, released or dragged
    MouseEvent(MouseEvent),
}

impl fmt::Display for XEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use XEvent::*;

        match self {
            ConfigureRequest(_) => write!(f, "ConfigureRequest"),
            Destroy(_) => write!(f, "Destroy"),
            Enter(_) => write!(f, "Enter"),
            KeyPress(_) => write!(f, "KeyPress"),
            Leave(_) => write!(f, "Leave"),
            MapRequest(_) => write!(f, "MapRequest"),
            MouseEvent(_) => write!(f, "MouseEvent"),
        }
    }
}

/// A client requesting a specific geometry for itself
#[derive(Debug, Clone, Copy)]
pub struct ConfigureEvent {
    /// The window the event is for
    pub id: Xid,
    /// The geometry the window is requesting
    pub r: Rect,
}

/// The pointer crossing a window boundary in either direction
#[derive(Debug, Clone, Copy)]
pub struct PointerChange {
    /// The window the event is for
    pub id: Xid,
    /// The absolute position of the pointer relative to the root window
    pub abs: Point,
}
