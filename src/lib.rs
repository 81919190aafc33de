//! Macchiato: the window management core of a minimal X11 window manager.
//!
//! This crate provides the stateful heart of a simple floating / tiling window
//! manager: a registry of managed client windows, a pointer driven move and
//! resize state machine, a main-and-stack tiling layout and the event
//! dispatcher that ties them together. Everything that touches real pixels
//! (the display server itself, bar and notification rendering, launching
//! programs from a dock) sits behind traits so that the core logic can be
//! driven and tested without an X server.
//!
//! The entry point is [WindowManager][crate::core::WindowManager]: construct
//! one with a [Config][crate::core::Config], your key bindings and an
//! implementation of the [XConn][crate::x::XConn] trait, then call `run` to
//! enter the blocking event loop.
#![warn(missing_docs, rust_2018_idioms)]
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub mod builtin;
pub mod core;
pub mod pure;
pub mod util;
pub mod x;

#[doc(inline)]
pub use crate::core::{Config, State, WindowManager};

/// The maximum number of clients that can be managed at any one time.
///
/// Map requests received while the registry is full are logged and dropped
/// rather than treated as fatal.
pub const MAX_CLIENTS: usize = 256;

/// An X11 ID for a given resource
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub(crate) u32);

impl std::fmt::Display for Xid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Xid> for u32 {
    fn from(id: Xid) -> Self {
        id.0
    }
}

/// Error variants from the core window manager logic.
///
/// The only variants that are treated as fatal by the event loop are
/// [Error::ConnectionClosed] and [Error::WmAlreadyRunning]: everything else
/// is passed to the configured [ErrorHandler] and the loop carries on with
/// the next event.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client registry is full so a new client can not be managed
    #[error("the client registry is at capacity ({limit} clients)")]
    ClientCapacity {
        /// The configured registry capacity
        limit: usize,
    },

    /// The underlying connection to the X server is closed
    #[error("the connection to the X server is closed")]
    ConnectionClosed,

    /// A custom error message from client code
    #[error("unhandled error: {0}")]
    Custom(String),

    /// A string hex color was invalid
    #[error("invalid hex color code: '{0}'")]
    InvalidHexColor(String),

    /// An error was returned when spawning a subprocess
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A mouse button number we do not handle was pressed
    #[error("unknown mouse button: {0}")]
    UnknownMouseButton(u8),

    /// An operation was requested for a client that is not in the registry
    #[error("{0} is not a known client")]
    UnknownClient(Xid),

    /// Another window manager already owns the display
    #[error("another window manager is already running")]
    WmAlreadyRunning,
}

/// A Result where the error type is a macchiato [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// A handler for errors raised while processing a single event.
pub type ErrorHandler = Box<dyn FnMut(Error)>;

/// An [ErrorHandler] that logs the error at ERROR level and otherwise
/// carries on.
pub fn logging_error_handler() -> ErrorHandler {
    Box::new(|e: Error| tracing::error!(%e, "error handling event"))
}

/// A simple RGBA based color
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Color {
    /// Create a new Color from a hex encoded u32: 0xRRGGBBAA
    pub fn new_from_hex(hex: u32) -> Self {
        let [r, g, b, a] = hex.to_be_bytes().map(|n| n as f64 / 255.0);

        Self { r, g, b, a }
    }

    /// The RGB information of this color as 0.0-1.0 range floats representing
    /// proportions of 255 for each of R, G, B
    pub fn rgb(&self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }

    /// 0xRRGGBB representation of this color (no alpha information)
    pub fn rgb_u32(&self) -> u32 {
        let (r, g, b) = self.rgb();
        let (r, g, b) = ((r * 255.0) as u32, (g * 255.0) as u32, (b * 255.0) as u32);

        (r << 16) + (g << 8) + b
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::new_from_hex(hex)
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        let hex = u32::from_str_radix(s.strip_prefix('#').unwrap_or(s), 16)
            .map_err(|_| Error::InvalidHexColor(s.into()))?;
        let digits = s.len() - if s.starts_with('#') { 1 } else { 0 };

        match digits {
            6 => Ok(Self::new_from_hex((hex << 8) + 0xFF)),
            8 => Ok(Self::new_from_hex(hex)),
            _ => Err(Error::InvalidHexColor(s.into())),
        }
    }
}
