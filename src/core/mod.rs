//! Core data structures and user facing functionality for the window manager
use crate::{
    core::{
        bindings::{KeyBindings, KeyCode, ModifierKey, MouseButton, MouseState},
        clients::ClientRegistry,
        drag::DragState,
        hooks::Hooks,
    },
    logging_error_handler,
    x::{XConn, XEvent},
    Color, Error, ErrorHandler, Result, Xid,
};
use nix::sys::signal::{signal, SigHandler, Signal};
use std::fmt;
use tracing::{info, trace};

pub mod bindings;
pub mod clients;
pub mod drag;
pub(crate) mod handle;
pub mod hooks;

/// The user specified config options for how the window manager should behave
pub struct Config<X: XConn> {
    /// The border color to use for unfocused windows
    pub normal_border: Color,
    /// The border color to use for the focused window
    pub focused_border: Color,
    /// The width in pixels of the border drawn around windows
    pub border_width: u32,
    /// The gap in pixels between tiled windows
    pub gap_px: u32,
    /// The height in pixels reserved at the top of the screen for the bar
    pub bar_height: u32,
    /// Whether new windows should be tiled (false leaves everything floating)
    pub tiling_enabled: bool,
    /// The minimum width and height a window can be resized to by dragging
    pub min_win_dimension: u32,
    /// The program to spawn in place of transient dialog windows
    pub file_manager: String,
    /// Collaborator hooks to be notified of state changes
    pub hooks: Hooks<X>,
}

impl<X: XConn> fmt::Debug for Config<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("normal_border", &self.normal_border)
            .field("focused_border", &self.focused_border)
            .field("border_width", &self.border_width)
            .field("gap_px", &self.gap_px)
            .field("bar_height", &self.bar_height)
            .field("tiling_enabled", &self.tiling_enabled)
            .field("min_win_dimension", &self.min_win_dimension)
            .field("file_manager", &self.file_manager)
            .field("n_hooks", &self.hooks.len())
            .finish()
    }
}

impl<X: XConn> Default for Config<X> {
    fn default() -> Self {
        Config {
            normal_border: Color::new_from_hex(0x3c3836ff),
            focused_border: Color::new_from_hex(0xcc241dff),
            border_width: 5,
            gap_px: 10,
            bar_height: 40,
            tiling_enabled: true,
            min_win_dimension: 50,
            file_manager: "thunar".to_string(),
            hooks: Vec::new(),
        }
    }
}

/// The mutable state of the window manager, accessible to all event handlers
/// and key bindings.
pub struct State<X: XConn> {
    /// The user provided configuration
    pub config: Config<X>,
    /// The clients currently under management
    pub clients: ClientRegistry,
    /// The in-flight pointer interaction (if any)
    pub drag: DragState,
    /// The window ID of the status bar, for click routing
    pub bar: Option<Xid>,
    pub(crate) running: bool,
}

impl<X: XConn> State<X> {
    /// Construct initial state from the given config.
    pub fn new(config: Config<X>) -> Self {
        Self {
            config,
            clients: ClientRegistry::new(),
            drag: DragState::default(),
            bar: None,
            running: false,
        }
    }

    /// Stop the event loop after the current event finishes processing.
    pub fn shutdown(&mut self) {
        info!("shutting down");
        self.running = false;
    }
}

/// A top level struct holding all of the state required to run as an X11
/// window manager.
///
/// This allows for final configuration to be carried out before entering the
/// main event loop via [run][WindowManager::run].
pub struct WindowManager<X: XConn> {
    x: X,
    /// The mutable state tracked by this window manager
    pub state: State<X>,
    key_bindings: KeyBindings<X>,
    error_handler: ErrorHandler,
}

impl<X: XConn> fmt::Debug for WindowManager<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("config", &self.state.config)
            .field("n_clients", &self.state.clients.len())
            .finish()
    }
}

impl<X: XConn> WindowManager<X> {
    /// Construct a new window manager with the given config and bindings.
    pub fn new(config: Config<X>, key_bindings: KeyBindings<X>, x: X) -> Self {
        Self {
            x,
            state: State::new(config),
            key_bindings,
            error_handler: logging_error_handler(),
        }
    }

    /// Replace the default logging error handler.
    pub fn set_error_handler(&mut self, h: ErrorHandler) {
        self.error_handler = h;
    }

    /// Grab our key and mouse bindings then run the main event loop.
    ///
    /// This method blocks until [shutdown][State::shutdown] is called from a
    /// key binding or the connection to the X server is lost. Errors raised
    /// while handling a single event are passed to the error handler rather
    /// than ending the loop.
    pub fn run(mut self) -> Result<()> {
        info!("registering SIGCHLD handler");
        // Spawned programs are reaped by init rather than us.
        if let Err(e) = unsafe { signal(Signal::SIGCHLD, SigHandler::SigIgn) } {
            return Err(Error::Custom(format!("unable to ignore SIGCHLD: {e}")));
        }

        info!("grabbing key and mouse bindings");
        let key_codes: Vec<KeyCode> = self.key_bindings.keys().copied().collect();
        let mouse_states = drag_mouse_states(self.state.config.tiling_enabled);
        self.x.grab(&key_codes, &mouse_states)?;

        info!("entering main event loop");
        self.state.running = true;
        while self.state.running {
            let event = self.x.next_event()?;
            trace!(%event, "got event from X server");

            if let Err(e) = self.handle_xevent(event) {
                match e {
                    Error::ConnectionClosed => return Err(Error::ConnectionClosed),
                    e => (self.error_handler)(e),
                }
            }

            self.x.flush();
        }

        Ok(())
    }

    /// Dispatch a single event to its handler.
    pub fn handle_xevent(&mut self, event: XEvent) -> Result<()> {
        use XEvent::*;

        let (state, x) = (&mut self.state, &self.x);

        match event {
            ConfigureRequest(e) => handle::configure_request(e, state, x),
            Destroy(id) => handle::destroy(id, state, x),
            Enter(p) => handle::enter(p, state, x),
            KeyPress(key) => handle::keypress(key, &mut self.key_bindings, state, x),
            Leave(p) => handle::leave(p, state, x),
            MapRequest(id) => handle::map_request(id, state, x),
            MouseEvent(e) => handle::mouse_event(e, state, x),
        }
    }
}

// When tiling is disabled a plain (unmodified) click is also grabbed so
// that floating windows can be dragged without holding the modifier.
fn drag_mouse_states(tiling_enabled: bool) -> Vec<MouseState> {
    let mut states = vec![
        MouseState::new(MouseButton::Left, vec![ModifierKey::Meta]),
        MouseState::new(MouseButton::Right, vec![ModifierKey::Meta]),
    ];

    if !tiling_enabled {
        states.push(MouseState::new(MouseButton::Left, vec![]));
        states.push(MouseState::new(MouseButton::Right, vec![]));
    }

    states
}
