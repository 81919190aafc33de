//! Logic for interacting with the X server.
//!
//! [XConn] is the trait a display server backend needs to implement for the
//! core to drive it. The methods are deliberately low level (map this
//! window, set that border) with all management policy kept in the blanket
//! implemented [XConnExt] extension trait, so that a backend stays a thin
//! translation layer and everything interesting remains testable through
//! [mock::MockXConn].
use crate::{
    core::{
        bindings::{KeyCode, MouseState},
        hooks::run_hooks,
        State,
    },
    pure::{
        geometry::{Point, Rect},
        layout::main_and_stack,
    },
    Color, Result, Xid,
};
use tracing::{trace, warn};

pub mod event;
pub mod mock;

pub use event::XEvent;

/// The classification of a window asking to be mapped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WinType {
    /// A regular application window
    #[default]
    Normal,
    /// A transient dialog window
    Dialog,
}

/// A handle on a running X11 connection that we can use for issuing
/// requests and managing windows.
pub trait XConn {
    /// The ID of the root window
    fn root(&self) -> Xid;
    /// The dimensions of the screen
    fn screen_size(&self) -> Result<Rect>;
    /// The current position of the pointer relative to the root window
    fn cursor_position(&self) -> Result<Point>;
    /// The window currently under the pointer, if any
    fn client_under_pointer(&self) -> Result<Option<Xid>>;
    /// The window that currently holds input focus, if any
    fn focused_client(&self) -> Result<Option<Xid>>;

    /// Register interest in the given key and mouse states
    fn grab(&self, key_codes: &[KeyCode], mouse_states: &[MouseState]) -> Result<()>;
    /// Block until the next event from the X event loop is ready then
    /// return it
    fn next_event(&self) -> Result<XEvent>;
    /// Flush any pending requests to the server
    fn flush(&self);

    /// The current geometry of the given window
    fn client_geometry(&self, client: Xid) -> Result<Rect>;
    /// The classification of the given window
    fn window_type(&self, client: Xid) -> Result<WinType>;

    /// Set both the position and size of the given window
    fn position_client(&self, client: Xid, r: Rect) -> Result<()>;
    /// Move the given window, leaving its size unchanged
    fn move_client(&self, client: Xid, p: Point) -> Result<()>;
    /// Resize the given window, leaving its position unchanged
    fn resize_client(&self, client: Xid, w: u32, h: u32) -> Result<()>;

    /// Show the given window on the screen
    fn map(&self, client: Xid) -> Result<()>;
    /// Hide the given window from the screen
    fn unmap(&self, client: Xid) -> Result<()>;
    /// Raise the given window to the top of the stacking order
    fn raise(&self, client: Xid) -> Result<()>;
    /// Ask the given window to close
    fn kill(&self, client: Xid) -> Result<()>;
    /// Give input focus to the given window
    fn focus(&self, client: Xid) -> Result<()>;

    /// Set the width of the border drawn around the given window
    fn set_border_width(&self, client: Xid, px: u32) -> Result<()>;
    /// Set the color of the border drawn around the given window
    fn set_border_color(&self, client: Xid, color: Color) -> Result<()>;
}

/// Derived management operations on top of the raw [XConn] methods.
///
/// This trait is blanket implemented for all types implementing [XConn]:
/// backends never need to (and should not) implement it directly.
pub trait XConnExt: XConn + Sized {
    /// Bring a new client under window manager control.
    ///
    /// A full client registry is logged and the request dropped rather than
    /// treated as an error: the window simply stays unmanaged.
    fn manage(&self, client: Xid, state: &mut State<Self>) -> Result<()> {
        trace!(%client, "managing new client");
        if let Err(e) = state.clients.add(client) {
            warn!(%e, %client, "dropping map request");
            return Ok(());
        }

        self.set_border_width(client, state.config.border_width)?;
        self.set_border_color(client, state.config.normal_border)?;

        if state.config.tiling_enabled {
            self.apply_tiling(state)?;
        }

        self.map(client)?;
        self.focus(client)?;
        self.update_borders(Some(client), state)?;
        run_hooks(state, self, |h, s, x| h.membership_changed(s, x));

        Ok(())
    }

    /// Remove a destroyed client from window manager control.
    fn unmanage(&self, client: Xid, state: &mut State<Self>) -> Result<()> {
        trace!(%client, "unmanaging client");
        state.clients.remove(&client);
        state.drag.forget(&client);

        if state.config.tiling_enabled {
            self.apply_tiling(state)?;
        }

        run_hooks(state, self, |h, s, x| h.membership_changed(s, x));

        Ok(())
    }

    /// The managed client a window-directed action should apply to.
    ///
    /// The client under the pointer wins, falling back to the client holding
    /// input focus. Unmanaged windows are never returned.
    fn target_client(&self, state: &State<Self>) -> Result<Option<Xid>> {
        if let Some(id) = self.client_under_pointer()? {
            if state.clients.contains(&id) {
                return Ok(Some(id));
            }
        }

        match self.focused_client()? {
            Some(id) if state.clients.contains(&id) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    /// Sweep the border color of every managed client, highlighting
    /// `focused` alone (if set) with the focused border color.
    fn update_borders(&self, focused: Option<Xid>, state: &mut State<Self>) -> Result<()> {
        for id in state.clients.clients() {
            let color = if Some(*id) == focused {
                state.config.focused_border
            } else {
                state.config.normal_border
            };
            self.set_border_color(*id, color)?;
        }

        Ok(())
    }

    /// Retile all tileable clients into the screen area below the bar.
    ///
    /// Minimized clients are unmapped and fullscreen clients sit above the
    /// tiled plane, so both are skipped. Each layout cell is shrunk by the
    /// border width before the client is positioned so that the drawn
    /// borders stay on the cell boundaries.
    fn apply_tiling(&self, state: &mut State<Self>) -> Result<()> {
        let screen = self.screen_size()?;
        let bar = state.config.bar_height;
        let tiling_area = Rect::new(
            screen.x,
            screen.y + bar,
            screen.w,
            screen.h.saturating_sub(bar),
        );

        let tileable: Vec<Xid> = state
            .clients
            .iter()
            .filter(|(_, cs)| !cs.is_minimized() && !cs.is_fullscreen())
            .map(|(id, _)| id)
            .collect();

        let border = state.config.border_width;
        for (id, r) in main_and_stack(&tileable, tiling_area, state.config.gap_px) {
            self.position_client(id, r.shrink_in(border))?;
        }

        Ok(())
    }

    /// Toggle the given client in and out of fullscreen.
    ///
    /// Entering fullscreen records the current geometry so that leaving it
    /// can restore the exact same position and size. A minimized client is
    /// restored before being made fullscreen.
    fn toggle_fullscreen(&self, client: Xid, state: &mut State<Self>) -> Result<()> {
        if state.clients.state(&client)?.is_minimized() {
            self.restore(client, state)?;
        }

        if state.clients.state(&client)?.is_fullscreen() {
            let cs = state.clients.state_mut(&client)?;
            cs.fullscreen = false;

            if let Some(r) = cs.saved_rect.take() {
                self.position_client(client, r)?;
            }

            if state.config.tiling_enabled {
                self.apply_tiling(state)?;
            }
        } else {
            let saved = self.client_geometry(client)?;
            let r = self.screen_size()?.shrink_in(state.config.border_width);

            let cs = state.clients.state_mut(&client)?;
            cs.fullscreen = true;
            cs.saved_rect = Some(saved);

            self.position_client(client, r)?;
            self.raise(client)?;
        }

        Ok(())
    }

    /// Hide the given client without destroying it.
    ///
    /// Minimizing an already minimized client is a no-op.
    fn minimize(&self, client: Xid, state: &mut State<Self>) -> Result<()> {
        let cs = state.clients.state_mut(&client)?;
        if cs.minimized {
            return Ok(());
        }
        cs.minimized = true;

        self.unmap(client)?;

        if state.config.tiling_enabled {
            self.apply_tiling(state)?;
        }

        run_hooks(state, self, |h, s, x| h.membership_changed(s, x));

        Ok(())
    }

    /// Bring a minimized client back to the screen and focus it.
    ///
    /// Restoring a client that is not minimized is a no-op.
    fn restore(&self, client: Xid, state: &mut State<Self>) -> Result<()> {
        let cs = state.clients.state_mut(&client)?;
        if !cs.minimized {
            return Ok(());
        }
        cs.minimized = false;

        self.map(client)?;
        self.raise(client)?;
        self.focus(client)?;

        if state.config.tiling_enabled {
            self.apply_tiling(state)?;
        }

        run_hooks(state, self, |h, s, x| h.membership_changed(s, x));

        Ok(())
    }
}

impl<X: XConn> XConnExt for X {}
