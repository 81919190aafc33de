//! Handlers for incoming X events, one per event category.
//!
//! Everything here takes `&mut State` and `&X` rather than the full
//! `WindowManager` so that each handler can be driven in isolation by tests.
use crate::{
    core::{
        bindings::{KeyBindings, KeyCode, ModifierKey, MouseButton, MouseEvent, MouseEventKind},
        drag::DragKind,
        hooks::run_hooks,
        State,
    },
    util,
    x::{
        event::{ConfigureEvent, PointerChange},
        WinType, XConn, XConnExt,
    },
    Result, Xid,
};
use tracing::{trace, warn};

pub(crate) fn mouse_event<X: XConn>(e: MouseEvent, state: &mut State<X>, x: &X) -> Result<()> {
    match e.kind {
        MouseEventKind::Press => button_press(e, state, x),
        MouseEventKind::Release => {
            state.drag.release();
            Ok(())
        }
        MouseEventKind::Motion => motion(e, state, x),
    }
}

fn button_press<X: XConn>(e: MouseEvent, state: &mut State<X>, x: &X) -> Result<()> {
    if state.bar.is_some() && state.bar == Some(e.id) {
        run_hooks(state, x, |h, s, x| h.bar_clicked(e.rpt, s, x));
        return Ok(());
    }

    if !state.clients.contains(&e.id) {
        state.drag.deselect();
        return Ok(());
    }

    // The anchor geometry has to come from a live query: a stale rect here
    // would make the whole drag jump on the first motion event.
    let r = match x.client_geometry(e.id) {
        Ok(r) => r,
        Err(err) => {
            warn!(%err, id = %e.id, "unable to query geometry, ignoring press");
            state.drag.deselect();
            return Ok(());
        }
    };

    let kind = drag_kind_for(state.config.tiling_enabled, &e);
    state.drag.on_press(e.id, kind, e.rpt, r);

    x.raise(e.id)?;
    x.focus(e.id)?;
    x.update_borders(Some(e.id), state)
}

// Right button resizes; the left button moves when floating or when the
// binding modifier is held, and otherwise just selects the window.
fn drag_kind_for(tiling_enabled: bool, e: &MouseEvent) -> DragKind {
    match e.state.button() {
        MouseButton::Right => DragKind::Resize,
        MouseButton::Left if !tiling_enabled || e.state.holds(ModifierKey::Meta) => DragKind::Move,
        _ => DragKind::None,
    }
}

fn motion<X: XConn>(e: MouseEvent, state: &mut State<X>, x: &X) -> Result<()> {
    let target = match state.drag.target() {
        Some(id) => id,
        None => return Ok(()),
    };

    // The target can be destroyed mid-drag: no commands to dead handles.
    if !state.clients.contains(&target) {
        state.drag.forget(&target);
        return Ok(());
    }

    let kind = state.drag.kind();
    if let Some(r) = state
        .drag
        .rect_for_pointer(e.rpt, state.config.min_win_dimension)
    {
        match kind {
            DragKind::Move => x.move_client(target, r.into())?,
            DragKind::Resize => x.resize_client(target, r.w, r.h)?,
            DragKind::None => (),
        }
    }

    Ok(())
}

pub(crate) fn keypress<X: XConn>(
    key: KeyCode,
    bindings: &mut KeyBindings<X>,
    state: &mut State<X>,
    x: &X,
) -> Result<()> {
    if let Some(action) = bindings.get_mut(&key) {
        trace!(?key, "running user keybinding");
        action.call(state, x)?;
    }

    Ok(())
}

pub(crate) fn map_request<X: XConn>(id: Xid, state: &mut State<X>, x: &X) -> Result<()> {
    let win_type = match x.window_type(id) {
        Ok(t) => t,
        Err(e) => {
            warn!(%e, %id, "unable to classify window, managing as normal");
            WinType::Normal
        }
    };

    match win_type {
        // Transient dialogs are almost always file pickers: replace them
        // with a real file manager instead of tiling a tiny popup.
        WinType::Dialog => {
            warn!(%id, "substituting dialog window with the file manager");
            x.kill(id)?;
            if let Err(e) = util::spawn(state.config.file_manager.as_str()) {
                warn!(%e, "unable to spawn the file manager");
            }

            Ok(())
        }

        WinType::Normal => x.manage(id, state),
    }
}

pub(crate) fn configure_request<X: XConn>(
    e: ConfigureEvent,
    state: &mut State<X>,
    x: &X,
) -> Result<()> {
    trace!(id = %e.id, ?e.r, "client requested geometry");
    x.position_client(e.id, e.r)?;

    // Clients are honored on geometry but never on border width.
    x.set_border_width(e.id, state.config.border_width)
}

pub(crate) fn enter<X: XConn>(p: PointerChange, state: &mut State<X>, x: &X) -> Result<()> {
    if !state.clients.contains(&p.id) {
        return Ok(());
    }

    x.focus(p.id)?;
    x.update_borders(Some(p.id), state)?;
    run_hooks(state, x, |h, s, x| h.membership_changed(s, x));

    Ok(())
}

pub(crate) fn leave<X: XConn>(p: PointerChange, state: &mut State<X>, x: &X) -> Result<()> {
    if !state.clients.contains(&p.id) {
        return Ok(());
    }

    x.update_borders(None, state)
}

pub(crate) fn destroy<X: XConn>(id: Xid, state: &mut State<X>, x: &X) -> Result<()> {
    if !state.clients.contains(&id) {
        return Ok(());
    }

    x.unmanage(id, state)
}
