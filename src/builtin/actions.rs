//! Ready made actions for binding to keys.
use crate::{
    core::{bindings::KeyEventHandler, hooks::run_hooks, State},
    util,
    x::{XConn, XConnExt},
    Result,
};
use tracing::warn;

/// Construct a [KeyEventHandler] from a closure or free function.
pub fn key_handler<X, F>(f: F) -> Box<dyn KeyEventHandler<X>>
where
    X: XConn,
    F: FnMut(&mut State<X>, &X) -> Result<()> + 'static,
{
    Box::new(f)
}

/// Spawn an external program as part of a key binding.
pub fn spawn<X: XConn>(program: &'static str) -> Box<dyn KeyEventHandler<X>> {
    key_handler(move |_, _: &X| util::spawn(program))
}

/// Exit the window manager.
pub fn exit<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    key_handler(|state, _: &X| {
        state.shutdown();
        Ok(())
    })
}

/// Ask the registered hooks to show the program launcher.
pub fn open_launcher<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    key_handler(|state, x: &X| {
        run_hooks(state, x, |h, s, x| h.launcher_requested(s, x));
        Ok(())
    })
}

/// Toggle fullscreen for the client under the pointer (falling back to the
/// focused client).
pub fn toggle_fullscreen<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    key_handler(|state, x: &X| {
        if let Some(id) = x.target_client(state)? {
            x.toggle_fullscreen(id, state)?;
        }

        Ok(())
    })
}

/// Minimize the client under the pointer (falling back to the focused
/// client).
pub fn minimize<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    key_handler(|state, x: &X| {
        if let Some(id) = x.target_client(state)? {
            x.minimize(id, state)?;
        }

        Ok(())
    })
}

/// Ask the client under the pointer (falling back to the focused client) to
/// close.
pub fn kill<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    key_handler(|state, x: &X| {
        if let Some(id) = x.target_client(state)? {
            x.kill(id)?;
        }

        Ok(())
    })
}

/// Raise the master volume by 5%.
pub fn raise_volume<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    adjust_volume(
        "amixer set Master 5%+ unmute",
        "pactl set-sink-volume @DEFAULT_SINK@ +5%",
    )
}

/// Lower the master volume by 5%.
pub fn lower_volume<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    adjust_volume(
        "amixer set Master 5%-",
        "pactl set-sink-volume @DEFAULT_SINK@ -5%",
    )
}

/// Toggle muting of the master volume.
pub fn toggle_mute<X: XConn>() -> Box<dyn KeyEventHandler<X>> {
    adjust_volume(
        "amixer set Master toggle",
        "pactl set-sink-mute @DEFAULT_SINK@ toggle",
    )
}

// amixer with a pactl fallback for pipewire/pulse only setups, then report
// the resulting level through the status hook.
fn adjust_volume<X: XConn>(
    amixer_cmd: &'static str,
    pactl_cmd: &'static str,
) -> Box<dyn KeyEventHandler<X>> {
    key_handler(move |state, x: &X| {
        if util::spawn(amixer_cmd).is_err() {
            util::spawn(pactl_cmd)?;
        }

        match current_volume() {
            Some(pct) => {
                let msg = format!("Volume: {pct}%");
                run_hooks(state, x, |h, s, x| h.status_message(&msg, s, x));
            }
            None => warn!("unable to read the current volume level"),
        }

        Ok(())
    })
}

// amixer reports levels as bracketed percentage tokens: `[42%]`.
fn current_volume() -> Option<String> {
    let out = util::spawn_for_output("amixer get Master").ok()?;

    out.split_whitespace().find_map(|tok| {
        tok.strip_prefix('[')
            .and_then(|t| t.strip_suffix("%]"))
            .map(|pct| pct.to_string())
    })
}
