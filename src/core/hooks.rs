//! Notifying collaborators (bar, launcher, notifications) of state changes.
//!
//! The core never renders anything itself. Anything that wants to paint a
//! dock, pop up a launcher or show a transient message registers a [Hook]
//! in [Config][crate::core::Config] and gets called back at the relevant
//! points in event handling. Hook errors are logged and swallowed so that a
//! misbehaving collaborator can not take down the event loop.
use crate::{core::State, pure::geometry::Point, x::XConn, Result};
use std::mem;
use tracing::error;

/// Callbacks into collaborator code at interesting points in the event loop.
///
/// All methods default to a no-op so implementations only need to override
/// the notifications they care about.
pub trait Hook<X: XConn> {
    /// The set of managed clients or the focused client changed.
    ///
    /// This is the point to repaint a taskbar or dock.
    #[allow(unused_variables)]
    fn membership_changed(&mut self, state: &mut State<X>, x: &X) -> Result<()> {
        Ok(())
    }

    /// A button press landed on the bar window at `p` (absolute coordinates).
    #[allow(unused_variables)]
    fn bar_clicked(&mut self, p: Point, state: &mut State<X>, x: &X) -> Result<()> {
        Ok(())
    }

    /// The user asked for the program launcher.
    #[allow(unused_variables)]
    fn launcher_requested(&mut self, state: &mut State<X>, x: &X) -> Result<()> {
        Ok(())
    }

    /// A transient status message (volume level etc) should be shown.
    #[allow(unused_variables)]
    fn status_message(&mut self, msg: &str, state: &mut State<X>, x: &X) -> Result<()> {
        Ok(())
    }
}

/// A set of boxed [Hook] trait objects, run in registration order.
pub type Hooks<X> = Vec<Box<dyn Hook<X>>>;

// Hooks are owned by the state they need mutable access to, so they are
// taken out of the config for the duration of the call and then merged back
// in with anything a hook itself registered.
pub(crate) fn run_hooks<X, F>(state: &mut State<X>, x: &X, mut f: F)
where
    X: XConn,
    F: FnMut(&mut dyn Hook<X>, &mut State<X>, &X) -> Result<()>,
{
    let mut hooks = mem::take(&mut state.config.hooks);

    for h in hooks.iter_mut() {
        if let Err(e) = f(h.as_mut(), state, x) {
            error!(%e, "error running hook");
        }
    }

    let mut added = mem::take(&mut state.config.hooks);
    hooks.append(&mut added);
    state.config.hooks = hooks;
}
