//! Tracking of managed client windows and their per-client state.
use crate::{pure::geometry::Rect, Error, Result, Xid, MAX_CLIENTS};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Window manager state tracked for each managed client.
///
/// `saved_rect` is only ever `Some` while the client is fullscreen: it is
/// written when fullscreen is entered and taken back out when it is left,
/// which is what lets un-maximising restore the exact pre-maximise geometry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClientState {
    pub(crate) fullscreen: bool,
    pub(crate) minimized: bool,
    pub(crate) saved_rect: Option<Rect>,
}

impl ClientState {
    /// Whether this client is currently fullscreen
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether this client is currently minimized
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}

/// The set of clients currently under window manager control.
///
/// Insertion order is meaningful: it determines both the order that clients
/// appear in the bar and their master / stack assignment when tiling, so
/// removal always shifts the remaining entries rather than swapping.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    ordered: Vec<Xid>,
    states: HashMap<Xid, ClientState>,
}

impl ClientRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start managing `id` with default client state.
    ///
    /// Adding a client that is already managed is a no-op. Once
    /// [MAX_CLIENTS] clients are being managed this returns
    /// [Error::ClientCapacity]: callers are expected to log and drop the
    /// client rather than treat this as fatal.
    pub fn add(&mut self, id: Xid) -> Result<()> {
        if self.states.contains_key(&id) {
            return Ok(());
        }

        if self.ordered.len() >= MAX_CLIENTS {
            return Err(Error::ClientCapacity { limit: MAX_CLIENTS });
        }

        self.ordered.push(id);
        self.states.insert(id, ClientState::default());

        Ok(())
    }

    /// Stop managing `id`, dropping its state.
    ///
    /// The relative order of the remaining clients is preserved. Removing an
    /// unknown client is a no-op.
    pub fn remove(&mut self, id: &Xid) {
        self.ordered.retain(|c| c != id);
        self.states.remove(id);
    }

    /// Whether `id` is currently managed.
    pub fn contains(&self, id: &Xid) -> bool {
        self.states.contains_key(id)
    }

    /// The state tracked for `id`.
    ///
    /// # Errors
    /// Returns [Error::UnknownClient] if `id` was never added: callers on
    /// paths where the client may have been destroyed in the meantime should
    /// check [contains][ClientRegistry::contains] first.
    pub fn state(&self, id: &Xid) -> Result<&ClientState> {
        self.states.get(id).ok_or(Error::UnknownClient(*id))
    }

    /// A mutable reference to the state tracked for `id`.
    ///
    /// # Errors
    /// Returns [Error::UnknownClient] if `id` was never added.
    pub fn state_mut(&mut self, id: &Xid) -> Result<&mut ClientState> {
        self.states.get_mut(id).ok_or(Error::UnknownClient(*id))
    }

    /// Managed clients in registry order (index 0 is the tiling master).
    pub fn clients(&self) -> impl Iterator<Item = &Xid> + '_ {
        self.ordered.iter()
    }

    /// Iterate over `(client, state)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Xid, &ClientState)> + '_ {
        self.ordered
            .iter()
            .flat_map(|id| self.states.get(id).map(|s| (*id, s)))
    }

    /// The number of clients currently being managed.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the registry currently holds no clients.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
