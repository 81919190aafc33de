//! Pointer driven movement and resizing of client windows.
//!
//! At most one interaction is in flight at a time: it is anchored by the
//! pointer position and window geometry captured at button press and ends at
//! button release. All of the geometry arithmetic lives here so that the
//! state machine can be tested without a display server.
use crate::{pure::geometry::Point, pure::geometry::Rect, Xid};
use std::cmp::max;

/// What an in-flight pointer interaction is doing to its target window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// No interaction is in progress: motion events are ignored
    #[default]
    None,
    /// The window is following the pointer
    Move,
    /// The window's bottom right corner is following the pointer
    Resize,
}

/// The state of the current (or most recent) pointer interaction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    kind: DragKind,
    target: Option<Xid>,
    anchor_pointer: Point,
    anchor_rect: Rect,
}

impl DragState {
    /// Anchor a new interaction against `target`.
    ///
    /// `kind` may be [DragKind::None] for a plain click that selects the
    /// window without beginning a move or resize.
    pub(crate) fn on_press(&mut self, target: Xid, kind: DragKind, pointer: Point, rect: Rect) {
        *self = Self {
            kind,
            target: Some(target),
            anchor_pointer: pointer,
            anchor_rect: rect,
        };
    }

    /// A press landed on an unmanaged surface: drop the selection.
    pub(crate) fn deselect(&mut self) {
        self.target = None;
    }

    /// The button was released: end any move / resize in progress.
    ///
    /// The target is deliberately retained; clearing `kind` alone is enough
    /// to make subsequent motion a no-op.
    pub(crate) fn release(&mut self) {
        self.kind = DragKind::None;
    }

    /// `id` is no longer managed: ensure no further commands target it.
    pub(crate) fn forget(&mut self, id: &Xid) {
        if self.target == Some(*id) {
            self.kind = DragKind::None;
            self.target = None;
        }
    }

    /// The window currently selected by this interaction, if any.
    pub fn target(&self) -> Option<Xid> {
        self.target
    }

    /// What the current interaction is doing.
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// The geometry the target should take with the pointer at `p`.
    ///
    /// Returns `None` unless a move or resize is in progress. For a resize,
    /// both dimensions are clamped at `min_dim` so that an arbitrarily
    /// negative pointer delta can not produce a degenerate window.
    pub fn rect_for_pointer(&self, p: Point, min_dim: u32) -> Option<Rect> {
        self.target?;

        let dx = p.x as i32 - self.anchor_pointer.x as i32;
        let dy = p.y as i32 - self.anchor_pointer.y as i32;
        let r = self.anchor_rect;

        match self.kind {
            DragKind::None => None,

            DragKind::Move => Some(Rect {
                x: max(0, r.x as i32 + dx) as u32,
                y: max(0, r.y as i32 + dy) as u32,
                ..r
            }),

            DragKind::Resize => Some(Rect {
                w: max(min_dim as i32, r.w as i32 + dx) as u32,
                h: max(min_dim as i32, r.h as i32 + dy) as u32,
                ..r
            }),
        }
    }
}
