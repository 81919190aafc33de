//! The main and stack tiling layout.
//!
//! There is intentionally only one layout algorithm in this crate: the first
//! client in registry order is the "master" and takes the left half of the
//! usable screen area, every other client is stacked vertically in the right
//! hand column. The output is recomputed from scratch on every call so
//! retiling after a map or unmap can never accumulate drift.
use crate::{pure::geometry::Rect, Xid};

/// The proportion of the screen given over to tiled clients.
///
/// The remaining 5% forms an even margin around the tiled area.
const USABLE_RATIO: f64 = 0.95;

/// Assign a screen position to each client in `clients`, in order.
///
/// The first client is the master and receives the full usable area when it
/// is the only client, or the left half of it otherwise. Remaining clients
/// split the right hand column evenly with `gap` pixels between cells.
/// Stack cells are permitted to become arbitrarily short rather than
/// overflowing the column when there are more clients than vertical space.
///
/// The returned rects are full layout cells: callers are expected to shrink
/// them by the configured border width (see [Rect::shrink_in]) before
/// positioning the client windows themselves.
pub fn main_and_stack(clients: &[Xid], screen: Rect, gap: u32) -> Vec<(Xid, Rect)> {
    if clients.is_empty() {
        return Vec::new();
    }

    let scaled = screen.scale_w(USABLE_RATIO).scale_h(USABLE_RATIO);
    let usable_w = scaled.w.saturating_sub(2 * gap);
    let usable_h = scaled.h.saturating_sub(2 * gap);
    let x = screen.x + (screen.w - usable_w) / 2;
    let y = screen.y + (screen.h - usable_h) / 2;

    let n_stack = (clients.len() - 1) as u32;
    let master_w = if n_stack > 0 {
        (usable_w / 2).saturating_sub(gap / 2)
    } else {
        usable_w
    };

    let mut positions = vec![(clients[0], Rect::new(x, y, master_w, usable_h))];

    if n_stack > 0 {
        let stack_x = x + master_w + gap;
        let stack_w = usable_w.saturating_sub(master_w + gap);
        let stack_h = usable_h.saturating_sub((n_stack - 1) * gap) / n_stack;

        positions.extend(clients[1..].iter().enumerate().map(|(i, &c)| {
            let r = Rect::new(stack_x, y + i as u32 * (stack_h + gap), stack_w, stack_h);
            (c, r)
        }));
    }

    positions
}
