//! Side effect free data structures and algorithms.
//!
//! Everything in this module is a pure function of its inputs: no X state is
//! read or written, which is what makes the tiling behaviour of the window
//! manager testable without a display server.
pub mod geometry;
pub mod layout;

pub use layout::main_and_stack;
