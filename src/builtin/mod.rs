//! Built in functionality for use in user defined window managers.
pub mod actions;
