//! Registry data and embedded marker tables.

pub mod entry;
pub mod markers;
