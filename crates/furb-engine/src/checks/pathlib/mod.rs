//! Checks suggesting `pathlib.Path` helpers over `open()` boilerplate.

pub mod read_x;
pub mod write_x;
