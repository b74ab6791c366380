//! Commands exposed to the shell.

pub mod audio;
pub mod exercise;
pub mod unit;

pub use audio::{play, stop};
pub use exercise::{check, fill, parse_exercise, place, reset, select, status, undo};
pub use unit::{current_unit, list_units, load_unit, open_initial, upload_unit};
