//! Animation helpers.

mod easing;

pub use easing::{ease_out_cubic, lerp_eased};
