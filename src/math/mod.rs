mod color;
mod easing;

pub use color::{hex_to_rgb, rgb_to_bytes, Color};
pub use easing::approach;
