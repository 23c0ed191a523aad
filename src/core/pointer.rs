use super::window::Viewport;

/// Scale from pixels-off-centre to the normalized pointer offset
pub const POINTER_SENSITIVITY: f32 = 0.001;

/// Pointer offset from the window centre, scaled by [`POINTER_SENSITIVITY`]
///
/// Positive `x` is right of centre, positive `y` is below centre
/// (screen convention, before any flip into scene space).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pointer at the window centre
    pub fn centered() -> Self {
        Self::default()
    }

    /// Derive the offset from a cursor position in window pixels
    pub fn from_client(client_x: f32, client_y: f32, window: Viewport) -> Self {
        let (cx, cy) = window.center();
        Self {
            x: (client_x - cx) * POINTER_SENSITIVITY,
            y: (client_y - cy) * POINTER_SENSITIVITY,
        }
    }
}
