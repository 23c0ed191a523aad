//! Host plumbing: viewport, pointer, event sources and timing

mod clock;
mod host;
mod input_adapter;
mod pointer;
mod timer;
mod window;

pub use clock::{Clock, FpsCounter};
pub use host::{FrameRequestId, HeadlessHost, Host, HostRegistry, ListenerId, ListenerKind, SurfaceId};
pub use input_adapter::{Command, WinitInput};
pub use pointer::{PointerState, POINTER_SENSITIVITY};
pub use timer::Countdown;
pub use window::Viewport;
