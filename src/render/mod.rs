//! Graphics backends for the scene renderer

mod backend;
mod gpu;
mod present;
mod raster;

pub use backend::{GeometryHandle, GraphicsBackend, MaterialHandle, RenderError, ResourceStats};
pub use gpu::GpuContext;
pub use present::{SurfacePresenter, WindowBackend};
pub use raster::{FrameBuffer, SoftwareBackend};
