use crate::core::{SurfaceId, Viewport};
use crate::scene::{Geometry, Material, PerspectiveCamera, Scene};

/// Backend-owned geometry buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u64);

/// Backend-owned material state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The graphics context or surface could not be created
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    /// The surface was lost or outdated and could not present
    #[error("surface error: {0}")]
    Surface(String),

    /// A frame referenced a handle that is not alive
    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u64 },

    /// Rendering to a surface this backend does not own
    #[error("no surface {0:?}")]
    NoSurface(SurfaceId),
}

/// Graphics context owned by one scene renderer
///
/// Geometry and material uploads return handles that stay valid until
/// explicitly disposed; the backend does not reclaim them on its own.
pub trait GraphicsBackend {
    /// Create the render surface at the given size
    fn create_surface(&mut self, viewport: Viewport) -> Result<SurfaceId, RenderError>;

    /// Resize the render target of an existing surface
    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport);

    /// Release the surface
    fn destroy_surface(&mut self, surface: SurfaceId);

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryHandle;

    fn create_material(&mut self, material: Material) -> MaterialHandle;

    fn dispose_geometry(&mut self, handle: GeometryHandle);

    fn dispose_material(&mut self, handle: MaterialHandle);

    /// Draw one frame of `scene` as seen by `camera`
    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;
}

/// Counts of resources created and released by a backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    pub surfaces_created: usize,
    pub surfaces_destroyed: usize,
    pub geometries_created: usize,
    pub geometries_disposed: usize,
    pub materials_created: usize,
    pub materials_disposed: usize,
    /// Dispose calls for handles that were not alive
    pub invalid_disposals: usize,
    pub frames_rendered: u64,
}

impl ResourceStats {
    pub fn live_geometries(&self) -> usize {
        self.geometries_created - self.geometries_disposed
    }

    pub fn live_materials(&self) -> usize {
        self.materials_created - self.materials_disposed
    }

    pub fn live_surfaces(&self) -> usize {
        self.surfaces_created - self.surfaces_destroyed
    }

    /// Nothing left alive and nothing released twice
    pub fn is_clean(&self) -> bool {
        self.live_geometries() == 0
            && self.live_materials() == 0
            && self.live_surfaces() == 0
            && self.invalid_disposals == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_live_counts() {
        let stats = ResourceStats {
            surfaces_created: 1,
            geometries_created: 5,
            geometries_disposed: 2,
            materials_created: 5,
            materials_disposed: 5,
            ..Default::default()
        };

        assert_eq!(stats.live_geometries(), 3);
        assert_eq!(stats.live_materials(), 0);
        assert_eq!(stats.live_surfaces(), 1);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_default_stats_are_clean() {
        assert!(ResourceStats::default().is_clean());
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::UnknownHandle { kind: "geometry", id: 4 };
        assert_eq!(err.to_string(), "unknown geometry handle 4");

        let err = RenderError::ContextUnavailable("no adapter".into());
        assert!(err.to_string().contains("no adapter"));
    }
}
