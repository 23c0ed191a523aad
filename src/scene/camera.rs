use glam::{Mat4, Vec3};

use crate::core::Viewport;

pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 6.0;

/// Perspective camera on the +z axis looking at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            fov_degrees: FIELD_OF_VIEW_DEGREES,
            aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.aspect())
    }

    /// Only the aspect ratio follows the viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cam = PerspectiveCamera::for_viewport(Viewport::new(800, 400));
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(cam.fov_degrees, 75.0);
        assert!((cam.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(1.5);
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_set_viewport_changes_only_aspect() {
        let mut cam = PerspectiveCamera::new(1.0);
        cam.set_viewport(Viewport::new(1920, 1080));
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(cam.fov_degrees, FIELD_OF_VIEW_DEGREES);
        assert_eq!(cam.near, NEAR_PLANE);
    }
}
