//! Per-variant scene configuration as data.
//!
//! Every variant maps to one [`SceneBlueprint`]; scene construction and the
//! per-frame update never branch on the variant itself, only on which
//! optional parts the blueprint carries.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use super::geometry::Shape;
use super::material::Material;
use super::variant::Variant;
use crate::math::Color;

/// A shape paired with the material it is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub shape: Shape,
    pub material: Material,
}

/// Where the ring hangs in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingMount {
    /// Fixed in the scene, unaffected by the group's spin and parallax
    Scene,
    /// Child of the primary group, orbiting with it
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPart {
    pub part: Part,
    pub mount: RingMount,
    /// Rotation about x before the first frame
    pub initial_tilt: f32,
}

/// Overlay drawn on top of the primary mesh, scaled about its centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPart {
    pub part: Part,
    pub scale: f32,
}

/// Colours of the two point lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightPalette {
    pub key: Color,
    pub fill: Color,
}

/// Exponential-squared fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

impl Fog {
    /// Fraction of fog colour at `distance` from the camera
    pub fn factor(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        1.0 - (-d * d).exp()
    }
}

/// Random point cloud filling a cube centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldSpec {
    pub count: usize,
    /// Edge length of the cube
    pub extent: f32,
    pub point_size: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBlueprint {
    pub variant: Variant,
    pub primary: Part,
    pub overlay: Option<OverlayPart>,
    pub core: Option<Part>,
    pub ring: Option<RingPart>,
    pub palette: LightPalette,
    pub fog: Option<Fog>,
    pub starfield: StarfieldSpec,
}

pub const AMBIENT_COLOR: Color = Color::WHITE;
pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const POINT_LIGHT_INTENSITY: f32 = 2.0;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-5.0, -5.0, 5.0);

const STARFIELD_EXTENT: f32 = 60.0;
const STAR_SIZE: f32 = 0.03;
const RING_SEGMENTS: (u32, u32) = (16, 100);

impl Variant {
    pub fn blueprint(self) -> SceneBlueprint {
        match self {
            Variant::Primary => SceneBlueprint {
                variant: self,
                primary: Part {
                    shape: Shape::Icosahedron { radius: 1.8, detail: 10 },
                    material: Material::physical(Color::WHITE, 0.0, 0.1, 0.95).with_clearcoat(1.0),
                },
                overlay: None,
                core: Some(Part {
                    shape: Shape::Icosahedron { radius: 0.8, detail: 4 },
                    material: Material::basic(Color(0xf472b6)).wireframe(),
                }),
                ring: Some(RingPart {
                    part: Part {
                        shape: Shape::Torus {
                            radius: 3.5,
                            tube: 0.02,
                            radial_segments: RING_SEGMENTS.0,
                            tubular_segments: RING_SEGMENTS.1,
                        },
                        material: Material::basic(Color(0x555555)).with_opacity(0.3),
                    },
                    mount: RingMount::Scene,
                    initial_tilt: FRAC_PI_2,
                }),
                palette: LightPalette { key: Color(0xd946ef), fill: Color(0x3b82f6) },
                fog: Some(Fog { color: Color(0x050505), density: 0.002 }),
                starfield: StarfieldSpec {
                    count: 1500,
                    extent: STARFIELD_EXTENT,
                    point_size: STAR_SIZE,
                    opacity: 0.6,
                },
            },
            Variant::Secondary => SceneBlueprint {
                variant: self,
                primary: Part {
                    shape: Shape::Cuboid { size: 2.2 },
                    material: Material::physical(Color(0xcd7f32), 0.1, 0.4, 0.2)
                        .with_clearcoat(1.0)
                        .with_opacity(0.9),
                },
                overlay: Some(OverlayPart {
                    part: Part {
                        shape: Shape::CuboidEdges { size: 2.2 },
                        material: Material::line(Color::WHITE).with_opacity(0.3),
                    },
                    scale: 1.1,
                }),
                core: Some(Part {
                    shape: Shape::Cuboid { size: 1.2 },
                    material: Material::basic(Color(0xffaa00)).wireframe(),
                }),
                ring: None,
                palette: LightPalette { key: Color(0xffaa00), fill: Color(0x3b82f6) },
                fog: None,
                starfield: StarfieldSpec {
                    count: 800,
                    extent: STARFIELD_EXTENT,
                    point_size: STAR_SIZE,
                    opacity: 0.4,
                },
            },
            Variant::Tertiary => SceneBlueprint {
                variant: self,
                primary: Part {
                    shape: Shape::Octahedron { radius: 1.8, detail: 0 },
                    material: Material::physical(Color(0x22d3ee), 0.2, 0.9, 0.5).flat_shaded(),
                },
                overlay: None,
                core: None,
                ring: Some(RingPart {
                    part: Part {
                        shape: Shape::Torus {
                            radius: 2.8,
                            tube: 0.03,
                            radial_segments: RING_SEGMENTS.0,
                            tubular_segments: RING_SEGMENTS.1,
                        },
                        material: Material::basic(Color(0xd946ef)).wireframe(),
                    },
                    mount: RingMount::Group,
                    initial_tilt: 0.0,
                }),
                palette: LightPalette { key: Color(0xd946ef), fill: Color(0x00ffff) },
                fog: None,
                starfield: StarfieldSpec {
                    count: 800,
                    extent: STARFIELD_EXTENT,
                    point_size: STAR_SIZE,
                    opacity: 0.4,
                },
            },
        }
    }
}
