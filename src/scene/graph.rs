use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use super::blueprint::{
    Fog, Part, RingMount, SceneBlueprint, AMBIENT_COLOR, AMBIENT_INTENSITY, FILL_LIGHT_POSITION,
    KEY_LIGHT_POSITION, POINT_LIGHT_INTENSITY,
};
use super::material::Material;
use super::starfield;
use super::variant::Variant;
use crate::core::PointerState;
use crate::math::{approach, Color};
use crate::render::{GeometryHandle, GraphicsBackend, MaterialHandle};

// Per-frame motion. Tunable: kept at these values for visual parity.

/// Idle spin of the primary group, radians per frame about x and y
pub const GROUP_SPIN_X: f32 = 0.002;
pub const GROUP_SPIN_Y: f32 = 0.005;
/// Pointer offset to parallax target
pub const PARALLAX_SCALE: f32 = 2.0;
/// Fraction of the remaining distance covered each frame
pub const PARALLAX_EASING: f32 = 0.05;
/// Core spin per frame about x and y, against the group's spin
pub const CORE_SPIN: f32 = -0.01;
/// Ring tilt per unit of pointer offset
pub const RING_STEER: f32 = 0.5;
/// Starfield spin per frame about y
pub const STARFIELD_SPIN: f32 = -0.0005;

/// Position, XYZ Euler rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn scaled(factor: f32) -> Self {
        Self {
            scale: Vec3::splat(factor),
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Geometry and material uploaded to a backend, placed by a transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub transform: Transform,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub mesh: Mesh,
    pub mount: RingMount,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub key: PointLight,
    pub fill: PointLight,
}

impl Lights {
    pub fn points(&self) -> [PointLight; 2] {
        [self.key, self.fill]
    }
}

/// One mesh ready to rasterize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub world: Mat4,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

/// Scene graph of one mounted renderer
///
/// The group carries the idle spin and pointer parallax. The primary mesh
/// sits in the group; core and overlay are children of the primary mesh.
/// The ring hangs either in the scene or in the group.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub variant: Variant,
    pub group: Transform,
    pub primary: Mesh,
    pub overlay: Option<Mesh>,
    pub core: Option<Mesh>,
    pub ring: Option<Ring>,
    pub stars: Mesh,
    pub lights: Lights,
    pub fog: Option<Fog>,
}

impl Scene {
    /// Upload every part of `blueprint` to `backend` and assemble the graph
    pub fn build<B, R>(blueprint: &SceneBlueprint, backend: &mut B, rng: &mut R) -> Self
    where
        B: GraphicsBackend + ?Sized,
        R: Rng,
    {
        let mut upload = |part: &Part, transform: Transform| Mesh {
            transform,
            geometry: backend.create_geometry(part.shape.build()),
            material: backend.create_material(part.material),
        };

        let primary = upload(&blueprint.primary, Transform::default());
        let overlay = blueprint
            .overlay
            .map(|o| upload(&o.part, Transform::scaled(o.scale)));
        let core = blueprint.core.map(|c| upload(&c, Transform::default()));
        let ring = blueprint.ring.map(|r| {
            let mut transform = Transform::default();
            transform.rotation.x = r.initial_tilt;
            Ring {
                mesh: upload(&r.part, transform),
                mount: r.mount,
            }
        });

        let spec = &blueprint.starfield;
        let stars = Mesh {
            transform: Transform::default(),
            geometry: backend.create_geometry(starfield::generate(spec, rng)),
            material: backend.create_material(
                Material::points(Color::WHITE, spec.point_size).with_opacity(spec.opacity),
            ),
        };

        let lights = Lights {
            ambient_color: AMBIENT_COLOR,
            ambient_intensity: AMBIENT_INTENSITY,
            key: PointLight {
                position: KEY_LIGHT_POSITION,
                color: blueprint.palette.key,
                intensity: POINT_LIGHT_INTENSITY,
            },
            fill: PointLight {
                position: FILL_LIGHT_POSITION,
                color: blueprint.palette.fill,
                intensity: POINT_LIGHT_INTENSITY,
            },
        };

        Self {
            variant: blueprint.variant,
            group: Transform::default(),
            primary,
            overlay,
            core,
            ring,
            stars,
            lights,
            fog: blueprint.fog,
        }
    }

    /// One frame of motion for the given pointer offset
    pub fn advance(&mut self, pointer: PointerState) {
        self.group.rotation.y += GROUP_SPIN_Y;
        self.group.rotation.x += GROUP_SPIN_X;

        // Screen y grows downward, scene y grows upward
        let target_x = pointer.x * PARALLAX_SCALE;
        let target_y = -pointer.y * PARALLAX_SCALE;
        self.group.position.x = approach(self.group.position.x, target_x, PARALLAX_EASING);
        self.group.position.y = approach(self.group.position.y, target_y, PARALLAX_EASING);

        if let Some(core) = self.core.as_mut() {
            core.transform.rotation.y += CORE_SPIN;
            core.transform.rotation.x += CORE_SPIN;
        }

        if let Some(ring) = self.ring.as_mut() {
            ring.mesh.transform.rotation.x = std::f32::consts::FRAC_PI_2 + pointer.y * RING_STEER;
            ring.mesh.transform.rotation.y = pointer.x * RING_STEER;
        }

        self.stars.transform.rotation.y += STARFIELD_SPIN;
    }

    /// Flatten the graph into world-space draw items
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let group = self.group.matrix();
        let primary = group * self.primary.transform.matrix();

        let item = |world: Mat4, mesh: &Mesh| DrawItem {
            world,
            geometry: mesh.geometry,
            material: mesh.material,
        };

        let mut items = vec![item(self.stars.transform.matrix(), &self.stars), item(primary, &self.primary)];

        for child in self.core.iter().chain(self.overlay.iter()) {
            items.push(item(primary * child.transform.matrix(), child));
        }

        if let Some(ring) = &self.ring {
            let parent = match ring.mount {
                RingMount::Scene => Mat4::IDENTITY,
                RingMount::Group => group,
            };
            items.push(item(parent * ring.mesh.transform.matrix(), &ring.mesh));
        }

        items
    }

    /// Every mesh, each exactly once
    pub fn meshes(&self) -> Vec<&Mesh> {
        let mut meshes = vec![&self.primary];
        meshes.extend(self.overlay.iter());
        meshes.extend(self.core.iter());
        meshes.extend(self.ring.iter().map(|r| &r.mesh));
        meshes.push(&self.stars);
        meshes
    }
}
