use glam::{Mat4, Vec3, Vec4};
use std::collections::{BTreeMap, HashMap};

use super::backend::{GeometryHandle, GraphicsBackend, MaterialHandle, RenderError, ResourceStats};
use crate::core::{SurfaceId, Viewport};
use crate::math::rgb_to_bytes;
use crate::scene::{DrawItem, Fog, Geometry, Lights, Material, PerspectiveCamera, Scene, Shading, Topology};

const SHININESS: f32 = 32.0;
/// Clip-space w below which a vertex counts as behind the camera
const MIN_CLIP_W: f32 = 1e-3;

/// RGBA colour buffer with a depth buffer
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// Create a transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![[0; 4]; count],
            depth: vec![f32::INFINITY; count],
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Clear to fully transparent and reset depth
    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
        self.depth.fill(f32::INFINITY);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x as i32, y as i32).map(|i| self.pixels[i])
    }

    /// Tightly packed RGBA rows, top row first
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels with non-zero alpha
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Composite `rgb` with coverage `alpha` over the pixel, honouring depth
    fn blend(&mut self, x: i32, y: i32, depth: f32, rgb: [f32; 3], alpha: f32, write_depth: bool) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if depth >= self.depth[idx] {
            return;
        }
        if write_depth {
            self.depth[idx] = depth;
        }

        let dst = self.pixels[idx];
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }

        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let d = dst[c] as f32 / 255.0;
            out[c] = (rgb[c] * alpha + d * dst_a * (1.0 - alpha)) / out_a;
        }

        let [r, g, b] = rgb_to_bytes(out);
        self.pixels[idx] = [r, g, b, (out_a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8];
    }
}

/// Vertex after projection: pixel coordinates plus depth in [0, 1]
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    z: f32,
}

/// Per-frame constants shared by every draw item
struct FrameContext<'a> {
    view_proj: Mat4,
    eye: Vec3,
    lights: &'a Lights,
    fog: Option<Fog>,
    /// Pixels per world unit at distance 1
    focal_pixels: f32,
    width: f32,
    height: f32,
}

impl FrameContext<'_> {
    fn project(&self, world: Vec3) -> Option<ScreenVertex> {
        let clip: Vec4 = self.view_proj * world.extend(1.0);
        if clip.w < MIN_CLIP_W {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenVertex {
            x: (ndc.x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc.y) * 0.5 * self.height,
            z: ndc.z,
        })
    }

    fn apply_fog(&self, rgb: [f32; 3], world: Vec3) -> [f32; 3] {
        match self.fog {
            Some(fog) => {
                let f = fog.factor(world.distance(self.eye));
                let fc = fog.color.to_rgb();
                [0, 1, 2].map(|c| rgb[c] + (fc[c] - rgb[c]) * f)
            }
            None => rgb,
        }
    }

    /// Ambient plus Lambert and Blinn-Phong terms from both point lights
    fn shade(&self, material: &Material, normal: Vec3, at: Vec3) -> [f32; 3] {
        let base = material.color.to_rgb();
        let Shading::Physical { roughness, metalness, clearcoat, .. } = material.shading else {
            return base;
        };

        let ambient = self.lights.ambient_color.to_rgb().map(|c| c * self.lights.ambient_intensity);
        let view = (self.eye - at).normalize_or_zero();
        let diffuse_weight = 1.0 - 0.5 * metalness;
        let gloss = (1.0 - roughness).powi(2) * (0.5 + 0.5 * clearcoat);

        let mut out = [0.0f32; 3];
        for c in 0..3 {
            out[c] = base[c] * ambient[c];
        }

        for light in self.lights.points() {
            let to_light = (light.position - at).normalize_or_zero();
            let lambert = normal.dot(to_light).max(0.0);
            let half = (to_light + view).normalize_or_zero();
            let specular = normal.dot(half).max(0.0).powf(SHININESS) * gloss;
            let color = light.color.to_rgb();
            let energy = light.intensity / std::f32::consts::PI;

            for c in 0..3 {
                out[c] += color[c] * energy * (base[c] * lambert * diffuse_weight + specular);
            }
        }

        out
    }
}

/// CPU rasterizer implementing the graphics backend
///
/// Surfaces are [`FrameBuffer`]s; triangles are flat shaded per face,
/// wireframes and line geometry are drawn as one-pixel segments and points
/// as small squares. Transparent items are drawn after opaque ones without
/// writing depth.
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    surfaces: BTreeMap<SurfaceId, FrameBuffer>,
    geometries: HashMap<GeometryHandle, Geometry>,
    materials: HashMap<MaterialHandle, Material>,
    next_id: u64,
    stats: ResourceStats,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn stats(&self) -> ResourceStats {
        self.stats
    }

    pub fn framebuffer(&self, surface: SurfaceId) -> Option<&FrameBuffer> {
        self.surfaces.get(&surface)
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }
}

fn lookup<'a>(
    geometries: &'a HashMap<GeometryHandle, Geometry>,
    materials: &'a HashMap<MaterialHandle, Material>,
    item: &DrawItem,
) -> Result<(&'a Geometry, &'a Material), RenderError> {
    let geometry = geometries
        .get(&item.geometry)
        .ok_or(RenderError::UnknownHandle { kind: "geometry", id: item.geometry.0 })?;
    let material = materials
        .get(&item.material)
        .ok_or(RenderError::UnknownHandle { kind: "material", id: item.material.0 })?;
    Ok((geometry, material))
}

impl GraphicsBackend for SoftwareBackend {
    fn create_surface(&mut self, viewport: Viewport) -> Result<SurfaceId, RenderError> {
        let id = SurfaceId(self.next());
        self.surfaces.insert(id, FrameBuffer::new(viewport.width, viewport.height));
        self.stats.surfaces_created += 1;
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport) {
        if let Some(fb) = self.surfaces.get_mut(&surface) {
            fb.resize(viewport.width, viewport.height);
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface).is_some() {
            self.stats.surfaces_destroyed += 1;
        } else {
            self.stats.invalid_disposals += 1;
        }
    }

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.geometries.insert(handle, geometry);
        self.stats.geometries_created += 1;
        handle
    }

    fn create_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, material);
        self.stats.materials_created += 1;
        handle
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) {
        if self.geometries.remove(&handle).is_some() {
            self.stats.geometries_disposed += 1;
        } else {
            log::warn!("geometry {:?} disposed twice or never created", handle);
            self.stats.invalid_disposals += 1;
        }
    }

    fn dispose_material(&mut self, handle: MaterialHandle) {
        if self.materials.remove(&handle).is_some() {
            self.stats.materials_disposed += 1;
        } else {
            log::warn!("material {:?} disposed twice or never created", handle);
            self.stats.invalid_disposals += 1;
        }
    }

    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        // Resolve every item first so a bad handle leaves the surface untouched
        let mut items = Vec::new();
        for item in scene.draw_list() {
            let (geometry, material) = lookup(&self.geometries, &self.materials, &item)?;
            items.push((item.world, geometry, material));
        }

        // Opaque first, then transparent in scene order
        items.sort_by_key(|(_, geometry, material)| is_transparent(geometry, material));

        let fb = self.surfaces.get_mut(&surface).ok_or(RenderError::NoSurface(surface))?;
        fb.clear();

        let (width, height) = fb.dimensions();
        let ctx = FrameContext {
            view_proj: camera.view_projection(),
            eye: camera.position,
            lights: &scene.lights,
            fog: scene.fog,
            focal_pixels: height as f32 / (2.0 * (camera.fov_degrees.to_radians() / 2.0).tan()),
            width: width as f32,
            height: height as f32,
        };

        for &(world, geometry, material) in &items {
            let world = &world;
            let transparent = is_transparent(geometry, material);
            match (geometry.topology, material.wireframe) {
                (Topology::Triangles, false) => fill_triangles(fb, &ctx, world, geometry, material, transparent),
                (Topology::Triangles, true) => {
                    for [a, b, c] in geometry.triangles() {
                        for (p, q) in [(a, b), (b, c), (c, a)] {
                            draw_segment(fb, &ctx, world, p, q, material, transparent);
                        }
                    }
                }
                (Topology::Lines, _) => {
                    for [p, q] in geometry.segments() {
                        draw_segment(fb, &ctx, world, p, q, material, transparent);
                    }
                }
                (Topology::Points, _) => draw_points(fb, &ctx, world, geometry, material),
            }
        }

        self.stats.frames_rendered += 1;
        Ok(())
    }
}

fn is_transparent(geometry: &Geometry, material: &Material) -> bool {
    geometry.topology == Topology::Points || material.coverage() < 1.0
}

fn fill_triangles(
    fb: &mut FrameBuffer,
    ctx: &FrameContext<'_>,
    world: &Mat4,
    geometry: &Geometry,
    material: &Material,
    transparent: bool,
) {
    let alpha = material.coverage();

    for tri in geometry.triangles() {
        let w = tri.map(|p| world.transform_point3(p));
        let centroid = (w[0] + w[1] + w[2]) / 3.0;

        let mut normal = (w[1] - w[0]).cross(w[2] - w[0]).normalize_or_zero();
        // Double sided: light the face that looks at the camera
        if normal.dot(ctx.eye - centroid) < 0.0 {
            normal = -normal;
        }

        let rgb = ctx.apply_fog(ctx.shade(material, normal, centroid), centroid);

        let (Some(a), Some(b), Some(c)) = (ctx.project(w[0]), ctx.project(w[1]), ctx.project(w[2])) else {
            continue;
        };
        rasterize_triangle(fb, a, b, c, rgb, alpha, !transparent);
    }
}

/// Edge-function fill over the triangle's bounding box
fn rasterize_triangle(
    fb: &mut FrameBuffer,
    a: ScreenVertex,
    b: ScreenVertex,
    c: ScreenVertex,
    rgb: [f32; 3],
    alpha: f32,
    write_depth: bool,
) {
    let area = edge(a, b, c.x, c.y);
    if area.abs() < f32::EPSILON {
        return;
    }

    let (w, h) = fb.dimensions();
    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i32;
    let max_x = a.x.max(b.x).max(c.x).ceil().min(w as f32 - 1.0) as i32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i32;
    let max_y = a.y.max(b.y).max(c.y).ceil().min(h as f32 - 1.0) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b, c, px, py) / area;
            let w1 = edge(c, a, px, py) / area;
            let w2 = edge(a, b, px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let depth = w0 * a.z + w1 * b.z + w2 * c.z;
            fb.blend(x, y, depth, rgb, alpha, write_depth);
        }
    }
}

fn edge(a: ScreenVertex, b: ScreenVertex, x: f32, y: f32) -> f32 {
    (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x)
}

/// DDA line with interpolated depth
fn draw_segment(
    fb: &mut FrameBuffer,
    ctx: &FrameContext<'_>,
    world: &Mat4,
    p: Vec3,
    q: Vec3,
    material: &Material,
    transparent: bool,
) {
    let (wp, wq) = (world.transform_point3(p), world.transform_point3(q));
    let (Some(a), Some(b)) = (ctx.project(wp), ctx.project(wq)) else {
        return;
    };

    let rgb = ctx.apply_fog(material.color.to_rgb(), (wp + wq) * 0.5);
    let alpha = material.coverage();

    let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
    // Off-screen segments can be arbitrarily long once projected
    if steps > 4 * (fb.width + fb.height) as usize {
        return;
    }

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = a.x + (b.x - a.x) * t;
        let y = a.y + (b.y - a.y) * t;
        let z = a.z + (b.z - a.z) * t;
        fb.blend(x.floor() as i32, y.floor() as i32, z, rgb, alpha, !transparent);
    }
}

fn draw_points(fb: &mut FrameBuffer, ctx: &FrameContext<'_>, world: &Mat4, geometry: &Geometry, material: &Material) {
    let size = match material.shading {
        Shading::Points { size } => size,
        _ => 1.0 / ctx.focal_pixels,
    };
    let rgb = material.color.to_rgb();
    let alpha = material.coverage();

    for p in &geometry.positions {
        let wp = world.transform_point3(*p);
        let Some(v) = ctx.project(wp) else {
            continue;
        };

        let distance = wp.distance(ctx.eye).max(MIN_CLIP_W);
        let extent = (size * ctx.focal_pixels / distance).round().max(1.0) as i32;
        let shaded = ctx.apply_fog(rgb, wp);
        let (x0, y0) = (v.x.floor() as i32, v.y.floor() as i32);

        for dy in 0..extent {
            for dx in 0..extent {
                fb.blend(x0 + dx, y0 + dy, v.z, shaded, alpha, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use crate::scene::Shape;

    #[test]
    fn test_framebuffer_starts_transparent() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.dimensions(), (4, 3));
        assert_eq!(fb.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(fb.covered_pixels(), 0);
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_blend_opaque_over_transparent() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.blend(1, 1, 0.5, [1.0, 0.0, 0.0], 1.0, true);
        assert_eq!(fb.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(fb.covered_pixels(), 1);
    }

    #[test]
    fn test_depth_test_rejects_farther_fragment() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.blend(0, 0, 0.2, [0.0, 1.0, 0.0], 1.0, true);
        fb.blend(0, 0, 0.8, [1.0, 0.0, 0.0], 1.0, true);
        assert_eq!(fb.pixel(0, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_half_alpha_over_transparent_keeps_color() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.blend(0, 0, 0.5, [0.0, 0.0, 1.0], 0.5, false);
        let px = fb.pixel(0, 0).unwrap();
        assert_eq!(&px[..3], &[0, 0, 255]);
        assert_eq!(px[3], 128);
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.blend(0, 0, 0.5, [1.0, 1.0, 1.0], 1.0, true);
        fb.clear();
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn test_dispose_twice_is_counted() {
        let mut backend = SoftwareBackend::new();
        let g = backend.create_geometry(Shape::Cuboid { size: 1.0 }.build());
        let m = backend.create_material(Material::basic(Color::WHITE));

        backend.dispose_geometry(g);
        backend.dispose_geometry(g);
        backend.dispose_material(m);

        let stats = backend.stats();
        assert_eq!(stats.live_geometries(), 0);
        assert_eq!(stats.live_materials(), 0);
        assert_eq!(stats.invalid_disposals, 1);
        assert!(backend.geometry(g).is_none());
    }

    #[test]
    fn test_surface_resize() {
        let mut backend = SoftwareBackend::new();
        let surface = backend.create_surface(Viewport::new(8, 8)).unwrap();
        backend.resize_surface(surface, Viewport::new(16, 4));
        assert_eq!(backend.framebuffer(surface).unwrap().dimensions(), (16, 4));

        backend.destroy_surface(surface);
        assert!(backend.framebuffer(surface).is_none());
        assert!(backend.stats().is_clean());
    }
}
