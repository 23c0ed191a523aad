//! Mounted scene renderers and their lifecycle owner

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{FrameRequestId, Host, ListenerId, ListenerKind, PointerState, SurfaceId, Viewport};
use crate::render::{GraphicsBackend, RenderError};
use crate::scene::{PerspectiveCamera, Scene, Variant};

/// One variant's scene rendering into one host container
///
/// Created by [`SceneRenderer::mount`], released by
/// [`SceneRenderer::teardown`]. Teardown takes the renderer by value, so no
/// frame, pointer or resize handler can run afterwards.
pub struct SceneRenderer<B: GraphicsBackend> {
    backend: B,
    surface: SurfaceId,
    scene: Scene,
    camera: PerspectiveCamera,
    viewport: Viewport,
    pointer: PointerState,
    pointer_listener: ListenerId,
    resize_listener: ListenerId,
    pending_frame: Option<FrameRequestId>,
    frames: u64,
}

impl<B: GraphicsBackend> SceneRenderer<B> {
    /// Build the scene for `variant` and start the frame loop
    ///
    /// Returns `None` without touching the host when the container has no
    /// size yet, or when the backend cannot create a surface. In both cases
    /// `backend` is dropped.
    pub fn mount<H>(host: &mut H, mut backend: B, variant: Variant, seed: Option<u64>) -> Option<Self>
    where
        H: Host + ?Sized,
    {
        let Some(viewport) = host.viewport().filter(|v| !v.is_empty()) else {
            log::debug!("Container not laid out; deferring {} scene", variant);
            return None;
        };

        let surface = match backend.create_surface(viewport) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("Cannot create render surface ({}); leaving container empty", e);
                return None;
            }
        };

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let scene = Scene::build(&variant.blueprint(), &mut backend, &mut rng);
        let camera = PerspectiveCamera::for_viewport(viewport);

        host.attach_surface(surface);
        let pointer_listener = host.add_listener(ListenerKind::PointerMove);
        let resize_listener = host.add_listener(ListenerKind::Resize);
        let pending_frame = Some(host.request_frame());

        log::info!(
            "Mounted {} scene at {}x{} ({} meshes)",
            variant,
            viewport.width,
            viewport.height,
            scene.meshes().len()
        );

        Some(Self {
            backend,
            surface,
            scene,
            camera,
            viewport,
            pointer: PointerState::centered(),
            pointer_listener,
            resize_listener,
            pending_frame,
            frames: 0,
        })
    }

    /// Record the cursor position, in pixels of a window of size `window`
    pub fn handle_pointer_move(&mut self, client_x: f32, client_y: f32, window: Viewport) {
        self.pointer = PointerState::from_client(client_x, client_y, window);
    }

    /// Follow the container's new size; zero-area sizes are ignored
    pub fn handle_resize<H: Host + ?Sized>(&mut self, host: &H) {
        let Some(viewport) = host.viewport().filter(|v| !v.is_empty()) else {
            return;
        };
        if viewport == self.viewport {
            return;
        }

        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        self.backend.resize_surface(self.surface, viewport);
        log::debug!("Resized {} scene to {}x{}", self.scene.variant, viewport.width, viewport.height);
    }

    /// Run the frame for request `id`: advance, render, request the next
    ///
    /// Returns `Ok(false)` for a request this renderer is no longer waiting
    /// on. The next frame is requested even when rendering fails.
    pub fn handle_frame<H: Host + ?Sized>(&mut self, host: &mut H, id: FrameRequestId) -> Result<bool, RenderError> {
        if self.pending_frame != Some(id) {
            log::trace!("Ignoring stale frame request {:?}", id);
            return Ok(false);
        }

        self.scene.advance(self.pointer);
        let result = self.backend.render(self.surface, &self.scene, &self.camera);
        self.pending_frame = Some(host.request_frame());
        result?;

        self.frames += 1;
        Ok(true)
    }

    /// Stop the frame loop, empty the container and release every resource
    ///
    /// Hands the backend back once it holds nothing from this scene.
    pub fn teardown<H: Host + ?Sized>(mut self, host: &mut H) -> B {
        if let Some(id) = self.pending_frame.take() {
            host.cancel_frame(id);
        }
        if !host.detach_surface(self.surface) {
            log::debug!("Surface {:?} was already detached", self.surface);
        }
        host.remove_listener(self.pointer_listener);
        host.remove_listener(self.resize_listener);

        log::info!("Tearing down {} scene after {} frames", self.scene.variant, self.frames);
        self.release()
    }

    /// Release backend resources only, for when the host is gone
    pub fn release(mut self) -> B {
        for mesh in self.scene.meshes() {
            self.backend.dispose_geometry(mesh.geometry);
            self.backend.dispose_material(mesh.material);
        }
        self.backend.destroy_surface(self.surface);
        self.backend
    }

    pub fn variant(&self) -> Variant {
        self.scene.variant
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

/// Lifecycle owner embedding at most one [`SceneRenderer`] in a host
///
/// Backends come from `factory` so a mount can be deferred until the host
/// container is laid out. Dropping a mounted space releases backend
/// resources but cannot clean up the host.
pub struct InteractiveSpace<B, F>
where
    B: GraphicsBackend,
    F: FnMut() -> Result<B, RenderError>,
{
    factory: F,
    variant: Variant,
    seed: Option<u64>,
    renderer: Option<SceneRenderer<B>>,
    teardowns: usize,
}

impl<B, F> InteractiveSpace<B, F>
where
    B: GraphicsBackend,
    F: FnMut() -> Result<B, RenderError>,
{
    pub fn new(variant: Variant, factory: F) -> Self {
        Self {
            factory,
            variant,
            seed: None,
            renderer: None,
            teardowns: 0,
        }
    }

    /// Use a fixed starfield seed for every scene built by this space
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Lifecycle trigger: mount if not mounted and the host is ready
    ///
    /// Returns whether a renderer is mounted afterwards.
    pub fn sync<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.renderer.is_some() {
            return true;
        }
        if host.viewport().filter(|v| !v.is_empty()).is_none() {
            log::debug!("Container not laid out; deferring {} scene", self.variant);
            return false;
        }

        let backend = match (self.factory)() {
            Ok(backend) => backend,
            Err(e) => {
                log::warn!("Graphics backend unavailable ({}); leaving container empty", e);
                return false;
            }
        };

        self.renderer = SceneRenderer::mount(host, backend, self.variant, self.seed);
        self.renderer.is_some()
    }

    /// Switch variant: tear the current scene down, then rebuild
    pub fn set_variant<H: Host + ?Sized>(&mut self, host: &mut H, variant: Variant) -> bool {
        if variant == self.variant && self.renderer.is_some() {
            return true;
        }

        log::info!("Switching scene {} -> {}", self.variant, variant);
        self.unmount(host);
        self.variant = variant;
        self.sync(host)
    }

    /// Tear down the mounted renderer, if any, returning its backend
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<B> {
        let renderer = self.renderer.take()?;
        self.teardowns += 1;
        Some(renderer.teardown(host))
    }

    pub fn handle_frame<H: Host + ?Sized>(&mut self, host: &mut H, id: FrameRequestId) -> Result<bool, RenderError> {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.handle_frame(host, id),
            None => Ok(false),
        }
    }

    pub fn handle_pointer_move(&mut self, client_x: f32, client_y: f32, window: Viewport) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.handle_pointer_move(client_x, client_y, window);
        }
    }

    /// Resize the mounted renderer, or mount now that the host has a size
    pub fn handle_resize<H: Host + ?Sized>(&mut self, host: &mut H) {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.handle_resize(host),
            None => {
                self.sync(host);
            }
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_mounted(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn renderer(&self) -> Option<&SceneRenderer<B>> {
        self.renderer.as_ref()
    }

    /// Number of teardowns run so far
    pub fn teardowns(&self) -> usize {
        self.teardowns
    }
}

impl<B, F> Drop for InteractiveSpace<B, F>
where
    B: GraphicsBackend,
    F: FnMut() -> Result<B, RenderError>,
{
    fn drop(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            log::warn!("{} scene dropped while mounted; releasing backend resources", renderer.variant());
            renderer.release();
        }
    }
}
