use std::collections::BTreeMap;

use super::window::Viewport;

/// Identifier of a render surface created by a graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// Identifier of a registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Identifier of a pending animation-frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Events a renderer can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    Resize,
}

/// Container a scene renderer is mounted into
///
/// Plays the part of the page element plus the page's event loop: it
/// measures itself, holds attached surfaces, keeps a listener registry and
/// schedules frame callbacks. The owner of the host dispatches events to the
/// mounted renderer only while the matching listener is registered.
pub trait Host {
    /// Current container size, `None` while the container is not laid out
    fn viewport(&self) -> Option<Viewport>;

    /// Attach a render surface to the container
    fn attach_surface(&mut self, surface: SurfaceId);

    /// Detach a surface; returns false if it was not attached
    fn detach_surface(&mut self, surface: SurfaceId) -> bool;

    /// Register a listener for an event kind
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Remove a previously registered listener
    fn remove_listener(&mut self, id: ListenerId);

    /// Ask for a frame callback on the next display refresh
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel a pending frame callback
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Bookkeeping shared by host implementations
#[derive(Debug, Default, Clone)]
pub struct HostRegistry {
    surfaces: Vec<SurfaceId>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    pending_frames: Vec<FrameRequestId>,
    next_id: u64,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn attach_surface(&mut self, surface: SurfaceId) {
        if !self.surfaces.contains(&surface) {
            self.surfaces.push(surface);
        }
    }

    pub fn detach_surface(&mut self, surface: SurfaceId) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| *s != surface);
        self.surfaces.len() != before
    }

    pub fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, kind);
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    pub fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next());
        self.pending_frames.push(id);
        id
    }

    pub fn cancel_frame(&mut self, id: FrameRequestId) {
        self.pending_frames.retain(|f| *f != id);
    }

    /// Pop every pending frame request, oldest first
    pub fn take_pending_frames(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending_frames)
    }

    pub fn attached_surfaces(&self) -> &[SurfaceId] {
        &self.surfaces
    }

    pub fn pending_frames(&self) -> &[FrameRequestId] {
        &self.pending_frames
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// True when at least one listener of `kind` is registered
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// No surfaces, listeners or frame requests left behind
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty() && self.listeners.is_empty() && self.pending_frames.is_empty()
    }
}

/// Offscreen container with a settable size
///
/// Used for headless rendering and benchmarks; frames are driven by the
/// caller through [`HeadlessHost::take_pending_frames`].
#[derive(Debug, Default, Clone)]
pub struct HeadlessHost {
    viewport: Option<Viewport>,
    registry: HostRegistry,
}

impl HeadlessHost {
    /// Host that is already laid out at `width`×`height`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Some(Viewport::new(width, height)),
            registry: HostRegistry::new(),
        }
    }

    /// Host whose container is not available yet
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    pub fn take_pending_frames(&mut self) -> Vec<FrameRequestId> {
        self.registry.take_pending_frames()
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn attach_surface(&mut self, surface: SurfaceId) {
        self.registry.attach_surface(surface);
    }

    fn detach_surface(&mut self, surface: SurfaceId) -> bool {
        self.registry.detach_surface(surface)
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.registry.add_listener(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.registry.remove_listener(id);
    }

    fn request_frame(&mut self) -> FrameRequestId {
        self.registry.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.registry.cancel_frame(id);
    }
}
