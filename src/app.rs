use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use aura_studio::chat::{ChatError, ChatSession, CompletionService, Message, Role};
use aura_studio::cli::ShowArgs;
use aura_studio::core::{
    Clock, Command, FpsCounter, FrameRequestId, Host, HostRegistry, ListenerId, ListenerKind, SurfaceId, Viewport,
    WinitInput,
};
use aura_studio::render::{RenderError, WindowBackend};
use aura_studio::InteractiveSpace;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

pub enum AppEvent {
    ChatReply(Result<String, ChatError>),
}

/// Window as host container; frame requests become redraw requests
struct WindowHost {
    window: Arc<Window>,
    registry: HostRegistry,
}

impl WindowHost {
    fn window_viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }
}

impl Host for WindowHost {
    fn viewport(&self) -> Option<Viewport> {
        Some(self.window_viewport()).filter(|v| !v.is_empty())
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
        self.window.request_redraw();
        self.registry.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.registry.cancel_frame(id);
    }
}

type BackendFactory = Box<dyn FnMut() -> Result<WindowBackend, RenderError>>;

/// Terminal-side chat state of the window app
struct ChatPrompt {
    session: ChatSession,
    input: String,
    service: Option<Arc<dyn CompletionService>>,
}

impl ChatPrompt {
    fn handle_key(&mut self, event: &KeyEvent) -> Option<String> {
        match &event.logical_key {
            Key::Named(NamedKey::Enter) => Some(std::mem::take(&mut self.input)),
            Key::Named(NamedKey::Backspace) => {
                self.input.pop();
                None
            }
            _ => {
                if let Some(text) = &event.text {
                    self.input.extend(text.chars().filter(|c| !c.is_control()));
                }
                None
            }
        }
    }
}

pub struct App {
    options: ShowArgs,
    window: Option<Arc<Window>>,
    host: Option<WindowHost>,
    space: Option<InteractiveSpace<WindowBackend, BackendFactory>>,
    input: WinitInput,
    clock: Clock,
    fps: FpsCounter,
    chat: ChatPrompt,
    runtime: tokio::runtime::Handle,
    proxy: EventLoopProxy<AppEvent>,
}

impl App {
    pub fn new(
        options: ShowArgs,
        service: Option<Arc<dyn CompletionService>>,
        runtime: tokio::runtime::Handle,
        proxy: EventLoopProxy<AppEvent>,
    ) -> Self {
        Self {
            options,
            window: None,
            host: None,
            space: None,
            input: WinitInput::new(),
            clock: Clock::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
            chat: ChatPrompt {
                session: ChatSession::with_greeting(),
                input: String::new(),
                service,
            },
            runtime,
            proxy,
        }
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        match command {
            Command::Quit => {
                if let (Some(space), Some(host)) = (self.space.as_mut(), self.host.as_mut()) {
                    space.unmount(host);
                }
                event_loop.exit();
            }
            Command::SwitchVariant(variant) => {
                if let (Some(space), Some(host)) = (self.space.as_mut(), self.host.as_mut()) {
                    space.set_variant(host, variant);
                }
            }
            Command::ToggleChat => {
                if self.chat.service.is_none() {
                    log::warn!("Chat is unavailable: no API key configured");
                    return;
                }
                if self.chat.session.toggle() {
                    println!("-- chat open (Enter sends, Tab closes) --");
                    self.chat.session.messages().iter().for_each(print_message);
                } else {
                    println!("-- chat closed --");
                }
            }
        }
    }

    fn send_chat(&mut self, text: String) {
        let Some(service) = self.chat.service.clone() else {
            return;
        };
        let Some(pending) = self.chat.session.begin(&text) else {
            return;
        };
        print_message(&Message::user(text));

        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let reply = pending.send(service.as_ref()).await;
            if proxy.send_event(AppEvent::ChatReply(reply)).is_err() {
                log::debug!("Event loop closed before chat reply arrived");
            }
        });
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        if let Some(fps) = self.fps.frame(delta) {
            log::info!("FPS: {:.1}", fps);
        }

        let (Some(space), Some(host)) = (self.space.as_mut(), self.host.as_mut()) else {
            return;
        };
        for id in host.registry.take_pending_frames() {
            if let Err(e) = space.handle_frame(host, id) {
                log::error!("Render error: {}", e);
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(format!("Aura Studio - {}", self.options.variant))
                .with_inner_size(winit::dpi::PhysicalSize::new(self.options.width, self.options.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let factory_window = window.clone();
        let factory: BackendFactory = Box::new(move || WindowBackend::new(factory_window.clone()));
        let mut space = InteractiveSpace::new(self.options.variant, factory);
        if let Some(seed) = self.options.seed {
            space = space.with_seed(seed);
        }

        let mut host = WindowHost {
            window: window.clone(),
            registry: HostRegistry::new(),
        };
        space.sync(&mut host);

        self.window = Some(window);
        self.host = Some(host);
        self.space = Some(space);
        self.clock.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.chat.session.is_open() {
            if let WindowEvent::KeyboardInput { event: key, .. } = &event {
                if key.state == ElementState::Pressed && !matches!(key.logical_key, Key::Named(NamedKey::Tab)) {
                    if let Some(text) = self.chat.handle_key(key) {
                        self.send_chat(text);
                    }
                    return;
                }
            }
        }

        if let Some(command) = self.input.process_event(&event) {
            self.apply(event_loop, command);
            return;
        }

        match event {
            WindowEvent::Resized(_) => {
                if let (Some(space), Some(host)) = (self.space.as_mut(), self.host.as_mut()) {
                    space.handle_resize(host);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(space), Some(host)) = (self.space.as_mut(), self.host.as_ref()) {
                    if host.registry.is_listening(ListenerKind::PointerMove) {
                        space.handle_pointer_move(position.x as f32, position.y as f32, host.window_viewport());
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::ChatReply(reply) => {
                self.chat.session.complete(reply);
                if let Some(message) = self.chat.session.messages().last() {
                    print_message(message);
                }
            }
        }
    }
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::User => "you",
        Role::Model => "AIOOOKI",
    };
    println!("{:>8}: {}", who, message.text);
}
