//! Native application loop.
//!
//! Opens a window and drives the control panel scene with `winit`. There is no
//! headset on the desktop, so the mouse stands in for the controller:
//!
//! - left click activates what is under the cursor
//! - `Escape` leaves, like the exit buttons do in an immersive session
//! - every redraw advances the scene clock by the elapsed wall time

use std::sync::Arc;

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{audio::LogSink, config::SceneConfig, scene::ControlPanelScene};

pub struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    scene: Option<ControlPanelScene>,
    cursor: PhysicalPosition<f64>,
    last_time: Instant,
    // Startup errors can't be returned from the handler, so they wait here for `run`.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            scene: None,
            cursor: PhysicalPosition::new(0.0, 0.0),
            last_time: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (width, height) = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let mut scene = ControlPanelScene::new(&self.config, Box::new(LogSink))?;
        let size = window.inner_size();
        scene.resize(size.width, size.height);

        self.scene = Some(scene);
        self.window = Some(window);
        self.last_time = Instant::now();
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scene) = &mut self.scene {
            scene.teardown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("App initialization failed: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(scene) = &mut self.scene else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => scene.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => self.cursor = position,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(id) = scene.pointer_down(self.cursor.x as f32, self.cursor.y as f32) {
                    log::info!("Activated {:?}", id);
                }
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed() && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                log::info!("Escape pressed, leaving");
                self.shutdown(event_loop);
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                scene.tick(dt);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
