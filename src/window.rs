//! Interactive viewer: a winit application driving the simulation and
//! the renderer once per redraw.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::HvacConfig;
use crate::error::ViewerError;
use crate::gpu::{scene_lines, Camera, Renderer};
use crate::input::{apply_bindings, Action, Input, MouseButton};
use crate::params::Params;
use crate::simulation::{Rotations, Simulation};
use crate::time::FrameClock;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

/// Open a window and run the simulation until it is closed.
pub fn run(config: HvacConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: HvacConfig,
    params: Params,
    simulation: Simulation,
    rotations: Rotations,
    clock: FrameClock,
    input: Input,
    camera: Camera,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    /// First fatal error; reported by [`run`] after the loop exits.
    error: Option<ViewerError>,
}

impl App {
    fn new(config: HvacConfig) -> Self {
        let simulation = Simulation::new(&config);
        Self {
            params: config.params,
            simulation,
            rotations: Rotations::default(),
            clock: FrameClock::new(),
            input: Input::new(),
            camera: Camera::new(),
            window: None,
            renderer: None,
            #[cfg(feature = "egui")]
            egui: None,
            error: None,
            config,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            self.config.particle_count,
            self.config.particle_size,
        ))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(renderer.device(), renderer.format(), &window));
        }

        log::info!(
            "Running '{}' with {} particles",
            self.config.name,
            self.simulation.pool().len()
        );
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn apply_actions(&mut self, event_loop: &ActiveEventLoop, actions: &[Action]) {
        for action in actions {
            match action {
                Action::TogglePause => self.clock.toggle_pause(),
                Action::Respawn => {
                    self.simulation.reset();
                    self.clock.reset_steps();
                }
                Action::Quit => event_loop.exit(),
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        #[cfg(feature = "egui")]
        let (ui_keyboard, ui_pointer) = match &self.egui {
            Some(egui) => (egui.ctx.wants_keyboard_input(), egui.ctx.wants_pointer_input()),
            None => (false, false),
        };
        #[cfg(not(feature = "egui"))]
        let (ui_keyboard, ui_pointer) = (false, false);

        if !ui_keyboard {
            let actions = apply_bindings(&self.input, &mut self.params);
            self.apply_actions(event_loop, &actions);
        }
        if !ui_pointer {
            if self.input.mouse_held(MouseButton::Left) {
                self.camera.orbit(self.input.mouse_delta());
            }
            self.camera.zoom(self.input.scroll_delta());
        }
        self.input.end_frame();

        if self.clock.tick() {
            self.rotations = self.simulation.advance(self.params);
        } else {
            // Door still follows the controls while paused.
            self.rotations.door_angle = self.params.sanitized().door_angle();
        }

        let (Some(window), Some(renderer)) = (self.window.clone(), self.renderer.as_mut()) else {
            return;
        };

        if self.clock.frame() % TITLE_INTERVAL == 0 {
            let paused = if self.clock.is_paused() { " (paused)" } else { "" };
            window.set_title(&format!(
                "{} | {:.0} FPS{}",
                self.config.window.title,
                self.clock.fps(),
                paused
            ));
        }

        renderer.upload_particles(self.simulation.pool());
        renderer.upload_scene(&scene_lines(self.simulation.zones(), &self.rotations));
        renderer.update_camera(&self.camera);

        let mut frame = match renderer.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                return;
            }
        };

        renderer.draw(&mut frame);

        #[cfg(feature = "egui")]
        let ui_actions = match self.egui.as_mut() {
            Some(egui) => {
                let stats = self.simulation.stats();
                let params = &mut self.params;
                let status_fps = self.clock.fps();
                let paused = self.clock.is_paused();
                let mut actions = Vec::new();
                let output = egui.run(&window, |ctx| {
                    actions = crate::panel::params_panel(
                        ctx,
                        params,
                        crate::panel::PanelStatus {
                            stats: &stats,
                            fps: status_fps,
                            paused,
                        },
                    );
                });
                let size = [renderer.config.width, renderer.config.height];
                egui.paint(renderer.device(), renderer.queue(), &mut frame, size, output);
                actions
            }
            None => Vec::new(),
        };

        renderer.present(frame);

        #[cfg(feature = "egui")]
        self.apply_actions(event_loop, &ui_actions);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (self.egui.as_mut(), self.window.as_ref()) {
            (Some(egui), Some(window)) => egui.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        if !consumed {
            self.input.handle_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
