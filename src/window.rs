//! Window and event loop.
//!
//! Each redraw ticks the simulation once (unless paused), then draws it.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::ShellError;
use crate::gpu::GpuState;
use crate::input::{Command, Input, HELP};
use crate::profile::Variant;
use crate::simulation::SimulationState;
use crate::time::FrameClock;

/// Frames between debug summaries of the lifecycle counters.
const SUMMARY_INTERVAL: u64 = 600;
/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

/// Runtime choices for the viewer.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub variant: Variant,
    /// Fixed seed; a time-derived one is used when `None`.
    pub seed: Option<u64>,
    pub screenshot_path: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            screenshot_path: PathBuf::from("screenshot.png"),
        }
    }
}

/// Open a window and run the simulation until it is closed.
pub fn run(config: ShellConfig) -> Result<(), ShellError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub struct App {
    config: ShellConfig,
    simulation: SimulationState,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    input: Input,
    clock: FrameClock,
    screenshot_requested: bool,
    error: Option<ShellError>,
}

impl App {
    pub fn new(config: ShellConfig) -> Self {
        let mut builder = SimulationState::builder(config.variant);
        if let Some(seed) = config.seed {
            builder = builder.with_seed(seed);
        }
        let simulation = builder.build();

        log::info!(
            "{} variant, {} particles, seed {}",
            config.variant.name(),
            simulation.capacity(),
            simulation.seed()
        );

        Self {
            config,
            simulation,
            window: None,
            gpu_state: None,
            input: Input::new(),
            clock: FrameClock::new(),
            screenshot_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ShellError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn execute(&mut self, command: Command, event_loop: &ActiveEventLoop) {
        match command {
            Command::Quit => event_loop.exit(),
            Command::Help => println!("{}", HELP),
            Command::Screenshot => self.screenshot_requested = true,
            Command::ToggleShading => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.shading = gpu_state.shading.toggled();
                    log::info!("shading: {:?}", gpu_state.shading);
                }
            }
            Command::TogglePause => {
                let paused = self.clock.toggle_pause();
                log::info!("{}", if paused { "paused" } else { "resumed" });
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu_state) = self.gpu_state.as_mut() else {
            return;
        };

        let motion = self.input.take_motion();
        if !motion.is_idle() {
            gpu_state.camera.orbit(motion.drag.x, motion.drag.y);
            gpu_state.camera.zoom(motion.scroll);
        }

        if self.clock.frame() {
            self.simulation.tick();
        }

        match gpu_state.render(self.simulation.particles()) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        if std::mem::take(&mut self.screenshot_requested) {
            let path = &self.config.screenshot_path;
            match gpu_state.save_screenshot(path) {
                Ok(()) => log::info!("saved screenshot to {}", path.display()),
                Err(e) => log::error!("{}", e),
            }
        }

        let frames = self.clock.frames();
        if frames % SUMMARY_INTERVAL == 0 {
            let totals = self.simulation.totals();
            log::debug!(
                "tick {}: {} expiries ({} respawned, {} to smoke, {} rekindled, {} recycled)",
                self.simulation.ticks(),
                totals.expired(),
                totals.respawned,
                totals.converted_to_smoke,
                totals.rekindled,
                totals.recycled
            );
        }
        if frames % TITLE_INTERVAL == 0 {
            if let Some(window) = &self.window {
                window.set_title(&title(self.simulation.variant(), self.clock.fps()));
            }
        }
    }
}

fn title(variant: Variant, fps: f32) -> String {
    format!("ember: {} | {:.0} FPS", variant.name(), fps)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(title(self.simulation.variant(), 0.0))
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let gpu_state = pollster::block_on(GpuState::new(
            Arc::clone(&window),
            self.simulation.mesh(),
            self.simulation.capacity(),
        ));
        match gpu_state {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                self.window = Some(window);
                log::info!("press H for help");
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(command) = self.input.handle_event(&event) {
            self.execute(command, event_loop);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!(title(Variant::FireSmoke, 59.6), "ember: fire | 60 FPS");
        assert_eq!(title(Variant::Spray, 0.0), "ember: spray | 0 FPS");
    }

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.variant, Variant::FireSmoke);
        assert_eq!(config.seed, None);
        assert_eq!(config.screenshot_path, PathBuf::from("screenshot.png"));
    }
}
