use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, RenderError};
use crate::frame::{FrameDriver, RenderSetup, TickOutcome};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, draws the triangle on every redraw and returns when the
/// window closes or a frame fails fatally.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Session {
    entry: WindowEntry,
    driver: FrameDriver,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    session: Option<Session>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            session: None,
            failure: None,
        }
    }

    fn create_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::acquire(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let setup = entry
            .with_gpu(|gpu| RenderSetup::for_surface(gpu))
            .context("failed to prepare triangle resources")?;

        Ok(Session {
            entry,
            driver: FrameDriver::new(setup),
        })
    }

    /// Records a fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure = Some(error);
        self.session = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_session(event_loop) {
            Ok(session) => {
                session.entry.with_window(|w| w.request_redraw());
                self.session = Some(session);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.session = None;
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let Session { entry, driver } = session;

                let result: Result<TickOutcome, RenderError> = entry.with(|fields| {
                    let window = fields.window;
                    driver.tick(fields.gpu, || window.pre_present_notify())
                });

                match result {
                    Ok(_) => entry.with_window(|w| w.request_redraw()),
                    Err(e) => {
                        let frame = driver.frames();
                        self.fail(
                            event_loop,
                            anyhow::Error::new(e).context(format!("frame {frame} failed")),
                        );
                    }
                }
            }

            // The surface keeps its initial size.
            _ => {}
        }
    }
}
