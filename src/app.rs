use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::gpu::{BoardBuffers, GpuContext, RenderPipeline};
use life_board::config::{SimConfig, CELL_SIZE_PX};
use life_board::simulation::{LatestSnapshot, RunState, SimulationEngine, TickTimer};

/// GPU resources, created once the window exists
struct Renderer {
    gpu: GpuContext,
    buffers: BoardBuffers,
    pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    engine: SimulationEngine<LatestSnapshot>,
    timer: TickTimer,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    pub fn new(config: SimConfig) -> Self {
        let engine = SimulationEngine::new(config, LatestSnapshot::new());
        let timer = TickTimer::new(config.tick_period, Instant::now());

        Self {
            window: None,
            renderer: None,
            engine,
            timer,
            cursor: None,
        }
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };

        let uploaded = match self.engine.sink_mut().take() {
            Some(snapshot) => {
                renderer.buffers.upload(&renderer.gpu.queue, &snapshot);
                true
            }
            None => false,
        };
        renderer
            .buffers
            .update_params(&renderer.gpu.queue, renderer.gpu.surface_size());

        let output = match renderer.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.gpu.reconfigure();
                self.request_redraw();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = renderer
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        renderer
            .pipeline
            .draw(&mut encoder, &view, &renderer.bind_group);

        renderer.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if uploaded {
            self.update_title();
        }
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            let state = match self.engine.run_state() {
                RunState::Running => "Running",
                RunState::Paused => "Paused",
            };
            window.set_title(&format!(
                "Life Board - {} - Generation {} - Population {}",
                state,
                self.engine.generation(),
                self.engine.snapshot().population()
            ));
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Redraw if the engine published since the last frame
    fn redraw_if_published(&self) {
        if self.engine.sink().has_pending() {
            self.request_redraw();
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                self.engine.toggle_running();
                // Title shows the run state even when the board is unchanged
                self.update_title();
            }
            KeyCode::KeyC => self.engine.clear(),
            KeyCode::KeyR => self.engine.randomize(),
            _ => {}
        }
        self.redraw_if_published();
    }

    fn handle_click(&mut self) {
        let (Some(position), Some(renderer)) = (self.cursor, self.renderer.as_ref()) else {
            return;
        };
        let (width, height) = renderer.gpu.surface_size();
        let config = self.engine.config();

        if let Some((row, col)) = cell_at(
            position,
            PhysicalSize::new(width, height),
            config.rows,
            config.cols,
        ) {
            if let Err(e) = self.engine.toggle_cell(row, col) {
                log::warn!("Ignoring click: {}", e);
            }
            self.redraw_if_published();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = *self.engine.config();
        log::info!("Initializing Life Board...");
        log::info!("Board size: {}x{}", config.rows, config.cols);
        log::info!("Tick period: {:?}", self.timer.period());

        let window_attrs = Window::default_attributes()
            .with_title("Life Board - Initializing...")
            .with_inner_size(LogicalSize::new(
                config.cols as u32 * CELL_SIZE_PX,
                config.rows as u32 * CELL_SIZE_PX,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));

        let buffers = BoardBuffers::new(&gpu.device, &gpu.queue, self.engine.snapshot());
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &buffers);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Click: Toggle cell");
        log::info!("  Space: Start/Stop");
        log::info!("  C: Clear board");
        log::info!("  R: Random board");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.renderer = Some(Renderer {
            gpu,
            buffers,
            pipeline,
            bind_group,
        });
        self.update_title();
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.timer.poll(Instant::now()) && self.engine.on_tick() {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.deadline()));
    }
}

/// Board cell under a cursor position, or `None` outside the board
fn cell_at(
    position: PhysicalPosition<f64>,
    surface: PhysicalSize<u32>,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    if surface.width == 0 || surface.height == 0 || position.x < 0.0 || position.y < 0.0 {
        return None;
    }

    let col = (position.x * cols as f64 / surface.width as f64) as usize;
    let row = (position.y * rows as f64 / surface.height as f64) as usize;
    (row < rows && col < cols).then_some((row, col))
}
