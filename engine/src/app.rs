use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use crate::error::EngineError;
use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsSurface;
use crate::surface::{Surface, SurfaceSize, draw_frame};

pub struct AppConfig {
    pub title: String,
    /// Logical frame buffer size; the game always draws at this resolution.
    pub buffer_size: SurfaceSize,
    pub window_size: PhysicalSize<u32>,
    pub vsync: Option<bool>,
}

impl AppConfig {
    pub fn new(title: impl Into<String>, buffer_size: SurfaceSize) -> Self {
        Self {
            title: title.into(),
            buffer_size,
            window_size: PhysicalSize::new(buffer_size.width, buffer_size.height),
            vsync: None,
        }
    }
}

/// Input gathered from window events since the game started.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Pointer position normalized to the frame buffer, `(0,0)` top-left. `None` once the
    /// pointer leaves the window.
    pub cursor: Option<(f32, f32)>,
    /// Set by window close or Escape. Never cleared.
    pub quit_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

pub trait GameApp {
    type Error: Into<Box<dyn Error + 'static>>;

    /// Called once per redraw. The frame buffer keeps its previous contents, so a game that
    /// draws nothing holds the last image on screen.
    fn frame(
        &mut self,
        input: &InputFrame,
        dt: Duration,
        gfx: &mut dyn Renderer2d,
    ) -> Result<AppFlow, Self::Error>;
}

/// Opens a window and drives `game` until it returns `AppFlow::Exit` or fails.
///
/// Returns after the event loop stops, so everything the caller owns (and `game` itself) is
/// dropped normally on every exit path.
pub fn run_game<G: GameApp>(config: AppConfig, game: &mut G) -> Result<(), EngineError> {
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(config.window_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut builder = PixelsBuilder::new(
        config.buffer_size.width,
        config.buffer_size.height,
        surface_texture,
    );
    if let Some(vsync) = config.vsync {
        builder = builder.enable_vsync(vsync);
    }
    let mut surface = PixelsSurface::new(builder.build()?, config.buffer_size)?;
    tracing::info!(
        width = config.buffer_size.width,
        height = config.buffer_size.height,
        "window ready"
    );

    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();
    let mut outcome: Result<(), EngineError> = Ok(());

    event_loop.run_return(|event, _, control_flow| {
        if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
            return;
        }
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    input.quit_requested = true;
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    input.quit_requested = true;
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = surface.resize_window(size.width, size.height) {
                        outcome = Err(err.into());
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let pos = (position.x as f32, position.y as f32);
                    let (px, py) = surface
                        .pixels()
                        .window_pos_to_pixel(pos)
                        .unwrap_or_else(|outside| surface.pixels().clamp_pixel_pos(outside));
                    let size = surface.size();
                    input.cursor = Some((
                        px as f32 / size.width.max(1) as f32,
                        py as f32 / size.height.max(1) as f32,
                    ));
                }
                WindowEvent::CursorLeft { .. } => {
                    input.cursor = None;
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let flow = draw_frame(&mut surface, |gfx| game.frame(&input, dt, gfx));
                match flow {
                    Ok(AppFlow::Continue) => {
                        if let Err(err) = surface.present() {
                            outcome = Err(err.into());
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    Ok(AppFlow::Exit) => {
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(err) => {
                        outcome = Err(EngineError::Game(err.into()));
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            _ => {}
        }
    });

    tracing::info!("event loop stopped");
    outcome
}
