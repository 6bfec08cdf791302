use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use super::engine::{GameEngine, Surface};
use super::input::route_key;
use super::rendering::{scaled_viewport, Renderer};
use super::timing::{FrameClock, FrameStats, FrameTick};

const FRAME_STATS_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Rocket".to_string(),
            window_width: 1024,
            window_height: 600,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Runs the driver loop until the window closes.
///
/// Single-threaded and cooperative: keyboard and resize notifications
/// interleave with frame ticks on the event loop thread, each running to
/// completion before the next. `AboutToWait` requests the next redraw, so
/// the loop never blocks waiting for a frame.
pub fn run_app(config: LoopConfig, mut engine: Box<dyn GameEngine>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );

    event_loop.set_control_flow(ControlFlow::Poll);

    // Initial bounds sync happens before the first frame: the renderer is
    // created at the scaled bounds (building the sprite bank), and the
    // engine is told the same dimensions.
    let window_size = window.inner_size();
    let bounds = scaled_viewport(window_size.width, window_size.height);
    let mut renderer =
        Renderer::new(Arc::clone(&window), bounds).map_err(AppError::CreateRenderer)?;
    engine.resize(bounds.width, bounds.height);
    info!(
        window_width = window_size.width,
        window_height = window_size.height,
        surface_width = bounds.width,
        surface_height = bounds.height,
        "startup"
    );

    let mut clock = FrameClock::new();
    let mut stats = FrameStats::new(FRAME_STATS_INTERVAL);
    let loop_start = Instant::now();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    let bounds = scaled_viewport(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize(bounds) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                        return;
                    }
                    engine.resize(bounds.width, bounds.height);
                    info!(
                        surface_width = bounds.width,
                        surface_height = bounds.height,
                        "bounds_synced"
                    );
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    // autorepeat is forwarded as-is; the engine treats
                    // repeated identical toggles idempotently
                    route_key(
                        engine.as_mut(),
                        key_event.physical_key,
                        key_event.state == ElementState::Pressed,
                    );
                }
                WindowEvent::RedrawRequested => {
                    if advance_frame(&mut clock, loop_start.elapsed(), engine.as_mut(), &mut renderer)
                    {
                        if let Err(error) = renderer.present() {
                            warn!(error = %error, "renderer_present_failed");
                            window_target.exit();
                            return;
                        }
                        if let Some(report) = stats.record_frame(loop_start.elapsed()) {
                            info!(fps = report.fps, frames = report.frames, "frame_stats");
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// One scheduler tick: primes the clock on the first call, afterwards runs
/// `update` with the elapsed seconds and then `draw`, in that order, exactly
/// once. Returns whether a frame was produced and should be presented.
fn advance_frame(
    clock: &mut FrameClock,
    timestamp: Duration,
    engine: &mut dyn GameEngine,
    surface: &mut dyn Surface,
) -> bool {
    match clock.tick(timestamp) {
        FrameTick::Primed => false,
        FrameTick::Step { dt_seconds } => {
            engine.update(dt_seconds);
            engine.draw(surface);
            true
        }
    }
}
