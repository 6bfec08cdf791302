mod engine;
mod input;
mod loop_runner;
mod rendering;
mod timing;

pub use engine::{GameEngine, Surface};
pub use input::{channel_for_key, route_key, InputChannel};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{
    scaled_viewport, Renderer, Sprite, SpriteBank, Viewport, VIEWPORT_MARGIN_SCALE,
};
pub use timing::{FrameClock, FrameRateReport, FrameStats, FrameTick};
