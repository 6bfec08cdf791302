pub mod app;

pub use app::{
    channel_for_key, route_key, run_app, scaled_viewport, AppError, FrameClock, FrameRateReport,
    FrameStats, FrameTick, GameEngine, InputChannel, LoopConfig, Renderer, Sprite, SpriteBank,
    Surface, Viewport, VIEWPORT_MARGIN_SCALE,
};
