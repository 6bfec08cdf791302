use winit::keyboard::{KeyCode, PhysicalKey};

use super::engine::GameEngine;

/// Logical input channels understood by the simulation. Channel state lives
/// entirely on the engine side; the router only computes (channel, pressed)
/// pairs from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    TurnLeft,
    TurnRight,
    Boost,
    Shoot,
}

/// Maps a raw key to its logical channel. Unrecognized keys map to `None`
/// and are silently ignored by the router.
pub fn channel_for_key(key: PhysicalKey) -> Option<InputChannel> {
    match key {
        PhysicalKey::Code(KeyCode::ArrowLeft) => Some(InputChannel::TurnLeft),
        PhysicalKey::Code(KeyCode::ArrowRight) => Some(InputChannel::TurnRight),
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(InputChannel::Boost),
        PhysicalKey::Code(KeyCode::Space) => Some(InputChannel::Shoot),
        _ => None,
    }
}

/// Forwards a raw key event to the engine's matching toggle entry point.
///
/// Purely edge-triggered: a press forwards `true`, a release `false`. No
/// debouncing and no repeat suppression; a held key that delivers repeat
/// events forwards repeated `true` values, which the engine treats
/// idempotently.
pub fn route_key(engine: &mut dyn GameEngine, key: PhysicalKey, pressed: bool) {
    if let Some(channel) = channel_for_key(key) {
        forward_channel(engine, channel, pressed);
    }
}

pub(crate) fn forward_channel(engine: &mut dyn GameEngine, channel: InputChannel, pressed: bool) {
    match channel {
        InputChannel::TurnLeft => engine.toggle_turn_left(pressed),
        InputChannel::TurnRight => engine.toggle_turn_right(pressed),
        InputChannel::Boost => engine.toggle_boost(pressed),
        InputChannel::Shoot => engine.toggle_shoot(pressed),
    }
}
