mod renderer;
mod sprites;
mod text;

pub use renderer::Renderer;
pub use sprites::{Sprite, SpriteBank};

/// Fraction of the viewport used for the drawing surface. Deliberately
/// smaller than the full viewport to leave a visual margin.
pub const VIEWPORT_MARGIN_SCALE: f64 = 0.8;

/// Pixel dimensions of the drawing surface, shared with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Computes surface bounds from the current window size. Pure, so repeated
/// syncs against an unchanged viewport produce identical dimensions.
pub fn scaled_viewport(window_width: u32, window_height: u32) -> Viewport {
    Viewport {
        width: (window_width as f64 * VIEWPORT_MARGIN_SCALE) as u32,
        height: (window_height as f64 * VIEWPORT_MARGIN_SCALE) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_viewport_takes_the_margin_fraction() {
        let bounds = scaled_viewport(1000, 800);
        assert_eq!(
            bounds,
            Viewport {
                width: 800,
                height: 640
            }
        );
    }

    #[test]
    fn recomputing_unchanged_viewport_has_no_drift() {
        let first = scaled_viewport(1366, 768);
        let second = scaled_viewport(1366, 768);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_window_yields_zero_bounds() {
        assert_eq!(
            scaled_viewport(0, 0),
            Viewport {
                width: 0,
                height: 0
            }
        );
    }
}
