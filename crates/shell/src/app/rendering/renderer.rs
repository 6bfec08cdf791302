use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::engine::Surface;

use super::text::draw_text;
use super::{Sprite, SpriteBank, Viewport};

const BACKGROUND_COLOR: [u8; 4] = [0, 0, 0, 255];
const SCORE_COLOR: [u8; 4] = [255, 165, 0, 255];
const SCORE_ANCHOR_X: i32 = 10;
const SCORE_ANCHOR_Y: i32 = 10;

/// Production [`Surface`]: a CPU pixel buffer presented to the window.
///
/// Owns the sprite bank, built once at construction. Every draw call is a
/// self-contained blit; no transform state persists between calls, so
/// nothing can compound across frames.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    sprites: SpriteBank,
}

impl Renderer {
    pub fn new(window: Arc<Window>, viewport: Viewport) -> Result<Self, Error> {
        let pixels = Self::build_pixels(Arc::clone(&window), viewport)?;
        Ok(Self {
            window,
            pixels,
            viewport,
            sprites: SpriteBank::build(),
        })
    }

    /// Rebuilds the pixel buffer at the new bounds, which also clears it.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), Error> {
        if viewport.width == 0 || viewport.height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Presents the finished frame to the window surface.
    pub fn present(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }

    fn build_pixels(window: Arc<Window>, viewport: Viewport) -> Result<Pixels<'static>, Error> {
        let window_size = window.inner_size();
        let surface = SurfaceTexture::new(
            window_size.width.max(1),
            window_size.height.max(1),
            window,
        );
        Pixels::new(viewport.width.max(1), viewport.height.max(1), surface)
    }
}

impl Surface for Renderer {
    fn clear(&mut self) {
        fill_frame(self.pixels.frame_mut(), BACKGROUND_COLOR);
    }

    fn draw_player(&mut self, x: f64, y: f64, angle_radians: f64) {
        let Viewport { width, height } = self.viewport;
        let sprite = &self.sprites.player;
        let frame = self.pixels.frame_mut();
        blit_rotated(frame, width, height, x, y, angle_radians, sprite);
    }

    fn draw_enemy(&mut self, x: f64, y: f64) {
        let Viewport { width, height } = self.viewport;
        let sprite = &self.sprites.enemy;
        let frame = self.pixels.frame_mut();
        blit_centered(frame, width, height, x, y, sprite);
    }

    fn draw_bullet(&mut self, x: f64, y: f64) {
        let Viewport { width, height } = self.viewport;
        let sprite = &self.sprites.bullet;
        let frame = self.pixels.frame_mut();
        blit_centered(frame, width, height, x, y, sprite);
    }

    fn draw_particle(&mut self, x: f64, y: f64, radius: f64) {
        let Viewport { width, height } = self.viewport;
        let sprite = &self.sprites.particle;
        let frame = self.pixels.frame_mut();
        blit_centered_scaled(frame, width, height, x, y, sprite, 2.0 * radius);
    }

    fn draw_score(&mut self, value: u32) {
        let Viewport { width, height } = self.viewport;
        let frame = self.pixels.frame_mut();
        draw_text(
            frame,
            width,
            height,
            SCORE_ANCHOR_X,
            SCORE_ANCHOR_Y,
            &format!("Score: {value}"),
            SCORE_COLOR,
        );
    }
}

pub(crate) fn fill_frame(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

/// Blits the sprite with its center at (x, y), skipping transparent pixels.
pub(crate) fn blit_centered(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    sprite: &Sprite,
) {
    let left = (x - sprite.width() as f64 / 2.0).round() as i32;
    let top = (y - sprite.height() as f64 / 2.0).round() as i32;

    for sy in 0..sprite.height() {
        for sx in 0..sprite.width() {
            let color = sprite.pixel(sx, sy);
            if color[3] == 0 {
                continue;
            }
            write_pixel_clipped(frame, width, height, left + sx as i32, top + sy as i32, color);
        }
    }
}

/// Blits the sprite scaled to a `side` × `side` square centered at (x, y),
/// nearest-neighbor sampled. The cached raster is never redrawn, only
/// resampled per call.
pub(crate) fn blit_centered_scaled(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    sprite: &Sprite,
    side: f64,
) {
    if !side.is_finite() || side < 1.0 {
        return;
    }
    let dest = side.round() as i32;
    let left = (x - side / 2.0).round() as i32;
    let top = (y - side / 2.0).round() as i32;

    for oy in 0..dest {
        let sy = ((oy as f64 + 0.5) * sprite.height() as f64 / dest as f64) as u32;
        let sy = sy.min(sprite.height() - 1);
        for ox in 0..dest {
            let sx = ((ox as f64 + 0.5) * sprite.width() as f64 / dest as f64) as u32;
            let sx = sx.min(sprite.width() - 1);
            let color = sprite.pixel(sx, sy);
            if color[3] == 0 {
                continue;
            }
            write_pixel_clipped(frame, width, height, left + ox, top + oy, color);
        }
    }
}

/// Rotated blit implementing the composed transform
/// translate(x, y) · rotate(angle) · translate(0, -h/2) over sprite-local
/// coordinates, via inverse mapping over the destination bounding box.
/// Stateless: equivalent to drawing under the transform and resetting it
/// to identity before returning.
pub(crate) fn blit_rotated(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    angle_radians: f64,
    sprite: &Sprite,
) {
    if width == 0 || height == 0 {
        return;
    }
    let (sin, cos) = angle_radians.sin_cos();
    let w = sprite.width() as f64;
    let h = sprite.height() as f64;
    let half_h = h / 2.0;

    // bounding box of the transformed sprite rectangle
    let corners = [(0.0, -half_h), (w, -half_h), (w, h - half_h), (0.0, h - half_h)];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (lx, ly) in corners {
        let dx = x + cos * lx - sin * ly;
        let dy = y + sin * lx + cos * ly;
        min_x = min_x.min(dx);
        min_y = min_y.min(dy);
        max_x = max_x.max(dx);
        max_y = max_y.max(dy);
    }

    let x0 = min_x.floor().max(0.0) as i32;
    let y0 = min_y.floor().max(0.0) as i32;
    let x1 = (max_x.ceil().min(width as f64)) as i32;
    let y1 = (max_y.ceil().min(height as f64)) as i32;

    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - x;
            let dy = py as f64 + 0.5 - y;
            // inverse rotation back into sprite space
            let lx = cos * dx + sin * dy;
            let ly = -sin * dx + cos * dy;
            let sx = lx;
            let sy = ly + half_h;
            if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
                continue;
            }
            let color = sprite.pixel(sx as u32, sy as u32);
            if color[3] == 0 {
                continue;
            }
            write_pixel_clipped(frame, width, height, px, py, color);
        }
    }
}

fn write_pixel_clipped(frame: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let offset = (y as usize * width as usize + x as usize) * 4;
    if offset + 4 > frame.len() {
        return;
    }
    frame[offset..offset + 4].copy_from_slice(&color);
}
