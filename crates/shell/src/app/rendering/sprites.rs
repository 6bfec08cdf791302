//! Off-screen sprite rasters, built once before the frame loop starts and
//! immutable afterwards.

const PLAYER_WIDTH: u32 = 20;
const PLAYER_HEIGHT: u32 = 16;
const ENEMY_SIZE: u32 = 20;
const BULLET_SIZE: u32 = 6;
const PARTICLE_SIZE: u32 = 20;

const PLAYER_COLOR: [u8; 4] = [255, 0, 0, 255];
const ENEMY_COLOR: [u8; 4] = [255, 255, 0, 255];
const BULLET_COLOR: [u8; 4] = [0, 0, 255, 255];
const PARTICLE_COLOR: [u8; 4] = [148, 0, 211, 255];

/// Owned RGBA raster. Pixels outside the rasterized shape stay fully
/// transparent and are skipped when blitting.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Sprite {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ]
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[offset..offset + 4].copy_from_slice(&color);
    }
}

/// The four cached sprites, keyed by field. Built exactly once.
#[derive(Debug, Clone)]
pub struct SpriteBank {
    pub(crate) player: Sprite,
    pub(crate) enemy: Sprite,
    pub(crate) bullet: Sprite,
    pub(crate) particle: Sprite,
}

impl SpriteBank {
    pub fn build() -> Self {
        Self {
            player: rasterize_player(),
            enemy: rasterize_circle(ENEMY_SIZE, ENEMY_COLOR),
            bullet: rasterize_circle(BULLET_SIZE, BULLET_COLOR),
            particle: rasterize_circle(PARTICLE_SIZE, PARTICLE_COLOR),
        }
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn enemy(&self) -> &Sprite {
        &self.enemy
    }

    pub fn bullet(&self) -> &Sprite {
        &self.bullet
    }

    pub fn particle(&self) -> &Sprite {
        &self.particle
    }
}

/// Solid triangle pointing right: apex at (w, h/2), base along x = 0.
fn rasterize_player() -> Sprite {
    let mut sprite = Sprite::blank(PLAYER_WIDTH, PLAYER_HEIGHT);
    let (ax, ay) = (0.0, 0.0);
    let (bx, by) = (PLAYER_WIDTH as f64, PLAYER_HEIGHT as f64 / 2.0);
    let (cx, cy) = (0.0, PLAYER_HEIGHT as f64);

    for y in 0..PLAYER_HEIGHT {
        for x in 0..PLAYER_WIDTH {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let inside = edge(ax, ay, bx, by, px, py) >= 0.0
                && edge(bx, by, cx, cy, px, py) >= 0.0
                && edge(cx, cy, ax, ay, px, py) >= 0.0;
            if inside {
                sprite.set_pixel(x, y, PLAYER_COLOR);
            }
        }
    }
    sprite
}

/// Signed area of the triangle (a, b, p); non-negative when p lies on the
/// left of a→b with y growing downward.
fn edge(ax: f64, ay: f64, bx: f64, by: f64, px: f64, py: f64) -> f64 {
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// Filled circle spanning the full square raster, sampled at pixel centers.
fn rasterize_circle(size: u32, color: [u8; 4]) -> Sprite {
    let mut sprite = Sprite::blank(size, size);
    let center = size as f64 / 2.0;
    let radius = size as f64 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            if dx * dx + dy * dy <= radius * radius {
                sprite.set_pixel(x, y, color);
            }
        }
    }
    sprite
}
