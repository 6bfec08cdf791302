use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shell::{run_app, GameEngine, LoopConfig, Surface};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const BULLETS_PER_SECOND: f64 = 100.0;
const BULLET_RATE: f64 = 1.0 / BULLETS_PER_SECOND;

const ENEMY_SPAWNS_PER_SECOND: f64 = 1.0;
const ENEMY_SPAWN_RATE: f64 = 1.0 / ENEMY_SPAWNS_PER_SECOND;

const TRAIL_PARTICLES_PER_SECOND: f64 = 20.0;
const TRAIL_PARTICLE_RATE: f64 = 1.0 / TRAIL_PARTICLES_PER_SECOND;

// Speeds are pixels per second, rotation is radians per second.
const ADVANCE_SPEED: f64 = 200.0;
const BULLET_SPEED: f64 = 500.0;
const ENEMY_SPEED: f64 = 100.0;
const ROTATE_SPEED: f64 = 2.0 * PI;

const PLAYER_RADIUS: f64 = 6.0;
const ENEMY_RADIUS: f64 = 10.0;
const BULLET_RADIUS: f64 = 3.0;
const PLAYER_NOSE_OFFSET: f64 = 20.0;
const PLAYER_GRACE_AREA: f64 = 200.0;

const PARTICLE_TIME_OUT: f64 = 0.5;
const EXPLOSION_PARTICLES: u32 = 10;
const POINTS_PER_ENEMY: u32 = 10;

const RNG_SEED: u64 = 42;

#[derive(Debug, Default, Clone, Copy)]
struct Actions {
    rotate_left: bool,
    rotate_right: bool,
    boost: bool,
    shoot: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bullet {
    x: f64,
    y: f64,
    direction: f64,
}

#[derive(Debug, Clone, Copy)]
struct Enemy {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    x: f64,
    y: f64,
    direction: f64,
    time_out: f64,
}

impl Particle {
    fn update(&mut self, dt: f64) {
        self.time_out -= dt;
        let speed = 500.0 * self.time_out * self.time_out;
        self.x += self.direction.cos() * speed * dt;
        self.y += self.direction.sin() * speed * dt;
    }
}

/// Arcade rocket simulation driven entirely through the shell's engine
/// entry points. All state lives here; the shell only schedules ticks and
/// forwards input toggles.
struct RocketGame {
    bounds_width: f64,
    bounds_height: f64,
    actions: Actions,
    player_x: f64,
    player_y: f64,
    player_direction: f64,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    particles: Vec<Particle>,
    current_time: f64,
    last_shoot: f64,
    last_spawned_enemy: f64,
    last_tail_particle: f64,
    score: u32,
    rng: SmallRng,
}

impl RocketGame {
    fn new(width: f64, height: f64) -> Self {
        Self {
            bounds_width: width,
            bounds_height: height,
            actions: Actions::default(),
            player_x: width / 2.0,
            player_y: height / 2.0,
            player_direction: 0.0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            current_time: 0.0,
            last_shoot: 0.0,
            last_spawned_enemy: 0.0,
            last_tail_particle: 0.0,
            score: 0,
            rng: SmallRng::seed_from_u64(RNG_SEED),
        }
    }

    /// Recenters the player and drops every transient object. Held input
    /// toggles survive a reset, matching what a held key feels like across
    /// a respawn.
    fn reset_world(&mut self) {
        self.player_x = self.bounds_width / 2.0;
        self.player_y = self.bounds_height / 2.0;
        self.player_direction = 0.0;
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
    }

    /// Tip of the player triangle, where bullets spawn.
    fn player_nose(&self) -> (f64, f64) {
        (
            self.player_x + self.player_direction.cos() * PLAYER_NOSE_OFFSET,
            self.player_y + self.player_direction.sin() * PLAYER_NOSE_OFFSET,
        )
    }

    fn advance_player(&mut self, dt: f64) {
        if self.actions.rotate_left {
            self.player_direction -= ROTATE_SPEED * dt;
        }
        if self.actions.rotate_right {
            self.player_direction += ROTATE_SPEED * dt;
        }

        let speed = if self.actions.boost {
            2.0 * ADVANCE_SPEED
        } else {
            ADVANCE_SPEED
        };
        self.player_x += self.player_direction.cos() * speed * dt;
        self.player_y += self.player_direction.sin() * speed * dt;
        self.player_x = wrap(self.player_x, self.bounds_width);
        self.player_y = wrap(self.player_y, self.bounds_height);
    }

    fn advance_particles(&mut self, dt: f64) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|particle| particle.time_out > 0.0);

        if self.current_time - self.last_tail_particle > TRAIL_PARTICLE_RATE {
            self.last_tail_particle = self.current_time;
            self.particles.push(Particle {
                x: self.player_x,
                y: self.player_y,
                direction: self.player_direction + PI,
                time_out: PARTICLE_TIME_OUT,
            });
        }
    }

    fn advance_bullets(&mut self, dt: f64) {
        if self.actions.shoot && self.current_time - self.last_shoot > BULLET_RATE {
            self.last_shoot = self.current_time;
            let (nose_x, nose_y) = self.player_nose();
            self.bullets.push(Bullet {
                x: nose_x,
                y: nose_y,
                direction: self.player_direction,
            });
        }

        for bullet in &mut self.bullets {
            bullet.x += bullet.direction.cos() * BULLET_SPEED * dt;
            bullet.y += bullet.direction.sin() * BULLET_SPEED * dt;
        }

        let (width, height) = (self.bounds_width, self.bounds_height);
        self.bullets
            .retain(|bullet| bullet.x >= 0.0 && bullet.x <= width && bullet.y >= 0.0 && bullet.y <= height);
    }

    fn spawn_enemies(&mut self) {
        if self.current_time - self.last_spawned_enemy <= ENEMY_SPAWN_RATE {
            return;
        }
        self.last_spawned_enemy = self.current_time;

        let mut x;
        let mut y;
        loop {
            x = self.rng.gen_range(0.0..self.bounds_width.max(1.0));
            y = self.rng.gen_range(0.0..self.bounds_height.max(1.0));
            if x != self.player_x || y != self.player_y {
                break;
            }
        }

        // Spawns inside the grace area get pushed to its edge.
        let dx = x - self.player_x;
        let dy = y - self.player_y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < PLAYER_GRACE_AREA {
            x = self.player_x + dx / distance * PLAYER_GRACE_AREA;
            y = self.player_y + dy / distance * PLAYER_GRACE_AREA;
        }

        self.enemies.push(Enemy { x, y });
    }

    fn advance_enemies(&mut self, dt: f64) {
        let (px, py) = (self.player_x, self.player_y);
        for enemy in &mut self.enemies {
            let dx = px - enemy.x;
            let dy = py - enemy.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > 0.0 {
                enemy.x += dx / distance * ENEMY_SPEED * dt;
                enemy.y += dy / distance * ENEMY_SPEED * dt;
            }
        }
    }

    fn explosion_at(&mut self, x: f64, y: f64) {
        for index in 0..EXPLOSION_PARTICLES {
            self.particles.push(Particle {
                x,
                y,
                direction: index as f64 * 2.0 * PI / EXPLOSION_PARTICLES as f64,
                time_out: PARTICLE_TIME_OUT,
            });
        }
    }

    fn handle_collisions(&mut self) {
        let mut killed = Vec::new();
        self.enemies.retain(|enemy| {
            let hit = self.bullets.iter().any(|bullet| {
                within_radius(bullet.x, bullet.y, enemy.x, enemy.y, ENEMY_RADIUS + BULLET_RADIUS)
            });
            if hit {
                killed.push((enemy.x, enemy.y));
            }
            !hit
        });
        let enemies = &self.enemies;
        self.bullets.retain(|bullet| {
            !killed
                .iter()
                .any(|&(x, y)| within_radius(bullet.x, bullet.y, x, y, ENEMY_RADIUS + BULLET_RADIUS))
                && !enemies.iter().any(|enemy| {
                    within_radius(bullet.x, bullet.y, enemy.x, enemy.y, ENEMY_RADIUS + BULLET_RADIUS)
                })
        });
        for &(x, y) in &killed {
            self.score = self.score.saturating_add(POINTS_PER_ENEMY);
            self.explosion_at(x, y);
        }

        let player_hit = self.enemies.iter().any(|enemy| {
            within_radius(enemy.x, enemy.y, self.player_x, self.player_y, ENEMY_RADIUS + PLAYER_RADIUS)
        });
        if player_hit {
            let (x, y) = (self.player_x, self.player_y);
            info!(score = self.score, "player_destroyed");
            self.reset_world();
            self.explosion_at(x, y);
        }
    }
}

impl GameEngine for RocketGame {
    fn update(&mut self, dt_seconds: f64) {
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return;
        }
        self.current_time += dt_seconds;
        self.advance_player(dt_seconds);
        self.advance_particles(dt_seconds);
        self.advance_bullets(dt_seconds);
        self.spawn_enemies();
        self.advance_enemies(dt_seconds);
        self.handle_collisions();
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        for particle in &self.particles {
            surface.draw_particle(particle.x, particle.y, 5.0 * particle.time_out);
        }
        for bullet in &self.bullets {
            surface.draw_bullet(bullet.x, bullet.y);
        }
        for enemy in &self.enemies {
            surface.draw_enemy(enemy.x, enemy.y);
        }
        surface.draw_player(self.player_x, self.player_y, self.player_direction);
        surface.draw_score(self.score);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.bounds_width = width as f64;
        self.bounds_height = height as f64;
        self.reset_world();
        info!(width, height, "world_rebuilt");
    }

    fn toggle_turn_left(&mut self, pressed: bool) {
        self.actions.rotate_left = pressed;
    }

    fn toggle_turn_right(&mut self, pressed: bool) {
        self.actions.rotate_right = pressed;
    }

    fn toggle_boost(&mut self, pressed: bool) {
        self.actions.boost = pressed;
    }

    fn toggle_shoot(&mut self, pressed: bool) {
        self.actions.shoot = pressed;
    }
}

fn wrap(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    let wrapped = value % max;
    if wrapped < 0.0 {
        wrapped + max
    } else {
        wrapped
    }
}

fn within_radius(ax: f64, ay: f64, bx: f64, by: f64, radius: f64) -> bool {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy <= radius * radius
}

fn main() {
    init_tracing();
    info!("=== Rocket Startup ===");

    let config = LoopConfig::default();
    let game = RocketGame::new(config.window_width as f64, config.window_height as f64);

    if let Err(err) = run_app(config, Box::new(game)) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum DrawCall {
        Clear,
        Particle,
        Bullet,
        Enemy,
        Player,
        Score(u32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }
        fn draw_player(&mut self, _x: f64, _y: f64, _angle_radians: f64) {
            self.calls.push(DrawCall::Player);
        }
        fn draw_enemy(&mut self, _x: f64, _y: f64) {
            self.calls.push(DrawCall::Enemy);
        }
        fn draw_bullet(&mut self, _x: f64, _y: f64) {
            self.calls.push(DrawCall::Bullet);
        }
        fn draw_particle(&mut self, _x: f64, _y: f64, _radius: f64) {
            self.calls.push(DrawCall::Particle);
        }
        fn draw_score(&mut self, value: u32) {
            self.calls.push(DrawCall::Score(value));
        }
    }

    fn game() -> RocketGame {
        RocketGame::new(1024.0, 600.0)
    }

    #[test]
    fn repeated_identical_toggles_are_idempotent() {
        let mut game = game();
        game.toggle_boost(true);
        game.toggle_boost(true);
        assert!(game.actions.boost);
        game.toggle_boost(false);
        assert!(!game.actions.boost);
    }

    #[test]
    fn zero_and_invalid_deltas_change_nothing_visible() {
        let mut game = game();
        let x = game.player_x;
        game.update(0.0);
        game.update(f64::NAN);
        game.update(-1.0);
        assert_eq!(game.player_x, x);
    }

    #[test]
    fn player_advances_and_boost_doubles_speed() {
        let mut plain = game();
        plain.update(0.1);
        let plain_travel = plain.player_x - 512.0;

        let mut boosted = game();
        boosted.toggle_boost(true);
        boosted.update(0.1);
        let boosted_travel = boosted.player_x - 512.0;

        assert!((plain_travel - ADVANCE_SPEED * 0.1).abs() < 1e-9);
        assert!((boosted_travel - 2.0 * plain_travel).abs() < 1e-9);
    }

    #[test]
    fn turn_left_decreases_direction_turn_right_increases() {
        let mut game = game();
        game.toggle_turn_left(true);
        game.update(0.25);
        assert!((game.player_direction - (-ROTATE_SPEED * 0.25)).abs() < 1e-9);

        game.toggle_turn_left(false);
        game.toggle_turn_right(true);
        game.update(0.5);
        assert!((game.player_direction - ROTATE_SPEED * 0.25).abs() < 1e-9);
    }

    #[test]
    fn player_wraps_around_the_bounds() {
        let mut game = game();
        game.player_x = 1023.0;
        game.advance_player(0.1);
        assert!(game.player_x < 1024.0);
        assert!(game.player_x >= 0.0);
    }

    #[test]
    fn shooting_respects_the_fire_rate() {
        let mut game = game();
        game.toggle_shoot(true);
        game.update(BULLET_RATE * 1.5);
        assert_eq!(game.bullets.len(), 1);

        // well inside the cooldown window
        game.update(BULLET_RATE / 10.0);
        assert_eq!(game.bullets.len(), 1);

        game.update(BULLET_RATE * 1.5);
        assert_eq!(game.bullets.len(), 2);
    }

    #[test]
    fn bullets_leaving_the_bounds_are_culled() {
        let mut game = game();
        game.bullets.push(Bullet {
            x: 1020.0,
            y: 300.0,
            direction: 0.0,
        });
        game.advance_bullets(0.1);
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn enemies_never_spawn_inside_the_grace_area() {
        let mut game = game();
        for _ in 0..50 {
            game.current_time += ENEMY_SPAWN_RATE * 1.5;
            game.spawn_enemies();
        }
        assert!(!game.enemies.is_empty());
        for enemy in &game.enemies {
            assert!(!within_radius(
                enemy.x,
                enemy.y,
                game.player_x,
                game.player_y,
                PLAYER_GRACE_AREA - 1e-6,
            ));
        }
    }

    #[test]
    fn enemies_close_in_on_the_player() {
        let mut game = game();
        game.enemies.push(Enemy { x: 912.0, y: 300.0 });
        game.advance_enemies(0.1);
        let enemy = game.enemies[0];
        assert!((enemy.x - (912.0 - ENEMY_SPEED * 0.1)).abs() < 1e-9);
        assert!((enemy.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn bullet_hit_scores_and_spawns_an_explosion() {
        let mut game = game();
        game.enemies.push(Enemy { x: 800.0, y: 300.0 });
        game.bullets.push(Bullet {
            x: 805.0,
            y: 300.0,
            direction: 0.0,
        });
        game.handle_collisions();

        assert!(game.enemies.is_empty());
        assert!(game.bullets.is_empty());
        assert_eq!(game.score, POINTS_PER_ENEMY);
        assert_eq!(game.particles.len(), EXPLOSION_PARTICLES as usize);
    }

    #[test]
    fn enemy_reaching_the_player_resets_the_world() {
        let mut game = game();
        game.score = 50;
        game.player_x = 100.0;
        game.player_y = 100.0;
        game.bullets.push(Bullet {
            x: 900.0,
            y: 500.0,
            direction: 0.0,
        });
        game.enemies.push(Enemy { x: 102.0, y: 100.0 });
        game.handle_collisions();

        assert_eq!(game.score, 0);
        assert!(game.enemies.is_empty());
        assert!(game.bullets.is_empty());
        assert_eq!(game.player_x, 512.0);
        // the respawn explosion is visible
        assert_eq!(game.particles.len(), EXPLOSION_PARTICLES as usize);
    }

    #[test]
    fn resize_rebuilds_the_world_at_the_new_bounds() {
        let mut game = game();
        game.score = 30;
        game.enemies.push(Enemy { x: 10.0, y: 10.0 });
        game.resize(640, 480);

        assert_eq!(game.bounds_width, 640.0);
        assert_eq!(game.bounds_height, 480.0);
        assert_eq!(game.player_x, 320.0);
        assert_eq!(game.player_y, 240.0);
        assert_eq!(game.score, 0);
        assert!(game.enemies.is_empty());
    }

    #[test]
    fn draw_clears_first_and_scores_last() {
        let mut game = game();
        game.particles.push(Particle {
            x: 10.0,
            y: 10.0,
            direction: 0.0,
            time_out: 0.3,
        });
        game.bullets.push(Bullet {
            x: 20.0,
            y: 20.0,
            direction: 0.0,
        });
        game.enemies.push(Enemy { x: 30.0, y: 30.0 });
        game.score = 40;

        let mut surface = RecordingSurface::default();
        game.draw(&mut surface);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Clear,
                DrawCall::Particle,
                DrawCall::Bullet,
                DrawCall::Enemy,
                DrawCall::Player,
                DrawCall::Score(40),
            ]
        );
    }

    #[test]
    fn tail_particles_accumulate_while_flying() {
        let mut game = game();
        for _ in 0..5 {
            game.update(TRAIL_PARTICLE_RATE * 1.5);
        }
        assert!(!game.particles.is_empty());
    }

    #[test]
    fn huge_stall_delta_does_not_panic() {
        let mut game = game();
        game.toggle_shoot(true);
        game.update(90.0);
        game.update(0.016);
    }
}
