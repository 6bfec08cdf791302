/// Boundary to the external game simulation.
///
/// The driver owns no game state: it forwards elapsed time, input toggles,
/// and bounds changes across this trait, and hands the simulation a
/// [`Surface`] to draw on once per frame. The simulation is assumed already
/// initialized before the loop starts, and none of these entry points fail.
pub trait GameEngine {
    /// Advances the simulation by `dt_seconds`. Must tolerate deltas of
    /// zero or arbitrarily large magnitude; the driver performs no clamping.
    fn update(&mut self, dt_seconds: f64);

    /// Renders the current simulation state by issuing zero or more calls
    /// back into the surface primitives.
    fn draw(&mut self, surface: &mut dyn Surface);

    /// Informs the simulation of new drawing bounds so its coordinate space
    /// and boundary logic stay consistent with the surface.
    fn resize(&mut self, width: u32, height: u32);

    /// Input toggles. Each is idempotent under repeated identical calls;
    /// key autorepeat may deliver the same press more than once.
    fn toggle_turn_left(&mut self, pressed: bool);
    fn toggle_turn_right(&mut self, pressed: bool);
    fn toggle_boost(&mut self, pressed: bool);
    fn toggle_shoot(&mut self, pressed: bool);
}

/// Primitive drawing operations the simulation calls during [`GameEngine::draw`].
///
/// The production implementation is [`crate::app::Renderer`]; tests use
/// in-memory recording stubs. `clear` must come before any sprite or text
/// draw in a frame (the pixel buffer is not cleared between frames), and the
/// score overlay is expected last so it is never occluded. Ordering among
/// sprite draws is the caller's choice.
pub trait Surface {
    /// Fills the whole surface with the background color.
    fn clear(&mut self);

    /// Draws the player sprite with its visual reference point at (x, y),
    /// rotated by `angle_radians`. No transform state survives the call.
    fn draw_player(&mut self, x: f64, y: f64, angle_radians: f64);

    /// Draws the enemy sprite centered at (x, y).
    fn draw_enemy(&mut self, x: f64, y: f64);

    /// Draws the bullet sprite centered at (x, y).
    fn draw_bullet(&mut self, x: f64, y: f64);

    /// Draws the particle sprite centered at (x, y), scaled to a
    /// `2 * radius` square.
    fn draw_particle(&mut self, x: f64, y: f64, radius: f64);

    /// Draws "Score: {value}" anchored near the top-left corner.
    fn draw_score(&mut self, value: u32);
}
