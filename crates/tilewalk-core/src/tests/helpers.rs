//! Fixtures shared by the cross-module tests.

use glam::Vec2;

use tilewalk_geom::Rect;

use crate::body::{Body, BodyId};
use crate::config::ViewportConfig;
use crate::motion::MotionState;
use crate::world::World;

// =============================================================================
// Rooms
// =============================================================================

/// A 12x8 room with one-tile walls. The open floor spans x in `[1, 11)` and
/// y in `[1, 7)`.
pub fn room() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, 12.0, 1.0),
        Rect::new(0.0, 7.0, 12.0, 1.0),
        Rect::new(0.0, 1.0, 1.0, 6.0),
        Rect::new(11.0, 1.0, 1.0, 6.0),
    ]
}

/// A world whose static geometry is [`room`].
pub fn room_world() -> World {
    let mut world = World::new();
    world.set_chunks(room());
    world
}

/// 640x320 screen with 16px tiles at ratio 2: a 20x10 tile window.
pub fn small_screen() -> ViewportConfig {
    ViewportConfig {
        screen_width: 640.0,
        screen_height: 320.0,
        ..Default::default()
    }
}

// =============================================================================
// Bodies
// =============================================================================

/// A unit body at `position` moving with `velocity`.
pub fn walker(position: Vec2, velocity: Vec2) -> Body {
    let mut body = Body::new(Rect::new(position.x, position.y, 1.0, 1.0));
    body.motion.velocity = velocity;
    body
}

/// A unit body at rest at `position` that was just knocked back.
pub fn knocked(position: Vec2, impulse: Vec2, friction: f32) -> Body {
    let mut motion = MotionState::new(0.1, friction);
    motion.apply_impulse(impulse);
    Body::new(Rect::new(position.x, position.y, 1.0, 1.0)).with_motion(motion)
}

/// Spawn a [`walker`] and return its id.
pub fn spawn_walker(world: &mut World, position: Vec2, velocity: Vec2) -> BodyId {
    world.spawn(walker(position, velocity))
}

/// Raw position of a body that must exist.
pub fn position_of(world: &World, id: BodyId) -> Vec2 {
    world.get(id).expect("body exists").position()
}

/// Step `world` `ticks` times at the design rate.
pub fn run(world: &mut World, ticks: usize) {
    for _ in 0..ticks {
        world.step(1.0);
    }
}

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
