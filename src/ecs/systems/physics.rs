use glam::Vec2;

use crate::ecs::components::{Position, TreatId, TreatState, Velocity};
use crate::viewport::Viewport;

/// Downward acceleration in pixels/frame².
pub const GRAVITY: f32 = 0.5;
/// Fraction of speed kept after hitting the floor or a wall.
pub const BOUNCE: f32 = 0.6;
/// Horizontal velocity multiplier per tick.
pub const FRICTION: f32 = 0.98;
/// Bounces slower than this (pixels/frame) come to rest.
pub const REST_EPSILON: f32 = 1.0;

/// Integrate gravity, friction and boundary collisions for every treat that
/// has not been eaten. Ids of treats touching the floor for the first time
/// are appended to `landed`.
pub fn integrate(world: &mut hecs::World, dt: f32, bounds: &Viewport, landed: &mut Vec<TreatId>) {
    let floor = bounds.floor_y();
    let max_x = bounds.max_treat_x();

    for (entity, (pos, vel, state)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut TreatState)>()
    {
        // Eaten treats stay frozen where the kitten caught them
        if state.eaten {
            continue;
        }

        vel.0.y += GRAVITY * dt;
        pos.0 += vel.0 * dt;
        vel.0.x *= FRICTION;

        // Floor
        if pos.0.y > floor {
            pos.0.y = floor;
            vel.0.y *= -BOUNCE;
            if !state.landing {
                state.landing = true;
                landed.push(TreatId(entity));
            }
            if vel.0.y.abs() < REST_EPSILON {
                vel.0.y = 0.0;
            }
        }

        // Walls
        if pos.0.x < 0.0 || pos.0.x > max_x {
            vel.0.x *= -BOUNCE;
            pos.0.x = pos.0.x.clamp(0.0, max_x);
        }
    }
}

/// Is this treat calm enough for the kitten to go after?
pub fn is_settled(landing: bool, vel: Vec2, threshold: f32) -> bool {
    landing || vel.y.abs() < threshold
}
