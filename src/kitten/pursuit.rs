use glam::Vec2;

use crate::ecs::components::TreatSnapshot;
use crate::ecs::systems::physics::is_settled;

/// Treats falling faster than this (pixels/frame) are ignored unless they
/// have already touched the floor.
pub const SETTLED_SPEED: f32 = 1.0;

/// Closest settled, uneaten treat within `radius` pixels of `from`.
/// Equal distances go to the earliest-spawned treat.
pub fn select_target(treats: &[TreatSnapshot], from: Vec2, radius: f32) -> Option<TreatSnapshot> {
    let radius_sq = radius * radius;
    let mut best: Option<(f32, TreatSnapshot)> = None;

    for treat in treats {
        if treat.eaten || !is_settled(treat.landing, treat.vel, SETTLED_SPEED) {
            continue;
        }
        let dist_sq = treat.pos.distance_squared(from);
        if dist_sq > radius_sq {
            continue;
        }
        let better = match &best {
            None => true,
            Some((best_sq, best_treat)) => {
                dist_sq < *best_sq || (dist_sq == *best_sq && treat.seq < best_treat.seq)
            }
        };
        if better {
            best = Some((dist_sq, *treat));
        }
    }
    best.map(|(_, t)| t)
}

/// Move `step` pixels from `from` toward `to`. Never overshoots.
pub fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= step {
        return to;
    }
    from + delta / dist * step
}
