use glam::Vec2;

use crate::timers::TimerHandle;

/// Stable identifier of a live treat. Backed by a generational ECS handle,
/// so a removed treat's id never resolves to a newer treat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreatId(pub(crate) hecs::Entity);

/// Top-left corner in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Velocity in pixels/frame.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Pursuit-relevant flags.
#[derive(Debug, Clone, Copy)]
pub struct TreatState {
    /// Monotonic: false -> true only.
    pub eaten: bool,
    /// Set on first floor contact, never cleared.
    pub landing: bool,
    /// Spawn order, used as a deterministic tie-break.
    pub seq: u64,
}

/// Pending removal timers owned by this treat.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreatTimers {
    pub expiry: Option<TimerHandle>,
    pub vanish: Option<TimerHandle>,
}

/// Read-only copy of one treat, handed to the render layer and the kitten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreatSnapshot {
    pub id: TreatId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub eaten: bool,
    pub landing: bool,
    pub seq: u64,
}
