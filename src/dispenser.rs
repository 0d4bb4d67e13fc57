use glam::Vec2;

use crate::ecs::components::{
    Position, TreatId, TreatSnapshot, TreatState, TreatTimers, Velocity,
};
use crate::ecs::systems::physics;
use crate::events::TreatEvent;
use crate::timers::Timers;
use crate::viewport::{Viewport, TREAT_SIZE};

/// Seconds an uneaten treat stays on screen.
pub const TREAT_LIFETIME: f64 = 10.0;
/// Seconds an eaten treat lingers for its disappear animation.
pub const VANISH_DELAY: f64 = 0.5;
/// Default search radius for [`TreatDispenser::nearby_treat`].
pub const NEARBY_RADIUS: f32 = 50.0;
/// Horizontal launch speed range is [-MAX_TOSS_X, MAX_TOSS_X).
const MAX_TOSS_X: f32 = 1.0;
/// Upward launch speed is in [MIN_TOSS_Y, MIN_TOSS_Y + TOSS_Y_SPREAD).
const MIN_TOSS_Y: f32 = 5.0;
const TOSS_Y_SPREAD: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
enum TreatTask {
    Expire(TreatId),
    Vanish(TreatId),
}

/// What the kitten may see and do to the treats: read a snapshot, eat one.
pub trait TreatSource {
    fn active_treats(&self) -> Vec<TreatSnapshot>;
    fn mark_eaten(&mut self, id: TreatId) -> bool;
}

/// Owns every live treat. Integrates them each frame and removes them
/// when they expire or after they are eaten.
pub struct TreatDispenser {
    world: hecs::World,
    timers: Timers<TreatTask>,
    bounds: Viewport,
    rng: fastrand::Rng,
    next_seq: u64,
    events: Vec<TreatEvent>,
    landed_buf: Vec<TreatId>,
}

impl TreatDispenser {
    pub fn new(bounds: Viewport) -> Self {
        Self::from_rng(bounds, fastrand::Rng::new())
    }

    pub fn with_seed(bounds: Viewport, seed: u64) -> Self {
        Self::from_rng(bounds, fastrand::Rng::with_seed(seed))
    }

    fn from_rng(bounds: Viewport, rng: fastrand::Rng) -> Self {
        Self {
            world: hecs::World::new(),
            timers: Timers::new(),
            bounds,
            rng,
            next_seq: 0,
            events: Vec::new(),
            landed_buf: Vec::new(),
        }
    }

    /// Toss a treat from a click at `origin` (screen pixels).
    pub fn spawn(&mut self, origin: Vec2) -> TreatId {
        let vel = Vec2::new(
            (self.rng.f32() - 0.5) * 2.0 * MAX_TOSS_X,
            -MIN_TOSS_Y - self.rng.f32() * TOSS_Y_SPREAD,
        );
        self.spawn_with_velocity(origin, vel)
    }

    /// Toss a treat with an explicit launch velocity (pixels/frame).
    pub fn spawn_with_velocity(&mut self, origin: Vec2, vel: Vec2) -> TreatId {
        // Center the treat on the click point
        let pos = origin - Vec2::splat(TREAT_SIZE * 0.5);
        let seq = self.next_seq;
        self.next_seq += 1;

        let entity = self.world.spawn((
            Position(pos),
            Velocity(vel),
            TreatState {
                eaten: false,
                landing: false,
                seq,
            },
            TreatTimers::default(),
        ));
        let id = TreatId(entity);

        let expiry = self.timers.after(TREAT_LIFETIME, TreatTask::Expire(id));
        if let Ok(t) = self.world.query_one_mut::<&mut TreatTimers>(entity) {
            t.expiry = Some(expiry);
        }

        log::debug!("Treat {:?} tossed at ({:.0}, {:.0})", id, pos.x, pos.y);
        self.events.push(TreatEvent::Spawned { id, pos });
        id
    }

    /// Advance physics by `dt` frames.
    pub fn tick(&mut self, dt: f32) {
        self.landed_buf.clear();
        physics::integrate(&mut self.world, dt, &self.bounds, &mut self.landed_buf);
        for &id in &self.landed_buf {
            log::trace!("Treat {:?} landed", id);
            self.events.push(TreatEvent::Landed { id });
        }
    }

    /// Advance expiry and removal timers by `dt` seconds.
    pub fn run_timers(&mut self, dt: f64) {
        for task in self.timers.advance(dt) {
            match task {
                TreatTask::Expire(id) => {
                    if !self.contains(id) {
                        continue;
                    }
                    log::debug!("Treat {:?} expired", id);
                    self.events.push(TreatEvent::Expired { id });
                    self.remove(id);
                }
                TreatTask::Vanish(id) => self.remove(id),
            }
        }
    }

    /// Flip a treat to eaten. Returns whether this call made the transition;
    /// unknown or already-eaten ids are a no-op.
    pub fn mark_eaten(&mut self, id: TreatId) -> bool {
        let Ok((state, timers)) = self
            .world
            .query_one_mut::<(&mut TreatState, &mut TreatTimers)>(id.0)
        else {
            return false;
        };
        if state.eaten {
            return false;
        }
        state.eaten = true;

        let expiry = timers.expiry.take();
        let vanish = self.timers.after(VANISH_DELAY, TreatTask::Vanish(id));
        timers.vanish = Some(vanish);
        if let Some(handle) = expiry {
            self.timers.cancel(handle);
        }

        log::debug!("Treat {:?} eaten", id);
        self.events.push(TreatEvent::Eaten { id });
        true
    }

    /// Drop a treat immediately. No-op if it is already gone.
    pub fn remove(&mut self, id: TreatId) {
        let Ok(timers) = self.world.get::<&TreatTimers>(id.0).map(|t| *t) else {
            return;
        };
        if self.world.despawn(id.0).is_err() {
            return;
        }
        for handle in [timers.expiry, timers.vanish].into_iter().flatten() {
            self.timers.cancel(handle);
        }
        self.events.push(TreatEvent::Removed { id });
    }

    pub fn contains(&self, id: TreatId) -> bool {
        self.world.contains(id.0)
    }

    pub fn get(&self, id: TreatId) -> Option<TreatSnapshot> {
        let mut query = self
            .world
            .query_one::<(&Position, &Velocity, &TreatState)>(id.0)
            .ok()?;
        let (pos, vel, state) = query.get()?;
        Some(snapshot(id, pos, vel, state))
    }

    /// Snapshot of every live treat, in no particular order.
    pub fn active_treats(&self) -> Vec<TreatSnapshot> {
        self.world
            .query::<(&Position, &Velocity, &TreatState)>()
            .iter()
            .map(|(entity, (pos, vel, state))| snapshot(TreatId(entity), pos, vel, state))
            .collect()
    }

    /// First uneaten treat within `radius` pixels of `point`.
    pub fn nearby_treat(&self, point: Vec2, radius: f32) -> Option<TreatSnapshot> {
        self.active_treats()
            .into_iter()
            .find(|t| !t.eaten && t.pos.distance(point) < radius)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn bounds(&self) -> &Viewport {
        &self.bounds
    }

    /// Resize the play area. Takes effect on the next tick.
    pub fn set_viewport(&mut self, bounds: Viewport) {
        self.bounds = bounds;
    }

    /// Lifecycle events since the last drain.
    pub fn drain_events(&mut self) -> Vec<TreatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear down: drop every treat and cancel every pending timer.
    /// Each dropped treat is reported as `Removed`.
    pub fn clear(&mut self) {
        let ids: Vec<TreatId> = self
            .world
            .query::<&TreatState>()
            .iter()
            .map(|(entity, _)| TreatId(entity))
            .collect();
        self.world.clear();
        self.timers.clear();
        self.events
            .extend(ids.into_iter().map(|id| TreatEvent::Removed { id }));
    }
}

impl TreatSource for TreatDispenser {
    fn active_treats(&self) -> Vec<TreatSnapshot> {
        TreatDispenser::active_treats(self)
    }

    fn mark_eaten(&mut self, id: TreatId) -> bool {
        TreatDispenser::mark_eaten(self, id)
    }
}

fn snapshot(id: TreatId, pos: &Position, vel: &Velocity, state: &TreatState) -> TreatSnapshot {
    TreatSnapshot {
        id,
        pos: pos.0,
        vel: vel.0,
        eaten: state.eaten,
        landing: state.landing,
        seq: state.seq,
    }
}
