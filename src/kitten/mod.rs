pub mod pursuit;
pub mod speech;

use glam::Vec2;

use crate::dispenser::TreatSource;
use crate::ecs::components::TreatId;
use crate::timers::{TimerHandle, Timers};
use crate::viewport::{Viewport, SAFE_MAX, SAFE_MIN};

use self::speech::Speech;

/// Seconds between controller updates.
pub const CADENCE: f64 = 0.05;
/// Only treats within this many pixels catch the kitten's eye.
pub const PURSUIT_RADIUS: f32 = 300.0;
/// Close enough to eat, in pixels.
pub const EAT_DISTANCE: f32 = 30.0;
/// Pixels moved per controller update while chasing.
pub const CHASE_STEP: f32 = 2.0;
/// How long the kitten stays busy eating.
pub const EATING_SECS: f64 = 3.5;
/// Idle wander re-targets after a random delay in this range.
const WANDER_MIN_SECS: f64 = 3.0;
const WANDER_MAX_SECS: f64 = 5.0;
/// Click hit radius around the kitten, in pixels.
pub const HIT_RADIUS: f32 = 40.0;
/// Poke hop height in percent, and how long until it lands.
const HOP_PCT: f32 = 5.0;
const HOP_SECS: f64 = 0.2;
const HOP_CEILING: f32 = 5.0;
const HOP_FLOOR: f32 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Idle,
    /// Holds the treat by id only; it is re-resolved on every update.
    Chasing { target: TreatId },
    Eating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KittenTask {
    Wander,
    DoneEating,
    Land,
}

/// The floating kitten. Wanders while idle, chases settled treats, eats them.
pub struct Kitten {
    /// Percent of viewport.
    pos: Vec2,
    behavior: Behavior,
    speech: Speech,
    timers: Timers<KittenTask>,
    wander: Option<TimerHandle>,
    hop: Option<TimerHandle>,
    rng: fastrand::Rng,
}

impl Kitten {
    pub fn new() -> Self {
        Self::from_rng(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    fn from_rng(rng: fastrand::Rng) -> Self {
        let mut kitten = Self {
            pos: Vec2::splat(50.0),
            behavior: Behavior::Idle,
            speech: Speech::new(),
            timers: Timers::new(),
            wander: None,
            hop: None,
            rng,
        };
        kitten.start_wandering();
        kitten
    }

    /// Position in percent of the viewport.
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn position_px(&self, viewport: &Viewport) -> Vec2 {
        viewport.percent_to_px(self.pos)
    }

    pub fn set_position(&mut self, pct: Vec2) {
        self.pos = Viewport::clamp_percent(pct);
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn target(&self) -> Option<TreatId> {
        match self.behavior {
            Behavior::Chasing { target } => Some(target),
            _ => None,
        }
    }

    pub fn speech(&self) -> &Speech {
        &self.speech
    }

    /// Does a click at `point` (pixels) land on the kitten?
    pub fn hit_test(&self, point: Vec2, viewport: &Viewport) -> bool {
        self.position_px(viewport).distance(point) <= HIT_RADIUS
    }

    /// Kitten was clicked: say hello and hop.
    pub fn poke(&mut self) {
        self.speech.say(speech::GREETING, speech::GREETING_SECS);
        self.pos.y = (self.pos.y - HOP_PCT).max(HOP_CEILING);
        if let Some(h) = self.hop.take() {
            self.timers.cancel(h);
        }
        self.hop = Some(self.timers.after(HOP_SECS, KittenTask::Land));
    }

    /// One controller update. `dt` is seconds since the previous update.
    pub fn update(&mut self, dt: f64, treats: &mut impl TreatSource, viewport: &Viewport) {
        self.speech.tick(dt);
        for task in self.timers.advance(dt) {
            self.run_task(task);
        }

        match self.behavior {
            Behavior::Idle => self.look_for_treat(&*treats, viewport),
            Behavior::Chasing { target } => self.chase(target, treats, viewport),
            Behavior::Eating => {}
        }
    }

    fn run_task(&mut self, task: KittenTask) {
        match task {
            KittenTask::Wander => {
                self.wander = None;
                if self.behavior == Behavior::Idle {
                    self.pos = Vec2::new(self.random_safe(), self.random_safe());
                    log::trace!("Kitten wanders to ({:.0}%, {:.0}%)", self.pos.x, self.pos.y);
                    self.start_wandering();
                }
            }
            KittenTask::DoneEating => {
                if self.behavior == Behavior::Eating {
                    self.speech.reset();
                    self.become_idle();
                }
            }
            KittenTask::Land => {
                self.hop = None;
                self.pos.y = (self.pos.y + HOP_PCT).min(HOP_FLOOR);
            }
        }
    }

    fn look_for_treat(&mut self, treats: &impl TreatSource, viewport: &Viewport) {
        let here = self.position_px(viewport);
        let Some(treat) = pursuit::select_target(&treats.active_treats(), here, PURSUIT_RADIUS)
        else {
            return;
        };

        log::debug!("Kitten spotted treat {:?}", treat.id);
        self.stop_wandering();
        self.behavior = Behavior::Chasing { target: treat.id };
        self.speech.say(speech::EXCITED, speech::EXCITED_SECS);
    }

    fn chase(&mut self, target: TreatId, treats: &mut impl TreatSource, viewport: &Viewport) {
        let found = treats
            .active_treats()
            .into_iter()
            .find(|t| t.id == target && !t.eaten);
        let Some(treat) = found else {
            log::debug!("Kitten lost treat {:?}", target);
            self.become_idle();
            return;
        };

        let here = self.position_px(viewport);
        if here.distance(treat.pos) > EAT_DISTANCE {
            let next = pursuit::step_toward(here, treat.pos, CHASE_STEP);
            self.pos = chase_clamp(viewport.px_to_percent(next));
            return;
        }

        treats.mark_eaten(target);
        log::info!("Kitten ate treat {:?}", target);
        self.behavior = Behavior::Eating;
        let line = speech::random_satisfied(&mut self.rng);
        self.speech.say(line, speech::SATISFIED_SECS);
        self.timers.after(EATING_SECS, KittenTask::DoneEating);
    }

    fn become_idle(&mut self) {
        self.behavior = Behavior::Idle;
        self.start_wandering();
    }

    fn start_wandering(&mut self) {
        self.stop_wandering();
        let delay = WANDER_MIN_SECS + self.rng.f64() * (WANDER_MAX_SECS - WANDER_MIN_SECS);
        self.wander = Some(self.timers.after(delay, KittenTask::Wander));
    }

    fn stop_wandering(&mut self) {
        if let Some(h) = self.wander.take() {
            self.timers.cancel(h);
        }
    }

    fn random_safe(&mut self) -> f32 {
        SAFE_MIN + self.rng.f32() * (SAFE_MAX - SAFE_MIN)
    }
}

impl Default for Kitten {
    fn default() -> Self {
        Self::new()
    }
}

/// Chasing may take the kitten anywhere on screen, so treats resting against
/// a wall or on the floor stay reachable.
fn chase_clamp(pct: Vec2) -> Vec2 {
    pct.clamp(Vec2::ZERO, Vec2::splat(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispenser::{TreatDispenser, TREAT_LIFETIME};
    use crate::ecs::components::TreatSnapshot;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 1000.0).unwrap()
    }

    /// Treat resting on the floor with its top-left corner at `x`.
    fn floor_treat(d: &mut TreatDispenser, x: f32) -> TreatId {
        let floor = d.bounds().floor_y();
        let id = d.spawn_with_velocity(Vec2::new(x + 10.0, floor + 10.0), Vec2::ZERO);
        d.tick(1.0);
        id
    }

    fn setup() -> (Kitten, TreatDispenser) {
        let mut kitten = Kitten::with_seed(11);
        kitten.set_position(Vec2::new(50.0, 90.0));
        (kitten, TreatDispenser::with_seed(viewport(), 5))
    }

    #[test]
    fn targets_nearer_of_two_settled_treats() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let near = floor_treat(&mut d, 690.0);
        let far = floor_treat(&mut d, 10.0);

        kitten.update(CADENCE, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Chasing { target: near });
        assert_eq!(kitten.speech().text(), Some(speech::EXCITED));

        for _ in 0..200 {
            kitten.update(CADENCE, &mut d, &vp);
            assert_ne!(kitten.target(), Some(far));
            if kitten.behavior() == Behavior::Eating {
                break;
            }
        }
        assert_eq!(kitten.behavior(), Behavior::Eating);
        assert!(d.get(near).unwrap().eaten);
        assert!(!d.get(far).unwrap().eaten);
    }

    #[test]
    fn ignores_treat_outside_radius() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        floor_treat(&mut d, 10.0);
        kitten.update(CADENCE, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Idle);
    }

    #[test]
    fn ignores_treat_still_flying() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        d.spawn_with_velocity(Vec2::new(520.0, 850.0), Vec2::new(0.0, -8.0));
        kitten.update(CADENCE, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Idle);
    }

    #[test]
    fn chase_moves_one_step_toward_target() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let id = floor_treat(&mut d, 690.0);
        kitten.update(CADENCE, &mut d, &vp);

        let before = kitten.position_px(&vp);
        kitten.update(CADENCE, &mut d, &vp);
        let after = kitten.position_px(&vp);
        assert!((before.distance(after) - CHASE_STEP).abs() < 1e-3);

        let treat = d.get(id).unwrap().pos;
        assert!(after.distance(treat) < before.distance(treat));
    }

    /// Chase until the kitten starts eating, or give up.
    fn chase_to_eating(kitten: &mut Kitten, d: &mut TreatDispenser, vp: &Viewport) {
        for _ in 0..200 {
            kitten.update(CADENCE, d, vp);
            if kitten.behavior() == Behavior::Eating {
                return;
            }
        }
    }

    #[test]
    fn reaches_treat_against_left_wall() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        kitten.set_position(Vec2::new(10.0, 90.0));
        let id = floor_treat(&mut d, 0.0);
        assert_eq!(d.get(id).unwrap().pos.x, 0.0);

        chase_to_eating(&mut kitten, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Eating);
        assert!(d.get(id).unwrap().eaten);
        assert!(kitten.position().x < SAFE_MIN);
    }

    #[test]
    fn reaches_treat_against_right_wall() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        kitten.set_position(Vec2::new(90.0, 90.0));
        let id = floor_treat(&mut d, vp.max_treat_x());
        assert_eq!(d.get(id).unwrap().pos.x, vp.max_treat_x());

        chase_to_eating(&mut kitten, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Eating);
        assert!(d.get(id).unwrap().eaten);
        assert!(kitten.position().x > SAFE_MAX);
    }

    #[test]
    fn chase_step_follows_the_resized_viewport() {
        let (mut kitten, mut d) = setup();
        let id = floor_treat(&mut d, 690.0);
        kitten.update(CADENCE, &mut d, &viewport());
        assert_eq!(kitten.target(), Some(id));

        // Same percent position now maps to x = 1000, right of the treat
        let wide = Viewport::new(2000.0, 1000.0).unwrap();
        d.set_viewport(wide);
        let before = kitten.position_px(&wide);
        assert!(before.distance(Vec2::new(1000.0, 900.0)) < 1e-3);

        kitten.update(CADENCE, &mut d, &wide);
        let after = kitten.position_px(&wide);
        assert_eq!(kitten.target(), Some(id));
        assert!((before.distance(after) - CHASE_STEP).abs() < 1e-3);
        assert!(after.x < before.x);
        let treat = d.get(id).unwrap().pos;
        assert!(after.distance(treat) < before.distance(treat));
    }

    #[test]
    fn narrowed_viewport_brings_treat_into_range() {
        let (mut kitten, mut d) = setup();
        let id = floor_treat(&mut d, 10.0);
        kitten.update(CADENCE, &mut d, &viewport());
        assert_eq!(kitten.behavior(), Behavior::Idle);

        // Kitten at 50% is now x = 250, about 250 px from the treat
        let narrow = Viewport::new(500.0, 1000.0).unwrap();
        d.set_viewport(narrow);
        kitten.update(CADENCE, &mut d, &narrow);
        assert_eq!(kitten.behavior(), Behavior::Chasing { target: id });
    }

    #[test]
    fn returns_to_idle_when_target_expires() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let id = floor_treat(&mut d, 690.0);
        kitten.update(CADENCE, &mut d, &vp);
        assert_eq!(kitten.target(), Some(id));

        d.run_timers(TREAT_LIFETIME);
        assert!(!d.contains(id));

        let speech_before = *kitten.speech();
        kitten.update(0.0, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Idle);
        assert_eq!(kitten.target(), None);
        assert_eq!(*kitten.speech(), speech_before);
    }

    #[test]
    fn abandons_treat_eaten_elsewhere() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let id = floor_treat(&mut d, 690.0);
        kitten.update(CADENCE, &mut d, &vp);
        assert!(d.mark_eaten(id));
        kitten.update(CADENCE, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Idle);
    }

    #[test]
    fn finishes_eating_then_idles() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let id = floor_treat(&mut d, 510.0);

        for _ in 0..100 {
            kitten.update(CADENCE, &mut d, &vp);
            if kitten.behavior() == Behavior::Eating {
                break;
            }
        }
        assert_eq!(kitten.behavior(), Behavior::Eating);
        assert!(d.get(id).unwrap().eaten);
        let line = kitten.speech().text().unwrap();
        assert!(speech::SATISFIED.contains(&line));

        kitten.update(3.0, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Eating);
        kitten.update(0.6, &mut d, &vp);
        assert_eq!(kitten.behavior(), Behavior::Idle);
        assert!(!kitten.speech().is_visible());
    }

    #[test]
    fn wanders_inside_safe_margin_when_idle() {
        let mut kitten = Kitten::with_seed(2);
        let mut d = TreatDispenser::with_seed(viewport(), 1);
        let vp = viewport();
        let start = kitten.position();
        let mut moved = false;
        for _ in 0..(12.0 / CADENCE) as usize {
            kitten.update(CADENCE, &mut d, &vp);
            let p = kitten.position();
            assert!(p.x >= SAFE_MIN && p.x <= SAFE_MAX);
            assert!(p.y >= SAFE_MIN && p.y <= SAFE_MAX);
            moved |= p != start;
        }
        assert!(moved);
        assert_eq!(kitten.behavior(), Behavior::Idle);
    }

    #[test]
    fn no_wandering_while_chasing() {
        let (mut kitten, mut d) = setup();
        let vp = viewport();
        let id = floor_treat(&mut d, 690.0);
        kitten.update(CADENCE, &mut d, &vp);
        assert!(kitten.wander.is_none());
        assert_eq!(kitten.target(), Some(id));
    }

    #[test]
    fn poke_greets_and_hops() {
        let mut kitten = Kitten::with_seed(4);
        let mut d = TreatDispenser::with_seed(viewport(), 4);
        let vp = viewport();
        kitten.poke();
        assert_eq!(kitten.speech().text(), Some(speech::GREETING));
        assert_eq!(kitten.position().y, 45.0);

        kitten.update(HOP_SECS + 0.01, &mut d, &vp);
        assert_eq!(kitten.position().y, 50.0);
        kitten.update(2.0, &mut d, &vp);
        assert!(!kitten.speech().is_visible());
    }

    #[test]
    fn hit_test_uses_pixel_distance() {
        let kitten = Kitten::with_seed(9);
        let vp = viewport();
        assert!(kitten.hit_test(Vec2::new(520.0, 500.0), &vp));
        assert!(!kitten.hit_test(Vec2::new(600.0, 500.0), &vp));
    }

    /// Records calls instead of owning treats.
    struct FakeSource {
        treats: Vec<TreatSnapshot>,
        eaten: Vec<TreatId>,
    }

    impl TreatSource for FakeSource {
        fn active_treats(&self) -> Vec<TreatSnapshot> {
            self.treats.clone()
        }

        fn mark_eaten(&mut self, id: TreatId) -> bool {
            self.eaten.push(id);
            true
        }
    }

    #[test]
    fn eats_through_the_source_exactly_once() {
        let mut world = hecs::World::new();
        let id = TreatId(world.spawn(()));
        let vp = viewport();
        let mut kitten = Kitten::with_seed(1);
        let here = kitten.position_px(&vp);
        let mut source = FakeSource {
            treats: vec![TreatSnapshot {
                id,
                pos: here + Vec2::new(10.0, 0.0),
                vel: Vec2::ZERO,
                eaten: false,
                landing: true,
                seq: 0,
            }],
            eaten: Vec::new(),
        };
        for _ in 0..10 {
            kitten.update(CADENCE, &mut source, &vp);
        }
        assert_eq!(source.eaten, vec![id]);
    }
}
