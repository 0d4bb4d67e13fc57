use std::time::Duration;

use glam::Vec2;
use instant::Instant;

use crate::cli::Args;
use crate::click::{ClickState, ClickTarget};
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::dispenser::{TreatDispenser, NEARBY_RADIUS};
use crate::events::{TreatEvent, TreatTally};
use crate::kitten::{self, Kitten};
use crate::viewport::Viewport;

/// Physics tick rate (seconds per tick). One tick advances treats one frame.
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log stats (simulated seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;
/// Frame durations wobble by up to this fraction, like a real display.
const FRAME_JITTER: f64 = 0.1;
/// Share of scripted clicks aimed at the kitten.
const KITTEN_CLICK_CHANCE: f32 = 0.15;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    since_log: f64,
    wall_start: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            since_log: 0.0,
            wall_start: Instant::now(),
        }
    }

    /// Returns true when a stats line is due.
    fn record_frame(&mut self, dt: f64) -> bool {
        self.frame_count += 1;
        self.since_log += dt;
        if self.since_log < STATS_LOG_INTERVAL {
            return false;
        }
        self.since_log = 0.0;
        true
    }
}

// ---------------------------------------------------------------------------
// Scripted pointer
// ---------------------------------------------------------------------------

/// Stands in for the mouse: presses for one frame at random spots.
struct DemoPointer {
    rng: fastrand::Rng,
    mean_interval: f64,
    until_press: f64,
    down: bool,
    pos: Vec2,
}

impl DemoPointer {
    fn new(rng: fastrand::Rng, mean_interval: f64) -> Self {
        let mut pointer = Self {
            rng,
            mean_interval,
            until_press: 0.0,
            down: false,
            pos: Vec2::ZERO,
        };
        pointer.until_press = pointer.next_interval();
        pointer
    }

    fn next_interval(&mut self) -> f64 {
        self.mean_interval * (0.5 + self.rng.f64())
    }

    /// Button state and position for this frame.
    fn poll(&mut self, dt: f64, kitten_px: Vec2, viewport: &Viewport) -> (bool, Vec2) {
        if self.down {
            self.down = false;
            return (false, self.pos);
        }
        self.until_press -= dt;
        if self.until_press > 0.0 {
            return (false, self.pos);
        }
        self.until_press = self.next_interval();
        self.down = true;
        self.pos = if self.rng.f32() < KITTEN_CLICK_CHANCE {
            kitten_px
        } else {
            // Upper two thirds, so treats get a visible arc
            Vec2::new(
                self.rng.f32() * viewport.width(),
                self.rng.f32() * viewport.height() * 0.66,
            )
        };
        (true, self.pos)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level simulation state.
struct App {
    viewport: Viewport,
    dispenser: TreatDispenser,
    kitten: Kitten,
    click: ClickState,
    pointer: DemoPointer,
    rng: fastrand::Rng,

    // Two independent cadences
    accumulator: f64,
    kitten_accumulator: f64,
    tick_count: u64,

    tally: TreatTally,
    /// Treats thrown on top of one already lying there.
    pile_throws: u32,
    frame_stats: FrameStats,
    system_timers: SystemTimers,
}

impl App {
    fn new(viewport: Viewport, args: &Args) -> Self {
        let mut rng = match args.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let dispenser = TreatDispenser::with_seed(viewport, rng.u64(..));
        let kitten = Kitten::with_seed(rng.u64(..));
        let pointer = DemoPointer::new(rng.fork(), args.click_every);
        Self {
            viewport,
            dispenser,
            kitten,
            click: ClickState::new(),
            pointer,
            rng,
            accumulator: 0.0,
            kitten_accumulator: 0.0,
            tick_count: 0,
            tally: TreatTally::default(),
            pile_throws: 0,
            frame_stats: FrameStats::new(),
            system_timers: SystemTimers::new(),
        }
    }

    /// Display-refresh duration for the next frame.
    fn next_frame_dt(&mut self, fps: f64) -> f64 {
        let wobble = 1.0 + (self.rng.f64() * 2.0 - 1.0) * FRAME_JITTER;
        wobble / fps
    }

    fn frame(&mut self, dt: f64) {
        // --- Input ---
        self.system_timers.begin();
        let kitten_px = self.kitten.position_px(&self.viewport);
        let (down, pos) = self.pointer.poll(dt, kitten_px, &self.viewport);
        match self.click.update(down, pos, &self.kitten, &self.viewport) {
            Some(ClickTarget::Kitten) => {
                log::debug!("Kitten poked");
                self.kitten.poke();
            }
            Some(ClickTarget::Floor(at)) => self.throw(at),
            None => {}
        }
        self.system_timers.end(SystemPhase::Input);

        // --- Physics ---
        self.system_timers.begin();
        self.run_fixed_update(dt);
        self.system_timers.end(SystemPhase::Physics);

        // --- Treat expiry/removal ---
        self.system_timers.begin();
        self.dispenser.run_timers(dt);
        self.system_timers.end(SystemPhase::TreatTimers);

        // --- Kitten, on its own cadence ---
        self.system_timers.begin();
        self.kitten_accumulator += dt;
        while self.kitten_accumulator >= kitten::CADENCE {
            self.kitten
                .update(kitten::CADENCE, &mut self.dispenser, &self.viewport);
            self.kitten_accumulator -= kitten::CADENCE;
        }
        self.system_timers.end(SystemPhase::Pursuit);

        // --- Notifications ---
        self.system_timers.begin();
        self.record_events();
        self.system_timers.end(SystemPhase::Events);

        if self.frame_stats.record_frame(dt) {
            self.log_stats();
        }
    }

    fn throw(&mut self, at: Vec2) {
        if let Some(under) = self.dispenser.nearby_treat(at, NEARBY_RADIUS) {
            log::debug!("Throwing onto treat {:?}", under.id);
            self.pile_throws += 1;
        }
        self.dispenser.spawn(at);
    }

    fn record_events(&mut self) {
        for event in self.dispenser.drain_events() {
            if let TreatEvent::Eaten { id } = event {
                log::debug!("Treat {:?} consumed", id);
            }
            self.tally.record(&event);
        }
    }

    /// Drop every treat and its pending timers, booking the removals.
    fn shutdown(&mut self) {
        self.dispenser.clear();
        self.record_events();
    }

    /// Run fixed-timestep physics ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= TICK_RATE {
            self.dispenser.tick(1.0);
            self.accumulator -= TICK_RATE;
            self.tick_count += 1;
        }
    }

    fn log_stats(&self) {
        let pos = self.kitten.position();
        log::info!(
            "frames: {} | ticks: {} | treats: {} | kitten: {:?} at ({:.0}%, {:.0}%) says {:?} | {:?}",
            self.frame_stats.frame_count,
            self.tick_count,
            self.dispenser.len(),
            self.kitten.behavior(),
            pos.x,
            pos.y,
            self.kitten.speech().text().unwrap_or("-"),
            self.tally,
        );
        log::debug!(
            "phase cost: {} | total {:.1}us",
            self.system_timers.summary(),
            self.system_timers.total_us()
        );
    }
}

/// Entry point: build the scene and run it for the requested time.
pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    args.validate()?;
    let viewport = Viewport::new(args.width, args.height)?;
    let mut app = App::new(viewport, &args);
    log::info!(
        "Viewport {}x{}, running {:.1}s at {:.0} fps",
        viewport.width(),
        viewport.height(),
        args.seconds,
        args.fps
    );

    let mut elapsed = 0.0;
    while elapsed < args.seconds {
        let dt = app.next_frame_dt(args.fps);
        app.frame(dt);
        elapsed += dt;
        if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(dt));
        }
    }

    app.shutdown();
    log::info!(
        "Done after {:.1}s simulated ({:.2}s wall): {} clicks, {} onto a pile | {:?}",
        elapsed,
        app.frame_stats.wall_start.elapsed().as_secs_f64(),
        app.click.clicks,
        app.pile_throws,
        app.tally
    );
    Ok(())
}
