use instant::Instant;

/// Which phase of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Input = 0,
    Physics = 1,
    TreatTimers = 2,
    Pursuit = 3,
    Events = 4,
}

impl SystemPhase {
    pub const ALL: [SystemPhase; 5] = [
        Self::Input,
        Self::Physics,
        Self::TreatTimers,
        Self::Pursuit,
        Self::Events,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Physics => "Physics",
            Self::TreatTimers => "Timers",
            Self::Pursuit => "Pursuit",
            Self::Events => "Events",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 5],
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 5],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line breakdown, e.g. "Input 1.2us | Physics 3.4us | ...".
    pub fn summary(&self) -> String {
        SystemPhase::ALL
            .iter()
            .map(|p| format!("{} {:.1}us", p.label(), self.durations_us[*p as usize]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for SystemTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_moves_toward_samples() {
        let mut timers = SystemTimers::new();
        timers.record(SystemPhase::Physics, 100.0);
        assert!((timers.durations_us[1] - 10.0).abs() < 1e-9);
        timers.record(SystemPhase::Physics, 100.0);
        assert!((timers.durations_us[1] - 19.0).abs() < 1e-9);
        assert!((timers.total_us() - 19.0).abs() < 1e-9);
    }

    #[test]
    fn summary_lists_every_phase() {
        let timers = SystemTimers::new();
        let line = timers.summary();
        for phase in SystemPhase::ALL {
            assert!(line.contains(phase.label()));
        }
    }
}
