use glam::Vec2;

use crate::ecs::components::TreatId;

/// Treat lifecycle notifications, drained by the shell once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreatEvent {
    Spawned { id: TreatId, pos: Vec2 },
    /// First floor contact.
    Landed { id: TreatId },
    Eaten { id: TreatId },
    /// Timed out without being eaten.
    Expired { id: TreatId },
    Removed { id: TreatId },
}

/// Running counters fed by [`TreatEvent`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreatTally {
    pub thrown: u32,
    pub landed: u32,
    pub eaten: u32,
    pub expired: u32,
    pub on_screen: u32,
}

impl TreatTally {
    pub fn record(&mut self, event: &TreatEvent) {
        match event {
            TreatEvent::Spawned { .. } => {
                self.thrown += 1;
                self.on_screen += 1;
            }
            TreatEvent::Landed { .. } => self.landed += 1,
            TreatEvent::Eaten { .. } => self.eaten += 1,
            TreatEvent::Expired { .. } => self.expired += 1,
            TreatEvent::Removed { .. } => self.on_screen = self.on_screen.saturating_sub(1),
        }
    }
}
