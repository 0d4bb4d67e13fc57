//! Treat-tossing toy: click to throw treats, a floating kitten chases the
//! ones that land and eats them.
//!
//! [`dispenser::TreatDispenser`] owns the treats and their physics,
//! [`kitten::Kitten`] runs the pursuit state machine on its own cadence, and
//! [`app`] drives both from a headless cooperative loop.

pub mod app;
pub mod cli;
pub mod click;
pub mod debug;
pub mod dispenser;
pub mod ecs;
pub mod events;
pub mod kitten;
pub mod timers;
pub mod util;
pub mod viewport;
