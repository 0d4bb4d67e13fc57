/// Shown when the kitten is clicked.
pub const GREETING: &str = "Meow! Throw me a treat!";
/// Shown when the kitten spots a treat worth chasing.
pub const EXCITED: &str = "Ooh, a treat!";
/// One of these is shown after eating.
pub const SATISFIED: &[&str] = &[
    "Nom nom nom!",
    "Yummy!",
    "Purrrr...",
    "More please!",
    "Best. Treat. Ever.",
];

/// Seconds each kind of line stays up.
pub const GREETING_SECS: f64 = 2.0;
pub const EXCITED_SECS: f64 = 1.5;
pub const SATISFIED_SECS: f64 = 3.0;

/// The kitten's speech bubble. Holds at most one line; a new line always
/// replaces the current one and restarts its timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speech {
    text: &'static str,
    remaining: f64,
}

impl Speech {
    pub fn new() -> Self {
        Self {
            text: GREETING,
            remaining: 0.0,
        }
    }

    pub fn say(&mut self, text: &'static str, secs: f64) {
        self.text = text;
        self.remaining = secs;
    }

    pub fn tick(&mut self, dt: f64) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current line, if the bubble is showing.
    pub fn text(&self) -> Option<&'static str> {
        self.is_visible().then_some(self.text)
    }

    /// Back to the hidden default line.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Speech {
    fn default() -> Self {
        Self::new()
    }
}

pub fn random_satisfied(rng: &mut fastrand::Rng) -> &'static str {
    SATISFIED[rng.usize(0..SATISFIED.len())]
}
