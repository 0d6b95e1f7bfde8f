use serde::{Deserialize, Serialize};

/// Hit points. `current` may drop below zero; anything at or below zero is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTracker {
    current: i32,
    max: i32,
}

impl HealthTracker {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn with_current(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Subtract `amount`. Hit points may go negative and saturate at `i32::MIN`.
    pub fn damage(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}
