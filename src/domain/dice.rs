use serde::{Deserialize, Serialize};

/// Результат броска двух костей (каждая 1..=6).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    /// Сумма костей (2..=12).
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }
}

impl core::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}+{}={}", self.die1, self.die2, self.total())
    }
}
