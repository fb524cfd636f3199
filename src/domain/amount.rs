use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Денежная сумма в **центах**. Обёртка над u64, чтобы не путать с обычными числами.
///
/// Все выплаты с дробными множителями (2.5×, 0.95:1, true odds 6/5 и т.п.)
/// считаются через [`Amount::mul_ratio`] с округлением half-up до цента —
/// дробные центы нигде не накапливаются.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Сумма из центов.
    pub fn new(cents: u64) -> Self {
        Amount(cents)
    }

    /// Сумма из целых долларов.
    pub fn from_dollars(dollars: u64) -> Self {
        Amount(dollars.saturating_mul(100))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Умножение на целый коэффициент (например, выплата 2× или 36×).
    pub fn times(self, factor: u64) -> Amount {
        Amount(self.0.saturating_mul(factor))
    }

    /// Умножение на рациональный коэффициент `num/den` с округлением
    /// half-up до цента. Так считаются все дробные выплаты:
    /// 2.5× = (5, 2), 0.95× = (19, 20), 1.2× = (6, 5), 5/6× = (5, 6).
    pub fn mul_ratio(self, num: u64, den: u64) -> Amount {
        debug_assert!(den > 0, "mul_ratio: нулевой знаменатель");
        Amount((self.0.saturating_mul(num) + den / 2) / den)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl fmt::Display for Amount {
    /// Формат вида `$12.34`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
