//! Оценщики рук и счёта карт.
//!
//! Чистые функции над `domain`-типами:
//!   - `blackjack` — тоталы с редукцией тузов, натуралы, исход руки;
//!   - `baccarat` — тоталы по модулю 10, правила третьей карты;
//!   - `counter` — подсчёт карт Hi-Lo (running/true count).

pub mod baccarat;
pub mod blackjack;
pub mod counter;

pub use blackjack::HandOutcome;
pub use counter::CardCounter;
