//! RngSeed — криптографически доменный seed для RNG казино.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || game || round_index)
//!   - создавать DeterministicRng из seed
//!
//! Это фундамент честного воспроизводимого раунда: по базовому seed и
//! номеру раунда любая раздача/бросок/спин восстанавливается бит в бит.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::GameKind;
use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Создать seed из 32 байт.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с включением контекста:
    ///   - игра (blackjack/baccarat/craps/roulette/slots)
    ///   - round_index (номер раунда на этом столе)
    ///
    /// Пример вызова:
    ///     let round_seed = base_seed.derive(GameKind::Craps, round_id);
    pub fn derive(&self, game: GameKind, round_index: u64) -> Self {
        let mut hasher = Sha256::new();

        // Доменный префикс
        hasher.update(b"CASINO_ENGINE_RNG_V1");

        // Старый seed
        hasher.update(self.bytes);

        // Игра
        hasher.update(game.to_string().as_bytes());

        // Номер раунда
        hasher.update(round_index.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
