use crate::domain::card::{Card, Rank};

/// Стоимость ранга в баккаре: туз = 1, десятки и картинки = 0.
pub fn card_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 1,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0,
        r => r as u8,
    }
}

/// Тотал руки по модулю 10.
pub fn hand_total(cards: &[Card]) -> u8 {
    let sum: u32 = cards.iter().map(|c| card_value(c.rank) as u32).sum();
    (sum % 10) as u8
}

/// Натурал: ровно 2 карты с тоталом 8 или 9.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_total(cards) >= 8
}

/// Игрок берёт третью карту на тотале 0–5, стоит на 6–7.
pub fn player_draws_third(player_total: u8) -> bool {
    player_total <= 5
}

/// Правило третьей карты банкира.
///
/// `player_third` — стоимость третьей карты игрока, либо None, если игрок
/// стоял. Таблица (тотал банкира → когда берёт):
///   0–2 — всегда;
///   3   — третья карта игрока ≠ 8;
///   4   — третья карта игрока ∈ [2, 7];
///   5   — третья карта игрока ∈ [4, 7];
///   6   — третья карта игрока ∈ {6, 7};
///   7   — никогда.
/// Если игрок стоял — банкир берёт на тотале ≤ 5.
pub fn banker_draws_third(banker_total: u8, player_third: Option<u8>) -> bool {
    if banker_total <= 2 {
        return true;
    }
    let third = match player_third {
        None => return banker_total <= 5,
        Some(v) => v,
    };
    match banker_total {
        3 => third != 8,
        4 => (2..=7).contains(&third),
        5 => (4..=7).contains(&third),
        6 => third == 6 || third == 7,
        _ => false,
    }
}
