use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Шуз — мультиколодный источник карт. В домене это просто упорядоченный
/// список; перемешивание делает engine (через RNG из infra), НЕ здесь.
///
/// Инвариант: карты только снимаются с верха, порядок после shuffle
/// не меняется. Решение о пересборке шуза движок принимает строго между
/// раундами.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    pub cards: Vec<Card>,
    pub num_decks: u8,
}

impl Shoe {
    /// Свежий шуз из `num_decks` стандартных 52-карточных колод,
    /// НЕ перемешанный. Каждая пара ранг/масть встречается ровно
    /// `num_decks` раз.
    pub fn new(num_decks: u8) -> Self {
        let mut cards = Vec::with_capacity(num_decks as usize * 52);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards, num_decks }
    }

    /// Пустой шуз. Столы стартуют с ним, чтобы первый deal прошёл через
    /// обычный путь пересборки/перемешивания.
    pub fn empty(num_decks: u8) -> Self {
        Shoe {
            cards: Vec::new(),
            num_decks,
        }
    }

    /// Сколько карт осталось.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Полная ёмкость шуза (num_decks × 52).
    pub fn capacity(&self) -> usize {
        self.num_decks as usize * 52
    }

    /// Снять одну карту с верха; `face_up` задаёт, как она кладётся на стол.
    pub fn draw(&mut self, face_up: bool) -> Option<Card> {
        self.cards.pop().map(|mut card| {
            card.face_up = face_up;
            card
        })
    }
}
