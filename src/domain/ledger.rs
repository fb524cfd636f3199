use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::amount::Amount;

/// Отказ в списании: ставка превышает доступный баланс.
/// Всегда восстановимая ошибка, состояние леджера не меняется.
#[derive(Clone, Copy, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("недостаточно средств: требуется {required}, доступно {available}")]
pub struct InsufficientFunds {
    pub required: Amount,
    pub available: Amount,
}

/// Леджер — единственное разделяемое изменяемое состояние между движками.
///
/// Баланс мутируется только через `debit`/`credit`; движки получают
/// `&mut Ledger` на время вызова и никогда не держат свою копию баланса.
/// Суммы — целые центы, так что каждое изменение точно до цента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    balance: Amount,
}

impl Ledger {
    pub fn new(initial: Amount) -> Self {
        Self { balance: initial }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Списать сумму. При нехватке средств — отказ без мутации.
    pub fn debit(&mut self, amount: Amount) -> Result<(), InsufficientFunds> {
        if amount > self.balance {
            return Err(InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Зачислить выплату.
    pub fn credit(&mut self, amount: Amount) {
        self.balance += amount;
    }
}
