use serde::{Deserialize, Serialize};

use crate::engine::casino::CasinoError;
use crate::engine::errors::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
///
/// Движковые ошибки схлопываются в строку: клиенту важен текст и факт
/// отказа, точные типы остаются внутренним делом движка.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON команды).
    BadRequest(String),

    /// Ошибка движка: ставка/действие отклонены. Состояние не изменилось.
    EngineError(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError(err.to_string())
    }
}

impl From<CasinoError> for ApiError {
    fn from(err: CasinoError) -> Self {
        match err {
            CasinoError::Engine(e) => e.into(),
        }
    }
}
