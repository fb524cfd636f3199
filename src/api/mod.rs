//! Внешний API движка казино.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние (ставка, раздача, бросок, спин);
//! - DTO (dto.rs) — удобные структуры для фронта + сборщики видов столов;
//! - ошибки (errors.rs) — то, что видит клиент.
//!
//! Всё сериализуемо через serde: команду можно принять как JSON,
//! ответ — отдать как JSON.

pub mod commands;
pub mod dto;
pub mod errors;

pub use commands::*;
pub use dto::*;
pub use errors::*;
