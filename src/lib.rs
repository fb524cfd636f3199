//! casino-engine — движок разрешения ставок пяти игр казино:
//! блэкджек, баккара, крэпс, рулетка, слоты.
//!
//! Слои:
//! - `domain` — пассивная модель: карты, шуз, кости, деньги, леджер;
//! - `eval` — чистые оценщики рук и счёта карт;
//! - `engine` — машины состояний раундов, общий `RandomSource` и
//!   `Casino` поверх пяти столов;
//! - `infra` — реализации RNG, вывод seed'ов, генерация ID;
//! - `api` — сериализуемая внешняя поверхность (команды, DTO, ошибки).
//!
//! Презентация сюда не входит: движок разрешает раунд синхронно и
//! отдаёт лог событий, который слой отображения воспроизводит со своим
//! таймингом. Баланс живёт во внешнем `Ledger`, движки никогда не
//! держат свою копию.

pub mod infra;
pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
