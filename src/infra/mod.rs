//! Инфраструктурный слой вокруг движков:
//! - RNG-реализации (системная и детерминированная);
//! - криптографический вывод seed'ов для реплея;
//! - генерация ID.

pub mod ids;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use rng::*;
pub use rng_seed::RngSeed;
