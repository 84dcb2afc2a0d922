pub mod cozy;
pub mod render;

pub use cozy::{Game, GameResult, Termination};
pub use render::render;
