mod session_rng;
pub mod tictactoe;

pub use session_rng::{RandomSource, SessionRng};

#[cfg(test)]
pub(crate) use session_rng::ScriptedRng;
