pub mod common;
pub mod entities;
pub mod score;
pub mod status;

pub use common::{InvalidPlayerId, PlayerId, Position};
pub use entities::{Player, Target};
pub use score::Score;
pub use status::GameStatus;
