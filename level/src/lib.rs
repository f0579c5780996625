//! Everything to do with the level once it is out of the WAD: the resolved
//! map graph, the BSP tree accessors, and the player's pose.

pub use log;

mod error;
mod map_data;
mod map_defs;
mod node;
mod player;
#[cfg(any(test, feature = "test-maps"))]
pub mod test_maps;

pub use error::LevelError;
pub use map_data::{MapData, MapExtents};
pub use map_defs::*;
pub use node::{LEFT, RIGHT};
pub use player::{MovementCommand, Player, VIEWHEIGHT};
