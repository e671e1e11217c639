//! Floor layouts: room types, the floor map, and generation.

pub mod generation;
pub mod types;

pub use generation::{generate_floor_map, is_boss_floor};
pub use types::{FloorMap, FloorRoom, RoomType};
