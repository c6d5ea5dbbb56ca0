mod handle;
mod player;
mod registry;
mod room;
mod round;
mod score;
mod submission;
mod view;
mod vote;

pub use handle::RoomHandle;
pub use room::Room;

use crate::config::GameConfig;
use crate::types::RoomCode;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state: the registry of active rooms.
///
/// Rooms are independent; each one serializes its own mutations behind its
/// `RoomHandle`, so the registry lock is only held to look rooms up.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<RoomCode, RoomHandle>>>,
    pub config: Arc<GameConfig>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
