use super::{AppState, Room, RoomHandle};
use crate::error::RoomError;
use crate::types::*;
use rand::Rng;
use std::time::Duration;

impl AppState {
    /// Create a room with `creator` as its first leader
    pub async fn create_room(&self, creator: &str) -> Result<(RoomHandle, ParticipantId), RoomError> {
        let mut rooms = self.rooms.write().await;

        // Generate a code not already in use (retry on collision)
        let code = loop {
            let code = rand::rng().random_range(0..=MAX_ROOM_CODE);
            if !rooms.contains_key(&code) {
                break code;
            }
        };

        let room = Room::new(code, creator, self.config.limits)?;
        let creator = room.leader().clone();
        let handle = RoomHandle::new(room);
        rooms.insert(code, handle.clone());

        tracing::info!("Room {} created by {} ({} active)", code, creator, rooms.len());
        Ok((handle, creator))
    }

    /// Join an existing room that is still in its lobby
    pub async fn join_room(
        &self,
        code: RoomCode,
        nick: &str,
    ) -> Result<(RoomHandle, ParticipantId), RoomError> {
        let handle = self
            .get_room(code)
            .await
            .ok_or(RoomError::RoomNotFound(code))?;
        let id = handle.apply(|room| room.add_participant(nick)).await?;
        Ok((handle, id))
    }

    pub async fn get_room(&self, code: RoomCode) -> Option<RoomHandle> {
        self.rooms.read().await.get(&code).cloned()
    }

    /// Tear a room down. Returns whether it existed.
    pub async fn close_room(&self, code: RoomCode) -> bool {
        let removed = self.rooms.write().await.remove(&code).is_some();
        if removed {
            tracing::info!("Room {} closed", code);
        }
        removed
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Drop `participant`'s connection from its room.
    ///
    /// The participant is removed from the game, and everyone left gets a
    /// fresh view. The room is torn down once its last connection is gone.
    pub async fn leave_room(&self, handle: &RoomHandle, participant: &str) {
        if let Err(e) = handle
            .apply(|room| room.remove_participant(participant))
            .await
        {
            tracing::debug!("Room {}: {} already gone: {}", handle.code(), participant, e);
        }

        if handle.disconnect() == 0 {
            self.close_room_handle(handle).await;
        }
    }

    /// Remove `handle`'s room from the registry, unless its code has since
    /// been taken by another room. Returns whether it was removed.
    async fn close_room_handle(&self, handle: &RoomHandle) -> bool {
        let mut rooms = self.rooms.write().await;
        let registered = rooms
            .get(&handle.code())
            .is_some_and(|current| current.same_room(handle));
        if registered {
            rooms.remove(&handle.code());
            tracing::info!("Room {} closed", handle.code());
        }
        registered
    }

    /// Remove every room without live connections that has been idle for
    /// longer than `ttl`, returning their codes
    pub async fn reap_idle_rooms(&self, ttl: Duration) -> Vec<RoomCode> {
        let handles: Vec<RoomHandle> = self.rooms.read().await.values().cloned().collect();

        let mut stale = Vec::new();
        for handle in handles {
            if handle.connection_count() == 0 && handle.idle_for().await > ttl {
                stale.push(handle);
            }
        }

        let mut reaped = Vec::new();
        for handle in &stale {
            if self.close_room_handle(handle).await {
                reaped.push(handle.code());
            }
        }
        if !reaped.is_empty() {
            tracing::info!("Reaped {} idle room(s): {:?}", reaped.len(), reaped);
        }

        reaped
    }
}
