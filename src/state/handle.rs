use super::room::Room;
use crate::error::RoomError;
use crate::protocol::RoomView;
use crate::types::RoomCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, Mutex};

/// Snapshots buffered per subscriber before it starts lagging
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Shared handle to one room.
///
/// All mutations go through [`RoomHandle::apply`], which serializes them on
/// the room's lock and fans a snapshot of the result out to every connection.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    room: Arc<Mutex<Room>>,
    /// Snapshot after every successful mutation; each connection projects it
    /// for its own participant
    updates: broadcast::Sender<Arc<Room>>,
    connections: Arc<AtomicUsize>,
    last_activity: Arc<Mutex<Instant>>,
}

impl RoomHandle {
    pub fn new(room: Room) -> Self {
        let (tx, _rx) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            code: room.code(),
            room: Arc::new(Mutex::new(room)),
            updates: tx,
            connections: Arc::new(AtomicUsize::new(0)),
            last_activity: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn code(&self) -> RoomCode {
        self.code
    }

    /// Whether both handles point at the same room, not just the same code
    pub fn same_room(&self, other: &RoomHandle) -> bool {
        Arc::ptr_eq(&self.room, &other.room)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Room>> {
        self.updates.subscribe()
    }

    /// Run `op` against the room. On success the new state is published to
    /// every subscriber; on error nothing is published.
    pub async fn apply<T>(
        &self,
        op: impl FnOnce(&mut Room) -> Result<T, RoomError>,
    ) -> Result<T, RoomError> {
        let mut room = self.room.lock().await;
        let result = op(&mut *room)?;
        // Publish while still holding the lock so snapshots go out in order
        self.send_snapshot(&room);
        drop(room);

        self.touch().await;
        Ok(result)
    }

    fn send_snapshot(&self, room: &Room) {
        // No subscribers is fine; lagging subscribers catch up on the next one
        let _ = self.updates.send(Arc::new(room.clone()));
    }

    pub async fn snapshot(&self) -> Room {
        self.room.lock().await.clone()
    }

    pub async fn project_for(&self, viewer: &str) -> RoomView {
        self.room.lock().await.project(viewer)
    }

    /// Register a live connection, returning the new count
    pub fn connect(&self) -> usize {
        self.connections.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Unregister a live connection, returning how many remain
    pub fn disconnect(&self) -> usize {
        let previous = self
            .connections
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(1))
            })
            .unwrap_or(0);
        previous.saturating_sub(1)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub async fn touch(&self) {
        *self.last_activity.lock().await = Instant::now();
    }

    pub async fn idle_for(&self) -> Duration {
        self.last_activity.lock().await.elapsed()
    }
}
