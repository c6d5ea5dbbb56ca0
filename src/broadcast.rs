use crate::state::AppState;
use std::sync::Arc;

/// Spawn a background task that tears down rooms nobody has touched for
/// longer than the configured idle TTL
pub fn spawn_room_reaper(state: Arc<AppState>) {
    let interval = state.config.reaper_interval;
    let ttl = state.config.room_idle_ttl;

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;

            let reaped = state.reap_idle_rooms(ttl).await;
            if !reaped.is_empty() {
                tracing::debug!(
                    "{} room(s) still active after reaping",
                    state.room_count().await
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reaper_removes_idle_rooms() {
        let config = GameConfig {
            room_idle_ttl: Duration::from_millis(10),
            reaper_interval: Duration::from_millis(10),
            ..GameConfig::default()
        };
        let state = Arc::new(AppState::new(config));
        state.create_room("Alice").await.unwrap();

        spawn_room_reaper(state.clone());
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(state.room_count().await, 0);
    }
}
