//! Server and room configuration loaded from environment variables

use std::str::FromStr;
use std::time::Duration;

/// Per-room limits enforced by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLimits {
    pub max_participants: usize,
    pub max_name_chars: usize,
    pub max_text_chars: usize,
}

impl Default for RoomLimits {
    fn default() -> Self {
        Self {
            max_participants: 12,
            max_name_chars: 24,
            max_text_chars: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Port the HTTP/WebSocket server listens on
    pub port: u16,
    /// Directory served for everything that isn't an API or WebSocket route
    pub static_dir: String,
    pub limits: RoomLimits,
    /// Rooms without any activity for this long are torn down
    pub room_idle_ttl: Duration,
    /// How often the idle-room reaper runs
    pub reaper_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            port: 3420,
            static_dir: "static".to_string(),
            limits: RoomLimits::default(),
            room_idle_ttl: Duration::from_secs(3600),
            reaper_interval: Duration::from_secs(60),
        }
    }
}

impl GameConfig {
    /// Load config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.static_dir);

        let config = Self {
            port: env_or("PORT", defaults.port),
            static_dir,
            limits: RoomLimits {
                max_participants: env_or("MAX_PARTICIPANTS", defaults.limits.max_participants)
                    .max(1),
                max_name_chars: env_or("MAX_NAME_CHARS", defaults.limits.max_name_chars).max(1),
                max_text_chars: env_or("MAX_TEXT_CHARS", defaults.limits.max_text_chars).max(1),
            },
            room_idle_ttl: Duration::from_secs(env_or(
                "ROOM_IDLE_TTL_SECS",
                defaults.room_idle_ttl.as_secs(),
            )),
            reaper_interval: Duration::from_secs(
                env_or("REAPER_INTERVAL_SECS", defaults.reaper_interval.as_secs()).max(1),
            ),
        };

        tracing::info!(
            "Config: port={}, max_participants={}, room_idle_ttl={:?}",
            config.port,
            config.limits.max_participants,
            config.room_idle_ttl
        );

        config
    }
}

/// Parse an env var, warning and using `default` when it's set but invalid
fn env_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid value {:?} for {}, using {:?}", raw, key, default);
                default
            }
        },
        Err(_) => default,
    }
}
