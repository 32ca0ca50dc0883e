//! Repel - an attract/repel bullet-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic fixed-point simulation (entities, collisions, tick pipeline)
//! - `session`: Tick driver (input events, pause, player death and revival)
//! - `snapshot`: Read-only post-tick views for an external renderer
//! - `settings`: JSON configuration
//! - `error`: Error types

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{MathError, SettingsError};
pub use session::{InputEvent, Session, StepOutcome};
pub use settings::Settings;
pub use sim::World;
pub use snapshot::WorldSnapshot;

/// Game configuration constants
///
/// Every spatial value is in fixed-point units (`units << PRECISION`).
pub mod consts {
    use crate::sim::fixed::{Fixed, fixed};

    /// Fractional bits of every fixed-point value
    pub const PRECISION: u32 = 24;

    /// Player defaults
    pub const PLAYER_RADIUS: Fixed = fixed(16);
    pub const PLAYER_PULL: Fixed = fixed(12);

    /// Bullet defaults
    pub const BULLET_RADIUS: Fixed = fixed(2);
    pub const BULLET_PULL: Fixed = fixed(1);
    /// Largest radius of anything stored in the bullet index
    pub const MAX_BULLET_RADIUS: Fixed = BULLET_RADIUS;
    /// Past positions kept per bullet for trail rendering
    pub const TRAIL_SIZE: usize = 5;

    /// Baddie defaults
    pub const BADDIE_RADIUS: Fixed = fixed(24);
    pub const BADDIE_SHOT_SPEED: Fixed = fixed(1);
    /// Grace period of the shooting variant (ticks)
    pub const SHOOTY_SPAWN_TIME: u32 = 30;
    /// Shot speed of the shooting variant before the multiplier
    pub const SHOOTY_SHOT_SPEED: Fixed = fixed(3);
    /// Shooting cadence, relative to the baddie's own age
    pub const SHOT_INTERVAL: u32 = 60;

    /// Spawn admission
    pub const SCORE_PER_BADDIE: u64 = 5;
    pub const MAX_ACTIVE_BADDIES: usize = 8;
    /// New baddies never land closer than this to a live player
    pub const SPAWN_EXCLUSION_RADIUS: Fixed = fixed(100);
    /// Rejection-sampling cap before a spawn attempt is abandoned
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 256;

    /// Ticks a downed player waits before being revived
    pub const REVIVE_DELAY_TICKS: u32 = 25;
    /// Default driver clock
    pub const TICK_RATE_HZ: u32 = 60;

    /// Default arena size (application units)
    pub const ARENA_WIDTH: i64 = 640;
    pub const ARENA_HEIGHT: i64 = 640;
    /// Largest arena side whose fixed-point value leaves headroom for
    /// positions just outside it
    pub const MAX_ARENA_UNITS: i64 = i64::MAX >> (PRECISION + 2);
}
