//! Error types

use thiserror::Error;

/// Fixed-point math contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("isqrt() is only valid for non-negative numbers (got {0})")]
    NegativeSqrt(i128),
}

/// Problems loading or validating [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena must be at least 1x1 units (got {width}x{height})")]
    EmptyArena { width: i64, height: i64 },

    #[error("arena {width}x{height} exceeds the {max} unit limit")]
    ArenaTooLarge { width: i64, height: i64, max: i64 },

    #[error("tick rate must be non-zero")]
    ZeroTickRate,

    #[error("player start ({x}, {y}) is outside the {width}x{height} arena")]
    StartOutsideArena {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}
