//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-point integer math only
//! - Seeded RNG only, drawn in a fixed order
//! - Stable iteration order (spawn order, bullets sorted by x)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod fixed;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{find_bullet, intersects, sort_bullets};
pub use entity::{Baddie, BaddieKind, Body, Bullet, Entity, Player};
pub use fixed::{Fixed, checked_isqrt, fixed, isqrt, to_units};
pub use spawn::make_random_baddie;
pub use state::World;
pub use tick::advance;
