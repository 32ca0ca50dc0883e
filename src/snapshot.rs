//! Read-only world views for rendering
//!
//! Built once per tick after [`World::advance`] so a renderer never touches
//! live simulation state. Dead entities still waiting to be pruned are left
//! out.

use serde::{Deserialize, Serialize};

use crate::sim::{Entity, Fixed, World};

/// Direction a pull value pushes same-signed bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullSign {
    Positive,
    Negative,
}

impl PullSign {
    pub fn of(pull: Fixed) -> Self {
        if pull > 0 {
            PullSign::Positive
        } else {
            PullSign::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u32,
    pub x: Fixed,
    pub y: Fixed,
    pub radius: Fixed,
    pub pull: PullSign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletView {
    pub x: Fixed,
    pub y: Fixed,
    pub radius: Fixed,
    pub pull: PullSign,
    /// Oldest first; the segment after the last entry ends at `(x, y)`
    pub trail: Vec<(Fixed, Fixed)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaddieView {
    pub x: Fixed,
    pub y: Fixed,
    pub radius: Fixed,
    pub age: u32,
    pub spawn_time: u32,
    pub sign: i8,
    pub score: u64,
}

impl BaddieView {
    /// Fade-in opacity (0-255) during the spawn grace period
    pub fn fade_opacity(&self) -> u8 {
        if self.age < self.spawn_time {
            (255 * self.age / self.spawn_time) as u8
        } else {
            255
        }
    }
}

/// Everything a renderer needs after one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub width: Fixed,
    pub height: Fixed,
    pub frame: u64,
    pub score: u64,
    pub top_score: u64,
    pub players: Vec<PlayerView>,
    pub bullets: Vec<BulletView>,
    pub baddies: Vec<BaddieView>,
}

impl World {
    /// Copy out the renderable state
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.width,
            height: self.height,
            frame: self.frame,
            score: self.score,
            top_score: self.top_score,
            players: self
                .players
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| PlayerView {
                    id: p.id,
                    x: p.body.x,
                    y: p.body.y,
                    radius: p.body.radius,
                    pull: PullSign::of(p.pull),
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .filter(|b| b.is_alive())
                .map(|b| BulletView {
                    x: b.body.x,
                    y: b.body.y,
                    radius: b.body.radius,
                    pull: PullSign::of(b.pull),
                    trail: b.trail.iter().copied().collect(),
                })
                .collect(),
            baddies: self
                .baddies
                .iter()
                .filter(|b| b.is_alive())
                .map(|b| BaddieView {
                    x: b.body.x,
                    y: b.body.y,
                    radius: b.body.radius,
                    age: b.age,
                    spawn_time: b.spawn_time,
                    sign: b.sign,
                    score: b.score,
                })
                .collect(),
        }
    }
}
