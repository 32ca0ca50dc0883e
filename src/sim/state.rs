//! World state
//!
//! Everything one tick reads or writes lives here, including the seeded RNG,
//! so a cloned world replays identically.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Baddie, Bullet, Player};
use super::fixed::Fixed;
use crate::consts::{MAX_ACTIVE_BADDIES, SCORE_PER_BADDIE};

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct World {
    /// Arena width (fixed-point)
    pub width: Fixed,
    /// Arena height (fixed-point)
    pub height: Fixed,
    /// Active players
    pub players: Vec<Player>,
    /// Dead players waiting for the driver to revive them
    pub downed: Vec<Player>,
    /// Live bullets (sorted by x during collision checks only)
    pub bullets: Vec<Bullet>,
    /// Live baddies, in spawn order
    pub baddies: Vec<Baddie>,
    pub score: u64,
    pub top_score: u64,
    /// Ticks advanced so far
    pub frame: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an empty arena with the given seed
    pub fn new(width: Fixed, height: Fixed, seed: u64) -> Self {
        Self {
            width,
            height,
            players: Vec::new(),
            downed: Vec::new(),
            bullets: Vec::new(),
            baddies: Vec::new(),
            score: 0,
            top_score: 0,
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Add a player at the given position, returning its id
    pub fn spawn_player(&mut self, x: Fixed, y: Fixed) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.players.push(Player::new(id, x, y));
        id
    }

    /// Score budget for live baddies
    pub fn max_baddies(&self) -> u64 {
        self.score / SCORE_PER_BADDIE + 1
    }

    /// Score-weighted count of live baddies
    pub fn count_baddies(&self) -> u64 {
        self.baddies.iter().map(|b| b.score).sum()
    }

    /// Cap on the number of baddies alive at once
    pub fn max_active_baddies(&self) -> usize {
        let by_score = (self.max_baddies() / 4 + 2) as usize;
        by_score.min(MAX_ACTIVE_BADDIES)
    }

    /// Look up a player whether active or downed
    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players
            .iter()
            .chain(self.downed.iter())
            .find(|p| p.id == id)
    }

    /// Mutable lookup of a player whether active or downed
    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .chain(self.downed.iter_mut())
            .find(|p| p.id == id)
    }

    /// Move a player to an absolute position (pointer tracking)
    pub fn set_player_position(&mut self, id: u32, x: Fixed, y: Fixed) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.body.x = x;
                player.body.y = y;
                true
            }
            None => false,
        }
    }

    /// Flip a player between attracting and repelling
    pub fn toggle_pull(&mut self, id: u32) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.toggle_pull();
                true
            }
            None => false,
        }
    }

    /// Return a downed player to the roster at its last position
    pub fn revive(&mut self, id: u32) -> bool {
        let Some(index) = self.downed.iter().position(|p| p.id == id) else {
            return false;
        };
        let mut player = self.downed.remove(index);
        player.body.alive = true;
        self.players.push(player);
        true
    }

    /// Remove every bullet and baddie
    pub fn clear_board(&mut self) {
        self.bullets.clear();
        self.baddies.clear();
    }

    /// Advance one tick; see [`super::tick::advance`]
    pub fn advance(&mut self) {
        super::tick::advance(self);
    }
}
