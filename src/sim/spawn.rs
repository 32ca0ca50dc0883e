//! Random baddie synthesis and placement

use rand::Rng;

use super::entity::{Baddie, Player};
use super::fixed::{Fixed, dist_sq};
use crate::consts::{MAX_PLACEMENT_ATTEMPTS, SPAWN_EXCLUSION_RADIUS};

/// True if `(x, y)` is inside the exclusion zone of any player
pub fn is_next_to_player(players: &[Player], x: Fixed, y: Fixed) -> bool {
    let limit = SPAWN_EXCLUSION_RADIUS as i128;
    players
        .iter()
        .any(|p| dist_sq(x, y, p.body.x, p.body.y) < limit * limit)
}

/// Rejection-sample a point in `[0, width) x [0, height)` away from every
/// player. `None` after [`MAX_PLACEMENT_ATTEMPTS`] rejected draws, or
/// straight away if the arena has no area.
pub fn place_away_from_players<R: Rng + ?Sized>(
    rng: &mut R,
    width: Fixed,
    height: Fixed,
    players: &[Player],
) -> Option<(Fixed, Fixed)> {
    if width <= 0 || height <= 0 {
        return None;
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = rng.random_range(0..=width - 1);
        let y = rng.random_range(0..=height - 1);
        if !is_next_to_player(players, x, y) {
            return Some((x, y));
        }
    }
    None
}

/// Roll a shooting baddie's variant and position
///
/// RNG draws happen in a fixed order (sign, speed multiplier, then x/y pairs
/// until a placement sticks) so seeded runs replay exactly.
pub fn make_random_baddie<R: Rng + ?Sized>(
    rng: &mut R,
    width: Fixed,
    height: Fixed,
    players: &[Player],
) -> Option<Baddie> {
    let sign: i8 = rng.random_range(-1..=1);
    let speed_multiplier: i64 = rng.random_range(1..=2);

    let Some((x, y)) = place_away_from_players(rng, width, height, players) else {
        log::debug!(
            "No spawn point found after {} attempts, skipping spawn",
            MAX_PLACEMENT_ATTEMPTS
        );
        return None;
    };

    Some(Baddie::shooty(x, y, sign, speed_multiplier))
}
