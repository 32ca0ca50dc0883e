//! Fixed-step simulation tick
//!
//! The step order is part of the game's behaviour: spawning, pruning, baddie
//! AI, sort, collisions, removal, forces, integration, score.

use super::collision::{find_bullet, intersects, sort_bullets};
use super::entity::Entity;
use super::fixed::{dist_sq, floor_div};
use super::spawn::make_random_baddie;
use super::state::World;

/// Advance the world by exactly one tick
pub fn advance(world: &mut World) {
    world.frame += 1;

    admit_baddie(world);

    // Destroy used or out-of-range bullets
    let (width, height) = (world.width, world.height);
    world
        .bullets
        .retain(|b| b.is_alive() && b.in_bounds(width, height));

    // Baddie AI (ageing, shooting)
    for baddie in &mut world.baddies {
        baddie.advance(&world.players, &mut world.rng, &mut world.bullets);
    }

    sort_bullets(&mut world.bullets);
    resolve_collisions(world);
    remove_dead(world);
    apply_pull(world);

    for bullet in &mut world.bullets {
        bullet.integrate();
    }

    world.top_score = world.top_score.max(world.score);
}

/// Spawn one random baddie if the score budget and headcount allow it
fn admit_baddie(world: &mut World) {
    let max_baddies = world.max_baddies();
    let count = world.count_baddies();
    if max_baddies <= count || world.baddies.len() >= world.max_active_baddies() {
        return;
    }

    let Some(baddie) = make_random_baddie(&mut world.rng, world.width, world.height, &world.players)
    else {
        return;
    };

    if count + baddie.score <= max_baddies {
        log::debug!(
            "Frame {}: spawned baddie sign={} score={} at ({}, {})",
            world.frame,
            baddie.sign,
            baddie.score,
            baddie.body.x,
            baddie.body.y
        );
        world.baddies.push(baddie);
    }
}

/// Mark everything involved in a collision as dead
fn resolve_collisions(world: &mut World) {
    for player in &mut world.players {
        if let Some(i) = find_bullet(&world.bullets, &player.body) {
            player.kill();
            world.bullets[i].kill();
        }
    }

    for baddie in &mut world.baddies {
        if baddie.is_spawning() {
            continue;
        }

        if let Some(i) = find_bullet(&world.bullets, &baddie.body) {
            baddie.kill();
            world.bullets[i].kill();
        } else if let Some(player) = world
            .players
            .iter_mut()
            .find(|p| intersects(&baddie.body, &p.body))
        {
            baddie.kill();
            player.kill();
        }
    }
}

/// Park dead players for revival and cash in dead baddies
fn remove_dead(world: &mut World) {
    if world.players.iter().any(|p| !p.is_alive()) {
        let (alive, dead): (Vec<_>, Vec<_>) =
            world.players.drain(..).partition(|p| p.is_alive());
        for player in &dead {
            log::debug!("Frame {}: player {} down", world.frame, player.id);
        }
        world.players = alive;
        world.downed.extend(dead);
    }

    let mut gained = 0;
    world.baddies.retain(|b| {
        if b.is_alive() {
            true
        } else {
            gained += b.score;
            false
        }
    });
    world.score += gained;
}

/// Accelerate every bullet toward (or away from) every player
///
/// The acceleration is `offset * pull / distance²`, which works out to an
/// inverse-distance falloff. Gameplay is tuned around this exact formula.
fn apply_pull(world: &mut World) {
    for player in &world.players {
        for bullet in &mut world.bullets {
            let distance_sq = dist_sq(bullet.body.x, bullet.body.y, player.body.x, player.body.y);
            if distance_sq == 0 {
                continue;
            }

            let pull = player.pull as i128 * bullet.pull as i128;
            let ax = floor_div((bullet.body.x - player.body.x) as i128 * pull, distance_sq);
            let ay = floor_div((bullet.body.y - player.body.y) as i128 * pull, distance_sq);

            bullet.body.dx += ax as i64;
            bullet.body.dy += ay as i64;
        }
    }
}
