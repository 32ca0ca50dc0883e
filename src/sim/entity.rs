//! Entity model
//!
//! Every kind shares a [`Body`] (position, velocity, radius, alive flag).
//! Behaviour differs per kind: players are steered from outside, bullets
//! only drift, and baddies age and shoot according to their [`BaddieKind`].

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision;
use super::fixed::{Fixed, dist_sq, floor_div, isqrt};
use crate::consts::*;

/// Geometry shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub x: Fixed,
    pub y: Fixed,
    pub dx: Fixed,
    pub dy: Fixed,
    pub radius: Fixed,
    pub alive: bool,
}

impl Body {
    pub fn new(x: Fixed, y: Fixed, radius: Fixed) -> Self {
        Self {
            x,
            y,
            dx: 0,
            dy: 0,
            radius,
            alive: true,
        }
    }
}

/// Capabilities common to players, bullets and baddies
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Ordering key for the bullet index; only `x` matters, `y` just keeps
    /// equal-`x` entries adjacent
    fn sort_key(&self) -> (Fixed, Fixed) {
        let body = self.body();
        (body.x, body.y)
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn kill(&mut self) {
        self.body_mut().alive = false;
    }

    fn intersects<E: Entity>(&self, other: &E) -> bool
    where
        Self: Sized,
    {
        collision::intersects(self.body(), other.body())
    }
}

/// A player-controlled attractor/repulsor
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    /// Bullets of the same sign are pushed away, opposite signs drawn in
    pub pull: Fixed,
}

impl Player {
    pub fn new(id: u32, x: Fixed, y: Fixed) -> Self {
        Self {
            id,
            body: Body::new(x, y, PLAYER_RADIUS),
            pull: PLAYER_PULL,
        }
    }

    pub fn toggle_pull(&mut self) {
        self.pull = -self.pull;
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A projectile fired by a baddie
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub pull: Fixed,
    /// Recent positions, oldest first
    pub trail: VecDeque<(Fixed, Fixed)>,
}

impl Bullet {
    pub fn new(x: Fixed, y: Fixed, dx: Fixed, dy: Fixed) -> Self {
        let mut body = Body::new(x, y, BULLET_RADIUS);
        body.dx = dx;
        body.dy = dy;
        Self {
            body,
            pull: BULLET_PULL,
            trail: VecDeque::with_capacity(TRAIL_SIZE + 1),
        }
    }

    /// Record current position to trail (call once per tick before moving)
    pub fn record_trail(&mut self) {
        self.trail.push_back((self.body.x, self.body.y));
        if self.trail.len() > TRAIL_SIZE {
            self.trail.pop_front();
        }
    }

    /// Record the trail, then apply velocity
    pub fn integrate(&mut self) {
        self.record_trail();
        self.body.x += self.body.dx;
        self.body.y += self.body.dy;
    }

    pub fn in_bounds(&self, width: Fixed, height: Fixed) -> bool {
        (0..=width).contains(&self.body.x) && (0..=height).contains(&self.body.y)
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Baddie behaviour variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaddieKind {
    /// Stationary target that only ages
    Inert,
    /// Turret that fires at a random player every [`SHOT_INTERVAL`] ticks
    Shooty,
}

/// A stationary enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Baddie {
    pub body: Body,
    pub kind: BaddieKind,
    /// Ticks since creation
    pub age: u32,
    /// Grace period before the baddie can shoot or be shot
    pub spawn_time: u32,
    /// Points awarded when it dies
    pub score: u64,
    /// Which bullet signs it fires: -1 repelled only, 1 attracted only, 0 both
    pub sign: i8,
    pub shot_speed: Fixed,
}

impl Baddie {
    /// Plain baddie with no grace period that never shoots
    pub fn new(x: Fixed, y: Fixed) -> Self {
        Self {
            body: Body::new(x, y, BADDIE_RADIUS),
            kind: BaddieKind::Inert,
            age: 0,
            spawn_time: 0,
            score: 1,
            sign: 0,
            shot_speed: BADDIE_SHOT_SPEED,
        }
    }

    /// Shooting variant; harder variants (both signs, faster shots) are
    /// worth more
    pub fn shooty(x: Fixed, y: Fixed, sign: i8, speed_multiplier: i64) -> Self {
        let score = (if sign == 0 { 2 } else { 1 }) * (if speed_multiplier != 1 { 2 } else { 1 });
        Self {
            kind: BaddieKind::Shooty,
            spawn_time: SHOOTY_SPAWN_TIME,
            score,
            sign,
            shot_speed: speed_multiplier * SHOOTY_SHOT_SPEED,
            ..Self::new(x, y)
        }
    }

    /// Still inside the grace period
    pub fn is_spawning(&self) -> bool {
        self.age < self.spawn_time
    }

    /// Per-tick behaviour: age, then act according to kind
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        players: &[Player],
        rng: &mut R,
        bullets: &mut Vec<Bullet>,
    ) {
        self.age += 1;

        match self.kind {
            BaddieKind::Inert => {}
            BaddieKind::Shooty => self.fire_at_random_player(players, rng, bullets),
        }
    }

    fn fire_at_random_player<R: Rng + ?Sized>(
        &self,
        players: &[Player],
        rng: &mut R,
        bullets: &mut Vec<Bullet>,
    ) {
        if self.is_spawning() || self.age % SHOT_INTERVAL != 0 {
            return;
        }
        let Some(target) = players.choose(rng) else {
            return;
        };
        let (tx, ty) = (target.body.x, target.body.y);

        if self.sign != -1 {
            bullets.extend(self.shoot_point(tx, ty, self.shot_speed));
        }
        if self.sign != 1 {
            if let Some(mut bullet) = self.shoot_point(tx, ty, self.shot_speed) {
                bullet.pull = -bullet.pull;
                bullets.push(bullet);
            }
        }
    }

    /// Bullet leaving along `(dx, dy)` with that velocity, spawned with its
    /// edge just past the shooter's edge. `None` for a zero vector.
    pub fn shoot_direction(&self, dx: Fixed, dy: Fixed) -> Option<Bullet> {
        let speed = isqrt(dist_sq(dx, dy, 0, 0));
        if speed == 0 {
            return None;
        }

        let distance = (self.body.radius + BULLET_RADIUS) as i128;
        let x_offset = floor_div(distance * dx as i128, speed) as Fixed + dx.signum();
        let y_offset = floor_div(distance * dy as i128, speed) as Fixed + dy.signum();

        Some(Bullet::new(
            self.body.x + x_offset,
            self.body.y + y_offset,
            dx,
            dy,
        ))
    }

    /// Bullet aimed at an absolute point at `speed`. `None` if the point is
    /// the shooter's own centre.
    pub fn shoot_point(&self, x: Fixed, y: Fixed, speed: Fixed) -> Option<Bullet> {
        let distance = isqrt(dist_sq(x, y, self.body.x, self.body.y));
        if distance == 0 {
            return None;
        }

        let dx = floor_div((x - self.body.x) as i128 * speed as i128, distance) as Fixed;
        let dy = floor_div((y - self.body.y) as i128 * speed as i128, distance) as Fixed;

        self.shoot_direction(dx, dy)
    }
}

impl Entity for Baddie {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixed::fixed;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run_ticks(baddie: &mut Baddie, players: &[Player], ticks: u32) -> Vec<Bullet> {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut bullets = Vec::new();
        for _ in 0..ticks {
            baddie.advance(players, &mut rng, &mut bullets);
        }
        bullets
    }

    #[test]
    fn test_shooty_score_table() {
        assert_eq!(Baddie::shooty(0, 0, 0, 1).score, 2);
        assert_eq!(Baddie::shooty(0, 0, 1, 1).score, 1);
        assert_eq!(Baddie::shooty(0, 0, -1, 1).score, 1);
        assert_eq!(Baddie::shooty(0, 0, 0, 2).score, 4);
        assert_eq!(Baddie::shooty(0, 0, -1, 2).score, 2);
        assert_eq!(Baddie::shooty(0, 0, 1, 2).shot_speed, fixed(6));
    }

    #[test]
    fn test_shoot_direction_spawns_outside_shooter() {
        let baddie = Baddie::new(fixed(100), fixed(100));
        let bullet = baddie.shoot_direction(fixed(3), 0).unwrap();

        assert_eq!(bullet.body.x, fixed(100) + fixed(26) + 1);
        assert_eq!(bullet.body.y, fixed(100));
        assert_eq!((bullet.body.dx, bullet.body.dy), (fixed(3), 0));
        assert!(!baddie.intersects(&bullet));
    }

    #[test]
    fn test_shoot_direction_diagonal_never_overlaps() {
        let baddie = Baddie::new(fixed(200), fixed(200));
        for (dx, dy) in [(1, 1), (-1, 1), (-1, -1), (1, -1), (3, -7), (-5, 2)] {
            let bullet = baddie.shoot_direction(fixed(dx), fixed(dy)).unwrap();
            assert!(!baddie.intersects(&bullet), "overlap for ({dx}, {dy})");
        }
    }

    #[test]
    fn test_shoot_zero_vector_is_no_op() {
        let baddie = Baddie::new(fixed(10), fixed(10));
        assert!(baddie.shoot_direction(0, 0).is_none());
        assert!(baddie.shoot_point(fixed(10), fixed(10), fixed(3)).is_none());
    }

    #[test]
    fn test_shoot_point_normalizes_speed() {
        let baddie = Baddie::new(fixed(100), fixed(100));
        let bullet = baddie.shoot_point(fixed(100), fixed(400), fixed(3)).unwrap();
        assert_eq!(bullet.body.dx, 0);
        assert_eq!(bullet.body.dy, fixed(3));
        assert!(bullet.body.y > baddie.body.y);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut bullet = Bullet::new(0, 0, 1, 2);
        for _ in 0..(TRAIL_SIZE + 3) {
            bullet.integrate();
        }
        assert_eq!(bullet.trail.len(), TRAIL_SIZE);
        // Oldest retained entry is from 3 ticks in
        assert_eq!(bullet.trail.front(), Some(&(3, 6)));
        assert_eq!(bullet.trail.back(), Some(&(7, 14)));
        assert_eq!((bullet.body.x, bullet.body.y), (8, 16));
    }

    #[test]
    fn test_spawning_baddie_holds_fire() {
        let player = Player::new(1, fixed(500), fixed(500));
        let mut baddie = Baddie::shooty(fixed(100), fixed(100), 0, 1);
        let bullets = run_ticks(&mut baddie, std::slice::from_ref(&player), 59);
        assert!(bullets.is_empty());
        assert!(!baddie.is_spawning());
    }

    #[test]
    fn test_fires_on_own_age_boundary() {
        let player = Player::new(1, fixed(500), fixed(500));
        let mut baddie = Baddie::shooty(fixed(100), fixed(100), 0, 1);
        let bullets = run_ticks(&mut baddie, std::slice::from_ref(&player), 60);
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[0].pull, BULLET_PULL);
        assert_eq!(bullets[1].pull, -BULLET_PULL);

        let bullets = run_ticks(&mut baddie, std::slice::from_ref(&player), 59);
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_sign_selects_bullet_polarity() {
        let player = Player::new(1, fixed(500), fixed(500));

        let mut attract_only = Baddie::shooty(fixed(100), fixed(100), 1, 1);
        let bullets = run_ticks(&mut attract_only, std::slice::from_ref(&player), 60);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pull, BULLET_PULL);

        let mut repel_only = Baddie::shooty(fixed(100), fixed(100), -1, 1);
        let bullets = run_ticks(&mut repel_only, std::slice::from_ref(&player), 60);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pull, -BULLET_PULL);
    }

    #[test]
    fn test_no_players_no_shots() {
        let mut baddie = Baddie::shooty(fixed(100), fixed(100), 0, 2);
        assert!(run_ticks(&mut baddie, &[], 120).is_empty());
    }

    #[test]
    fn test_inert_baddie_only_ages() {
        let player = Player::new(1, fixed(500), fixed(500));
        let mut baddie = Baddie::new(fixed(100), fixed(100));
        let bullets = run_ticks(&mut baddie, std::slice::from_ref(&player), 120);
        assert!(bullets.is_empty());
        assert_eq!(baddie.age, 120);
    }

    #[test]
    fn test_toggle_pull() {
        let mut player = Player::new(1, 0, 0);
        player.toggle_pull();
        assert_eq!(player.pull, -PLAYER_PULL);
        player.toggle_pull();
        assert_eq!(player.pull, PLAYER_PULL);
    }
}
