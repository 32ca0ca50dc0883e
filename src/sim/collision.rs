//! Collision detection against the x-sorted bullet array
//!
//! Bullets are sorted by `x` once per tick. A query entity only needs to look
//! at bullets whose `x` lies within its radius plus the largest bullet radius,
//! so a binary search finds one candidate in that window and a linear scan
//! outward from it covers the rest.

use super::entity::{Body, Bullet, Entity};
use super::fixed::dist_sq;
use crate::consts::MAX_BULLET_RADIUS;

/// Strict circle overlap; tangent circles and dead bodies never intersect
#[inline]
pub fn intersects(a: &Body, b: &Body) -> bool {
    if !a.alive || !b.alive {
        return false;
    }

    let max_distance = (a.radius + b.radius) as i128;
    dist_sq(a.x, a.y, b.x, b.y) < max_distance * max_distance
}

/// Sort bullets by `(x, y)` so [`find_bullet`] can binary search them
pub fn sort_bullets(bullets: &mut [Bullet]) {
    bullets.sort_by_key(|b| b.sort_key());
}

/// Index of any live bullet intersecting `query`, if one exists
///
/// `bullets` must be sorted by `x`. This is an existence query: when several
/// bullets overlap the query, the one found first (nearest to the binary
/// search hit, left side before right) is returned.
pub fn find_bullet(bullets: &[Bullet], query: &Body) -> Option<usize> {
    let reach = query.radius + MAX_BULLET_RADIUS;
    let min_x = query.x - reach;
    let max_x = query.x + reach;

    // Any bullet with min_x < x < max_x
    let mut lo = 0usize;
    let mut hi = bullets.len();
    let found = loop {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        let x = bullets[mid].body.x;
        if x <= min_x {
            lo = mid + 1;
        } else if x < max_x {
            break mid;
        } else {
            hi = mid;
        }
    };

    if intersects(&bullets[found].body, query) {
        return Some(found);
    }

    let left = (0..found)
        .rev()
        .take_while(|&i| bullets[i].body.x > min_x)
        .find(|&i| intersects(&bullets[i].body, query));
    if left.is_some() {
        return left;
    }

    (found + 1..bullets.len())
        .take_while(|&i| bullets[i].body.x < max_x)
        .find(|&i| intersects(&bullets[i].body, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BADDIE_RADIUS, BULLET_RADIUS, PLAYER_RADIUS};
    use crate::sim::fixed::{Fixed, fixed};
    use proptest::prelude::*;

    fn bullet_at(x: Fixed, y: Fixed) -> Bullet {
        Bullet::new(x, y, 0, 0)
    }

    fn brute_force(bullets: &[Bullet], query: &Body) -> bool {
        bullets.iter().any(|b| intersects(&b.body, query))
    }

    #[test]
    fn test_tangent_circles_do_not_intersect() {
        let a = Body::new(fixed(100), fixed(100), PLAYER_RADIUS);
        let touching = Body::new(fixed(100) + PLAYER_RADIUS + BULLET_RADIUS, fixed(100), BULLET_RADIUS);
        assert!(!intersects(&a, &touching));

        let overlapping = Body::new(
            fixed(100) + PLAYER_RADIUS + BULLET_RADIUS - 1,
            fixed(100),
            BULLET_RADIUS,
        );
        assert!(intersects(&a, &overlapping));
    }

    #[test]
    fn test_dead_bodies_never_intersect() {
        let a = Body::new(0, 0, PLAYER_RADIUS);
        let mut b = Body::new(0, 0, BULLET_RADIUS);
        assert!(intersects(&a, &b));
        b.alive = false;
        assert!(!intersects(&a, &b));
        assert!(!intersects(&b, &a));
    }

    #[test]
    fn test_find_bullet_empty() {
        let query = Body::new(fixed(50), fixed(50), PLAYER_RADIUS);
        assert_eq!(find_bullet(&[], &query), None);
    }

    #[test]
    fn test_find_bullet_single_hit_and_miss() {
        let query = Body::new(fixed(50), fixed(50), PLAYER_RADIUS);
        let hit = [bullet_at(fixed(55), fixed(52))];
        assert_eq!(find_bullet(&hit, &query), Some(0));

        // Inside the x window but too far away in y
        let miss = [bullet_at(fixed(55), fixed(200))];
        assert_eq!(find_bullet(&miss, &query), None);
    }

    #[test]
    fn test_find_bullet_scans_past_window_candidate() {
        let query = Body::new(fixed(100), fixed(100), BADDIE_RADIUS);
        let mut bullets = vec![
            bullet_at(fixed(80), fixed(400)),
            bullet_at(fixed(90), fixed(300)),
            bullet_at(fixed(100), fixed(500)),
            bullet_at(fixed(110), fixed(105)),
            bullet_at(fixed(120), fixed(600)),
        ];
        sort_bullets(&mut bullets);
        assert_eq!(find_bullet(&bullets, &query), Some(3));
    }

    #[test]
    fn test_find_bullet_skips_dead() {
        let query = Body::new(fixed(100), fixed(100), PLAYER_RADIUS);
        let mut bullets = vec![bullet_at(fixed(100), fixed(100)), bullet_at(fixed(101), fixed(100))];
        bullets[0].kill();
        assert_eq!(find_bullet(&bullets, &query), Some(1));
        bullets[1].kill();
        assert_eq!(find_bullet(&bullets, &query), None);
    }

    #[test]
    fn test_window_edges_are_exclusive() {
        let query = Body::new(fixed(100), fixed(100), PLAYER_RADIUS);
        let reach = PLAYER_RADIUS + MAX_BULLET_RADIUS;
        let bullets = [
            bullet_at(fixed(100) - reach, fixed(100)),
            bullet_at(fixed(100) + reach, fixed(100)),
        ];
        assert_eq!(find_bullet(&bullets, &query), None);
    }

    #[test]
    fn test_sort_orders_by_x_then_y() {
        let mut bullets = vec![
            bullet_at(3, 1),
            bullet_at(1, 9),
            bullet_at(1, 2),
            bullet_at(2, 0),
        ];
        sort_bullets(&mut bullets);
        let keys: Vec<_> = bullets.iter().map(|b| b.sort_key()).collect();
        assert_eq!(keys, vec![(1, 2), (1, 9), (2, 0), (3, 1)]);
    }

    fn arb_bullets() -> impl Strategy<Value = Vec<(i64, i64, bool)>> {
        prop::collection::vec((0i64..200, 0i64..200, prop::bool::weighted(0.9)), 0..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1500))]

        #[test]
        fn prop_index_matches_brute_force(
            raw in arb_bullets(),
            qx in 0i64..200,
            qy in 0i64..200,
            big in any::<bool>(),
        ) {
            // Quarter-unit grid so exact tangencies show up regularly
            let mut bullets: Vec<Bullet> = raw
                .iter()
                .map(|&(x, y, alive)| {
                    let mut b = bullet_at(fixed(x) / 4, fixed(y) / 4);
                    b.body.alive = alive;
                    b
                })
                .collect();
            sort_bullets(&mut bullets);

            let radius = (if big { BADDIE_RADIUS } else { PLAYER_RADIUS }) / 4;
            let query = Body::new(fixed(qx) / 4, fixed(qy) / 4, radius);

            match find_bullet(&bullets, &query) {
                Some(i) => prop_assert!(intersects(&bullets[i].body, &query)),
                None => prop_assert!(!brute_force(&bullets, &query)),
            }
        }
    }
}
