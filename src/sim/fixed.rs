//! Fixed-point integer math
//!
//! A real value `v` is stored as `v << PRECISION` in an `i64`. Anything that
//! multiplies two fixed-point values (squared distances, pull products,
//! scaled offsets) is widened to `i128` first so nothing overflows before the
//! result is scaled back down.

use crate::consts::PRECISION;
use crate::error::MathError;

/// Fixed-point scalar (position, velocity, radius, pull)
pub type Fixed = i64;

/// Convert whole application units to fixed-point
#[inline]
pub const fn fixed(units: i64) -> Fixed {
    units << PRECISION
}

/// Convert fixed-point back to whole application units (floor)
#[inline]
pub const fn to_units(value: Fixed) -> i64 {
    value >> PRECISION
}

/// Squared distance between two points, in squared fixed-point units
#[inline]
pub fn dist_sq(ax: Fixed, ay: Fixed, bx: Fixed, by: Fixed) -> i128 {
    let dx = ax as i128 - bx as i128;
    let dy = ay as i128 - by as i128;
    dx * dx + dy * dy
}

/// Division rounding toward negative infinity
///
/// Movement and shooting maths floor their quotients, so a bullet drifting
/// left is nudged exactly as much as one drifting right.
#[inline]
pub fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Integer square root, failing on negative input
///
/// Binary digit-by-digit method: starting from the highest power of two that
/// can be a digit of the root, each bit is kept if the candidate's square
/// does not exceed `n`. Exact squares return as soon as they are found.
pub fn checked_isqrt(n: i128) -> Result<i128, MathError> {
    if n < 0 {
        return Err(MathError::NegativeSqrt(n));
    }
    if n == 0 {
        return Ok(0);
    }

    let n = n as u128;
    let top_bit = 127 - n.leading_zeros();
    let mut to_add: u128 = 1 << (top_bit / 2);
    let mut result: u128 = 0;

    while to_add != 0 {
        let next = result + to_add;
        match next.checked_mul(next) {
            Some(square) if square < n => result = next,
            Some(square) if square == n => return Ok(next as i128),
            _ => {}
        }
        to_add >>= 1;
    }

    Ok(result as i128)
}

/// Integer square root (floor)
///
/// # Panics
///
/// Panics on negative input. Callers only ever pass sums of squares, so a
/// negative value means the fixed-point bookkeeping is broken.
pub fn isqrt(n: i128) -> i128 {
    match checked_isqrt(n) {
        Ok(root) => root,
        Err(e) => panic!("{e}"),
    }
}
