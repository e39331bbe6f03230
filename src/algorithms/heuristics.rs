//! Planar distance estimates for goal-directed search.
//!
//! Each constructor takes two coordinate accessors and returns a closure usable
//! as a [`Heuristic`](super::Heuristic) for any node identity type.

use std::f64::consts::SQRT_2;

/// `|dx| + |dy|`. Admissible for 4-connected grids with unit steps.
pub fn manhattan<N, X, Y>(x: X, y: Y) -> impl Fn(&N, &N) -> f64
where
    X: Fn(&N) -> f64,
    Y: Fn(&N) -> f64,
{
    move |a: &N, b: &N| (x(b) - x(a)).abs() + (y(b) - y(a)).abs()
}

/// `max(dx, dy) + (sqrt 2 - 1) * min(dx, dy)`. Admissible for 8-connected grids
/// with diagonal steps of length `sqrt 2`.
pub fn octile<N, X, Y>(x: X, y: Y) -> impl Fn(&N, &N) -> f64
where
    X: Fn(&N) -> f64,
    Y: Fn(&N) -> f64,
{
    move |a: &N, b: &N| {
        let dx = (x(b) - x(a)).abs();
        let dy = (y(b) - y(a)).abs();
        dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
    }
}

/// `max(dx, dy)`.
pub fn chebyshev<N, X, Y>(x: X, y: Y) -> impl Fn(&N, &N) -> f64
where
    X: Fn(&N) -> f64,
    Y: Fn(&N) -> f64,
{
    move |a: &N, b: &N| (x(b) - x(a)).abs().max((y(b) - y(a)).abs())
}

/// Straight-line distance.
pub fn euclidean<N, X, Y>(x: X, y: Y) -> impl Fn(&N, &N) -> f64
where
    X: Fn(&N) -> f64,
    Y: Fn(&N) -> f64,
{
    move |a: &N, b: &N| (x(b) - x(a)).hypot(y(b) - y(a))
}
