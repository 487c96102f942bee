use crate::types::Ball;

use super::damping_factor;

/// Pairwise ball restitution.
///
/// Equal-mass elastic exchange of the velocity components along the line of
/// centers, with each transferred component damped by the incidence of the
/// ball it came from. Pairs that are already separating are left alone, as
/// are coincident centers (no usable normal).
pub fn apply_ball_collision(a: &mut Ball, b: &mut Ball) {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.r + b.r;
    // Comparisons are phrased so that a non-finite ball (a misbehaving
    // chamber's leftovers) falls into the early-outs instead of spreading.
    if !(dist_sq < min_dist * min_dist) || dist_sq < 1e-12 {
        return;
    }
    let normal = delta / dist_sq.sqrt();

    let (a_vel, b_vel) = (a.velocity, b.velocity);
    let a_n = a_vel.dot(normal);
    let b_n = b_vel.dot(normal);
    if !(b_n - a_n < 0.0) {
        return;
    }
    a.velocity = a_vel + normal * (b_n * damping_factor(normal, b_vel) - a_n);
    b.velocity = b_vel + normal * (a_n * damping_factor(normal, a_vel) - b_n);
}
