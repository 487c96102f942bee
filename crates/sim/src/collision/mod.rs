//! # Collision kernels
//!
//! Point-through-surface resolution with the reflect-and-damp response, and
//! pairwise ball restitution. Surfaces are not owned by the engine: chamber
//! programs build their walls and platforms out of [`Surface`] and call
//! [`Surface::push_ball`]; the tick orchestrator only runs the ball-ball
//! kernel over each chamber's local view.

mod ball_ball;
mod surface;

pub use ball_ball::apply_ball_collision;
pub use surface::{apply_collision, Surface};

use crate::types::{Vec2, COLLISION_DAMPING};

/// Velocity retained after a collision, as a function of incidence.
///
/// Perpendicular hits lose [`COLLISION_DAMPING`] of their speed, grazing
/// hits lose almost nothing. A zero velocity has no incidence angle; the
/// factor degrades to 1 so callers never divide by zero.
fn damping_factor(normal: Vec2, velocity: Vec2) -> f32 {
    let speed_sq = velocity.length_squared();
    if speed_sq < 1e-12 {
        return 1.0;
    }
    1.0 - COLLISION_DAMPING * (normal.dot(velocity).abs() / speed_sq.sqrt())
}
