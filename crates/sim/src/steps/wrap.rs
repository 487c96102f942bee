use crate::layout::ChamberLayout;
use crate::types::{Ball, CHAMBER_HEIGHT};

/// Folds every ball's position back into the unit cell, hopping its owner
/// across the topology once per cell crossed.
///
/// The loops handle a ball that crossed several cells in one tick. On exit
/// every position satisfies `x ∈ [0, 1)` and `y ∈ [0, CHAMBER_HEIGHT)`.
pub fn apply_wrap(balls: &mut [Ball], owners: &mut [usize], layout: &ChamberLayout) {
    for (ball, owner) in balls.iter_mut().zip(owners.iter_mut()) {
        while ball.pos.x < 0.0 {
            ball.pos.x += 1.0;
            *owner = layout.left(*owner);
        }
        while ball.pos.x >= 1.0 {
            ball.pos.x -= 1.0;
            *owner = layout.right(*owner);
        }
        while ball.pos.y < 0.0 {
            ball.pos.y += CHAMBER_HEIGHT;
            *owner = layout.down(*owner);
        }
        while ball.pos.y >= CHAMBER_HEIGHT {
            ball.pos.y -= CHAMBER_HEIGHT;
            *owner = layout.up(*owner);
        }
    }
}
