//! View assembly and write-back (reparenting).
//!
//! A chamber sees every ball whose footprint overlaps its cell, expressed in
//! the cell's local frame. A ball owned by a neighbor enters the view
//! translated by one cell extent, and the [`SourceDirection`] tag records
//! which translation was applied so write-back can invert it. Both
//! transforms are driven off the same [`SourceDirection::offset`] table; a
//! second hand-written table would be a sign error waiting to happen.

use crate::layout::ChamberLayout;
use crate::types::{Ball, Vec2, CHAMBER_HEIGHT};

/// Which neighbor of the target chamber a viewed ball came in from.
///
/// The name describes the source relative to the *target*: a ball tagged
/// `Left` came from the target's left neighbor, which means it was
/// translated by `x -= 1` to appear near the target's left edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceDirection {
    /// Owned by the target chamber; no translation.
    Current,
    /// Came from the target's left neighbor (owner sits left of target).
    Left,
    /// Came from the target's right neighbor.
    Right,
    /// Came from the target's upper neighbor.
    Up,
    /// Came from the target's lower neighbor.
    Down,
}

impl SourceDirection {
    /// Translation added to the owner-frame position on assembly.
    /// Write-back subtracts the same offset.
    #[must_use]
    pub fn offset(self) -> Vec2 {
        match self {
            Self::Current => Vec2::new(0.0, 0.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, CHAMBER_HEIGHT),
            Self::Down => Vec2::new(0.0, -CHAMBER_HEIGHT),
        }
    }
}

/// One entry of a chamber's per-tick view.
///
/// Carries an index into the global ball array plus a local copy instead of
/// a borrow, so the view can outlive no tick and alias no ball.
#[derive(Copy, Clone, Debug)]
pub struct AdjustedBall {
    /// Ball state in the target chamber's local frame.
    pub adjusted: Ball,
    /// Index into the simulation's ball array.
    pub ball_id: usize,
    /// Translation tag; see [`SourceDirection`].
    pub direction: SourceDirection,
}

/// Gathers the balls overlapping `target` into `view`, in local coordinates.
///
/// A ball is included iff the target owns it, or the ball sits within its
/// radius of the boundary shared with the target. `view` is a reusable
/// scratch buffer; it is cleared first.
pub fn assemble_view(
    target: usize,
    balls: &[Ball],
    owners: &[usize],
    layout: &ChamberLayout,
    view: &mut Vec<AdjustedBall>,
) {
    view.clear();
    for (ball_id, (ball, &owner)) in balls.iter().zip(owners.iter()).enumerate() {
        let direction = if owner == target {
            SourceDirection::Current
        } else if ball.pos.x < ball.r && layout.left(owner) == target {
            // The ball's left edge entered the cell left of its owner; from
            // the target's point of view it came in from the right.
            SourceDirection::Right
        } else if ball.pos.x + ball.r > 1.0 && layout.right(owner) == target {
            SourceDirection::Left
        } else if ball.pos.y + ball.r > CHAMBER_HEIGHT && layout.up(owner) == target {
            SourceDirection::Down
        } else if ball.pos.y < ball.r && layout.down(owner) == target {
            SourceDirection::Up
        } else {
            continue;
        };
        let mut adjusted = *ball;
        adjusted.pos += direction.offset();
        view.push(AdjustedBall {
            adjusted,
            ball_id,
            direction,
        });
    }
}

/// Writes a (possibly mutated) view back into the global ball array.
///
/// Each entry is translated back into its owner's frame by inverting the
/// assembly offset. Owner indices are not touched here; the next tick's
/// wrap pass reasserts ownership. A ball a chamber program left in a
/// non-finite state is dropped, keeping its previous global state.
pub fn write_back(view: &[AdjustedBall], balls: &mut [Ball]) {
    for entry in view {
        let mut ball = entry.adjusted;
        ball.pos -= entry.direction.offset();
        if !ball.is_finite() {
            tracing::warn!(
                ball_id = entry.ball_id,
                "non-finite ball after chamber pass; keeping previous state"
            );
            continue;
        }
        balls[entry.ball_id] = ball;
    }
}
