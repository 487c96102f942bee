use crate::types::{Ball, Point2, Vec2};

use super::damping_factor;

/// Oriented surface segment.
///
/// The normal is `b - a` rotated 90° counterclockwise, so it points up when
/// `a` is left of `b`. The orientation is not verified; a caller that
/// supplies the endpoints swapped gets the inverted normal.
#[derive(Copy, Clone, Debug)]
pub struct Surface {
    /// First endpoint.
    pub a: Point2,
    /// Second endpoint.
    pub b: Point2,
}

impl Surface {
    #[must_use]
    pub const fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Unit normal of the segment.
    ///
    /// Undefined for a zero-length segment; [`collision_resolution`] and
    /// [`push_ball`] guard for that case themselves.
    ///
    /// [`collision_resolution`]: Self::collision_resolution
    /// [`push_ball`]: Self::push_ball
    #[must_use]
    pub fn normal(&self) -> Vec2 {
        let d = (self.b - self.a).normalized();
        Vec2::new(-d.y, d.x)
    }

    /// Displacement that undoes the penetration of a point through the
    /// surface, or `None` when there is no collision.
    ///
    /// `p` is the point's current position and `v` the travel it just made,
    /// so its previous position was `p - v`. Degenerate inputs (zero-length
    /// travel, zero-length segment, travel parallel to the segment) are all
    /// treated as "no collision".
    #[must_use]
    pub fn collision_resolution(&self, p: Point2, v: Vec2) -> Option<Vec2> {
        if (self.b - self.a).length_squared() < 1e-12 {
            return None;
        }
        let n = self.normal();
        let l = (self.a - p).dot(n);
        if l < 0.0 {
            // Already on the normal side.
            return None;
        }
        let travel_sq = v.length_squared();
        if travel_sq < 1e-12 {
            return None;
        }
        let u = -v / travel_sq.sqrt();
        let cos_o = n.dot(u);
        if cos_o < 1e-6 {
            // Travel (nearly) parallel to the surface.
            return None;
        }
        let adjustment = u * (l / cos_o);
        let intersection = p + adjustment;
        if !on_segment(intersection, self.a, self.b) {
            return None;
        }
        if !on_segment(intersection, p - v, p) {
            return None;
        }
        Some(adjustment)
    }

    /// Probes the ball's far side along `-normal` and, on collision, applies
    /// the full surface response. Returns whether a collision was applied.
    ///
    /// This is the helper chamber programs call once per ball per tick to
    /// realize walls and platforms.
    pub fn push_ball(&self, ball: &mut Ball, dt: f32) -> bool {
        if (self.b - self.a).length_squared() < 1e-12 {
            return false;
        }
        let n = self.normal();
        let probe = ball.pos + n * (-ball.r);
        match self.collision_resolution(probe, ball.velocity) {
            Some(resolution) => {
                apply_collision(ball, resolution, n, dt);
                true
            }
            None => false,
        }
    }
}

/// Tests whether `p` lies strictly between `a` and `b`.
///
/// One coordinate axis strictly separating the endpoints is enough. The OR
/// is deliberate, not a bug: a nearly axis-aligned segment has negligible
/// range on one axis, and requiring both axes to separate would reject real
/// intersections there. The other axis rescues the test.
fn on_segment(p: Point2, a: Point2, b: Point2) -> bool {
    strictly_between(p.x, a.x, b.x) || strictly_between(p.y, a.y, b.y)
}

fn strictly_between(v: f32, e0: f32, e1: f32) -> bool {
    (e0 < v && v < e1) || (e1 < v && v < e0)
}

/// Surface collision response.
///
/// Reflects the velocity about the surface normal, damps it by the
/// incidence-scaled factor, undoes the penetration with `resolution`, then
/// advances the ball by the post-collision velocity over `dt`.
pub fn apply_collision(ball: &mut Ball, resolution: Vec2, normal: Vec2, dt: f32) {
    let vn = ball.velocity.dot(normal);
    ball.velocity -= normal * (2.0 * vn);
    ball.velocity *= damping_factor(normal, ball.velocity);
    ball.pos += resolution;
    ball.pos += ball.velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Surface {
        Surface::new(Point2::new(0.0, 0.02), Point2::new(1.0, 0.02))
    }

    #[test]
    fn normal_points_up_when_a_is_left_of_b() {
        let n = horizontal().normal();
        assert!((n.x - 0.0).abs() < 1e-6);
        assert!((n.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn point_on_normal_side_does_not_collide() {
        let s = horizontal();
        let res = s.collision_resolution(Point2::new(0.5, 0.5), Vec2::new(0.0, -1.0));
        assert!(res.is_none());
    }

    #[test]
    fn crossing_point_is_pushed_back_to_the_surface() {
        let s = horizontal();
        let res = s
            .collision_resolution(Point2::new(0.5, 0.005), Vec2::new(0.0, -1.0))
            .unwrap();
        assert!((res.x - 0.0).abs() < 1e-6);
        assert!((res.y - 0.015).abs() < 1e-6);
    }

    #[test]
    fn zero_travel_is_no_collision() {
        let s = horizontal();
        let res = s.collision_resolution(Point2::new(0.5, 0.005), Vec2::new(0.0, 0.0));
        assert!(res.is_none());
    }

    #[test]
    fn parallel_travel_is_no_collision() {
        let s = horizontal();
        let res = s.collision_resolution(Point2::new(0.5, 0.005), Vec2::new(1.0, 0.0));
        assert!(res.is_none());
    }

    #[test]
    fn intersection_off_the_segment_is_rejected() {
        let s = Surface::new(Point2::new(0.4, 0.02), Point2::new(0.6, 0.02));
        // Crossed the segment's infinite line, but off to the side.
        let res = s.collision_resolution(Point2::new(0.9, 0.005), Vec2::new(0.0, -1.0));
        assert!(res.is_none());
    }

    #[test]
    fn near_vertical_segment_survives_the_degenerate_axis() {
        // x range of the segment is negligible; the y axis rescues the
        // bounds test.
        let s = Surface::new(Point2::new(0.5, 0.6), Point2::new(0.5000001, 0.1));
        let n = s.normal();
        assert!(n.x > 0.99);
        let res = s.collision_resolution(Point2::new(0.49, 0.3), Vec2::new(-1.0, 0.0));
        assert!(res.is_some());
    }
}
