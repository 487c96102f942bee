use crate::types::{Ball, GRAVITY, MAX_SPEED};

/// Advances every ball by one Euler step.
///
/// Order per ball: gravity, speed clamp, position update. The clamp rescales
/// to exactly [`MAX_SPEED`] so the bound holds before the position advances.
pub fn integrate(balls: &mut [Ball], dt: f32) {
    for ball in balls.iter_mut() {
        ball.velocity.y += GRAVITY * dt;

        let speed_sq = ball.velocity.length_squared();
        if speed_sq > MAX_SPEED * MAX_SPEED {
            ball.velocity *= MAX_SPEED / speed_sq.sqrt();
        }

        ball.pos += ball.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point2, Vec2, STEP_DT};

    #[test]
    fn gravity_is_applied_before_the_position_update() {
        let mut balls = [Ball::new(Point2::new(0.5, 0.1), Vec2::new(0.0, 0.0))];
        integrate(&mut balls, STEP_DT);
        let expected_vy = GRAVITY * STEP_DT;
        assert!((balls[0].velocity.y - expected_vy).abs() < 1e-7);
        assert!((balls[0].pos.y - (0.1 + expected_vy * STEP_DT)).abs() < 1e-7);
    }

    #[test]
    fn fast_ball_is_clamped_to_max_speed() {
        let mut balls = [Ball::new(Point2::new(0.5, 0.1), Vec2::new(10.0, 0.0))];
        integrate(&mut balls, STEP_DT);
        let speed = balls[0].velocity.length();
        assert!((speed - MAX_SPEED).abs() < 1e-5, "speed={speed}");
    }

    #[test]
    fn slow_ball_is_not_clamped() {
        let mut balls = [Ball::new(Point2::new(0.5, 0.1), Vec2::new(0.3, 0.0))];
        integrate(&mut balls, STEP_DT);
        assert!((balls[0].velocity.x - 0.3).abs() < 1e-7);
    }
}
