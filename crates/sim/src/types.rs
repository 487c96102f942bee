use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Radius shared by every ball in a simulation.
pub const BALL_RADIUS: f32 = 0.025;

/// Upper bound on ball speed, enforced by the integrator each tick.
pub const MAX_SPEED: f32 = 2.5;

/// Gravitational acceleration applied along the y axis.
pub const GRAVITY: f32 = -9.832;

/// Length of one simulation tick in nanoseconds (~600 Hz).
pub const STEP_LEN_NS: u64 = 1_666_666;

/// Tick length in seconds, the `dt` handed to chamber programs.
pub const STEP_DT: f32 = STEP_LEN_NS as f32 / 1_000_000_000.0;

/// Height of a chamber cell in local coordinates. Width is always 1.
pub const CHAMBER_HEIGHT: f32 = 0.7;

/// Fraction of velocity lost on a perpendicular collision.
pub const COLLISION_DAMPING: f32 = 0.15;

/// Chambers per grid row. Deployment-fixed; ids are row-major.
#[cfg(not(feature = "constrained"))]
pub const CHAMBERS_PER_ROW: usize = 2;
#[cfg(feature = "constrained")]
pub const CHAMBERS_PER_ROW: usize = 1;

/// Ball population of a simulation instance.
#[cfg(not(feature = "constrained"))]
pub const NUM_BALLS: usize = 20;
#[cfg(feature = "constrained")]
pub const NUM_BALLS: usize = 5;

/// Deployment limit on registered chambers.
pub const MAX_CHAMBERS: usize = 64;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Two dimensional displacement.
///
/// Velocities, translations and surface normals are all [`Vec2`]s. Positions
/// are [`Point2`]s; the difference of two points yields a `Vec2` and a point
/// plus a `Vec2` yields a point, so the two roles cannot be mixed up. The
/// type is [`bytemuck::Pod`] so ball records containing it can be mapped into
/// a chamber program's memory without conversion.
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector with this direction.
    ///
    /// Undefined for the zero vector; callers guard before normalizing.
    #[must_use]
    pub fn normalized(self) -> Self {
        self / self.length()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Two dimensional position in a chamber's local coordinate frame.
///
/// After wrapping, `x` lies in `[0, 1)` and `y` in `[0, CHAMBER_HEIGHT)`.
pub struct Point2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point2 {
    type Output = Vec2;
    fn sub(self, rhs: Self) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point2 {
    type Output = Self;
    fn add(self, rhs: Vec2) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vec2> for Point2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Sub<Vec2> for Point2 {
    type Output = Self;
    fn sub(self, rhs: Vec2) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign<Vec2> for Point2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Mutable physical state of one ball.
///
/// Positions are expressed in the owning chamber's local frame. The record
/// is plain old data so the sandbox host can hand a per-chamber view to a
/// chamber program byte-for-byte, the same way GPU engines map body buffers.
pub struct Ball {
    /// Center position in the owning chamber's local frame.
    pub pos: Point2,
    /// Radius. Constant per simulation; see [`BALL_RADIUS`].
    pub r: f32,
    /// Linear velocity. Clamped to [`MAX_SPEED`] by the integrator.
    pub velocity: Vec2,
}

impl Ball {
    /// Constructs a ball with the simulation-wide radius.
    #[must_use]
    pub const fn new(pos: Point2, velocity: Vec2) -> Self {
        Self {
            pos,
            r: BALL_RADIUS,
            velocity,
        }
    }

    /// True when every component of position and velocity is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.velocity.x.is_finite()
            && self.velocity.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_difference_is_a_vector() {
        let d = Point2::new(0.5, 0.7) - Point2::new(0.2, 0.3);
        assert!((d.x - 0.3).abs() < 1e-6);
        assert!((d.y - 0.4).abs() < 1e-6);
        assert!((d.length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn normalized_has_unit_length() {
        let v = Vec2::new(3.0, -4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn step_dt_matches_step_len() {
        assert!((STEP_DT - 1.666_666e-3).abs() < 1e-9);
    }
}
