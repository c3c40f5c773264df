//! Angle constants and the small vector type shared by bones and constraints.

pub const PI: f32 = std::f32::consts::PI;
pub const PI2: f32 = 2.0 * std::f32::consts::PI;
/// Multiply degrees by this to get radians.
pub const DEG_RAD: f32 = PI / 180.0;
/// Multiply radians by this to get degrees.
pub const RAD_DEG: f32 = 180.0 / PI;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Brings an angle difference into `(-PI, PI]` by adding or subtracting at most one full turn.
///
/// Only exact when the input already lies within one turn of that range; larger values are not
/// reduced further.
pub fn wrap_pi(mut radians: f32) -> f32 {
    if radians > PI {
        radians -= PI2;
    } else if radians < -PI {
        radians += PI2;
    }
    radians
}
