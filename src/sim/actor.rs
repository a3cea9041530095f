//! The player-controlled actor (bird)
//!
//! Only the vertical axis moves: x is fixed when the actor is placed.

use glam::Vec2;

use crate::consts::ACTOR_RADIUS;

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
}

impl Actor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: ACTOR_RADIUS,
            velocity: 0.0,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.velocity += gravity * dt;
        self.pos.y += self.velocity * dt;
    }

    /// Flap: velocity is replaced, not accumulated
    pub fn impulse(&mut self, strength: f32) {
        self.velocity = strength;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}
