use crate::core::Vec3;
use crate::domain::SimulationConfig;

use super::types::BodyBuffers;

/// Fraction of the remaining distance the control sphere covers per tick
pub const CONTROL_FOLLOW_RATE: f32 = 0.1;

/// Pull body 0 toward the control target and pin its velocity to zero.
/// Returns body 0's new position.
#[inline]
pub fn follow_control_target(bodies: &mut BodyBuffers, target: Vec3) -> Vec3 {
    let anchor = bodies.position(0).lerp(target, CONTROL_FOLLOW_RATE);
    bodies.set_position(0, anchor);
    bodies.set_velocity(0, Vec3::zero());
    anchor
}

/// Gravity (scaled by radius), friction, speed cap, then advance.
/// Runs for every free body before any collision is resolved.
pub fn integrate(bodies: &mut BodyBuffers, config: &SimulationConfig, start: usize, delta: f32) {
    for idx in start..bodies.count() {
        let mut pos = bodies.position(idx);
        let mut vel = bodies.velocity(idx);

        vel.y -= delta * config.gravity * bodies.size(idx);
        vel *= config.friction;
        vel = vel.clamp_length(0.0, config.max_velocity);
        pos += vel;

        bodies.set_position(idx, pos);
        bodies.set_velocity(idx, vel);
    }
}
