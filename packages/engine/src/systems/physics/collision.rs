use crate::core::Vec3;

use super::types::BodyBuffers;

/// Minimum speed factor for the body-body push impulse
const PAIR_IMPULSE_FLOOR: f32 = 1.0;
/// Minimum speed factor when a body is shoved by the control sphere
const CONTROL_IMPULSE_FLOOR: f32 = 2.0;

/// Push body `idx` apart from every later body it overlaps.
///
/// `pos`/`vel` hold body `idx`'s working state; the caller writes them back.
/// Later bodies are written in place. This is a repulsion, not an elastic
/// collision: each side loses `force * max(own speed, 1)` along the normal.
pub fn resolve_pairs(bodies: &mut BodyBuffers, idx: usize, pos: &mut Vec3, vel: &mut Vec3) -> u32 {
    let radius = bodies.size(idx);
    let mut contacts = 0;

    for jdx in (idx + 1)..bodies.count() {
        let mut other_pos = bodies.position(jdx);
        let diff = other_pos - *pos;
        let dist = diff.length();
        let sum_radius = radius + bodies.size(jdx);

        if dist < sum_radius {
            let mut other_vel = bodies.velocity(jdx);
            let overlap = sum_radius - dist;
            let force = diff.normalize() * (0.5 * overlap);
            let impulse = force * vel.length().max(PAIR_IMPULSE_FLOOR);
            let other_impulse = force * other_vel.length().max(PAIR_IMPULSE_FLOOR);

            *pos -= force;
            *vel -= impulse;
            other_pos += force;
            other_vel += other_impulse;

            bodies.set_position(jdx, other_pos);
            bodies.set_velocity(jdx, other_vel);
            contacts += 1;
        }
    }

    contacts
}

/// Shove a free body fully out of the control sphere. The sphere itself
/// does not move.
pub fn resolve_control_contact(
    anchor: Vec3,
    anchor_radius: f32,
    radius: f32,
    pos: &mut Vec3,
    vel: &mut Vec3,
) -> bool {
    let diff = anchor - *pos;
    let dist = diff.length();
    let sum_radius = radius + anchor_radius;

    if dist >= sum_radius {
        return false;
    }

    let force = diff.normalize() * (sum_radius - dist);
    let impulse = force * vel.length().max(CONTROL_IMPULSE_FLOOR);
    *pos -= force;
    *vel -= impulse;
    true
}
