use crate::core::Vec3;
use crate::domain::SimulationConfig;

/// Sign that maps zero to zero (unlike `f32::signum`)
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}

/// Clamp one axis into `[-extent, extent]` and reflect its velocity.
#[inline]
fn bounce_axis(p: &mut f32, v: &mut f32, radius: f32, trigger: f32, clamp_to: f32, wall_bounce: f32) -> bool {
    if p.abs() + radius > trigger {
        *p = sign(*p) * (clamp_to - radius);
        *v = -*v * wall_bounce;
        true
    } else {
        false
    }
}

/// Keep a body inside the box. Returns the number of axes clamped.
///
/// With gravity on there is only a floor on Y. Z triggers on
/// `max(maxZ, maxSize)` but clamps against `maxZ`.
pub fn apply_walls(config: &SimulationConfig, radius: f32, pos: &mut Vec3, vel: &mut Vec3) -> u32 {
    let bounce = config.wall_bounce;
    let mut hits = 0;

    if bounce_axis(&mut pos.x, &mut vel.x, radius, config.max_x, config.max_x, bounce) {
        hits += 1;
    }

    if config.gravity == 0.0 {
        if bounce_axis(&mut pos.y, &mut vel.y, radius, config.max_y, config.max_y, bounce) {
            hits += 1;
        }
    } else if pos.y - radius < -config.max_y {
        pos.y = -config.max_y + radius;
        vel.y = -vel.y * bounce;
        hits += 1;
    }

    if bounce_axis(&mut pos.z, &mut vel.z, radius, config.z_boundary(), config.max_z, bounce) {
        hits += 1;
    }

    hits
}
