//! Physics System - Ball pit integrator
//!
//! Uniform spheres in a bounded box, advanced once per render tick.
//!
//! Step order:
//! - Control sphere (body 0) eases toward the pointer target, if active
//! - Integration pass over every free body: gravity, friction, speed cap
//! - Per body in ascending index: pair repulsion against later bodies,
//!   control-sphere repulsion, wall clamp
//!
//! Pairs are tested O(n²) with no broad phase; counts stay in the low hundreds.

mod bounds;
mod collision;
mod forces;
mod types;

pub use forces::CONTROL_FOLLOW_RATE;
pub use types::{BodyBuffers, FrameTime, StepReport};

use crate::core::{Rng, Vec3};
use crate::domain::SimulationConfig;

pub struct Physics {
    config: SimulationConfig,
    bodies: BodyBuffers,
    /// Control target body 0 follows while `control_sphere0` is on
    center: Vec3,
}

impl Physics {
    /// Allocate buffers for `config.count` bodies, scatter them through the box
    /// and draw their radii.
    pub fn new(config: SimulationConfig, rng: &mut Rng) -> Self {
        let mut physics = Self {
            bodies: BodyBuffers::new(config.count),
            config,
            center: Vec3::zero(),
        };
        physics.init_positions(rng);
        physics.init_sizes(rng);
        physics
    }

    pub fn with_seed(config: SimulationConfig, seed: u32) -> Self {
        Self::new(config, &mut Rng::new(seed))
    }

    fn init_positions(&mut self, rng: &mut Rng) {
        let count = self.bodies.count();
        if count == 0 {
            return;
        }
        self.bodies.set_position(0, self.center);
        for idx in 1..count {
            let pos = Vec3::new(
                rng.spread(2.0 * self.config.max_x),
                rng.spread(2.0 * self.config.max_y),
                rng.spread(2.0 * self.config.max_z),
            );
            self.bodies.set_position(idx, pos);
        }
    }

    fn init_sizes(&mut self, rng: &mut Rng) {
        let count = self.bodies.count();
        if count == 0 {
            return;
        }
        self.bodies.sizes[0] = self.config.size0;
        for idx in 1..count {
            self.bodies.sizes[idx] = rng.range(self.config.min_size, self.config.max_size);
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.bodies.count()
    }

    pub fn bodies(&self) -> &BodyBuffers {
        &self.bodies
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn set_center(&mut self, target: Vec3) {
        self.center = target;
    }

    pub fn control_sphere(&self) -> bool {
        self.config.control_sphere0
    }

    pub fn set_control_sphere(&mut self, enabled: bool) {
        self.config.control_sphere0 = enabled;
    }

    /// Resize the X/Y half-extents (the host does this after every resize)
    pub fn set_bounds(&mut self, max_x: f32, max_y: f32) {
        self.config.max_x = max_x;
        self.config.max_y = max_y;
    }

    pub fn position(&self, idx: usize) -> Vec3 {
        self.bodies.position(idx)
    }

    pub fn velocity(&self, idx: usize) -> Vec3 {
        self.bodies.velocity(idx)
    }

    pub fn size(&self, idx: usize) -> f32 {
        self.bodies.size(idx)
    }

    pub fn set_position(&mut self, idx: usize, pos: Vec3) {
        self.bodies.set_position(idx, pos);
    }

    pub fn set_velocity(&mut self, idx: usize, vel: Vec3) {
        self.bodies.set_velocity(idx, vel);
    }

    /// Advance every body by one step, in place.
    pub fn update(&mut self, time: &FrameTime) -> StepReport {
        let mut report = StepReport::default();
        let count = self.bodies.count();
        if count == 0 {
            return report;
        }

        let anchor = if self.config.control_sphere0 {
            Some(forces::follow_control_target(&mut self.bodies, self.center))
        } else {
            None
        };
        let start = if anchor.is_some() { 1 } else { 0 };

        forces::integrate(&mut self.bodies, &self.config, start, time.delta);

        let anchor_radius = self.bodies.size(0);
        for idx in start..count {
            let radius = self.bodies.size(idx);
            let mut pos = self.bodies.position(idx);
            let mut vel = self.bodies.velocity(idx);

            report.contacts += collision::resolve_pairs(&mut self.bodies, idx, &mut pos, &mut vel);

            if let Some(anchor) = anchor {
                if collision::resolve_control_contact(anchor, anchor_radius, radius, &mut pos, &mut vel) {
                    report.control_contacts += 1;
                }
            }

            report.wall_hits += bounds::apply_walls(&self.config, radius, &mut pos, &mut vel);

            self.bodies.set_position(idx, pos);
            self.bodies.set_velocity(idx, vel);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config(count: usize) -> SimulationConfig {
        SimulationConfig {
            count,
            gravity: 0.0,
            min_size: 1.0,
            max_size: 1.0,
            size0: 1.0,
            max_x: 50.0,
            max_y: 50.0,
            max_z: 50.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn construction_places_body_zero_at_center_and_sizes_in_range() {
        let config = SimulationConfig { count: 64, ..SimulationConfig::default() };
        let physics = Physics::with_seed(config.clone(), 99);

        assert_eq!(physics.position(0), Vec3::zero());
        assert_eq!(physics.size(0), config.size0);
        for idx in 1..physics.count() {
            let p = physics.position(idx);
            assert!(p.x.abs() <= config.max_x);
            assert!(p.y.abs() <= config.max_y);
            assert!(p.z.abs() <= config.max_z);
            let s = physics.size(idx);
            assert!(s >= config.min_size && s <= config.max_size);
        }
    }

    #[test]
    fn zero_bodies_is_a_no_op() {
        let config = SimulationConfig { count: 0, control_sphere0: true, ..SimulationConfig::default() };
        let mut physics = Physics::with_seed(config, 1);
        let report = physics.update(&FrameTime::new(0.016, 0.016));
        assert_eq!(report, StepReport::default());
        assert_eq!(physics.count(), 0);
    }

    #[test]
    fn integration_caps_speed_before_collisions() {
        let config = SimulationConfig { count: 40, max_velocity: 0.05, ..SimulationConfig::default() };
        let mut physics = Physics::with_seed(config.clone(), 5);
        for idx in 0..physics.count() {
            physics.set_velocity(idx, Vec3::new(3.0, -4.0, 1.0));
        }

        for _ in 0..10 {
            forces::integrate(&mut physics.bodies, &config, 0, 0.5);
            for idx in 0..physics.count() {
                assert!(physics.velocity(idx).length() <= config.max_velocity + 1e-6);
            }
        }
    }

    #[test]
    fn overlapping_pair_separates_symmetrically() {
        let mut physics = Physics::with_seed(still_config(2), 3);
        physics.set_position(0, Vec3::new(-0.75, 0.0, 0.0));
        physics.set_position(1, Vec3::new(0.75, 0.0, 0.0));

        let report = physics.update(&FrameTime::new(0.0, 0.0));

        assert_eq!(report.contacts, 1);
        let a = physics.position(0);
        let b = physics.position(1);
        assert!(a.distance(b) >= 2.0 - 1e-5);
        assert!((a.x + 1.0).abs() < 1e-5);
        assert!((b.x - 1.0).abs() < 1e-5);
        // impulse floor of 1 applies to resting bodies
        assert!((physics.velocity(0).x + 0.25).abs() < 1e-5);
        assert!((physics.velocity(1).x - 0.25).abs() < 1e-5);
    }

    #[test]
    fn pair_impulse_scales_with_own_speed() {
        let config = SimulationConfig { max_velocity: 10.0, friction: 1.0, ..still_config(2) };
        let mut fast = Physics::with_seed(config, 3);
        fast.set_position(0, Vec3::new(-0.75, -3.0, 0.0));
        fast.set_position(1, Vec3::new(0.75, 0.0, 0.0));
        fast.set_velocity(0, Vec3::new(0.0, 3.0, 0.0));

        fast.update(&FrameTime::new(0.0, 0.0));

        // body 0 arrives at y=0 with speed 3, so its push is 0.25 * 3
        let v0 = fast.velocity(0);
        assert!((v0.x + 0.75).abs() < 1e-5);
        assert!((fast.velocity(1).x - 0.25).abs() < 1e-5);
    }

    #[test]
    fn control_sphere_eases_toward_target_without_reaching_it() {
        let config = SimulationConfig { count: 1, control_sphere0: true, ..SimulationConfig::default() };
        let mut physics = Physics::with_seed(config, 11);
        physics.set_position(0, Vec3::new(40.0, -20.0, 10.0));
        physics.set_center(Vec3::zero());

        let mut expected = physics.position(0).length();
        for _ in 0..60 {
            physics.update(&FrameTime::new(0.016, 0.0));
            expected *= 0.9;
            let actual = physics.position(0).length();
            assert!((actual - expected).abs() <= expected * 1e-3);
            assert!(actual > 0.0);
            assert_eq!(physics.velocity(0), Vec3::zero());
        }
    }

    #[test]
    fn control_sphere_shoves_free_bodies_out() {
        let config = SimulationConfig { control_sphere0: true, ..still_config(2) };
        let mut physics = Physics::with_seed(config, 2);
        physics.set_position(0, Vec3::zero());
        physics.set_center(Vec3::zero());
        physics.set_position(1, Vec3::new(1.5, 0.0, 0.0));

        let report = physics.update(&FrameTime::new(0.0, 0.0));

        assert_eq!(report.control_contacts, 1);
        assert_eq!(physics.position(0), Vec3::zero());
        let p1 = physics.position(1);
        assert!((p1.x - 2.0).abs() < 1e-5);
        // pushed with the full overlap and an impulse floor of 2
        assert!((physics.velocity(1).x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn resting_separated_bodies_are_unchanged_at_zero_delta() {
        let config = SimulationConfig { friction: 1.0, ..still_config(3) };
        let mut physics = Physics::with_seed(config, 8);
        physics.set_position(0, Vec3::new(-10.0, 0.0, 0.0));
        physics.set_position(1, Vec3::new(0.0, 0.0, 0.0));
        physics.set_position(2, Vec3::new(10.0, 0.0, 0.0));
        let before: Vec<f32> = physics.bodies().positions.clone();

        let report = physics.update(&FrameTime::new(0.0, 0.0));

        assert_eq!(report, StepReport::default());
        assert_eq!(physics.bodies().positions, before);
        assert!(physics.bodies().velocities.iter().all(|&v| v == 0.0));
    }
}
