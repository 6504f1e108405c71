#![allow(dead_code)]

use mascot_core::math::QUAT_IDENTITY;
use mascot_core::{AnimationState, PoseTarget, Quat, SchedulerConfig, Vec3};
use mascot_test_fixtures::configs;

/// Pose target that records every call the scheduler makes.
#[derive(Debug)]
pub struct RecordingTarget {
    pub resets: usize,
    pub motions: Vec<(AnimationState, f32)>,
    pub breaths: Vec<f32>,
    pub head_rotation: Quat,
    pub head_sets: usize,
    pub spin: f32,
}

impl Default for RecordingTarget {
    fn default() -> Self {
        Self {
            resets: 0,
            motions: Vec::new(),
            breaths: Vec::new(),
            head_rotation: QUAT_IDENTITY,
            head_sets: 0,
            spin: 0.0,
        }
    }
}

impl RecordingTarget {
    pub fn calls(&self) -> usize {
        self.resets + self.motions.len() + self.breaths.len() + self.head_sets
    }

    pub fn motions_for(&self, state: AnimationState) -> Vec<f32> {
        self.motions
            .iter()
            .filter(|(s, _)| *s == state)
            .map(|(_, p)| *p)
            .collect()
    }
}

impl PoseTarget for RecordingTarget {
    fn reset_pose(&mut self) {
        self.resets += 1;
    }

    fn apply_motion(&mut self, state: AnimationState, progress: f32) {
        self.motions.push((state, progress));
    }

    fn set_breath(&mut self, scale_y: f32) {
        self.breaths.push(scale_y);
    }

    fn head_world_position(&self) -> Vec3 {
        [0.0, 0.8, 0.0]
    }

    fn head_rotation(&self) -> Quat {
        self.head_rotation
    }

    fn set_head_rotation(&mut self, rotation: Quat) {
        self.head_sets += 1;
        self.head_rotation = rotation;
    }

    fn spin_root(&mut self, radians: f32) {
        self.spin += radians;
    }
}

pub fn fixture_config(name: &str) -> SchedulerConfig {
    let text = configs::json(name).unwrap();
    SchedulerConfig::from_json(&text).unwrap()
}

pub fn approx(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "left={a} right={b}");
}
