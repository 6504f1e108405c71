//! Pose model and the pose-target contract the scheduler drives.

use serde::{Deserialize, Serialize};

use crate::math::{add3, euler_from_quat, quat_from_euler, rotate3, Quat, Vec3};
use crate::motion;
use crate::rig::{Rig, RigPart};
use crate::state::AnimationState;

/// Renderer-side collaborator mutated by the scheduler.
///
/// Hosts that own their own scene graph implement this directly; [`Pose`]
/// is the built-in implementation over the robot rig.
pub trait PoseTarget {
    /// Return every part to the canonical idle pose.
    fn reset_pose(&mut self);

    /// Apply the visual transformation of `state` at `progress` in [0, 1].
    fn apply_motion(&mut self, state: AnimationState, progress: f32);

    /// Idle breathing: vertical body scale.
    fn set_breath(&mut self, scale_y: f32);

    fn head_world_position(&self) -> Vec3;

    fn head_rotation(&self) -> Quat;

    fn set_head_rotation(&mut self, rotation: Quat);

    /// Spin the whole character about its vertical-facing z axis.
    fn spin_root(&mut self, _radians: f32) {}
}

/// Local TRS of one part. Rotation is kept as XYZ Euler angles so motion
/// curves can drive single axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl PartTransform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    #[inline]
    pub fn quaternion(&self) -> Quat {
        quat_from_euler(self.rotation)
    }
}

/// Current transforms of every rig part.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    rest: [PartTransform; RigPart::COUNT],
    parts: [PartTransform; RigPart::COUNT],
}

impl Pose {
    pub fn from_rig(rig: &Rig) -> Self {
        let mut rest = [PartTransform::at([0.0; 3]); RigPart::COUNT];
        for part in RigPart::ALL {
            rest[part.index()] = PartTransform::at(rig.rest_translation(part));
        }
        Self { rest, parts: rest }
    }

    #[inline]
    pub fn part(&self, part: RigPart) -> &PartTransform {
        &self.parts[part.index()]
    }

    #[inline]
    pub fn part_mut(&mut self, part: RigPart) -> &mut PartTransform {
        &mut self.parts[part.index()]
    }

    #[inline]
    pub fn rest(&self, part: RigPart) -> &PartTransform {
        &self.rest[part.index()]
    }

    pub fn is_at_rest(&self) -> bool {
        self.parts == self.rest
    }

    /// Snapshot keyed by part, suitable for JSON transport.
    pub fn snapshot(&self) -> PoseSnapshot {
        PoseSnapshot {
            parts: RigPart::ALL
                .iter()
                .map(|part| PartSample {
                    part: *part,
                    translation: self.part(*part).translation,
                    rotation: self.part(*part).quaternion(),
                    scale: self.part(*part).scale,
                })
                .collect(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_rig(&Rig::robot())
    }
}

impl PoseTarget for Pose {
    fn reset_pose(&mut self) {
        self.parts = self.rest;
    }

    fn apply_motion(&mut self, state: AnimationState, progress: f32) {
        motion::apply(self, state, progress);
    }

    fn set_breath(&mut self, scale_y: f32) {
        self.part_mut(RigPart::Body).scale[1] = scale_y;
    }

    fn head_world_position(&self) -> Vec3 {
        let root = self.part(RigPart::Root);
        let head = self.part(RigPart::Head).translation;
        let scaled = [
            head[0] * root.scale[0],
            head[1] * root.scale[1],
            head[2] * root.scale[2],
        ];
        add3(root.translation, rotate3(root.quaternion(), scaled))
    }

    fn head_rotation(&self) -> Quat {
        self.part(RigPart::Head).quaternion()
    }

    fn set_head_rotation(&mut self, rotation: Quat) {
        self.part_mut(RigPart::Head).rotation = euler_from_quat(rotation);
    }

    fn spin_root(&mut self, radians: f32) {
        self.part_mut(RigPart::Root).rotation[2] += radians;
    }
}

/// One part's transform with rotation as a quaternion (x, y, z, w).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartSample {
    pub part: RigPart,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub parts: Vec<PartSample>,
}

impl PoseSnapshot {
    pub fn get(&self, part: RigPart) -> Option<&PartSample> {
        self.parts.iter().find(|p| p.part == part)
    }
}
