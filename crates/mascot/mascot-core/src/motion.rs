//! Motion curves for each transient state, driven by progress in [0, 1].

use std::f32::consts::PI;

use crate::config::BreathConfig;
use crate::pose::Pose;
use crate::rig::RigPart;
use crate::state::AnimationState;

/// Eye vertical scale while blinking: closes by the midpoint, reopens by the end.
#[inline]
pub fn blink_eye_scale(progress: f32) -> f32 {
    1.0 - (progress * 2.0).min(1.0).min((1.0 - progress) * 2.0)
}

/// Sine bump peaking at the midpoint.
#[inline]
fn bump(progress: f32) -> f32 {
    (progress * PI).sin()
}

/// Body vertical scale at `t_secs` on the scheduler clock.
#[inline]
pub fn breath_scale(cfg: &BreathConfig, t_secs: f32) -> f32 {
    1.0 + (t_secs * cfg.rate).sin() * cfg.amplitude
}

/// Write the pose for `state` at `progress`. Idle and look-at have no curve.
pub fn apply(pose: &mut Pose, state: AnimationState, progress: f32) {
    let p = progress.clamp(0.0, 1.0);
    match state {
        AnimationState::Blink => {
            let s = blink_eye_scale(p);
            pose.part_mut(RigPart::LeftEye).scale[1] = s;
            pose.part_mut(RigPart::RightEye).scale[1] = s;
        }
        AnimationState::Smile => {
            let e = bump(p);
            let rest_y = pose.rest(RigPart::Mouth).translation[1];
            let mouth = pose.part_mut(RigPart::Mouth);
            mouth.scale[0] = 1.0 + e * 0.3;
            mouth.translation[1] = rest_y + e * 0.05;
        }
        AnimationState::Wave => {
            let start = pose.rest(RigPart::RightArm).rotation[2];
            pose.part_mut(RigPart::RightArm).rotation[2] = start + (p * PI * 4.0).sin() * 0.8;
        }
        AnimationState::Surprised => {
            let e = bump(p) * 0.5 + 0.5;
            let rest_y = pose.rest(RigPart::Head).translation[1];
            let head = pose.part_mut(RigPart::Head);
            head.rotation[2] = e * 0.2;
            head.translation[1] = rest_y + e * 0.1;
            pose.part_mut(RigPart::LeftEye).scale[1] = 1.0 + e * 0.4;
            pose.part_mut(RigPart::RightEye).scale[1] = 1.0 + e * 0.4;
        }
        AnimationState::Shy => {
            let e = bump(p);
            let rest_x = pose.rest(RigPart::Root).translation[0];
            let root = pose.part_mut(RigPart::Root);
            root.rotation[1] = e * 0.5;
            root.translation[0] = rest_x - e * 0.2;
            pose.part_mut(RigPart::Head).rotation[1] = e * 0.3;
        }
        AnimationState::Idle | AnimationState::LookAt => {}
    }
}
