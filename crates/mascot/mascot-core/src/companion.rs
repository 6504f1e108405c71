//! Per-frame driver pairing the scheduler with pointer input: the mascot
//! watches a nearby cursor, smiles when it comes close, and slowly spins.

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::math::Vec3;
use crate::pose::PoseTarget;
use crate::rig::CameraSpec;
use crate::scheduler::{RequestOptions, Scheduler};
use crate::state::AnimationState;
use crate::tracking::{light_position, world_point, PointerSample};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Pointer distance (px from canvas center) within which the head follows it.
    pub proximity_radius: f32,
    /// Pointer distance that makes an idle mascot smile.
    pub smile_radius: f32,
    /// Distance from the camera at which the pointer ray is sampled.
    pub look_distance: f32,
    /// Root spin about z, radians per second.
    pub spin_rate: f32,
    pub camera: CameraSpec,
    pub aspect: f32,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 400.0,
            smile_radius: 150.0,
            look_distance: 2.5,
            spin_rate: 0.1,
            camera: CameraSpec::default(),
            aspect: 1.0,
        }
    }
}

pub struct Companion<T: PoseTarget> {
    cfg: CompanionConfig,
    scheduler: Scheduler<T>,
    pointer: PointerSample,
}

impl<T: PoseTarget> Companion<T> {
    pub fn new(target: T, scheduler_cfg: SchedulerConfig, cfg: CompanionConfig) -> Self {
        Self {
            cfg,
            scheduler: Scheduler::new(target, scheduler_cfg),
            pointer: PointerSample::AWAY,
        }
    }

    /// Wrap an existing scheduler.
    pub fn with_scheduler(scheduler: Scheduler<T>, cfg: CompanionConfig) -> Self {
        Self {
            cfg,
            scheduler,
            pointer: PointerSample::AWAY,
        }
    }

    /// Run one frame. `pointer` replaces the remembered sample when present.
    /// Returns the key light position for the frame.
    pub fn frame(&mut self, dt_ms: f64, pointer: Option<PointerSample>) -> Vec3 {
        if let Some(sample) = pointer {
            self.pointer = sample;
        }
        let light = light_position(self.pointer.normalized_x, self.pointer.normalized_y);
        if self.scheduler.is_disposed() {
            return light;
        }

        self.scheduler.advance(dt_ms);

        let motion_allowed = !self.scheduler.config().reduced_motion;
        if motion_allowed && self.pointer.is_within(self.cfg.proximity_radius) {
            let point = world_point(
                &self.cfg.camera,
                self.cfg.aspect,
                [self.pointer.normalized_x, self.pointer.normalized_y],
                self.cfg.look_distance,
            );
            self.scheduler.look_at(point);

            if self.pointer.is_within(self.cfg.smile_radius)
                && self.scheduler.current_state() == AnimationState::Idle
            {
                self.scheduler
                    .request_state(AnimationState::Smile, RequestOptions::default());
            }
        }

        let spin = (dt_ms / 1000.0) as f32 * self.cfg.spin_rate;
        self.scheduler.target_mut().spin_root(spin);
        light
    }

    #[inline]
    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler<T> {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler<T> {
        &mut self.scheduler
    }

    #[inline]
    pub fn config(&self) -> &CompanionConfig {
        &self.cfg
    }

    pub fn dispose(&mut self) {
        self.scheduler.dispose();
    }

    pub fn into_scheduler(self) -> Scheduler<T> {
        self.scheduler
    }
}
