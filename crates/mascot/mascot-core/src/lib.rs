//! Mascot Core (engine-agnostic)
//!
//! Runtime for the portfolio robot mascot: a priority scheduler over a fixed
//! set of animation states, the procedural rig and its pose, motion curves,
//! and pointer-driven companion behavior. Renderers plug in through
//! [`PoseTarget`]; time is driven by the host via [`Scheduler::advance`].

pub mod companion;
pub mod config;
pub mod error;
pub mod ids;
pub mod math;
pub mod motion;
pub mod outputs;
pub mod pose;
pub mod rig;
pub mod scheduler;
pub mod state;
pub mod timers;
pub mod tracking;

// Re-exports for consumers (adapters)
pub use companion::{Companion, CompanionConfig};
pub use config::{BlinkInterval, BreathConfig, SchedulerConfig, StateConfig, StateTable};
pub use error::MascotError;
pub use ids::TimerId;
pub use math::{Quat, Vec3};
pub use outputs::SchedulerEvent;
pub use pose::{PartSample, PartTransform, Pose, PoseSnapshot, PoseTarget};
pub use rig::{CameraSpec, LightSpec, Material, Primitive, Rig, RigNode, RigPart, SceneSpec, Shape};
pub use scheduler::{RequestOptions, ScheduledAnimation, Scheduler};
pub use state::AnimationState;
pub use tracking::{light_position, world_point, PointerSample, PointerTracker, Rect};

pub type Result<T> = core::result::Result<T, MascotError>;
