use std::collections::HashMap;

use bevy::prelude::*;
use mascot_core::{Companion, PointerSample, Pose, RigPart};

/// The mascot runtime: scheduler, pose and companion behavior.
#[derive(Resource)]
pub struct MascotRuntime(pub Companion<Pose>);

/// Rig part -> entity, rebuilt by walking under [`crate::MascotRoot`].
#[derive(Resource, Default)]
pub struct MascotParts {
    pub map: HashMap<RigPart, Entity>,
}

/// Latest pointer sample, written by the host's input handling.
#[derive(Resource, Default, Clone, Copy)]
pub struct MascotPointer(pub PointerSample);

/// Key light position computed on the last tick.
#[derive(Resource, Clone, Copy)]
pub struct MascotLight(pub Vec3);

impl Default for MascotLight {
    fn default() -> Self {
        Self(Vec3::new(0.0, 8.0, 5.0))
    }
}

/// Fixed timestep configuration (seconds per tick).
#[derive(Resource)]
pub struct FixedDt(pub f32);

impl Default for FixedDt {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}
