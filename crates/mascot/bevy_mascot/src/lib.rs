//! Bevy adapter for the mascot runtime: spawns the rig hierarchy, ticks the
//! scheduler on a fixed timestep and writes the pose into `Transform`s.

use bevy::prelude::*;
use mascot_core::{AnimationState, Companion, CompanionConfig, Pose, SchedulerConfig};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{MascotKeyLight, MascotPart, MascotRoot};
pub use resources::{FixedDt, MascotLight, MascotParts, MascotPointer, MascotRuntime};

/// Ask the scheduler for a state.
#[derive(Event, Debug, Clone, Copy)]
pub struct MascotRequest {
    pub state: AnimationState,
    pub skip_queue: bool,
}

impl MascotRequest {
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            skip_queue: false,
        }
    }
}

/// Turn the head toward a world-space point.
#[derive(Event, Debug, Clone, Copy)]
pub struct MascotLookAt {
    pub point: Vec3,
}

#[derive(Default, Clone)]
pub struct MascotPlugin {
    pub scheduler: SchedulerConfig,
    pub companion: CompanionConfig,
    /// Set when the host spawns its own hierarchy tagged with [`MascotPart`].
    pub skip_rig_spawn: bool,
}

impl Plugin for MascotPlugin {
    fn build(&self, app: &mut App) {
        let companion = Companion::new(
            Pose::default(),
            self.scheduler.clone(),
            self.companion.clone(),
        );
        // a host-inserted FixedDt wins; Bevy's fixed clock is matched to it so
        // scheduler time tracks wall time
        let dt = app
            .world()
            .get_resource::<FixedDt>()
            .map_or_else(|| FixedDt::default().0, |d| d.0);
        app.insert_resource(MascotRuntime(companion))
            .init_resource::<MascotParts>()
            .init_resource::<MascotPointer>()
            .init_resource::<MascotLight>()
            .insert_resource(FixedDt(dt))
            .insert_resource(Time::<Fixed>::from_seconds(f64::from(dt)))
            .add_event::<MascotRequest>()
            .add_event::<MascotLookAt>()
            .add_systems(PostStartup, systems::build_part_index_system)
            .add_systems(FixedUpdate, systems::fixed_update_runtime_system)
            .add_systems(
                Update,
                (
                    systems::handle_requests_system,
                    systems::apply_pose_system,
                    systems::follow_light_system,
                    systems::dispose_on_exit_system,
                )
                    .chain(),
            );
        if !self.skip_rig_spawn {
            app.add_systems(Startup, systems::spawn_rig_system);
        }
    }
}
