use std::collections::HashMap;

use bevy::app::AppExit;
use bevy::prelude::*;
use mascot_core::{RequestOptions, Rig, RigPart};

use crate::components::{MascotKeyLight, MascotPart, MascotRoot};
use crate::resources::{FixedDt, MascotLight, MascotParts, MascotPointer, MascotRuntime};
use crate::{MascotLookAt, MascotRequest};

/// Spawn the robot rig as a transform hierarchy. Meshes are left to the host;
/// each node carries `Name` and [`MascotPart`].
pub fn spawn_rig_system(mut commands: Commands, mut parts: ResMut<MascotParts>) {
    let rig = Rig::robot();
    let mut spawned: HashMap<RigPart, Entity> = HashMap::new();

    for node in &rig.nodes {
        let [x, y, z] = node.translation;
        let id = commands
            .spawn((
                SpatialBundle::from_transform(Transform::from_xyz(x, y, z)),
                Name::new(node.name.clone()),
                MascotPart(node.part),
            ))
            .id();
        match node.parent.and_then(|p| spawned.get(&p)) {
            Some(parent) => {
                commands.entity(*parent).add_child(id);
            }
            None => {
                commands.entity(id).insert(MascotRoot);
            }
        }
        spawned.insert(node.part, id);
    }

    parts.map = spawned;
}

/// Walks descendants under each MascotRoot and records which entity drives
/// which rig part.
pub fn build_part_index_system(
    roots: Query<Entity, With<MascotRoot>>,
    children: Query<&Children>,
    parts: Query<&MascotPart>,
    mut index: ResMut<MascotParts>,
) {
    let mut map: HashMap<RigPart, Entity> = HashMap::new();

    fn walk(
        e: Entity,
        map: &mut HashMap<RigPart, Entity>,
        parts: &Query<&MascotPart>,
        children: &Query<&Children>,
    ) {
        if let Ok(part) = parts.get(e) {
            map.insert(part.0, e);
        }
        if let Ok(cs) = children.get(e) {
            for &c in cs.iter() {
                walk(c, map, parts, children);
            }
        }
    }

    for root in roots.iter() {
        walk(root, &mut map, &parts, &children);
    }
    if !map.is_empty() && map.len() < RigPart::COUNT {
        log::warn!(
            "mascot hierarchy binds {} of {} parts",
            map.len(),
            RigPart::COUNT
        );
    }

    index.map = map;
}

pub fn handle_requests_system(
    mut requests: EventReader<MascotRequest>,
    mut looks: EventReader<MascotLookAt>,
    mut runtime: ResMut<MascotRuntime>,
) {
    let scheduler = runtime.0.scheduler_mut();
    for req in requests.read() {
        scheduler.request_state(
            req.state,
            RequestOptions {
                skip_queue: req.skip_queue,
            },
        );
    }
    for look in looks.read() {
        scheduler.look_at(look.point.to_array());
    }
}

/// Fixed timestep: run one companion frame and stash the light position.
pub fn fixed_update_runtime_system(
    mut runtime: ResMut<MascotRuntime>,
    dt: Res<FixedDt>,
    pointer: Res<MascotPointer>,
    mut light: ResMut<MascotLight>,
) {
    let dt_ms = f64::from(dt.0) * 1000.0;
    let position = runtime.0.frame(dt_ms, Some(pointer.0));
    light.0 = Vec3::from_array(position);
}

/// Copy the runtime pose into the bound entities' transforms.
pub fn apply_pose_system(
    runtime: Res<MascotRuntime>,
    index: Res<MascotParts>,
    mut transforms: Query<&mut Transform, With<MascotPart>>,
) {
    let pose = runtime.0.scheduler().target();
    for (part, entity) in index.map.iter() {
        if let Ok(mut tf) = transforms.get_mut(*entity) {
            let p = pose.part(*part);
            let [x, y, z, w] = p.quaternion();
            tf.translation = Vec3::from_array(p.translation);
            tf.rotation = Quat::from_xyzw(x, y, z, w).normalize();
            tf.scale = Vec3::from_array(p.scale);
        }
    }
}

pub fn follow_light_system(
    light: Res<MascotLight>,
    mut lights: Query<&mut Transform, With<MascotKeyLight>>,
) {
    for mut tf in lights.iter_mut() {
        *tf = Transform::from_translation(light.0).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

pub fn dispose_on_exit_system(mut exits: EventReader<AppExit>, mut runtime: ResMut<MascotRuntime>) {
    if exits.read().next().is_some() {
        runtime.0.dispose();
    }
}
