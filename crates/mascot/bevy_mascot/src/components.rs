use bevy::prelude::*;
use mascot_core::RigPart;

/// Marker on the entity the mascot hierarchy hangs from. The part index is
/// built by walking descendants of any entity carrying it.
#[derive(Component)]
pub struct MascotRoot;

/// Binds an entity's `Transform` to one rig part.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MascotPart(pub RigPart);

/// Marker for the directional light that follows the pointer.
#[derive(Component)]
pub struct MascotKeyLight;
