//! Procedural description of the robot mascot.
//!
//! The rig is pure data: part hierarchy, primitive shapes, materials and rest
//! translations. Renderers (web, Bevy) build their meshes from it; the runtime
//! only animates part transforms.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Animatable parts of the robot. Each part is a transform node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RigPart {
    Root,
    Body,
    Head,
    LeftEye,
    RightEye,
    Mouth,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl RigPart {
    pub const COUNT: usize = 10;

    pub const ALL: [RigPart; Self::COUNT] = [
        Self::Root,
        Self::Body,
        Self::Head,
        Self::LeftEye,
        Self::RightEye,
        Self::Mouth,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftLeg,
        Self::RightLeg,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name used for scene nodes and canonical target paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "Robot",
            Self::Body => "Body",
            Self::Head => "Head",
            Self::LeftEye => "LeftEye",
            Self::RightEye => "RightEye",
            Self::Mouth => "Mouth",
            Self::LeftArm => "LeftArm",
            Self::RightArm => "RightArm",
            Self::LeftLeg => "LeftLeg",
            Self::RightLeg => "RightLeg",
        }
    }

    pub fn parent(self) -> Option<RigPart> {
        match self {
            Self::Root => None,
            Self::LeftEye | Self::RightEye | Self::Mouth => Some(Self::Head),
            _ => Some(Self::Root),
        }
    }
}

/// Physically based material parameters. Colors are 0xRRGGBB.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: u32,
}

impl Material {
    pub const BODY: Material = Material {
        color: 0x00d4ff,
        metalness: 0.6,
        roughness: 0.4,
        emissive: 0x004466,
    };
    pub const HEAD: Material = Material {
        color: 0x00d4ff,
        metalness: 0.5,
        roughness: 0.3,
        emissive: 0x003344,
    };
    pub const EYE: Material = Material {
        color: 0xff006e,
        metalness: 0.8,
        roughness: 0.2,
        emissive: 0xff006e,
    };
    pub const DETAIL: Material = Material {
        color: 0x7c3aed,
        metalness: 0.4,
        roughness: 0.5,
        emissive: 0x3d1a7d,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        size: Vec3,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
}

/// One mesh attached to a part, offset from the part's origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub primitive: Primitive,
    pub material: Material,
    pub offset: Vec3,
    pub cast_shadow: bool,
}

impl Shape {
    fn new(primitive: Primitive, material: Material) -> Self {
        Self {
            primitive,
            material,
            offset: [0.0; 3],
            cast_shadow: true,
        }
    }

    fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigNode {
    pub part: RigPart,
    pub name: String,
    pub parent: Option<RigPart>,
    /// Rest translation relative to the parent.
    pub translation: Vec3,
    pub shapes: Vec<Shape>,
}

/// Complete robot description. Nodes are ordered parents-first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    pub nodes: Vec<RigNode>,
}

impl Rig {
    /// The portfolio robot built from boxes, cylinders and spheres.
    pub fn robot() -> Self {
        let arm = Primitive::Cylinder {
            radius_top: 0.08,
            radius_bottom: 0.08,
            height: 0.6,
            segments: 16,
        };
        let hand = Primitive::Box {
            size: [0.12, 0.15, 0.1],
        };
        let leg = Primitive::Cylinder {
            radius_top: 0.1,
            radius_bottom: 0.08,
            height: 0.5,
            segments: 16,
        };
        let eye = Primitive::Sphere {
            radius: 0.08,
            segments: 16,
        };
        let arm_shapes = || {
            vec![
                Shape::new(arm, Material::BODY).at([0.0, -0.3, 0.0]),
                Shape::new(hand, Material::DETAIL).at([0.0, -0.65, 0.0]),
            ]
        };

        let node = |part: RigPart, translation: Vec3, shapes: Vec<Shape>| RigNode {
            part,
            name: part.name().to_string(),
            parent: part.parent(),
            translation,
            shapes,
        };

        Self {
            nodes: vec![
                node(RigPart::Root, [0.0, 0.0, 0.0], Vec::new()),
                node(
                    RigPart::Body,
                    [0.0, -0.2, 0.0],
                    vec![Shape::new(
                        Primitive::Box {
                            size: [0.6, 1.0, 0.4],
                        },
                        Material::BODY,
                    )],
                ),
                node(
                    RigPart::Head,
                    [0.0, 0.8, 0.0],
                    vec![
                        Shape::new(
                            Primitive::Box {
                                size: [0.5, 0.6, 0.45],
                            },
                            Material::HEAD,
                        ),
                        // antenna
                        Shape::new(
                            Primitive::Cylinder {
                                radius_top: 0.05,
                                radius_bottom: 0.05,
                                height: 0.3,
                                segments: 8,
                            },
                            Material::DETAIL,
                        )
                        .at([0.15, 0.35, 0.0]),
                    ],
                ),
                node(
                    RigPart::LeftEye,
                    [-0.12, 0.15, 0.25],
                    vec![Shape::new(eye, Material::EYE)],
                ),
                node(
                    RigPart::RightEye,
                    [0.12, 0.15, 0.25],
                    vec![Shape::new(eye, Material::EYE)],
                ),
                node(
                    RigPart::Mouth,
                    [0.0, -0.1, 0.23],
                    vec![Shape::new(
                        Primitive::Box {
                            size: [0.2, 0.03, 0.02],
                        },
                        Material::EYE,
                    )],
                ),
                node(RigPart::LeftArm, [-0.35, 0.2, 0.0], arm_shapes()),
                node(RigPart::RightArm, [0.35, 0.2, 0.0], arm_shapes()),
                node(
                    RigPart::LeftLeg,
                    [-0.2, -0.7, 0.0],
                    vec![Shape::new(leg, Material::BODY)],
                ),
                node(
                    RigPart::RightLeg,
                    [0.2, -0.7, 0.0],
                    vec![Shape::new(leg, Material::BODY)],
                ),
            ],
        }
    }

    pub fn node(&self, part: RigPart) -> Option<&RigNode> {
        self.nodes.iter().find(|n| n.part == part)
    }

    /// Rest translation of a part, zero for parts missing from the rig.
    pub fn rest_translation(&self, part: RigPart) -> Vec3 {
        self.node(part).map(|n| n.translation).unwrap_or([0.0; 3])
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::robot()
    }
}

/// Perspective camera looking down -Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 2.5],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub color: u32,
    pub intensity: f32,
    /// None for ambient lights.
    pub position: Option<Vec3>,
    pub cast_shadow: bool,
}

/// Stage the robot is presented on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub background: u32,
    pub camera: CameraSpec,
    pub ambient: LightSpec,
    /// Follows the pointer, see `tracking::light_position`.
    pub key_light: LightSpec,
    pub fill_light: LightSpec,
    /// Height of the shadow-receiving ground plane.
    pub ground_y: f32,
    pub shadow_opacity: f32,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            background: 0x0f0f1e,
            camera: CameraSpec::default(),
            ambient: LightSpec {
                color: 0xffffff,
                intensity: 0.5,
                position: None,
                cast_shadow: false,
            },
            key_light: LightSpec {
                color: 0x00d4ff,
                intensity: 1.2,
                position: Some([5.0, 8.0, 5.0]),
                cast_shadow: true,
            },
            fill_light: LightSpec {
                color: 0x7c3aed,
                intensity: 0.6,
                position: Some([-5.0, 4.0, -5.0]),
                cast_shadow: false,
            },
            ground_y: -1.0,
            shadow_opacity: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_parents_first_and_complete() {
        let rig = Rig::robot();
        assert_eq!(rig.nodes.len(), RigPart::COUNT);
        for (i, node) in rig.nodes.iter().enumerate() {
            assert_eq!(node.part, RigPart::ALL[i]);
            if let Some(parent) = node.parent {
                assert!(parent.index() < i, "{:?} listed before parent", node.part);
            }
        }
    }

    #[test]
    fn eyes_and_mouth_hang_off_the_head() {
        let rig = Rig::robot();
        for part in [RigPart::LeftEye, RigPart::RightEye, RigPart::Mouth] {
            assert_eq!(rig.node(part).unwrap().parent, Some(RigPart::Head));
        }
        assert_eq!(rig.rest_translation(RigPart::Head), [0.0, 0.8, 0.0]);
    }

    #[test]
    fn primitive_json_is_tagged() {
        let json = serde_json::to_value(Primitive::Sphere {
            radius: 0.08,
            segments: 16,
        })
        .unwrap();
        assert_eq!(json["type"], "sphere");
    }
}
