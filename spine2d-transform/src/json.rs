//! Loading [`SkeletonData`] from skeleton JSON (`bones` and `transform` sections).

use crate::{BoneData, Error, SkeletonData, TransformConstraintData};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

fn default_one() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    bones: Vec<BoneDef>,
    #[serde(default)]
    transform: Vec<TransformConstraintDef>,
}

#[derive(Debug, Deserialize)]
struct BoneDef {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    length: f32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_one", rename = "scaleX")]
    scale_x: f32,
    #[serde(default = "default_one", rename = "scaleY")]
    scale_y: f32,
    #[serde(default, rename = "shearX")]
    shear_x: f32,
    #[serde(default, rename = "shearY")]
    shear_y: f32,
}

#[derive(Debug, Deserialize)]
struct TransformConstraintDef {
    name: String,
    #[serde(default)]
    order: i32,
    bones: Vec<String>,
    target: String,

    #[serde(default = "default_one", rename = "rotateMix")]
    rotate_mix: f32,
    #[serde(default = "default_one", rename = "translateMix")]
    translate_mix: f32,
    #[serde(default = "default_one", rename = "scaleMix")]
    scale_mix: f32,
    #[serde(default = "default_one", rename = "shearMix")]
    shear_mix: f32,

    #[serde(default)]
    rotation: f32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default, rename = "scaleX")]
    scale_x: f32,
    #[serde(default, rename = "scaleY")]
    scale_y: f32,
    #[serde(default, rename = "shearY")]
    shear_y: f32,
}

impl SkeletonData {
    pub fn from_json_str(input: &str) -> Result<Arc<Self>, Error> {
        Self::from_json_str_with_scale(input, 1.0)
    }

    /// Parses skeleton JSON, multiplying bone positions, lengths and translation offsets by
    /// `scale`.
    pub fn from_json_str_with_scale(input: &str, scale: f32) -> Result<Arc<Self>, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;
        let scale = if scale.is_finite() { scale } else { 1.0 };

        let mut bones = Vec::with_capacity(root.bones.len());
        let mut bone_index = HashMap::<String, usize>::new();
        for bone in root.bones {
            let parent = match bone.parent.as_deref() {
                None => None,
                Some(parent_name) => {
                    Some(bone_index.get(parent_name).copied().ok_or_else(|| {
                        Error::JsonUnknownBoneParent {
                            bone: bone.name.clone(),
                            parent: parent_name.to_string(),
                        }
                    })?)
                }
            };

            if bone_index.insert(bone.name.clone(), bones.len()).is_some() {
                return Err(Error::JsonDuplicateBone { bone: bone.name });
            }
            bones.push(BoneData {
                name: bone.name,
                parent,
                length: bone.length * scale,
                x: bone.x * scale,
                y: bone.y * scale,
                rotation: bone.rotation,
                scale_x: bone.scale_x,
                scale_y: bone.scale_y,
                shear_x: bone.shear_x,
                shear_y: bone.shear_y,
            });
        }

        let mut transform_constraints = Vec::with_capacity(root.transform.len());
        for c in root.transform {
            if c.bones.is_empty() {
                return Err(Error::JsonEmptyConstraintBones { constraint: c.name });
            }
            for bone in c.bones.iter().chain(std::iter::once(&c.target)) {
                if !bone_index.contains_key(bone) {
                    return Err(Error::JsonUnknownConstraintBone {
                        constraint: c.name.clone(),
                        bone: bone.clone(),
                    });
                }
            }
            if c.bones.contains(&c.target) {
                log::warn!(
                    "transform constraint '{}' drives its own target bone '{}'",
                    c.name,
                    c.target
                );
            }

            transform_constraints.push(Arc::new(TransformConstraintData {
                name: c.name,
                order: c.order,
                bones: c.bones,
                target: c.target,
                rotate_mix: c.rotate_mix,
                translate_mix: c.translate_mix,
                scale_mix: c.scale_mix,
                shear_mix: c.shear_mix,
                offset_rotation: c.rotation,
                offset_x: c.x * scale,
                offset_y: c.y * scale,
                offset_scale_x: c.scale_x,
                offset_scale_y: c.scale_y,
                offset_shear_y: c.shear_y,
            }));
        }

        log::debug!(
            "loaded skeleton data: {} bones, {} transform constraints",
            bones.len(),
            transform_constraints.len()
        );
        Ok(Arc::new(SkeletonData {
            bones,
            transform_constraints,
        }))
    }
}
