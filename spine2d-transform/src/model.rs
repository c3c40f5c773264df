use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct BoneData {
    pub name: String,
    pub parent: Option<usize>,
    pub length: f32,
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees.
    pub shear_x: f32,
    /// Degrees.
    pub shear_y: f32,
}

impl BoneData {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            length: 0.0,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
        }
    }
}

/// Setup-time description of a transform constraint, shared by every skeleton built from the
/// same [`SkeletonData`].
#[derive(Clone, Debug)]
pub struct TransformConstraintData {
    pub name: String,
    pub order: i32,
    /// Driven bone names, resolved once when a skeleton is instantiated.
    pub bones: Vec<String>,
    pub target: String,

    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,

    /// Degrees.
    pub offset_rotation: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_scale_x: f32,
    pub offset_scale_y: f32,
    /// Degrees.
    pub offset_shear_y: f32,
}

impl TransformConstraintData {
    /// A template with all mixes and offsets at zero.
    pub fn new(name: impl Into<String>, bones: Vec<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: 0,
            bones,
            target: target.into(),
            rotate_mix: 0.0,
            translate_mix: 0.0,
            scale_mix: 0.0,
            shear_mix: 0.0,
            offset_rotation: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            offset_scale_x: 0.0,
            offset_scale_y: 0.0,
            offset_shear_y: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SkeletonData {
    /// Parent bones always precede their children.
    pub bones: Vec<BoneData>,
    pub transform_constraints: Vec<Arc<TransformConstraintData>>,
}

impl SkeletonData {
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn find_transform_constraint(&self, name: &str) -> Option<&Arc<TransformConstraintData>> {
        self.transform_constraints.iter().find(|c| c.name == name)
    }
}

/// Resolves bone names to indices in a skeleton's bone table.
pub trait BoneLookup {
    fn find_bone(&self, name: &str) -> Option<usize>;
}

impl BoneLookup for SkeletonData {
    fn find_bone(&self, name: &str) -> Option<usize> {
        SkeletonData::find_bone(self, name)
    }
}
