use crate::runtime::bone::RootTransform;
use crate::{Bone, BoneLookup, Error, SkeletonData, TransformConstraint, Updatable};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Skeleton {
    pub data: Arc<SkeletonData>,
    pub bones: Vec<Bone>,
    bone_children: Vec<Vec<usize>>,
    pub transform_constraints: Vec<TransformConstraint>,
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    update_cache: Vec<UpdateCacheItem>,
}

/// One step of the per-frame pass, in the order [`Skeleton::update_world_transform`] runs them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UpdateCacheItem {
    Bone(usize),
    Transform(usize),
}

impl Skeleton {
    pub fn new(data: Arc<SkeletonData>) -> Result<Self, Error> {
        for (index, bone) in data.bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= index {
                    return Err(Error::BoneParentOrder {
                        bone: bone.name.clone(),
                        parent,
                    });
                }
            }
        }

        let bones: Vec<Bone> = data
            .bones
            .iter()
            .enumerate()
            .map(|(index, bone)| Bone::new(index, bone))
            .collect();
        let bone_children = build_bone_children_indices(&bones);

        let mut skeleton = Self {
            data: Arc::clone(&data),
            bones,
            bone_children,
            transform_constraints: Vec::new(),
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            update_cache: Vec::new(),
        };

        let transform_constraints = data
            .transform_constraints
            .iter()
            .map(|c| TransformConstraint::new(Arc::clone(c), &skeleton))
            .collect::<Result<Vec<_>, _>>()?;
        skeleton.transform_constraints = transform_constraints;
        skeleton.update_cache();

        log::debug!(
            "skeleton created: {} bones, {} transform constraints",
            skeleton.bones.len(),
            skeleton.transform_constraints.len()
        );
        Ok(skeleton)
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| {
            self.data
                .bones
                .get(bone.data_index())
                .is_some_and(|data| data.name == name)
        })
    }

    pub fn find_transform_constraint(&self, name: &str) -> Option<&TransformConstraint> {
        self.transform_constraints
            .iter()
            .find(|c| c.data().name == name)
    }

    pub fn find_transform_constraint_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut TransformConstraint> {
        self.transform_constraints
            .iter_mut()
            .find(|c| c.data().name == name)
    }

    pub fn update_cache_items(&self) -> &[UpdateCacheItem] {
        &self.update_cache
    }

    /// Rebuilds the per-frame update order.
    ///
    /// Constraints run by ascending `order`. Each constraint runs after its target and driven
    /// bones are computed, and the driven bones' descendants are computed again afterwards.
    pub fn update_cache(&mut self) {
        fn sort_bone(
            skeleton: &Skeleton,
            bone_index: usize,
            sorted: &mut [bool],
            out: &mut Vec<UpdateCacheItem>,
        ) {
            if bone_index >= sorted.len() || sorted[bone_index] {
                return;
            }
            if let Some(parent) = skeleton.bones[bone_index].parent_index() {
                sort_bone(skeleton, parent, sorted, out);
            }
            sorted[bone_index] = true;
            out.push(UpdateCacheItem::Bone(bone_index));
        }

        fn sort_reset_children(skeleton: &Skeleton, bone_index: usize, sorted: &mut [bool]) {
            let Some(children) = skeleton.bone_children.get(bone_index) else {
                return;
            };
            for &child in children {
                if sorted[child] {
                    sort_reset_children(skeleton, child, sorted);
                }
                sorted[child] = false;
            }
        }

        let out = {
            let skeleton: &Skeleton = &*self;
            let mut out = Vec::<UpdateCacheItem>::new();
            let mut sorted = vec![false; skeleton.bones.len()];

            let mut ordered: Vec<usize> = (0..skeleton.transform_constraints.len()).collect();
            ordered.sort_by_key(|&index| skeleton.transform_constraints[index].data().order);

            for index in ordered {
                let constraint = &skeleton.transform_constraints[index];
                sort_bone(skeleton, constraint.target, &mut sorted, &mut out);
                for &bone in &constraint.bones {
                    sort_bone(skeleton, bone, &mut sorted, &mut out);
                }
                out.push(UpdateCacheItem::Transform(index));
                for &bone in &constraint.bones {
                    sort_reset_children(skeleton, bone, &mut sorted);
                }
                for &bone in &constraint.bones {
                    if let Some(s) = sorted.get_mut(bone) {
                        *s = true;
                    }
                }
            }

            for bone in 0..skeleton.bones.len() {
                sort_bone(skeleton, bone, &mut sorted, &mut out);
            }
            out
        };

        log::debug!("update cache rebuilt with {} items", out.len());
        self.update_cache = out;
    }

    pub fn update_world_transform(&mut self) {
        let cache = std::mem::take(&mut self.update_cache);
        for item in cache.iter().copied() {
            match item {
                UpdateCacheItem::Bone(bone_index) => self.update_bone_world_transform(bone_index),
                UpdateCacheItem::Transform(index) => {
                    if let Some(constraint) = self.transform_constraints.get_mut(index) {
                        constraint.apply(&mut self.bones);
                    }
                }
            }
        }
        self.update_cache = cache;
    }

    fn update_bone_world_transform(&mut self, bone_index: usize) {
        let root = RootTransform {
            x: self.x,
            y: self.y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
        };
        // Parents precede children, so the parent is always in `head`.
        let split = bone_index.min(self.bones.len());
        let (head, tail) = self.bones.split_at_mut(split);
        let Some(bone) = tail.first_mut() else {
            return;
        };
        let parent = bone.parent_index().and_then(|p| head.get(p));
        bone.update_world_transform(parent, root);
    }

    /// Resets bone local poses and constraint mixes to the setup pose.
    pub fn set_to_setup_pose(&mut self) {
        for bone in &mut self.bones {
            if let Some(data) = self.data.bones.get(bone.data_index()) {
                bone.set_to_setup_pose(data);
            }
        }
        for constraint in &mut self.transform_constraints {
            constraint.set_to_setup_pose();
        }
    }
}

impl BoneLookup for Skeleton {
    fn find_bone(&self, name: &str) -> Option<usize> {
        Skeleton::find_bone(self, name)
    }
}

fn build_bone_children_indices(bones: &[Bone]) -> Vec<Vec<usize>> {
    let mut children = vec![Vec::new(); bones.len()];
    for (index, bone) in bones.iter().enumerate() {
        if let Some(parent) = bone.parent_index() {
            if let Some(list) = children.get_mut(parent) {
                list.push(index);
            }
        }
    }
    children
}
