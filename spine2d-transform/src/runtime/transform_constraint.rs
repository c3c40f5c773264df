use crate::{Bone, BoneLookup, DEG_RAD, Error, TransformConstraintData, Vector2, wrap_pi};
use std::sync::Arc;

/// Axes at or below this length collapse to zero instead of being rescaled.
const MIN_AXIS_LENGTH: f32 = 1.0e-5;

/// Something the skeleton runs once per frame, in update-cache order.
pub trait Updatable {
    fn update(&mut self, bones: &mut [Bone]);

    fn apply(&mut self, bones: &mut [Bone]) {
        self.update(bones);
    }
}

/// Runtime instance of a [`TransformConstraintData`], bound to one skeleton's bones.
#[derive(Clone, Debug)]
pub struct TransformConstraint {
    data: Arc<TransformConstraintData>,
    /// Driven bone indices, in data order.
    pub bones: Vec<usize>,
    pub target: usize,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
    temp: Vector2,
}

impl TransformConstraint {
    pub fn new(
        data: Arc<TransformConstraintData>,
        skeleton: &impl BoneLookup,
    ) -> Result<Self, Error> {
        Self::try_new(Some(data), Some(skeleton))
    }

    /// Like [`TransformConstraint::new`], but reports an absent template or skeleton as
    /// [`Error::InvalidArgument`] before any bone lookup happens.
    pub fn try_new<L: BoneLookup + ?Sized>(
        data: Option<Arc<TransformConstraintData>>,
        skeleton: Option<&L>,
    ) -> Result<Self, Error> {
        let data = data.ok_or(Error::InvalidArgument { name: "data" })?;
        let skeleton = skeleton.ok_or(Error::InvalidArgument { name: "skeleton" })?;

        let resolve = |name: &str| {
            skeleton.find_bone(name).ok_or_else(|| Error::UnknownBone {
                constraint: data.name.clone(),
                bone: name.to_string(),
            })
        };
        let bones = data
            .bones
            .iter()
            .map(|name| resolve(name))
            .collect::<Result<Vec<_>, _>>()?;
        let target = resolve(&data.target)?;

        Ok(Self {
            rotate_mix: data.rotate_mix,
            translate_mix: data.translate_mix,
            scale_mix: data.scale_mix,
            shear_mix: data.shear_mix,
            bones,
            target,
            data,
            temp: Vector2::default(),
        })
    }

    pub fn data(&self) -> &TransformConstraintData {
        &self.data
    }

    /// Restores the mixes from the template.
    pub fn set_to_setup_pose(&mut self) {
        self.rotate_mix = self.data.rotate_mix;
        self.translate_mix = self.data.translate_mix;
        self.scale_mix = self.data.scale_mix;
        self.shear_mix = self.data.shear_mix;
    }
}

impl Updatable for TransformConstraint {
    fn update(&mut self, bones: &mut [Bone]) {
        let (rotate_mix, translate_mix, scale_mix, shear_mix) = (
            self.rotate_mix,
            self.translate_mix,
            self.scale_mix,
            self.shear_mix,
        );
        let Some(target) = bones.get(self.target) else {
            return;
        };
        let (ta, tb, tc, td) = (target.a, target.b, target.c, target.d);
        let data = &*self.data;

        for &bone_index in &self.bones {
            if bone_index >= bones.len() {
                continue;
            }

            if rotate_mix > 0.0 {
                let bone = &mut bones[bone_index];
                let (a, b, c, d) = (bone.a, bone.b, bone.c, bone.d);
                let r = tc.atan2(ta) - c.atan2(a) + data.offset_rotation * DEG_RAD;
                let r = wrap_pi(r) * rotate_mix;
                let cos = r.cos();
                let sin = r.sin();
                bone.a = cos * a - sin * c;
                bone.b = cos * b - sin * d;
                bone.c = sin * a + cos * c;
                bone.d = sin * b + cos * d;
            }

            if translate_mix > 0.0 {
                // Mapped through the live target, which may itself have been driven already.
                let p = self.temp.set(data.offset_x, data.offset_y);
                let p = bones[self.target].local_to_world(p);
                let (px, py) = (p.x, p.y);
                let bone = &mut bones[bone_index];
                bone.world_x += (px - bone.world_x) * translate_mix;
                bone.world_y += (py - bone.world_y) * translate_mix;
            }

            let bone = &mut bones[bone_index];
            if scale_mix > 0.0 {
                let bs = (bone.a * bone.a + bone.c * bone.c).sqrt();
                let ts = (ta * ta + tc * tc).sqrt();
                let s = axis_scale(bs, ts, data.offset_scale_x, scale_mix);
                bone.a *= s;
                bone.c *= s;

                let bs = (bone.b * bone.b + bone.d * bone.d).sqrt();
                let ts = (tb * tb + td * td).sqrt();
                let s = axis_scale(bs, ts, data.offset_scale_y, scale_mix);
                bone.b *= s;
                bone.d *= s;
            }

            if shear_mix > 0.0 {
                let (b, d) = (bone.b, bone.d);
                let by = d.atan2(b);
                let r = td.atan2(tb) - tc.atan2(ta) - (by - bone.c.atan2(bone.a));
                let r = by + (wrap_pi(r) + data.offset_shear_y * DEG_RAD) * shear_mix;
                let s = (b * b + d * d).sqrt();
                bone.b = r.cos() * s;
                bone.d = r.sin() * s;
            }
        }
    }
}

fn axis_scale(bone_length: f32, target_length: f32, offset: f32, mix: f32) -> f32 {
    if bone_length > MIN_AXIS_LENGTH {
        (bone_length + (target_length - bone_length + offset) * mix) / bone_length
    } else {
        log::trace!("collapsing degenerate axis of length {bone_length}");
        0.0
    }
}
