use crate::{BoneData, RAD_DEG, Vector2};

/// Root position and scale applied to every bone without a parent.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RootTransform {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

#[derive(Clone, Debug)]
pub struct Bone {
    data_index: usize,
    parent: Option<usize>,

    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,

    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub world_x: f32,
    pub world_y: f32,
}

impl Bone {
    pub fn new(data_index: usize, data: &BoneData) -> Self {
        let mut bone = Self {
            data_index,
            parent: data.parent,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            world_x: 0.0,
            world_y: 0.0,
        };
        bone.set_to_setup_pose(data);
        bone
    }

    pub fn data_index(&self) -> usize {
        self.data_index
    }

    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    pub fn set_to_setup_pose(&mut self, data: &BoneData) {
        self.x = data.x;
        self.y = data.y;
        self.rotation = data.rotation;
        self.scale_x = data.scale_x;
        self.scale_y = data.scale_y;
        self.shear_x = data.shear_x;
        self.shear_y = data.shear_y;
    }

    /// Recomputes the world transform from the local pose and the parent's world transform.
    pub(crate) fn update_world_transform(&mut self, parent: Option<&Bone>, root: RootTransform) {
        let rotation_x = (self.rotation + self.shear_x).to_radians();
        let rotation_y = (self.rotation + 90.0 + self.shear_y).to_radians();
        let la = rotation_x.cos() * self.scale_x;
        let lb = rotation_y.cos() * self.scale_y;
        let lc = rotation_x.sin() * self.scale_x;
        let ld = rotation_y.sin() * self.scale_y;

        let Some(parent) = parent else {
            self.a = la * root.scale_x;
            self.b = lb * root.scale_x;
            self.c = lc * root.scale_y;
            self.d = ld * root.scale_y;
            self.world_x = self.x * root.scale_x + root.x;
            self.world_y = self.y * root.scale_y + root.y;
            return;
        };

        let (pa, pb, pc, pd) = (parent.a, parent.b, parent.c, parent.d);
        self.world_x = pa * self.x + pb * self.y + parent.world_x;
        self.world_y = pc * self.x + pd * self.y + parent.world_y;
        self.a = pa * la + pb * lc;
        self.b = pa * lb + pb * ld;
        self.c = pc * la + pd * lc;
        self.d = pc * lb + pd * ld;
    }

    /// Maps `local` from this bone's space to world space in place.
    pub fn local_to_world<'a>(&self, local: &'a mut Vector2) -> &'a mut Vector2 {
        let (x, y) = (local.x, local.y);
        local.x = x * self.a + y * self.b + self.world_x;
        local.y = x * self.c + y * self.d + self.world_y;
        local
    }

    /// Maps `world` from world space to this bone's space in place.
    ///
    /// A singular linear part maps everything to the origin.
    pub fn world_to_local<'a>(&self, world: &'a mut Vector2) -> &'a mut Vector2 {
        let det = self.a * self.d - self.b * self.c;
        let inv_det = if det.abs() > 1.0e-12 { 1.0 / det } else { 0.0 };
        let x = world.x - self.world_x;
        let y = world.y - self.world_y;
        world.x = (x * self.d - y * self.b) * inv_det;
        world.y = (y * self.a - x * self.c) * inv_det;
        world
    }

    /// World rotation of the X axis, in degrees.
    pub fn world_rotation_x(&self) -> f32 {
        self.c.atan2(self.a) * RAD_DEG
    }

    /// World rotation of the Y axis, in degrees.
    pub fn world_rotation_y(&self) -> f32 {
        self.d.atan2(self.b) * RAD_DEG
    }

    pub fn world_scale_x(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }

    pub fn world_scale_y(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }

    #[cfg(feature = "glam")]
    pub fn world_affine(&self) -> glam::Affine2 {
        glam::Affine2::from_cols_array(&[
            self.a,
            self.c,
            self.b,
            self.d,
            self.world_x,
            self.world_y,
        ])
    }
}
