use crate::{Bone, BoneData, Vector2};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn bone_with(linear: [f32; 4], world: [f32; 2]) -> Bone {
    let mut bone = Bone::new(0, &BoneData::new("b", None));
    bone.a = linear[0];
    bone.b = linear[1];
    bone.c = linear[2];
    bone.d = linear[3];
    bone.world_x = world[0];
    bone.world_y = world[1];
    bone
}

#[test]
fn new_bone_takes_setup_pose() {
    let mut data = BoneData::new("b", Some(3));
    data.x = 4.0;
    data.rotation = 30.0;
    data.scale_y = 2.0;

    let bone = Bone::new(7, &data);
    assert_eq!(bone.data_index(), 7);
    assert_eq!(bone.parent_index(), Some(3));
    assert_eq!(bone.x, 4.0);
    assert_eq!(bone.rotation, 30.0);
    assert_eq!(bone.scale_x, 1.0);
    assert_eq!(bone.scale_y, 2.0);
}

#[test]
fn local_to_world_applies_linear_part_and_translation() {
    let bone = bone_with([0.0, -2.0, 2.0, 0.0], [10.0, 20.0]);
    let mut p = Vector2::new(1.0, 3.0);
    bone.local_to_world(&mut p);
    assert_eq!(p, Vector2::new(4.0, 22.0));
}

#[test]
fn world_to_local_inverts_local_to_world() {
    let bone = bone_with([0.5, -1.5, 2.0, 0.25], [-3.0, 7.0]);
    let mut p = Vector2::new(1.25, -4.0);
    bone.local_to_world(&mut p);
    bone.world_to_local(&mut p);
    assert_approx(p.x, 1.25);
    assert_approx(p.y, -4.0);
}

#[test]
fn world_to_local_of_singular_bone_is_origin() {
    let bone = bone_with([0.0, 0.0, 0.0, 0.0], [1.0, 1.0]);
    let mut p = Vector2::new(5.0, 5.0);
    bone.world_to_local(&mut p);
    assert_eq!(p, Vector2::new(0.0, 0.0));
}

#[test]
fn world_rotation_and_scale_read_the_axes() {
    let (sin, cos) = 60.0f32.to_radians().sin_cos();
    let bone = bone_with([cos * 2.0, -sin * 3.0, sin * 2.0, cos * 3.0], [0.0, 0.0]);
    assert_approx(bone.world_rotation_x(), 60.0);
    assert_approx(bone.world_rotation_y(), 150.0);
    assert_approx(bone.world_scale_x(), 2.0);
    assert_approx(bone.world_scale_y(), 3.0);
}

#[cfg(feature = "glam")]
#[test]
fn world_affine_matches_local_to_world() {
    let bone = bone_with([0.0, -2.0, 2.0, 0.0], [10.0, 20.0]);
    let p = bone
        .world_affine()
        .transform_point2(glam::Vec2::new(1.0, 3.0));
    assert_approx(p.x, 4.0);
    assert_approx(p.y, 22.0);
}
