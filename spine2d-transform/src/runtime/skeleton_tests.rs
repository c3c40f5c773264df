use crate::{
    BoneData, Error, Skeleton, SkeletonData, TransformConstraintData, UpdateCacheItem,
};
use std::sync::Arc;

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn bone(name: &str, parent: Option<usize>, x: f32, y: f32, rotation: f32) -> BoneData {
    let mut data = BoneData::new(name, parent);
    data.x = x;
    data.y = y;
    data.rotation = rotation;
    data
}

/// root(0) -> b(1) -> bc(3), root(0) -> t(2).
fn follow_data(rotate_mix: f32, translate_mix: f32) -> Arc<SkeletonData> {
    let mut tc = TransformConstraintData::new("follow", vec!["b".to_string()], "t");
    tc.rotate_mix = rotate_mix;
    tc.translate_mix = translate_mix;
    Arc::new(SkeletonData {
        bones: vec![
            bone("root", None, 0.0, 0.0, 0.0),
            bone("b", Some(0), 0.0, 0.0, 0.0),
            bone("t", Some(0), 1.0, 2.0, 90.0),
            bone("bc", Some(1), 5.0, 0.0, 0.0),
        ],
        transform_constraints: vec![Arc::new(tc)],
    })
}

#[test]
fn update_world_transform_root_and_child() {
    let data = Arc::new(SkeletonData {
        bones: vec![
            bone("root", None, 10.0, 20.0, 0.0),
            bone("child", Some(0), 5.0, 0.0, 90.0),
        ],
        transform_constraints: Vec::new(),
    });
    let mut skeleton = Skeleton::new(data).unwrap();
    skeleton.update_world_transform();

    let root = &skeleton.bones[0];
    assert_approx(root.world_x, 10.0);
    assert_approx(root.world_y, 20.0);
    assert_approx(root.a, 1.0);
    assert_approx(root.d, 1.0);

    let child = &skeleton.bones[1];
    assert_approx(child.world_x, 15.0);
    assert_approx(child.world_y, 20.0);
    assert_approx(child.a, 0.0);
    assert_approx(child.b, -1.0);
    assert_approx(child.c, 1.0);
    assert_approx(child.d, 0.0);
}

#[test]
fn skeleton_position_and_scale_apply_to_roots() {
    let data = Arc::new(SkeletonData {
        bones: vec![bone("root", None, 1.0, 1.0, 0.0)],
        transform_constraints: Vec::new(),
    });
    let mut skeleton = Skeleton::new(data).unwrap();
    skeleton.x = 100.0;
    skeleton.scale_y = -2.0;
    skeleton.update_world_transform();

    let root = &skeleton.bones[0];
    assert_approx(root.world_x, 101.0);
    assert_approx(root.world_y, -2.0);
    assert_approx(root.d, -2.0);
}

#[test]
fn update_cache_runs_constraint_between_driven_bone_and_its_children() {
    let skeleton = Skeleton::new(follow_data(1.0, 1.0)).unwrap();
    assert_eq!(
        skeleton.update_cache_items(),
        &[
            UpdateCacheItem::Bone(0),
            UpdateCacheItem::Bone(2),
            UpdateCacheItem::Bone(1),
            UpdateCacheItem::Transform(0),
            UpdateCacheItem::Bone(3),
        ]
    );
}

#[test]
fn constrained_bone_follows_target_and_children_follow_bone() {
    let mut skeleton = Skeleton::new(follow_data(1.0, 1.0)).unwrap();
    skeleton.update_world_transform();

    let b = &skeleton.bones[1];
    let t = &skeleton.bones[2];
    assert_approx(b.world_x, t.world_x);
    assert_approx(b.world_y, t.world_y);
    assert_approx(b.world_rotation_x(), 90.0);

    let bc = &skeleton.bones[3];
    assert_approx(bc.world_x, 1.0);
    assert_approx(bc.world_y, 7.0);
}

#[test]
fn repeated_frames_are_stable() {
    let mut skeleton = Skeleton::new(follow_data(0.5, 0.5)).unwrap();
    skeleton.update_world_transform();
    let first: Vec<_> = skeleton
        .bones
        .iter()
        .map(|b| (b.a, b.b, b.c, b.d, b.world_x, b.world_y))
        .collect();

    skeleton.update_world_transform();
    let second: Vec<_> = skeleton
        .bones
        .iter()
        .map(|b| (b.a, b.b, b.c, b.d, b.world_x, b.world_y))
        .collect();
    assert_eq!(first, second);

    let b = &skeleton.bones[1];
    assert_approx(b.world_rotation_x(), 45.0);
    assert_approx(b.world_x, 0.5);
    assert_approx(b.world_y, 1.0);
}

#[test]
fn constraints_run_by_order() {
    let mut first = TransformConstraintData::new("first", vec!["a".to_string()], "t");
    first.order = 1;
    let mut second = TransformConstraintData::new("second", vec!["b".to_string()], "t");
    second.order = 0;
    let data = Arc::new(SkeletonData {
        bones: vec![
            bone("t", None, 0.0, 0.0, 0.0),
            bone("a", None, 0.0, 0.0, 0.0),
            bone("b", None, 0.0, 0.0, 0.0),
        ],
        transform_constraints: vec![Arc::new(first), Arc::new(second)],
    });

    let skeleton = Skeleton::new(data).unwrap();
    let constraints: Vec<_> = skeleton
        .update_cache_items()
        .iter()
        .filter(|item| matches!(item, UpdateCacheItem::Transform(_)))
        .copied()
        .collect();
    assert_eq!(
        constraints,
        vec![UpdateCacheItem::Transform(1), UpdateCacheItem::Transform(0)]
    );
}

#[test]
fn find_bone_and_constraint_by_name() {
    let mut skeleton = Skeleton::new(follow_data(1.0, 1.0)).unwrap();
    assert_eq!(skeleton.find_bone("bc"), Some(3));
    assert_eq!(skeleton.find_bone("nope"), None);

    let constraint = skeleton.find_transform_constraint("follow").unwrap();
    assert_eq!(constraint.bones, vec![1]);
    assert_eq!(constraint.target, 2);
    assert!(skeleton.find_transform_constraint("nope").is_none());

    skeleton
        .find_transform_constraint_mut("follow")
        .unwrap()
        .rotate_mix = 0.0;
    assert_eq!(skeleton.transform_constraints[0].rotate_mix, 0.0);
}

#[test]
fn set_to_setup_pose_restores_bones_and_mixes() {
    let mut skeleton = Skeleton::new(follow_data(1.0, 0.5)).unwrap();
    skeleton.bones[2].rotation = 10.0;
    skeleton.bones[3].x = -1.0;
    skeleton.transform_constraints[0].rotate_mix = 0.0;
    skeleton.transform_constraints[0].translate_mix = 0.0;

    skeleton.set_to_setup_pose();
    assert_eq!(skeleton.bones[2].rotation, 90.0);
    assert_eq!(skeleton.bones[3].x, 5.0);
    assert_eq!(skeleton.transform_constraints[0].rotate_mix, 1.0);
    assert_eq!(skeleton.transform_constraints[0].translate_mix, 0.5);
}

#[test]
fn unknown_constraint_bone_fails_construction() {
    let tc = TransformConstraintData::new("tc", vec!["ghost".to_string()], "root");
    let data = Arc::new(SkeletonData {
        bones: vec![bone("root", None, 0.0, 0.0, 0.0)],
        transform_constraints: vec![Arc::new(tc)],
    });
    let err = Skeleton::new(data).unwrap_err();
    assert!(matches!(err, Error::UnknownBone { bone, .. } if bone == "ghost"));
}

#[test]
fn parent_after_child_is_rejected() {
    let data = Arc::new(SkeletonData {
        bones: vec![
            bone("child", Some(1), 0.0, 0.0, 0.0),
            bone("root", None, 0.0, 0.0, 0.0),
        ],
        transform_constraints: Vec::new(),
    });
    let err = Skeleton::new(data).unwrap_err();
    assert!(matches!(err, Error::BoneParentOrder { parent: 1, .. }));
}
