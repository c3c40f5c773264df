use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {name} cannot be absent")]
    InvalidArgument { name: &'static str },

    #[error("bone '{bone}' must come after its parent (index {parent})")]
    BoneParentOrder { bone: String, parent: usize },

    #[error("unknown bone '{bone}' referenced by transform constraint '{constraint}'")]
    UnknownBone { constraint: String, bone: String },

    #[error("mesh can't store more than {capacity} {kind} (got {requested})")]
    MeshCapacity {
        kind: &'static str,
        capacity: usize,
        requested: usize,
    },

    #[cfg(feature = "json")]
    #[error("failed to parse skeleton JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("duplicate bone name '{bone}'")]
    JsonDuplicateBone { bone: String },

    #[cfg(feature = "json")]
    #[error("unknown parent bone '{parent}' for bone '{bone}'")]
    JsonUnknownBoneParent { bone: String, parent: String },

    #[cfg(feature = "json")]
    #[error("unknown bone '{bone}' referenced by transform constraint '{constraint}'")]
    JsonUnknownConstraintBone { constraint: String, bone: String },

    #[cfg(feature = "json")]
    #[error("transform constraint '{constraint}' has no bones")]
    JsonEmptyConstraintBones { constraint: String },
}
