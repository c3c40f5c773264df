mod bone;
mod skeleton;
mod transform_constraint;

pub use bone::*;
pub use skeleton::*;
pub use transform_constraint::*;

#[cfg(test)]
mod bone_tests;

#[cfg(test)]
mod skeleton_tests;
