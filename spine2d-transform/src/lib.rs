//! Transform constraint solver for 2D skeletal animation runtimes.
//!
//! The crate is renderer-agnostic. A [`Skeleton`] owns its bones and transform constraints and
//! walks them in a single ordered pass per frame; [`Mesh`] holds CPU-side vertex data for
//! whatever renderer consumes the final bone transforms.

#![forbid(unsafe_code)]

mod error;
mod math;
mod mesh;
mod model;
mod runtime;

#[cfg(feature = "json")]
pub mod json;

pub use error::*;
pub use math::*;
pub use mesh::*;
pub use model::*;
pub use runtime::*;
