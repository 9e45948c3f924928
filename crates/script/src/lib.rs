//! Scripting surface over a [`SceneHost`](scenecraft_host::SceneHost).
//!
//! [`SceneObject`] wraps one host object: creation from an [`ObjectSpec`],
//! transforms, materials and colors. [`Scene`] holds the scene-wide chores:
//! cleanup by type, material pruning, world color and render export.
//!
//! # Invariants
//! - Every call takes the host and the object handle explicitly.
//! - Colors go through the shared converter in `scenecraft-common`.
//! - Randomness comes from a caller-owned [`ScriptRng`], so a seed reproduces a scene.

mod error;
mod object;
mod rng;
mod scene;

pub use error::ScriptError;
pub use object::{ObjectSpec, SceneObject};
pub use rng::ScriptRng;
pub use scene::{Scene, SetupReport};
