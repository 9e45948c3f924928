//! Scene host boundary: the object model a 3D content-creation application
//! exposes to scripts.
//!
//! # Invariants
//! - Every mutation names its target explicitly; there is no active object.
//! - Material names are unique within a host.
//! - Renderers read host state, they never mutate it.

mod host;
mod memory;
mod renderer;

pub use host::{HostError, PrimitiveKind, SceneHost};
pub use memory::{HostEvent, MaterialData, MemoryHost, ObjectData};
pub use renderer::{Renderer, TextRenderer};
