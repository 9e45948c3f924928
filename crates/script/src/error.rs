use scenecraft_common::ColorError;
use scenecraft_host::HostError;

/// Errors from script operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("color palette is empty")]
    EmptyPalette,
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f32, max: f32 },
}
