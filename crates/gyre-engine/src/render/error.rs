use std::fmt;

use crate::geometry::MeshError;

/// Failure while preparing GPU resources for drawing.
///
/// Context acquisition failures are reported by [`crate::device::Gpu::new`];
/// this type covers what happens after a context exists.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// Shader source failed to parse or validate.
    ShaderCompile { label: String, log: String },
    /// Compiled stages do not form a program matching the expected interface.
    ProgramLink { label: String, log: String },
    /// Geometry violates mesh invariants.
    InvalidMesh(MeshError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::ShaderCompile { label, log } => {
                write!(f, "shader `{label}` failed to compile: {log}")
            }
            SetupError::ProgramLink { label, log } => {
                write!(f, "program `{label}` failed to link: {log}")
            }
            SetupError::InvalidMesh(_) => write!(f, "invalid mesh"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::InvalidMesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for SetupError {
    fn from(e: MeshError) -> Self {
        SetupError::InvalidMesh(e)
    }
}
