use std::fmt;

/// Immutable colored triangle mesh.
///
/// Invariants (see [`Mesh::validate`]):
/// - `colors` is parallel to `positions`
/// - every index refers to an existing vertex
/// - indices (or vertices, when unindexed) describe whole triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Option<Vec<u16>>,
}

/// Reasons a mesh cannot be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    Empty,
    ColorCountMismatch { positions: usize, colors: usize },
    IndexOutOfRange { index: u16, vertex_count: usize },
    IncompleteTriangle { count: usize },
    TooManyVertices { count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Empty => write!(f, "mesh has no vertices"),
            MeshError::ColorCountMismatch { positions, colors } => write!(
                f,
                "mesh has {positions} positions but {colors} colors"
            ),
            MeshError::IndexOutOfRange { index, vertex_count } => write!(
                f,
                "index {index} out of range for {vertex_count} vertices"
            ),
            MeshError::IncompleteTriangle { count } => {
                write!(f, "{count} elements do not form whole triangles")
            }
            MeshError::TooManyVertices { count } => {
                write!(f, "{count} vertices exceed the u16 index range")
            }
        }
    }
}

impl std::error::Error for MeshError {}

impl Mesh {
    pub fn new(positions: Vec<[f32; 3]>, colors: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            colors,
            indices: None,
        }
    }

    pub fn with_indices(mut self, indices: Vec<u16>) -> Self {
        self.indices = Some(indices);
        self
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of elements a draw call consumes (indices if present, vertices otherwise).
    #[inline]
    pub fn element_count(&self) -> usize {
        self.indices
            .as_ref()
            .map_or(self.positions.len(), Vec::len)
    }

    /// Checks the mesh invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();

        if vertex_count == 0 {
            return Err(MeshError::Empty);
        }
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(MeshError::TooManyVertices { count: vertex_count });
        }
        if self.colors.len() != vertex_count {
            return Err(MeshError::ColorCountMismatch {
                positions: vertex_count,
                colors: self.colors.len(),
            });
        }

        if let Some(indices) = &self.indices {
            if let Some(&index) = indices
                .iter()
                .find(|&&i| usize::from(i) >= vertex_count)
            {
                return Err(MeshError::IndexOutOfRange { index, vertex_count });
            }
        }

        let count = self.element_count();
        if count == 0 || count % 3 != 0 {
            return Err(MeshError::IncompleteTriangle { count });
        }

        Ok(())
    }

    /// Iterates triangles as vertex index triples.
    #[cfg(test)]
    pub(crate) fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let count = self.element_count() / 3;
        (0..count).map(move |t| {
            let at = |k: usize| match &self.indices {
                Some(ix) => usize::from(ix[t * 3 + k]),
                None => t * 3 + k,
            };
            [at(0), at(1), at(2)]
        })
    }
}

/// Expands a triangle fan of `vertex_count` vertices into triangle-list indices.
///
/// Vertex 0 is the hub; fewer than three vertices produce no triangles.
pub fn fan_indices(vertex_count: u16) -> Vec<u16> {
    (1..vertex_count.saturating_sub(1))
        .flat_map(|i| [0, i, i + 1])
        .collect()
}
