use crate::error::ConsistencyError;

/// Triangle soup of a single material. Every vertex carries its own normal
/// and uv, so there is no index buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub material: String,
    /// Flattened `[x, y, z]` positions.
    pub vertices: Vec<f32>,
    /// Flattened `[x, y, z]` normals, one per vertex.
    pub normals: Vec<f32>,
    /// Flattened `[u, v]` texture coordinates, one per vertex.
    pub uv_coords: Vec<f32>,
}

impl Mesh {
    pub fn new(
        material: impl Into<String>,
        vertices: Vec<f32>,
        normals: Vec<f32>,
        uv_coords: Vec<f32>,
    ) -> Self {
        Self {
            material: material.into(),
            vertices,
            normals,
            uv_coords,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Checks the length relations between the three attribute arrays.
    pub fn is_well_formed(&self) -> bool {
        self.vertices.len() % 3 == 0
            && self.vertices.len() == self.normals.len()
            && self.uv_coords.len() * 3 == self.vertices.len() * 2
    }
}

/// One fully triangulated snapshot of an object, split by material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub name: String,
    /// Meshes in the order their material first appeared.
    pub meshes: Vec<Mesh>,
    pub smooth_shading: bool,
    pub material_library: Option<String>,
}

impl Frame {
    pub fn mesh(&self, material: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.material == material)
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.meshes.iter().map(|m| m.material.as_str())
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    /// Positions of all meshes, concatenated in material order.
    pub fn concat_vertices(&self) -> Vec<f32> {
        self.meshes.iter().flat_map(|m| m.vertices.iter().copied()).collect()
    }

    pub fn concat_normals(&self) -> Vec<f32> {
        self.meshes.iter().flat_map(|m| m.normals.iter().copied()).collect()
    }

    pub fn concat_uv_coords(&self) -> Vec<f32> {
        self.meshes.iter().flat_map(|m| m.uv_coords.iter().copied()).collect()
    }

    /// This frame's meshes in the material order of `layout`. Materials
    /// `layout` does not know are skipped, as are those missing here.
    pub fn meshes_like<'a>(&'a self, layout: &'a Frame) -> impl Iterator<Item = &'a Mesh> + 'a {
        layout
            .meshes
            .iter()
            .filter_map(move |m| self.mesh(&m.material))
    }

    /// Positions concatenated in the material order of `layout`.
    pub fn concat_vertices_like(&self, layout: &Frame) -> Vec<f32> {
        self.meshes_like(layout)
            .flat_map(|m| m.vertices.iter().copied())
            .collect()
    }

    pub fn concat_normals_like(&self, layout: &Frame) -> Vec<f32> {
        self.meshes_like(layout)
            .flat_map(|m| m.normals.iter().copied())
            .collect()
    }
}

/// Ordered frames of a vertex animation. The first frame is the default
/// frame and fixes material order and buffer sizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSequence {
    frames: Vec<Frame>,
}

impl AnimationSequence {
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn default_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Verifies that every frame can be streamed into buffers laid out for
    /// the default frame: the same set of materials, in any order, with the
    /// same vertex count per material.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        let default = self
            .default_frame()
            .ok_or(ConsistencyError::EmptySequence)?;
        let expected = sorted_materials(default);

        for (index, frame) in self.frames.iter().enumerate().skip(1) {
            let found = sorted_materials(frame);
            if found != expected {
                return Err(ConsistencyError::MaterialMismatch {
                    frame: index,
                    expected,
                    found,
                });
            }

            for default_mesh in &default.meshes {
                let found = frame
                    .mesh(&default_mesh.material)
                    .map_or(0, Mesh::vertex_count);
                if found != default_mesh.vertex_count() {
                    return Err(ConsistencyError::VertexCountMismatch {
                        frame: index,
                        material: default_mesh.material.clone(),
                        expected: default_mesh.vertex_count(),
                        found,
                    });
                }
            }
        }

        Ok(())
    }
}

fn sorted_materials(frame: &Frame) -> Vec<String> {
    let mut materials: Vec<String> = frame.materials().map(String::from).collect();
    materials.sort();
    materials
}
