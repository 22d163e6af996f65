use crate::error::{FormatError, Result};
use crate::mesh::{Frame, Mesh};

/// One `v/vt/vn` corner of a face, still 1-based as written in the file.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct FaceIndex {
    pub(crate) vert_i: usize,
    pub(crate) uv_i: usize,
    pub(crate) normal_i: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FrameBuilder {
    pub(crate) name: String,
    pub(crate) material_library: Option<String>,
    pub(crate) smooth_shading: bool,
    pub(crate) positions: Vec<[f32; 3]>,
    pub(crate) uvs: Vec<[f32; 2]>,
    pub(crate) normals: Vec<[f32; 3]>,
    pub(crate) groups: Vec<Mesh>,
    pub(crate) current_group: Option<usize>,
}

impl FrameBuilder {
    /// Makes `name` the active group. Reopening a group keeps its position
    /// and appends to it.
    pub(crate) fn use_material(&mut self, name: &str) -> usize {
        let index = match self.groups.iter().position(|g| g.material == name) {
            Some(index) => index,
            None => {
                self.groups.push(Mesh {
                    material: name.into(),
                    ..Mesh::default()
                });
                self.groups.len() - 1
            }
        };
        self.current_group = Some(index);
        index
    }

    pub(crate) fn push_position(&mut self, position: [f32; 3]) {
        self.positions.push(position);
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.uvs.push(uv);
    }

    pub(crate) fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(normal);
    }

    /// Dereferences the face against everything defined so far and appends
    /// the resulting coordinates to the active group.
    pub(crate) fn push_face(&mut self, face: [FaceIndex; 3], line: usize) -> Result<()> {
        let mut resolved = [([0.0; 3], [0.0; 2], [0.0; 3]); 3];
        for (corner, index) in resolved.iter_mut().zip(face.iter()) {
            *corner = (
                lookup(&self.positions, index.vert_i, "vertex", line)?,
                lookup(&self.uvs, index.uv_i, "uv", line)?,
                lookup(&self.normals, index.normal_i, "normal", line)?,
            );
        }

        // faces before any `usemtl` land in an unnamed group
        let index = match self.current_group {
            Some(index) => index,
            None => self.use_material(""),
        };
        let group = &mut self.groups[index];

        for (position, uv, normal) in resolved {
            group.vertices.extend_from_slice(&position);
            group.uv_coords.extend_from_slice(&uv);
            group.normals.extend_from_slice(&normal);
        }

        Ok(())
    }

    pub(crate) fn build(self) -> Frame {
        Frame {
            name: self.name,
            meshes: self.groups,
            smooth_shading: self.smooth_shading,
            material_library: self.material_library,
        }
    }
}

fn lookup<T: Copy>(values: &[T], index: usize, kind: &'static str, line: usize) -> Result<T> {
    if index == 0 || index > values.len() {
        return Err(FormatError::IndexOutOfRange {
            line,
            kind,
            index,
            count: values.len(),
        });
    }
    Ok(values[index - 1])
}

#[cfg(test)]
mod test {
    use super::*;

    fn corner(i: usize) -> FaceIndex {
        FaceIndex {
            vert_i: i,
            uv_i: i,
            normal_i: i,
        }
    }

    fn builder_with_triangle() -> FrameBuilder {
        let mut builder = FrameBuilder::default();
        for i in 0..3 {
            builder.push_position([i as f32, 0.0, 0.0]);
            builder.push_uv([i as f32, 1.0]);
            builder.push_normal([0.0, 0.0, 1.0]);
        }
        builder
    }

    #[test]
    fn test_reopened_group_appends() {
        let mut builder = builder_with_triangle();
        builder.use_material("a");
        builder.push_face([corner(1), corner(2), corner(3)], 1).unwrap();
        builder.use_material("b");
        builder.push_face([corner(3), corner(2), corner(1)], 2).unwrap();
        builder.use_material("a");
        builder.push_face([corner(1), corner(1), corner(1)], 3).unwrap();

        let frame = builder.build();
        assert_eq!(frame.materials().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(frame.meshes[0].vertex_count(), 6);
        assert_eq!(frame.meshes[1].vertex_count(), 3);
    }

    #[test]
    fn test_face_without_group() {
        let mut builder = builder_with_triangle();
        builder.push_face([corner(1), corner(2), corner(3)], 1).unwrap();
        let frame = builder.build();
        assert_eq!(frame.meshes.len(), 1);
        assert_eq!(frame.meshes[0].material, "");
    }

    #[test]
    fn test_shared_vertices_are_duplicated() {
        let mut builder = builder_with_triangle();
        builder.use_material("a");
        builder.push_face([corner(1), corner(2), corner(3)], 1).unwrap();
        builder.push_face([corner(3), corner(2), corner(1)], 2).unwrap();
        let frame = builder.build();
        let mesh = &frame.meshes[0];
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(&mesh.vertices[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&mesh.vertices[15..18], &[0.0, 0.0, 0.0]);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_out_of_range_uv() {
        let mut builder = builder_with_triangle();
        let mut bad = corner(1);
        bad.uv_i = 4;
        let err = builder.push_face([corner(1), bad, corner(2)], 9).unwrap_err();
        assert!(matches!(
            err,
            FormatError::IndexOutOfRange {
                line: 9,
                kind: "uv",
                index: 4,
                count: 3
            }
        ));
    }
}
