//! Triangle meshes for planes and imported models

use std::io::Cursor;
use std::path::Path;

use glam::{Vec2, Vec3};
use stage_core::BoundingBox;
use stage_editor::LoadError;

/// Indexed triangle mesh in model space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Texture coordinates, empty for untextured meshes
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Quad in the XY plane centered at the origin, facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            // Image rows run top to bottom
            uvs: vec![
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions.iter().copied())
    }

    /// Moves the mesh so its bounds are centered on the origin.
    pub fn center(&mut self) -> BoundingBox {
        let offset = self.bounds().center();
        for p in &mut self.positions {
            *p -= offset;
        }
        self.bounds()
    }

    pub fn byte_size(&self) -> usize {
        self.positions.len() * std::mem::size_of::<Vec3>()
            + self.uvs.len() * std::mem::size_of::<Vec2>()
            + self.indices.len() * std::mem::size_of::<u32>()
    }

    /// Triangles as vertex triples, skipping out-of-range indices.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let count = self.positions.len() as u32;
        self.indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .filter(move |t| t.iter().all(|&i| i < count))
    }
}

fn decode_error(path: &Path, e: impl std::fmt::Display) -> LoadError {
    LoadError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Loads an STL or OBJ model. Other model formats are unsupported.
pub fn load_model(path: &Path, bytes: &[u8], extension: &str) -> Result<MeshData, LoadError> {
    let mesh = match extension {
        "stl" => load_stl(path, bytes)?,
        "obj" => load_obj(path, bytes)?,
        other => return Err(LoadError::Unsupported(format!("{other} models"))),
    };
    if mesh.triangle_count() == 0 {
        return Err(decode_error(path, "model has no triangles"));
    }
    Ok(mesh)
}

fn load_stl(path: &Path, bytes: &[u8]) -> Result<MeshData, LoadError> {
    let mesh = stl_io::read_stl(&mut Cursor::new(bytes)).map_err(|e| decode_error(path, e))?;
    let positions = mesh
        .vertices
        .iter()
        .map(|v| Vec3::new(v[0], v[1], v[2]))
        .collect();
    let indices = mesh
        .faces
        .iter()
        .flat_map(|f| f.vertices.iter().map(|&i| i as u32))
        .collect();
    Ok(MeshData {
        positions,
        uvs: Vec::new(),
        indices,
    })
}

fn load_obj(path: &Path, bytes: &[u8]) -> Result<MeshData, LoadError> {
    // Materials are not used; every model gets the flat model material
    let (models, _) = tobj::load_obj_buf(&mut Cursor::new(bytes), &tobj::GPU_LOAD_OPTIONS, |_| {
        Ok(Default::default())
    })
    .map_err(|e| decode_error(path, e))?;

    let mut mesh = MeshData::default();
    for model in models {
        let base = mesh.positions.len() as u32;
        mesh.positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        mesh.indices
            .extend(model.mesh.indices.iter().map(|i| base + i));
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 2 0 0
v 2 4 0
v 0 4 6
f 1 2 3
f 1 3 4
";

    #[test]
    fn test_plane_bounds() {
        let plane = MeshData::plane(2.0, 2.0);
        assert_eq!(plane.triangle_count(), 2);
        assert_eq!(plane.bounds(), BoundingBox::centered(Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_obj_is_loaded_and_centered() {
        let mut mesh = load_model(Path::new("shape.obj"), QUAD_OBJ.as_bytes(), "obj").unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        let bounds = mesh.center();
        assert!(bounds.center().abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(bounds.size().abs_diff_eq(Vec3::new(2.0, 4.0, 6.0), 1e-6));
    }

    #[test]
    fn test_ascii_stl() {
        let stl = "solid t
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
endsolid t
";
        let mesh = load_model(Path::new("t.stl"), stl.as_bytes(), "stl").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions.len(), 3);
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_model(Path::new("scene.glb"), &[], "glb").unwrap_err();
        assert!(matches!(err, LoadError::Unsupported(_)));
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: Vec::new(),
            indices: vec![0, 1, 2, 0, 1, 7],
        };
        assert_eq!(mesh.triangles().count(), 1);
    }
}
