/// OBJ mesh loading into an interleaved vertex buffer.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Sample mesh used when no path is given on the command line
const BUILTIN_MESH: &[u8] = include_bytes!("../data/meshes/square_centered.obj");

/// Vertex layout shared with `data/shaders/vertex.glsl`:
/// location 0 position, 1 normal, 2 texcoord.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
    pub const NORMAL_OFFSET: i32 = 12;
    pub const TEXCOORD_OFFSET: i32 = 24;
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Load the mesh at `path`, or the built-in square when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open mesh {}", path.display()))?;
                Self::parse(BufReader::new(file))
                    .with_context(|| format!("failed to load mesh {}", path.display()))
            }
            None => Self::parse(BUILTIN_MESH).context("failed to load built-in mesh"),
        }
    }

    /// Parse OBJ text. Polygons are fan-triangulated. Missing normals become
    /// face normals and missing texture coordinates are the position's XY
    /// mapped into the mesh bounds.
    pub fn parse(input: impl Read) -> Result<Self> {
        let data = obj::ObjData::load_buf(input).map_err(|e| anyhow!("invalid OBJ: {:?}", e))?;

        let (min, max) = bounds(&data.position);
        let extent = (max - min).max(Vec3::splat(f32::EPSILON));

        let mut vertices = Vec::new();
        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let corners = &poly.0;
                    if corners.len() < 3 {
                        bail!("face with {} vertices", corners.len());
                    }

                    let mut face = Vec::with_capacity(corners.len());
                    for corner in corners {
                        let position = *data
                            .position
                            .get(corner.0)
                            .ok_or_else(|| anyhow!("position index {} out of range", corner.0))?;
                        let texcoord = match corner.1 {
                            Some(t) => *data
                                .texture
                                .get(t)
                                .ok_or_else(|| anyhow!("texcoord index {} out of range", t))?,
                            None => {
                                let uv = (Vec3::from(position) - min) / extent;
                                [uv.x, uv.y]
                            }
                        };
                        let normal = match corner.2 {
                            Some(n) => Some(
                                *data
                                    .normal
                                    .get(n)
                                    .ok_or_else(|| anyhow!("normal index {} out of range", n))?,
                            ),
                            None => None,
                        };
                        face.push((position, normal, texcoord));
                    }

                    let face_normal = face_normal(face[0].0, face[1].0, face[2].0);
                    for i in 1..face.len() - 1 {
                        for corner in [face[0], face[i], face[i + 1]] {
                            let (position, normal, texcoord) = corner;
                            vertices.push(Vertex {
                                position,
                                normal: normal.unwrap_or(face_normal),
                                texcoord,
                            });
                        }
                    }
                }
            }
        }

        if vertices.is_empty() {
            bail!("mesh has no faces");
        }

        let indices = (0..vertices.len() as u32).collect();
        Ok(Self { vertices, indices })
    }

    pub fn index_count(&self) -> i32 {
        self.indices.len() as i32
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn bounds(positions: &[[f32; 3]]) -> (Vec3, Vec3) {
    if positions.is_empty() {
        return (Vec3::ZERO, Vec3::ONE);
    }
    positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(Vec3::from(*p)), max.max(Vec3::from(*p))),
    )
}

fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let (a, b, c) = (Vec3::from(a), Vec3::from(b), Vec3::from(c));
    (b - a).cross(c - a).normalize_or_zero().to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_square_is_two_triangles() {
        let mesh = Mesh::load(None).unwrap();
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.vertices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert!(v.position[0].abs() <= 1.0 && v.position[1].abs() <= 1.0);
            assert!((0.0..=1.0).contains(&v.texcoord[0]));
        }
    }

    #[test]
    fn quad_without_normals_gets_face_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = Mesh::parse(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        // (1, 1) is the far corner of the bounds
        assert_eq!(mesh.vertices[2].texcoord, [1.0, 1.0]);
    }

    #[test]
    fn vertex_layout_matches_offsets() {
        assert_eq!(Vertex::STRIDE, 32);
        let mesh = Mesh::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".as_bytes()).unwrap();
        assert_eq!(mesh.vertex_bytes().len(), 3 * 32);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(Mesh::parse("# nothing here\n".as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Mesh::load(Some(Path::new("/nonexistent/mesh.obj"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mesh.obj"));
    }
}
