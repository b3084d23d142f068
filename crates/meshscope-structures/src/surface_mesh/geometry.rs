//! Geometry computation methods for surface meshes.
//!
//! This module derives everything scalar quantities need from raw vertices
//! and faces:
//! - Fan triangulation with edge and halfedge slots per triangle side
//! - Unique edge extraction
//! - Halfedge layout (face corners in face order)
//! - Element weights: vertex and face areas, edge lengths

use std::collections::HashMap;

use meshscope_core::surface::TriangulationFace;
use meshscope_core::{MeshscopeError, Result};

use super::SurfaceMesh;

/// Checks that every face has at least three corners, all in range.
pub(super) fn validate_faces(num_vertices: usize, faces: &[Vec<u32>]) -> Result<()> {
    for (face, indices) in faces.iter().enumerate() {
        if indices.len() < 3 {
            return Err(MeshscopeError::InvalidFace {
                face,
                reason: format!("has {} corners, need at least 3", indices.len()),
            });
        }
        if let Some(&v) = indices.iter().find(|&&v| v as usize >= num_vertices) {
            return Err(MeshscopeError::InvalidFace {
                face,
                reason: format!("vertex index {v} out of range ({num_vertices} vertices)"),
            });
        }
    }
    Ok(())
}

fn sorted_pair(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl SurfaceMesh {
    /// Recomputes all derived data. Edges and halfedges come first since the
    /// triangulation refers to them.
    pub(super) fn recompute(&mut self) {
        self.compute_edges();
        self.compute_halfedges();
        self.compute_triangulation();
        self.compute_areas();
        self.compute_edge_lengths();
    }

    /// Computes unique edges as sorted pairs.
    fn compute_edges(&mut self) {
        let mut edges: Vec<(u32, u32)> = self
            .faces
            .iter()
            .flat_map(|face| {
                let n = face.len();
                (0..n).map(move |i| sorted_pair(face[i], face[(i + 1) % n]))
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        self.edges = edges;
    }

    /// Lays out halfedges: halfedge `start(f) + i` runs from corner `i` to
    /// corner `i + 1` of face `f`.
    fn compute_halfedges(&mut self) {
        let edge_index: HashMap<(u32, u32), u32> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, &e)| (e, i as u32))
            .collect();

        self.halfedge_start.clear();
        self.halfedge_face.clear();
        self.halfedge_edge.clear();

        let mut start = 0;
        for (f, face) in self.faces.iter().enumerate() {
            self.halfedge_start.push(start);
            let n = face.len();
            for i in 0..n {
                let edge = sorted_pair(face[i], face[(i + 1) % n]);
                self.halfedge_face.push(f as u32);
                // Every face side was inserted by compute_edges
                self.halfedge_edge.push(edge_index[&edge]);
            }
            start += n;
        }
        self.halfedge_start.push(start);
    }

    /// Computes triangulation using fan triangulation.
    ///
    /// For a polygon with vertices [v0, v1, v2, v3, ...], creates triangles:
    /// [v0, v1, v2], [v0, v2, v3], [v0, v3, v4], ...
    ///
    /// In triangle `j` of an n-gon, side 0 (v0 -> v(j+1)) is a real edge only
    /// for `j == 0`, side 1 always is, and side 2 (v(j+2) -> v0) only for
    /// `j == n - 3`.
    fn compute_triangulation(&mut self) {
        self.triangulation.clear();
        self.face_to_tri_range.clear();

        for (f, face) in self.faces.iter().enumerate() {
            let start_tri = self.triangulation.len();
            let n = face.len();
            let he0 = self.halfedge_start[f];
            let halfedge = |corner: usize| Some((he0 + corner) as u32);

            for j in 0..n - 2 {
                let halfedge_inds = [
                    if j == 0 { halfedge(0) } else { None },
                    halfedge(j + 1),
                    if j == n - 3 { halfedge(n - 1) } else { None },
                ];
                let edge_inds =
                    halfedge_inds.map(|he| he.map(|he| self.halfedge_edge[he as usize]));

                self.triangulation.push(TriangulationFace {
                    vertex_inds: [face[0], face[j + 1], face[j + 2]],
                    edge_inds,
                    halfedge_inds,
                    face_ind: f as u32,
                });
            }

            self.face_to_tri_range
                .push(start_tri..self.triangulation.len());
        }
    }

    /// Accumulates face areas over fan triangles and gives each triangle
    /// corner a third of the triangle's area.
    fn compute_areas(&mut self) {
        self.face_areas = vec![0.0; self.faces.len()];
        self.vertex_areas = vec![0.0; self.vertices.len()];

        for tri in &self.triangulation {
            let [a, b, c] = tri.vertex_inds.map(|v| self.vertices[v as usize].as_dvec3());
            let area = 0.5 * (b - a).cross(c - a).length();
            self.face_areas[tri.face_ind as usize] += area;
            for v in tri.vertex_inds {
                self.vertex_areas[v as usize] += area / 3.0;
            }
        }
    }

    fn compute_edge_lengths(&mut self) {
        self.edge_lengths = self
            .edges
            .iter()
            .map(|&(a, b)| {
                let a = self.vertices[a as usize].as_dvec3();
                let b = self.vertices[b as usize].as_dvec3();
                a.distance(b)
            })
            .collect();
    }
}
