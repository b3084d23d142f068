//! Scalar quantities bound to surface mesh elements.

use std::path::Path;

use meshscope_core::quantity::{DataType, ElementKind, Quantity, QuantityId};
use meshscope_core::{MeshscopeError, ParentSurface, Result, Structure};
use meshscope_render::ColorAttribute;

use crate::scalar_quantity::{ColorSetup, ScalarQuantity};

/// Faces whose values could not be expanded exactly during a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyReport {
    /// Element kind of the quantity that was expanded.
    pub kind: ElementKind,
    /// `(face, degree)` of every face that was approximated.
    pub faces: Vec<(usize, usize)>,
}

impl TopologyReport {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            faces: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Indices of the approximated faces.
    pub fn face_indices(&self) -> Vec<usize> {
        self.faces.iter().map(|&(face, _)| face).collect()
    }

    /// One [`MeshscopeError::UnsupportedTopology`] per approximated face.
    pub fn errors(&self) -> impl Iterator<Item = MeshscopeError> + '_ {
        self.faces
            .iter()
            .map(|&(face, degree)| MeshscopeError::UnsupportedTopology {
                kind: self.kind,
                face,
                degree,
            })
    }
}

/// A scalar value per vertex, face, edge or halfedge of a surface mesh.
#[derive(Debug, Clone)]
pub struct SurfaceScalarQuantity {
    base: ScalarQuantity,
    element: ElementKind,
    values: Vec<f64>,
}

impl SurfaceScalarQuantity {
    /// Creates a quantity with one value per `element` of `parent`.
    ///
    /// Fails with [`MeshscopeError::SizeMismatch`] if the value count differs
    /// from the parent's element count.
    pub fn new<P>(
        name: impl Into<String>,
        id: QuantityId,
        element: ElementKind,
        values: Vec<f64>,
        data_type: DataType,
        parent: &P,
        setup: ColorSetup<'_>,
    ) -> Result<Self>
    where
        P: ParentSurface + Structure,
    {
        let expected = parent.element_count(element);
        if values.len() != expected {
            return Err(MeshscopeError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        let weights = parent.element_weights(element);
        let base = ScalarQuantity::new(
            name,
            parent.name(),
            id,
            data_type,
            &values,
            &weights,
            setup,
        )?;

        Ok(Self {
            base,
            element,
            values,
        })
    }

    pub fn base(&self) -> &ScalarQuantity {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut ScalarQuantity {
        &mut self.base
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Label shown in quantity lists, e.g. `"height (vertex scalar)"`.
    pub fn display_name(&self) -> String {
        format!("{} ({} scalar)", self.base.name(), self.element)
    }

    /// Value of element `index`, if it exists.
    pub fn build_element_info(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Info panel line for element `index`.
    pub fn element_info_text(&self, index: usize) -> Option<String> {
        self.build_element_info(index)
            .map(|value| format!("{}: {value}", self.base.name()))
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        self.base.write_to_file(path)
    }

    /// Expands element values into per-corner attributes of the parent's
    /// triangulation.
    pub fn fill_color_buffer(&self, parent: &impl ParentSurface) -> (ColorAttribute, TopologyReport) {
        let mut report = TopologyReport::new(self.element);
        let attribute = match self.element {
            ElementKind::Vertex => ColorAttribute::Scalar(self.expand_vertex(parent)),
            ElementKind::Face => ColorAttribute::Scalar(self.expand_face(parent)),
            ElementKind::Edge => ColorAttribute::Triple(self.expand_edge(parent)),
            ElementKind::Halfedge => {
                ColorAttribute::Triple(self.expand_halfedge(parent, &mut report))
            }
        };

        if !report.is_empty() {
            log::warn!(
                "{}: {} scalars are not exact on {} non-triangular faces",
                self.base.name(),
                self.element,
                report.faces.len()
            );
        }
        (attribute, report)
    }

    fn expand_vertex(&self, parent: &impl ParentSurface) -> Vec<f32> {
        parent
            .triangulation()
            .iter()
            .flat_map(|tri| tri.vertex_inds.map(|v| self.values[v as usize] as f32))
            .collect()
    }

    fn expand_face(&self, parent: &impl ParentSurface) -> Vec<f32> {
        parent
            .triangulation()
            .iter()
            .flat_map(|tri| [self.values[tri.face_ind as usize] as f32; 3])
            .collect()
    }

    // Internal diagonals take the mean of the triangle's real edges.
    fn expand_edge(&self, parent: &impl ParentSurface) -> Vec<[f32; 3]> {
        let triangulation = parent.triangulation();
        let mut out = Vec::with_capacity(triangulation.len() * 3);
        for tri in triangulation {
            let (sum, count) = tri
                .edge_inds
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(sum, count), &e| {
                    (sum + self.values[e as usize], count + 1)
                });
            let fallback = if count == 0 { 0.0 } else { sum / count as f64 };

            let triple = tri
                .edge_inds
                .map(|e| e.map_or(fallback, |e| self.values[e as usize]) as f32);
            out.extend([triple; 3]);
        }
        out
    }

    fn expand_halfedge(
        &self,
        parent: &impl ParentSurface,
        report: &mut TopologyReport,
    ) -> Vec<[f32; 3]> {
        let mut out = Vec::with_capacity(parent.triangulation().len() * 3);
        for face in 0..parent.element_count(ElementKind::Face) {
            let degree = parent.face_degree(face);
            if degree > 3 {
                report.faces.push((face, degree));
            }

            // Rolling window over the face's halfedges, one triple per fan triangle
            let (mut c0, mut c1) = (0.0, 0.0);
            for (i, he) in parent.face_halfedges(face).enumerate() {
                let c2 = self.values[parent.next_halfedge(he)];
                if i >= 2 {
                    out.extend([[c0 as f32, c1 as f32, c2 as f32]; 3]);
                }
                c0 = c1;
                c1 = c2;
            }
        }
        out
    }
}

impl Quantity for SurfaceScalarQuantity {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn structure_name(&self) -> &str {
        self.base.structure_name()
    }

    fn id(&self) -> QuantityId {
        self.base.id()
    }

    fn element_kind(&self) -> ElementKind {
        self.element
    }

    fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    fn data_size(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface_mesh::SurfaceMesh;
    use glam::Vec3;
    use meshscope_core::{ScalarOptions, TriangulationFace};
    use meshscope_render::ColorMapRegistry;

    fn triangle() -> SurfaceMesh {
        SurfaceMesh::new(
            "tri",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![vec![0, 1, 2]],
        )
        .unwrap()
    }

    fn quad() -> SurfaceMesh {
        SurfaceMesh::new(
            "quad",
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            vec![vec![0, 1, 2, 3]],
        )
        .unwrap()
    }

    fn make(mesh: &SurfaceMesh, element: ElementKind, values: Vec<f64>) -> SurfaceScalarQuantity {
        SurfaceScalarQuantity::new(
            "q",
            QuantityId(7),
            element,
            values,
            DataType::Standard,
            mesh,
            ColorSetup {
                color_maps: &ColorMapRegistry::new(),
                options: &ScalarOptions::default(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_vertex_expansion() {
        let mesh = triangle();
        let q = make(&mesh, ElementKind::Vertex, vec![1.0, 2.0, 3.0]);
        let (attribute, report) = q.fill_color_buffer(&mesh);
        assert_eq!(attribute, ColorAttribute::Scalar(vec![1.0, 2.0, 3.0]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_face_expansion() {
        let mesh = SurfaceMesh::new(
            "two",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            vec![vec![0, 1, 2], vec![1, 3, 2]],
        )
        .unwrap();
        let q = make(&mesh, ElementKind::Face, vec![5.0, 9.0]);
        let (attribute, _) = q.fill_color_buffer(&mesh);
        assert_eq!(
            attribute,
            ColorAttribute::Scalar(vec![5.0, 5.0, 5.0, 9.0, 9.0, 9.0])
        );
    }

    #[test]
    fn test_face_expansion_covers_fan_triangles() {
        let mesh = quad();
        let q = make(&mesh, ElementKind::Face, vec![2.5]);
        let (attribute, _) = q.fill_color_buffer(&mesh);
        assert_eq!(attribute, ColorAttribute::Scalar(vec![2.5; 6]));
    }

    #[test]
    fn test_edge_expansion_fills_diagonal_with_mean() {
        // The diagonal (0,2) is not an edge of the quad
        let mesh = quad();
        assert_eq!(mesh.edges(), &[(0, 1), (0, 3), (1, 2), (2, 3)]);
        let q = make(&mesh, ElementKind::Edge, vec![4.0, 10.0, 6.0, 20.0]);
        let (attribute, report) = q.fill_color_buffer(&mesh);
        assert!(report.is_empty());

        // Triangle [0,1,2]: sides (0,1)=4, (1,2)=6, diagonal (2,0) -> 5
        // Triangle [0,2,3]: diagonal (0,2) -> 15, (2,3)=20, (3,0)=10
        let ColorAttribute::Triple(triples) = attribute else {
            panic!("edge expansion must produce triples");
        };
        assert_eq!(triples.len(), 6);
        assert_eq!(&triples[..3], &[[4.0, 6.0, 5.0]; 3]);
        assert_eq!(&triples[3..], &[[15.0, 20.0, 10.0]; 3]);
    }

    #[test]
    fn test_edge_expansion_on_hexagon() {
        let mesh = SurfaceMesh::new(
            "hex",
            (0..6)
                .map(|i| {
                    let a = i as f32 * std::f32::consts::FRAC_PI_3;
                    Vec3::new(a.cos(), a.sin(), 0.0)
                })
                .collect(),
            vec![vec![0, 1, 2, 3, 4, 5]],
        )
        .unwrap();
        let q = make(&mesh, ElementKind::Edge, vec![1.0; 6]);
        let (attribute, _) = q.fill_color_buffer(&mesh);
        let ColorAttribute::Triple(triples) = attribute else {
            panic!("edge expansion must produce triples");
        };
        assert_eq!(triples.len(), 12);
        assert!(triples.iter().flatten().all(|v| (*v - 1.0).abs() < 1e-6));
    }

    /// A single triangle none of whose sides is a real edge.
    struct DiagonalOnly(Vec<TriangulationFace>);

    impl ParentSurface for DiagonalOnly {
        fn element_count(&self, kind: ElementKind) -> usize {
            match kind {
                ElementKind::Face => 1,
                _ => 3,
            }
        }
        fn element_weight(&self, _kind: ElementKind, _index: usize) -> f64 {
            1.0
        }
        fn triangulation(&self) -> &[TriangulationFace] {
            &self.0
        }
        fn face_degree(&self, _face: usize) -> usize {
            3
        }
        fn face_halfedges(&self, _face: usize) -> std::ops::Range<usize> {
            0..3
        }
        fn next_halfedge(&self, halfedge: usize) -> usize {
            (halfedge + 1) % 3
        }
        fn notify_color_dependency_dirty(&mut self, _quantity: QuantityId) {}
        fn set_active_exclusive(&mut self, _quantity: QuantityId) {}
        fn clear_active(&mut self, _quantity: QuantityId) {}
    }

    #[test]
    fn test_edge_expansion_without_real_edges_uses_zero() {
        let mesh = triangle();
        let q = make(&mesh, ElementKind::Edge, vec![7.0, 8.0, 9.0]);
        let parent = DiagonalOnly(vec![TriangulationFace {
            vertex_inds: [0, 1, 2],
            edge_inds: [None; 3],
            halfedge_inds: [None; 3],
            face_ind: 0,
        }]);
        assert_eq!(parent.triangulation()[0].num_valid_edges(), 0);

        let (attribute, _) = q.fill_color_buffer(&parent);
        assert_eq!(attribute, ColorAttribute::Triple(vec![[0.0; 3]; 3]));
    }

    #[test]
    fn test_halfedge_expansion_triangle() {
        let mesh = triangle();
        let q = make(&mesh, ElementKind::Halfedge, vec![1.0, 2.0, 3.0]);
        let (attribute, report) = q.fill_color_buffer(&mesh);
        assert!(report.is_empty());
        // Window ends on next(h2) = h0
        assert_eq!(attribute, ColorAttribute::Triple(vec![[2.0, 3.0, 1.0]; 3]));
    }

    #[test]
    fn test_halfedge_expansion_reports_polygons() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mesh = quad();
        let q = make(&mesh, ElementKind::Halfedge, vec![1.0, 2.0, 3.0, 4.0]);
        let (attribute, report) = q.fill_color_buffer(&mesh);

        assert_eq!(
            attribute,
            ColorAttribute::Triple(vec![
                [2.0, 3.0, 4.0],
                [2.0, 3.0, 4.0],
                [2.0, 3.0, 4.0],
                [3.0, 4.0, 1.0],
                [3.0, 4.0, 1.0],
                [3.0, 4.0, 1.0],
            ])
        );
        assert_eq!(report.faces, vec![(0, 4)]);
        let errors: Vec<_> = report.errors().collect();
        assert!(matches!(
            errors.as_slice(),
            [MeshscopeError::UnsupportedTopology {
                kind: ElementKind::Halfedge,
                face: 0,
                degree: 4
            }]
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let mesh = triangle();
        let result = SurfaceScalarQuantity::new(
            "q",
            QuantityId(0),
            ElementKind::Vertex,
            vec![1.0, 2.0],
            DataType::Standard,
            &mesh,
            ColorSetup {
                color_maps: &ColorMapRegistry::new(),
                options: &ScalarOptions::default(),
            },
        );
        assert!(matches!(
            result,
            Err(MeshscopeError::SizeMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_element_info() {
        let mesh = triangle();
        let q = make(&mesh, ElementKind::Vertex, vec![0.5, 1.5, 2.5]);
        assert_eq!(q.build_element_info(1), Some(1.5));
        assert_eq!(q.build_element_info(3), None);
        assert_eq!(q.element_info_text(2).as_deref(), Some("q: 2.5"));
        assert_eq!(q.display_name(), "q (vertex scalar)");
    }

    #[test]
    fn test_histogram_uses_element_weights() {
        let mesh = quad();
        let q = make(&mesh, ElementKind::Face, vec![1.0]);
        assert!((q.base().histogram().total_weight() - 1.0).abs() < 1e-9);

        let q = make(&mesh, ElementKind::Edge, vec![1.0, 2.0, 3.0, 4.0]);
        assert!((q.base().histogram().total_weight() - 4.0).abs() < 1e-9);
    }
}
