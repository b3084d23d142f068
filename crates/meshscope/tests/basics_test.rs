//! Basic integration tests for meshscope.
//!
//! Note: meshscope keeps its state in a process-wide `OnceLock`, so all
//! checks run in sequence inside a single test function.

use meshscope::*;

fn unit_square() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    (vertices, vec![vec![0, 1, 2, 3]])
}

#[test]
fn test_basics() {
    // Test 0: Nothing works before init
    {
        assert!(!is_initialized());
        assert!(matches!(options(), Err(MeshscopeError::NotInitialized)));
        let (vertices, faces) = unit_square();
        assert!(matches!(
            register_surface_mesh("early", vertices, faces),
            Err(MeshscopeError::NotInitialized)
        ));
        assert!(get_surface_mesh("early").is_none());
    }

    init().expect("init failed");
    assert!(is_initialized());
    assert!(matches!(init(), Err(MeshscopeError::AlreadyInitialized)));

    // Test 1: Register surface mesh
    let (vertices, faces) = unit_square();
    let mesh = register_surface_mesh("quad", vertices.clone(), faces.clone()).unwrap();
    {
        assert_eq!(mesh.name(), "quad");
        assert!(get_surface_mesh("quad").is_some());
        assert!(get_surface_mesh("nonexistent").is_none());
        let counts: Vec<usize> = ElementKind::ALL
            .iter()
            .map(|&kind| mesh.element_count(kind).unwrap())
            .collect();
        assert_eq!(counts, vec![4, 1, 4, 4]);

        assert!(matches!(
            register_surface_mesh("quad", vertices.clone(), faces),
            Err(MeshscopeError::StructureExists(_))
        ));
        assert!(matches!(
            register_surface_mesh("broken", vertices, vec![vec![0, 1, 9]]),
            Err(MeshscopeError::InvalidFace { face: 0, .. })
        ));
        assert!(get_surface_mesh("broken").is_none());
    }

    // Test 2: Add quantities and keep exactly one enabled
    let height = mesh
        .add_vertex_scalar_quantity("height", vec![0.0, 1.0, 2.0, 3.0], DataType::Standard)
        .unwrap();
    let signed = mesh
        .add_face_scalar_quantity("signed", vec![-2.0], DataType::Symmetric)
        .unwrap();
    {
        assert_eq!(height.data_range().unwrap(), (0.0, 3.0));
        assert_eq!(height.viz_range().unwrap(), (0.0, 3.0));
        assert_eq!(signed.viz_range().unwrap(), (-2.0, 2.0));
        assert_eq!(mesh.num_quantities().unwrap(), 2);

        height.enable().unwrap();
        assert!(height.is_enabled().unwrap());
        signed.enable().unwrap();
        assert!(signed.is_enabled().unwrap());
        assert!(!height.is_enabled().unwrap());
        assert_eq!(mesh.active_scalar_quantity().unwrap().name(), "signed");

        signed.disable().unwrap();
        assert!(mesh.active_scalar_quantity().is_none());
    }

    // Test 3: Construction errors
    {
        assert!(matches!(
            mesh.add_vertex_scalar_quantity("short", vec![1.0, 2.0, 3.0], DataType::Standard),
            Err(MeshscopeError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            mesh.add_vertex_scalar_quantity("height", vec![0.0; 4], DataType::Standard),
            Err(MeshscopeError::QuantityExists(..))
        ));
        // Names only need to be unique per element kind
        let edge_height = mesh
            .add_edge_scalar_quantity("height", vec![1.0, 2.0, 3.0, 4.0], DataType::Magnitude)
            .unwrap();
        assert_eq!(edge_height.kind(), ElementKind::Edge);
        assert_eq!(edge_height.viz_range().unwrap(), (0.0, 4.0));
        assert!(mesh
            .get_scalar_quantity(ElementKind::Vertex, "height")
            .is_some());
    }

    // Test 4: Color program rebuilds are debounced
    {
        assert!(height.ensure_color_buffer_fresh().unwrap().is_some());
        assert!(height.ensure_color_buffer_fresh().unwrap().is_none());
        let (original, report) = height.corner_colors().unwrap();
        assert!(report.is_none());
        assert!(matches!(&original, CornerColors::Single(colors) if colors.len() == 6));

        height.set_color_map(1).unwrap().set_color_map(4).unwrap();
        let report = height.ensure_color_buffer_fresh().unwrap().unwrap();
        assert!(report.is_empty());
        assert!(height.ensure_color_buffer_fresh().unwrap().is_none());
        assert_ne!(height.corner_colors().unwrap().0, original);

        // Unknown indices change nothing
        height.set_color_map(99).unwrap();
        assert_eq!(height.color_map_index().unwrap(), 4);
        assert!(height.ensure_color_buffer_fresh().unwrap().is_none());

        height.set_color_map_by_name("viridis").unwrap();
        assert_eq!(height.color_map_index().unwrap(), 0);
        // The colormap change is rebuilt by the color lookup itself
        let (restored, report) = height.corner_colors().unwrap();
        assert_eq!(restored, original);
        assert!(report.is_some_and(|r| r.is_empty()));
        assert!(height.set_color_map_by_name("no such map").is_err());
    }

    // Test 5: Visualization range
    {
        height.set_viz_range(2.5, -10.0).unwrap();
        assert_eq!(height.viz_range().unwrap(), (0.0, 2.5));
        let uniforms = height.color_uniforms().unwrap();
        assert_eq!((uniforms.range_low, uniforms.range_high), (0.0, 2.5));
        // Range changes only touch uniforms
        assert!(height.ensure_color_buffer_fresh().unwrap().is_none());

        height.reset_viz_range().unwrap();
        assert_eq!(height.viz_range().unwrap(), (0.0, 3.0));

        signed.set_viz_range(-0.5, 10.0).unwrap();
        assert_eq!(signed.viz_range().unwrap(), (-0.5, 2.0));
        signed.reset_viz_range().unwrap();
        assert_eq!(signed.viz_range().unwrap(), (-2.0, 2.0));
    }

    // Test 6: Export and element info
    {
        let path = std::env::temp_dir().join("meshscope_basics_height.txt");
        assert!(matches!(
            height.write_to_file(&path),
            Err(MeshscopeError::NotImplemented(_))
        ));
        assert!(!path.exists());
        assert_eq!(height.viz_range().unwrap(), (0.0, 3.0));

        assert_eq!(height.build_element_info(2).unwrap(), Some(2.0));
        assert_eq!(height.build_element_info(10).unwrap(), None);
    }

    // Test 7: Halfedge data on a quad is reported, not fatal
    {
        let corners = mesh
            .add_halfedge_scalar_quantity("corners", vec![1.0, 2.0, 3.0, 4.0], DataType::Standard)
            .unwrap();
        let (colors, report) = corners.corner_colors().unwrap();
        assert_eq!(report.unwrap().face_indices(), vec![0]);
        // Two fan triangles, each corner colored once per triangle side
        let CornerColors::Triple(sides) = &colors else {
            panic!("halfedge data must color every triangle side");
        };
        assert_eq!(sides.len(), 6);
        assert_eq!(colors.corner_count(), 6);
        assert!(corners.ensure_color_buffer_fresh().unwrap().is_none());
    }

    // Test 8: Options feed new quantities
    {
        let mut opts = options().unwrap();
        opts.scalar.histogram_bins = 10;
        opts.scalar.color_map_standard = "reds".to_string();
        set_options(opts).unwrap();

        let later = mesh
            .add_face_scalar_quantity("later", vec![7.0], DataType::Standard)
            .unwrap();
        assert_eq!(later.color_map_index().unwrap(), 3);
        assert_eq!(later.histogram_heights().unwrap().len(), 10);
        // Existing quantities keep their settings
        assert_eq!(height.histogram_heights().unwrap().len(), 50);

        let path = std::env::temp_dir().join("meshscope_basics_options.json");
        std::fs::write(&path, r#"{ "scalar": { "histogram_bins": 8 } }"#).unwrap();
        load_options(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let loaded = options().unwrap();
        assert_eq!(loaded.scalar.histogram_bins, 8);
        assert_eq!(loaded.scalar.color_map_standard, "viridis");

        assert!(load_options(std::env::temp_dir().join("meshscope_missing.json")).is_err());
        assert_eq!(options().unwrap().scalar.histogram_bins, 8);
    }

    // Test 9: Remove quantities
    {
        mesh.remove_scalar_quantity(ElementKind::Face, "signed")
            .unwrap();
        assert!(mesh.get_scalar_quantity(ElementKind::Face, "signed").is_none());
        assert!(matches!(
            signed.viz_range(),
            Err(MeshscopeError::QuantityNotFound(..))
        ));
        assert!(mesh
            .remove_scalar_quantity(ElementKind::Face, "signed")
            .is_err());
    }

    // Test 10: Remove structures
    {
        remove_structure("quad").unwrap();
        assert!(get_surface_mesh("quad").is_none());
        assert!(matches!(
            height.viz_range(),
            Err(MeshscopeError::StructureNotFound(_))
        ));
        assert!(matches!(
            remove_structure("quad"),
            Err(MeshscopeError::StructureNotFound(_))
        ));

        let (vertices, faces) = unit_square();
        register_surface_mesh("a", vertices.clone(), faces.clone()).unwrap();
        register_surface_mesh("b", vertices, faces).unwrap();
        remove_all_structures();
        assert!(get_surface_mesh("a").is_none());
        assert!(get_surface_mesh("b").is_none());
    }

    shutdown();
    assert!(!is_initialized());
    assert!(matches!(options(), Err(MeshscopeError::NotInitialized)));

    // Re-initialization starts from a clean slate
    init().expect("re-init failed");
    assert_eq!(options().unwrap(), Options::default());
    shutdown();
}
