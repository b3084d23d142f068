//! Demo showing basic meshscope usage.
//!
//! Builds a wavy grid of quads, attaches scalar data on every element kind
//! and prints what a renderer would consume. Run with `RUST_LOG=debug` to
//! see rebuilds and topology warnings.

use meshscope::*;

fn main() -> Result<()> {
    init()?;

    // Create an n x n grid of quads
    let n = 16u32;
    let mut vertices = Vec::new();
    for i in 0..=n {
        for j in 0..=n {
            let x = i as f32 / n as f32;
            let y = j as f32 / n as f32;
            let z = 0.1 * (6.0 * x).sin() * (6.0 * y).cos();
            vertices.push(Vec3::new(x, y, z));
        }
    }
    let mut faces = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let v = i * (n + 1) + j;
            faces.push(vec![v, v + n + 1, v + n + 2, v + 1]);
        }
    }

    let mesh = register_surface_mesh("grid", vertices.clone(), faces)?;

    let height: Vec<f64> = vertices.iter().map(|v| f64::from(v.z)).collect();
    let height = mesh.add_vertex_scalar_quantity("height", height, DataType::Symmetric)?;
    height.enable()?;

    let num_faces = mesh.element_count(ElementKind::Face)?;
    let face_ids: Vec<f64> = (0..num_faces).map(|f| f as f64).collect();
    mesh.add_face_scalar_quantity("face index", face_ids, DataType::Standard)?;

    let num_edges = mesh.element_count(ElementKind::Edge)?;
    let edge_ids: Vec<f64> = (0..num_edges).map(|e| (e % 7) as f64).collect();
    mesh.add_edge_scalar_quantity("edge pattern", edge_ids, DataType::Magnitude)?;

    println!("height range: {:?}", height.data_range()?);
    println!("height viz range: {:?}", height.viz_range()?);

    // Several colormap changes before a draw cost a single rebuild
    height.set_color_map_by_name("coolwarm")?;
    height.set_color_map_by_name("rainbow")?;
    if let Some(report) = height.ensure_color_buffer_fresh()? {
        println!("rebuilt colors, {} inexact faces", report.faces.len());
    }

    height.set_viz_range(-0.05, 0.05)?;
    let uniforms = height.color_uniforms()?;
    println!(
        "uniforms: [{}, {}], {} corner colors",
        uniforms.range_low,
        uniforms.range_high,
        height.corner_colors()?.0.corner_count()
    );

    let heights = height.histogram_heights()?;
    println!("histogram: {} bins", heights.len());

    // Halfedge data on quads is drawn approximately and reported
    let num_halfedges = mesh.element_count(ElementKind::Halfedge)?;
    let corners = mesh.add_halfedge_scalar_quantity(
        "corner",
        (0..num_halfedges).map(|h| (h % 4) as f64).collect(),
        DataType::Standard,
    )?;
    if let Some(report) = corners.ensure_color_buffer_fresh()? {
        for err in report.errors().take(3) {
            println!("{err}");
        }
    }

    shutdown();
    Ok(())
}
