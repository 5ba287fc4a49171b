// Host-side tests for polyhedron and torus-knot meshes.

use ambient_core::*;

#[test]
fn vertex_counts_match_solids() {
    assert_eq!(Mesh::tetrahedron(1.0).positions.len(), 4);
    assert_eq!(Mesh::octahedron(1.0).positions.len(), 6);
    assert_eq!(Mesh::icosahedron(1.0).positions.len(), 12);
    assert_eq!(Mesh::cube(1.0).positions.len(), 8);
    assert_eq!(Mesh::dodecahedron(1.0).positions.len(), 20);
}

#[test]
fn polyhedra_sit_on_their_circumsphere() {
    for (m, r) in [
        (Mesh::tetrahedron(2.0), 2.0),
        (Mesh::octahedron(2.0), 2.0),
        (Mesh::icosahedron(2.0), 2.0),
        (Mesh::dodecahedron(2.0), 2.0),
    ] {
        for p in &m.positions {
            assert!((p.length() - r).abs() < 1e-4, "{:?}", p);
        }
        assert!((m.bounding_radius() - r).abs() < 1e-4);
    }
}

#[test]
fn cube_edge_matches_size() {
    let m = Mesh::cube(2.0);
    assert_eq!(m.edges().len(), 12 + 6);
    for p in &m.positions {
        assert!(p.to_array().iter().all(|c| (c.abs() - 1.0).abs() < 1e-6));
    }
}

#[test]
fn faces_point_outward() {
    for m in [
        Mesh::tetrahedron(1.0),
        Mesh::octahedron(1.0),
        Mesh::icosahedron(1.0),
        Mesh::cube(1.0),
        Mesh::dodecahedron(1.0),
    ] {
        for t in &m.triangles {
            let c = (m.positions[t[0] as usize] + m.positions[t[1] as usize] + m.positions[t[2] as usize]) / 3.0;
            assert!(m.face_normal(t).dot(c) > 0.0);
        }
    }
}

#[test]
fn torus_knot_grid_is_complete() {
    let opts = TorusKnotOptions::with_radius(5.0);
    let m = Mesh::torus_knot(opts);
    let expected_vertices = (opts.tubular_segments + 1) * (opts.radial_segments + 1);
    assert_eq!(m.positions.len(), expected_vertices as usize);
    assert_eq!(
        m.triangles.len(),
        (opts.tubular_segments * opts.radial_segments * 2) as usize
    );
    let n = m.positions.len() as u32;
    assert!(m.triangles.iter().flatten().all(|&i| i < n));
    assert!(m.bounding_radius() < 5.0 * 2.0);
}

#[test]
fn for_shape_covers_every_kind() {
    for kind in [
        ShapeKind::Tetrahedron,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
        ShapeKind::Cube,
        ShapeKind::Dodecahedron,
        ShapeKind::TorusKnot,
    ] {
        let m = Mesh::for_shape(kind, 1.0);
        assert!(!m.triangles.is_empty(), "{:?}", kind);
        assert!(!m.edges().is_empty());
        assert_eq!(m.vertex_normals().len(), m.positions.len());
    }
}

#[test]
fn cube_size_maps_to_scaled_edge() {
    let m = Mesh::for_shape(ShapeKind::Cube, 3.0);
    let half_edge = 3.0 * CUBE_EDGE_PER_SIZE / 2.0;
    assert!((half_edge - 2.0_f32).abs() < 1e-6);
    for p in &m.positions {
        assert!(p.to_array().iter().all(|c| (c.abs() - half_edge).abs() < 1e-5));
    }
}
