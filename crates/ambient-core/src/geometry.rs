/// Procedural meshes for the floating solids.
///
/// Every shape is produced as an indexed triangle mesh centered on the
/// origin. Wireframe rendering draws the unique edge set of those triangles,
/// so a cube shows its face diagonals and a dodecahedron its fan splits.
use crate::config::ShapeKind;
use crate::constants::CUBE_EDGE_PER_SIZE;
use fnv::FnvHashSet;
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

#[derive(Clone, Copy, Debug)]
pub struct TorusKnotOptions {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl TorusKnotOptions {
    /// Proportions of the landing-page accent knot scaled to `radius`.
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            tube: radius * 0.3,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        }
    }
}

const PHI: f32 = 1.618_034; // (1 + sqrt 5) / 2

impl Mesh {
    /// Mesh for `kind` where `size` is the circumradius. Cubes are scaled
    /// to an edge of `size * CUBE_EDGE_PER_SIZE` so they read the same
    /// visual weight as the other solids.
    pub fn for_shape(kind: ShapeKind, size: f32) -> Self {
        match kind {
            ShapeKind::Tetrahedron => Self::tetrahedron(size),
            ShapeKind::Octahedron => Self::octahedron(size),
            ShapeKind::Icosahedron => Self::icosahedron(size),
            ShapeKind::Cube => Self::cube(size * CUBE_EDGE_PER_SIZE),
            ShapeKind::Dodecahedron => Self::dodecahedron(size),
            ShapeKind::TorusKnot => Self::torus_knot(TorusKnotOptions::with_radius(size)),
        }
    }

    pub fn tetrahedron(radius: f32) -> Self {
        let corners = [
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
        ];
        let triangles = vec![[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
        Self::polyhedron(&corners, triangles, radius)
    }

    pub fn octahedron(radius: f32) -> Self {
        let corners = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let triangles = vec![
            [0, 2, 4],
            [0, 4, 3],
            [0, 3, 5],
            [0, 5, 2],
            [1, 2, 5],
            [1, 5, 3],
            [1, 3, 4],
            [1, 4, 2],
        ];
        Self::polyhedron(&corners, triangles, radius)
    }

    pub fn icosahedron(radius: f32) -> Self {
        let t = PHI;
        let corners = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let triangles = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self::polyhedron(&corners, triangles, radius)
    }

    /// Axis-aligned cube with the given edge length, two triangles per face.
    pub fn cube(edge: f32) -> Self {
        let h = edge * 0.5;
        // corner index bits: x = 1, y = 2, z = 4
        let positions = (0..8u32)
            .map(|i| {
                Vec3::new(
                    if i & 1 != 0 { h } else { -h },
                    if i & 2 != 0 { h } else { -h },
                    if i & 4 != 0 { h } else { -h },
                )
            })
            .collect();
        let quads: [[u32; 4]; 6] = [
            [0, 1, 3, 2],
            [4, 5, 7, 6],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [0, 2, 6, 4],
            [1, 3, 7, 5],
        ];
        let triangles = quads
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect();
        let mut mesh = Self {
            positions,
            triangles,
        };
        mesh.orient_outward();
        mesh
    }

    /// Dodecahedron built as the dual of the icosahedron: one vertex per
    /// icosahedron face, one pentagon (fan of three triangles) per
    /// icosahedron vertex.
    pub fn dodecahedron(radius: f32) -> Self {
        let ico = Self::icosahedron(1.0);
        let centroids: Vec<Vec3> = ico
            .triangles
            .iter()
            .map(|t| ico.centroid(t))
            .collect();
        let positions = centroids.iter().map(|c| c.normalize() * radius).collect();

        let mut triangles = Vec::with_capacity(36);
        for (vi, v) in ico.positions.iter().enumerate() {
            let n = v.normalize();
            let u = n.any_orthonormal_vector();
            let w = n.cross(u);
            let angle = |f: usize| {
                let d = centroids[f] - n * centroids[f].dot(n);
                d.dot(w).atan2(d.dot(u))
            };
            let mut ring: SmallVec<[usize; 5]> = ico
                .triangles
                .iter()
                .enumerate()
                .filter(|(_, t)| t.contains(&(vi as u32)))
                .map(|(fi, _)| fi)
                .collect();
            ring.sort_by(|a, b| angle(*a).total_cmp(&angle(*b)));
            for k in 1..ring.len().saturating_sub(1) {
                triangles.push([ring[0] as u32, ring[k] as u32, ring[k + 1] as u32]);
            }
        }
        let mut mesh = Self {
            positions,
            triangles,
        };
        mesh.orient_outward();
        mesh
    }

    pub fn torus_knot(opts: TorusKnotOptions) -> Self {
        let tubular = opts.tubular_segments.max(3);
        let radial = opts.radial_segments.max(3);
        let p = opts.p.max(1) as f32;
        let q = opts.q as f32;
        let curve = |u: f32| {
            let q_over_p = q / p * u;
            let cs = q_over_p.cos();
            Vec3::new(
                opts.radius * (2.0 + cs) * 0.5 * u.cos(),
                opts.radius * (2.0 + cs) * 0.5 * u.sin(),
                opts.radius * q_over_p.sin() * 0.5,
            )
        };

        let mut positions = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
        for j in 0..=tubular {
            let u = j as f32 / tubular as f32 * p * TAU;
            let p1 = curve(u);
            let p2 = curve(u + 0.01);
            let tangent = p2 - p1;
            let mut normal = p2 + p1;
            let binormal = tangent.cross(normal).normalize();
            normal = binormal.cross(tangent).normalize();
            for i in 0..=radial {
                let v = i as f32 / radial as f32 * TAU;
                let cx = -opts.tube * v.cos();
                let cy = opts.tube * v.sin();
                positions.push(p1 + normal * cx + binormal * cy);
            }
        }

        let ring = radial + 1;
        let mut triangles = Vec::with_capacity((tubular * radial * 2) as usize);
        for j in 1..=tubular {
            for i in 1..=radial {
                let a = ring * (j - 1) + (i - 1);
                let b = ring * j + (i - 1);
                let c = ring * j + i;
                let d = ring * (j - 1) + i;
                triangles.push([a, b, d]);
                triangles.push([b, c, d]);
            }
        }
        Self {
            positions,
            triangles,
        }
    }

    /// Unique undirected edges, each stored as `[low, high]`, sorted.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = FnvHashSet::default();
        for t in &self.triangles {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                if a != b {
                    seen.insert([a.min(b), a.max(b)]);
                }
            }
        }
        let mut edges: Vec<[u32; 2]> = seen.into_iter().collect();
        edges.sort_unstable();
        edges
    }

    pub fn face_normal(&self, t: &[u32; 3]) -> Vec3 {
        let [a, b, c] = t.map(|i| self.positions[i as usize]);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Area-weighted average of adjacent face normals.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for t in &self.triangles {
            let [a, b, c] = t.map(|i| self.positions[i as usize]);
            let n = (b - a).cross(c - a);
            for i in t {
                acc[*i as usize] += n;
            }
        }
        acc.into_iter().map(Vec3::normalize_or_zero).collect()
    }

    /// Largest distance from the origin over all vertices.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }

    fn centroid(&self, t: &[u32; 3]) -> Vec3 {
        t.iter()
            .map(|i| self.positions[*i as usize])
            .sum::<Vec3>()
            / 3.0
    }

    fn polyhedron(corners: &[[f32; 3]], triangles: Vec<[u32; 3]>, radius: f32) -> Self {
        let positions = corners
            .iter()
            .map(|c| Vec3::from_array(*c).normalize() * radius)
            .collect();
        let mut mesh = Self {
            positions,
            triangles,
        };
        mesh.orient_outward();
        mesh
    }

    // Only valid for convex meshes containing the origin.
    fn orient_outward(&mut self) {
        for i in 0..self.triangles.len() {
            let t = self.triangles[i];
            if self.face_normal(&t).dot(self.centroid(&t)) < 0.0 {
                self.triangles[i] = [t[0], t[2], t[1]];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euler_characteristic(m: &Mesh) -> i64 {
        m.positions.len() as i64 - m.edges().len() as i64 + m.triangles.len() as i64
    }

    #[test]
    fn closed_polyhedra_are_spheres() {
        for m in [
            Mesh::tetrahedron(1.0),
            Mesh::octahedron(1.0),
            Mesh::icosahedron(1.0),
            Mesh::cube(1.0),
            Mesh::dodecahedron(1.0),
        ] {
            assert_eq!(euler_characteristic(&m), 2);
        }
    }

    #[test]
    fn dodecahedron_has_dual_counts() {
        let m = Mesh::dodecahedron(2.0);
        assert_eq!(m.positions.len(), 20);
        assert_eq!(m.triangles.len(), 36);
        // 30 pentagon edges plus two fan diagonals per face
        assert_eq!(m.edges().len(), 30 + 12 * 2);
    }

    #[test]
    fn edges_are_deduplicated() {
        let m = Mesh::tetrahedron(1.0);
        let edges = m.edges();
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|[a, b]| a < b));
    }
}
