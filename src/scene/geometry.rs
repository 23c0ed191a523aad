use glam::Vec3;
use std::f32::consts::TAU;

/// How consecutive positions are grouped into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every 3 positions form a triangle
    Triangles,
    /// Every 2 positions form a line segment
    Lines,
    /// Every position is a point
    Points,
}

/// Non-indexed vertex soup in object space
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub topology: Topology,
    pub positions: Vec<Vec3>,
}

impl Geometry {
    pub fn new(topology: Topology, positions: Vec<Vec3>) -> Self {
        Self { topology, positions }
    }

    /// Number of triangles, segments or points
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.positions.len() / 3,
            Topology::Lines => self.positions.len() / 2,
            Topology::Points => self.positions.len(),
        }
    }

    /// Triangles, empty for other topologies
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions_if(Topology::Triangles)
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Line segments, empty for other topologies
    pub fn segments(&self) -> impl Iterator<Item = [Vec3; 2]> + '_ {
        self.positions_if(Topology::Lines)
            .chunks_exact(2)
            .map(|s| [s[0], s[1]])
    }

    fn positions_if(&self, topology: Topology) -> &[Vec3] {
        if self.topology == topology {
            &self.positions
        } else {
            &[]
        }
    }

    /// Largest distance of any vertex from the origin
    pub fn bounding_radius(&self) -> f32 {
        self.positions.iter().map(|p| p.length()).fold(0.0, f32::max)
    }
}

/// Parametric description of a stock primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Icosahedron { radius: f32, detail: u32 },
    Octahedron { radius: f32, detail: u32 },
    Cuboid { size: f32 },
    Torus { radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32 },
    /// Outline segments of a cuboid
    CuboidEdges { size: f32 },
}

impl Shape {
    pub fn build(&self) -> Geometry {
        match *self {
            Shape::Icosahedron { radius, detail } => polyhedron(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, radius, detail),
            Shape::Octahedron { radius, detail } => polyhedron(&OCTAHEDRON_VERTICES, &OCTAHEDRON_FACES, radius, detail),
            Shape::Cuboid { size } => cuboid(size),
            Shape::Torus { radius, tube, radial_segments, tubular_segments } => {
                torus(radius, tube, radial_segments, tubular_segments)
            }
            Shape::CuboidEdges { size } => cuboid_edges(size),
        }
    }
}

const PHI: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0], [1.0, PHI, 0.0], [-1.0, -PHI, 0.0], [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI], [0.0, 1.0, PHI], [0.0, -1.0, -PHI], [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0], [PHI, 0.0, 1.0], [-PHI, 0.0, -1.0], [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4], [0, 4, 3], [0, 3, 5], [0, 5, 2],
    [1, 2, 5], [1, 5, 3], [1, 3, 4], [1, 4, 2],
];

/// Subdivide each face into (detail + 1)² triangles and push onto the sphere
fn polyhedron(vertices: &[[f32; 3]], faces: &[[usize; 3]], radius: f32, detail: u32) -> Geometry {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(faces.len() * cols * cols * 3);

    for face in faces {
        let a = Vec3::from_array(vertices[face[0]]);
        let b = Vec3::from_array(vertices[face[1]]);
        let c = Vec3::from_array(vertices[face[2]]);

        // Row i runs from the a-c edge to the b-c edge and has cols - i + 1 vertices
        let grid: Vec<Vec<Vec3>> = (0..=cols)
            .map(|i| {
                let t = i as f32 / cols as f32;
                let aj = a.lerp(c, t);
                let bj = b.lerp(c, t);
                let rows = cols - i;
                (0..=rows)
                    .map(|j| if rows == 0 { aj } else { aj.lerp(bj, j as f32 / rows as f32) })
                    .collect()
            })
            .collect();

        for i in 0..cols {
            for j in 0..2 * (cols - i) - 1 {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                positions.extend(tri.iter().map(|v| v.normalize() * radius));
            }
        }
    }

    Geometry::new(Topology::Triangles, positions)
}

fn cuboid_corners(size: f32) -> [Vec3; 8] {
    let h = size / 2.0;
    [
        Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h), Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h),
    ]
}

fn cuboid(size: f32) -> Geometry {
    let c = cuboid_corners(size);
    // Counter-clockwise when seen from outside
    let quads: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // +z
        [1, 0, 3, 2], // -z
        [5, 1, 2, 6], // +x
        [0, 4, 7, 3], // -x
        [7, 6, 2, 3], // +y
        [0, 1, 5, 4], // -y
    ];

    let positions = quads
        .iter()
        .flat_map(|q| [c[q[0]], c[q[1]], c[q[2]], c[q[0]], c[q[2]], c[q[3]]])
        .collect();

    Geometry::new(Topology::Triangles, positions)
}

fn cuboid_edges(size: f32) -> Geometry {
    let c = cuboid_corners(size);
    let edges: [[usize; 2]; 12] = [
        [0, 1], [1, 2], [2, 3], [3, 0],
        [4, 5], [5, 6], [6, 7], [7, 4],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ];

    let positions = edges.iter().flat_map(|e| [c[e[0]], c[e[1]]]).collect();
    Geometry::new(Topology::Lines, positions)
}

/// Torus around the z axis, lying in the xy plane
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial = radial_segments.max(3) as usize;
    let tubular = tubular_segments.max(3) as usize;

    let vertex = |j: usize, i: usize| {
        let u = i as f32 / tubular as f32 * TAU;
        let v = j as f32 / radial as f32 * TAU;
        Vec3::new(
            (radius + tube * v.cos()) * u.cos(),
            (radius + tube * v.cos()) * u.sin(),
            tube * v.sin(),
        )
    };

    let mut positions = Vec::with_capacity(radial * tubular * 6);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = vertex(j, i - 1);
            let b = vertex(j - 1, i - 1);
            let c = vertex(j - 1, i);
            let d = vertex(j, i);
            positions.extend([a, b, d, b, c, d]);
        }
    }

    Geometry::new(Topology::Triangles, positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_triangle_count() {
        let g = Shape::Icosahedron { radius: 1.8, detail: 10 }.build();
        assert_eq!(g.topology, Topology::Triangles);
        assert_eq!(g.primitive_count(), 20 * 11 * 11);
    }

    #[test]
    fn test_icosahedron_vertices_on_sphere() {
        let g = Shape::Icosahedron { radius: 0.8, detail: 4 }.build();
        for p in &g.positions {
            assert!((p.length() - 0.8).abs() < 1e-4);
        }
    }

    #[test]
    fn test_octahedron_detail_zero_is_eight_faces() {
        let g = Shape::Octahedron { radius: 1.8, detail: 0 }.build();
        assert_eq!(g.primitive_count(), 8);
        assert!((g.bounding_radius() - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_cuboid_counts_and_extent() {
        let g = Shape::Cuboid { size: 2.2 }.build();
        assert_eq!(g.primitive_count(), 12);
        for p in &g.positions {
            assert!((p.x.abs() - 1.1).abs() < 1e-6);
            assert!((p.y.abs() - 1.1).abs() < 1e-6);
            assert!((p.z.abs() - 1.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let g = Shape::Cuboid { size: 2.0 }.build();
        for [a, b, c] in g.triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_cuboid_edges_are_twelve_segments() {
        let g = Shape::CuboidEdges { size: 2.2 }.build();
        assert_eq!(g.topology, Topology::Lines);
        assert_eq!(g.segments().count(), 12);
        assert_eq!(g.triangles().count(), 0);
    }

    #[test]
    fn test_torus_counts_and_radius() {
        let g = Shape::Torus { radius: 3.5, tube: 0.02, radial_segments: 16, tubular_segments: 100 }.build();
        assert_eq!(g.primitive_count(), 16 * 100 * 2);
        assert!((g.bounding_radius() - 3.52).abs() < 1e-3);
        for p in &g.positions {
            assert!(p.z.abs() <= 0.02 + 1e-6);
        }
    }
}
