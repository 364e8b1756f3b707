//! A polygon soup loaded from an OBJ document.
//!
//! The loader keeps parallel vertex/normal/texel tables and triangulated
//! faces. Vertex order is reversed at load so front faces wind counter-
//! clockwise regardless of the exporter's habit, and loaded normals are
//! renormalized. On completion the mesh centroid is computed and every face
//! is rebased around it, so a model's pose position places its center, not
//! the exporter's origin.

use super::{HitList, Triangle};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::obj_parser::{self, ObjSink, ObjStatistics};
use crate::precision::Real;
use log::warn;

#[derive(Debug, Clone, Default)]
pub struct Model {
    points: Vec<Point3>,
    normals: Vec<Vector3>,
    texels: Vec<Point2>,
    faces: Vec<Triangle>,
    face_texels: Vec<Option<[Point2; 3]>>,
    centroid: Point3,
}

/// Accumulates parser records; becomes a [`Model`] once rebased.
#[derive(Default)]
struct Builder {
    points: Vec<Point3>,
    normals: Vec<Vector3>,
    texels: Vec<Point2>,
    // vertex index triples, 0-based, already rewound to CCW
    faces: Vec<[usize; 3]>,
    face_texels: Vec<Option<[usize; 3]>>,
    dropped: usize,
}

impl Builder {
    fn checked_indices(&mut self, v: [u32; 3]) -> Option<[usize; 3]> {
        let idx: [usize; 3] = [v[0] as usize, v[1] as usize, v[2] as usize];
        if idx.iter().any(|&i| i == 0 || i > self.points.len()) {
            self.dropped += 1;
            warn!("obj: face references out-of-range vertex {v:?}, dropping");
            return None;
        }
        Some([idx[0] - 1, idx[1] - 1, idx[2] - 1])
    }

    fn checked_texels(&self, t: [u32; 3]) -> Option<[usize; 3]> {
        let idx: [usize; 3] = [t[0] as usize, t[1] as usize, t[2] as usize];
        if idx.iter().any(|&i| i == 0 || i > self.texels.len()) {
            return None;
        }
        Some([idx[0] - 1, idx[1] - 1, idx[2] - 1])
    }
}

impl ObjSink for Builder {
    fn add_vertex(&mut self, x: Real, y: Real, z: Real) {
        self.points.push(Point3::new(x, y, z));
    }

    fn add_normal(&mut self, x: Real, y: Real, z: Real) {
        self.normals.push(Vector3::new(x, y, z).normalized());
    }

    fn add_texture(&mut self, u: Real, v: Real) {
        self.texels.push(Point2::new(u, v));
    }

    fn add_face(&mut self, v: [u32; 3]) {
        if let Some([a, b, c]) = self.checked_indices(v) {
            // reverse so the front face winds counter-clockwise
            self.faces.push([c, b, a]);
            self.face_texels.push(None);
        }
    }

    fn add_face_textured(&mut self, v: [u32; 3], t: [u32; 3]) {
        if let Some([a, b, c]) = self.checked_indices(v) {
            self.faces.push([c, b, a]);
            self.face_texels.push(self.checked_texels(t).map(|[ta, tb, tc]| [tc, tb, ta]));
        }
    }

    fn add_face_full(&mut self, v: [u32; 3], t: [u32; 3], _n: [u32; 3]) {
        // per-vertex normals are renormalized into the table but faces shade
        // with their plane normal
        self.add_face_textured(v, t);
    }
}

impl Model {
    /// Parses an OBJ document. Malformed lines and out-of-range faces are
    /// skipped; an empty mesh is still a valid (if invisible) model.
    pub fn from_obj(text: &str) -> (Model, ObjStatistics) {
        let mut builder = Builder::default();
        let stats = obj_parser::parse(text, &mut builder);

        // centroid of the referenced vertices, then rebase everything
        let mut centroid = Vector3::zero();
        if !builder.points.is_empty() {
            for p in &builder.points {
                centroid += p.as_vector();
            }
            centroid /= builder.points.len() as Real;
        }
        let rebased: Vec<Point3> = builder
            .points
            .iter()
            .map(|p| *p - centroid)
            .collect();

        let faces = builder
            .faces
            .iter()
            .map(|&[a, b, c]| Triangle::new(rebased[a], rebased[b], rebased[c]))
            .collect();
        let face_texels = builder
            .face_texels
            .iter()
            .map(|slots| {
                slots.map(|[a, b, c]| [builder.texels[a], builder.texels[b], builder.texels[c]])
            })
            .collect();

        let model = Model {
            points: rebased,
            normals: builder.normals,
            texels: builder.texels,
            faces,
            face_texels,
            centroid: Point3::origin() + centroid,
        };
        (model, stats)
    }

    /// Where the mesh sat in the source document; the natural pose position.
    pub fn centroid(&self) -> Point3 {
        self.centroid
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    pub fn texel_count(&self) -> usize {
        self.texels.len()
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        for face in &self.faces {
            hits.extend(face.collisions_along(ray));
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    fn owning_face(&self, p: Point3) -> Option<usize> {
        self.faces.iter().position(|f| f.is_surface_point(p))
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        match self.owning_face(p) {
            Some(i) => self.faces[i].normal_at(p),
            None => Vector3::zero(),
        }
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        self.owning_face(p).is_some()
    }

    /// Barycentric interpolation of the face's texels when present,
    /// otherwise the face's own barycentric map.
    pub fn map(&self, p: Point3) -> Point2 {
        match self.owning_face(p) {
            Some(i) => {
                let face = &self.faces[i];
                match self.face_texels[i] {
                    Some([t0, t1, t2]) => {
                        let bary = face.map(p);
                        let w = (1.0 - bary.x - bary.y).max(0.0);
                        Point2::new(
                            w * t0.x + bary.x * t1.x + bary.y * t2.x,
                            w * t0.y + bary.x * t1.y + bary.y * t2.y,
                        )
                    }
                    None => face.map(p),
                }
            }
            None => Point2::new(0.0, 0.0),
        }
    }

    pub fn object_extent(&self) -> Real {
        self.points
            .iter()
            .map(|p| p.as_vector().magnitude())
            .fold(0.0, Real::max)
    }
}
