//! A line-oriented OBJ reader.
//!
//! Recognized records: `o` (name, semantically ignored), `v`, `vn`, `vt`,
//! `f` in its three index arrangements, and `#` comments. Anything else —
//! including a malformed record of a known kind — is skipped with a warning;
//! the parser never aborts mid-file. Indices are delivered 1-based exactly as
//! written; the sink owns the conversion and the range checking.

use crate::precision::Real;
use log::warn;

/// Receives records as the parser recognizes them.
pub trait ObjSink {
    fn add_vertex(&mut self, x: Real, y: Real, z: Real);
    fn add_normal(&mut self, x: Real, y: Real, z: Real);
    fn add_texture(&mut self, u: Real, v: Real);
    /// `f a b c`
    fn add_face(&mut self, v: [u32; 3]);
    /// `f a/ta b/tb c/tc`
    fn add_face_textured(&mut self, v: [u32; 3], t: [u32; 3]);
    /// `f a/ta/na b/tb/nb c/tc/nc`
    fn add_face_full(&mut self, v: [u32; 3], t: [u32; 3], n: [u32; 3]);
}

/// Counts of what a parse run saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStatistics {
    pub objects: usize,
    pub vertices: usize,
    pub normals: usize,
    pub textures: usize,
    pub faces: usize,
    pub skipped: usize,
}

fn parse_floats<const N: usize>(fields: &[&str]) -> Option<[Real; N]> {
    if fields.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field.parse().ok()?;
    }
    Some(out)
}

/// One `f` token: `a`, `a/t`, or `a/t/n`.
fn parse_face_token(token: &str) -> Option<(u32, Option<u32>, Option<u32>)> {
    let mut parts = token.split('/');
    let v = parts.next()?.parse().ok()?;
    let t = match parts.next() {
        Some(s) => Some(s.parse().ok()?),
        None => None,
    };
    let n = match parts.next() {
        Some(s) => Some(s.parse().ok()?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((v, t, n))
}

/// Parses the whole document into `sink`, returning what was counted.
pub fn parse(text: &str, sink: &mut dyn ObjSink) -> ObjStatistics {
    let mut stats = ObjStatistics::default();
    for (line_number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let keyword = fields.next().unwrap_or("");
        let rest: Vec<&str> = fields.collect();
        let ok = match keyword {
            "o" => {
                stats.objects += 1;
                true
            }
            "v" => match parse_floats::<3>(&rest) {
                Some([x, y, z]) => {
                    sink.add_vertex(x, y, z);
                    stats.vertices += 1;
                    true
                }
                None => false,
            },
            "vn" => match parse_floats::<3>(&rest) {
                Some([x, y, z]) => {
                    sink.add_normal(x, y, z);
                    stats.normals += 1;
                    true
                }
                None => false,
            },
            "vt" => match parse_floats::<2>(&rest) {
                Some([u, v]) => {
                    sink.add_texture(u, v);
                    stats.textures += 1;
                    true
                }
                None => false,
            },
            "f" => parse_face(&rest, sink, &mut stats),
            // unrecognized leading token: not an error, just not ours
            _ => true,
        };
        if !ok {
            stats.skipped += 1;
            warn!("obj: skipping malformed line {}: {raw:?}", line_number + 1);
        }
    }
    stats
}

fn parse_face(rest: &[&str], sink: &mut dyn ObjSink, stats: &mut ObjStatistics) -> bool {
    if rest.len() != 3 {
        // only triangles; higher-arity faces are dropped
        return false;
    }
    let mut tokens = [(0u32, None, None); 3];
    for (slot, token) in tokens.iter_mut().zip(rest) {
        match parse_face_token(token) {
            Some(parsed) => *slot = parsed,
            None => return false,
        }
    }
    let [(v0, t0, n0), (v1, t1, n1), (v2, t2, n2)] = tokens;
    match (t0, t1, t2, n0, n1, n2) {
        (None, None, None, None, None, None) => {
            sink.add_face([v0, v1, v2]);
        }
        (Some(a), Some(b), Some(c), None, None, None) => {
            sink.add_face_textured([v0, v1, v2], [a, b, c]);
        }
        (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)) => {
            sink.add_face_full([v0, v1, v2], [a, b, c], [d, e, f]);
        }
        // mixed arrangements across one face
        _ => return false,
    }
    stats.faces += 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        vertices: Vec<(Real, Real, Real)>,
        normals: Vec<(Real, Real, Real)>,
        textures: Vec<(Real, Real)>,
        faces: Vec<[u32; 3]>,
        textured: Vec<([u32; 3], [u32; 3])>,
        full: Vec<([u32; 3], [u32; 3], [u32; 3])>,
    }

    impl ObjSink for Recorder {
        fn add_vertex(&mut self, x: Real, y: Real, z: Real) {
            self.vertices.push((x, y, z));
        }
        fn add_normal(&mut self, x: Real, y: Real, z: Real) {
            self.normals.push((x, y, z));
        }
        fn add_texture(&mut self, u: Real, v: Real) {
            self.textures.push((u, v));
        }
        fn add_face(&mut self, v: [u32; 3]) {
            self.faces.push(v);
        }
        fn add_face_textured(&mut self, v: [u32; 3], t: [u32; 3]) {
            self.textured.push((v, t));
        }
        fn add_face_full(&mut self, v: [u32; 3], t: [u32; 3], n: [u32; 3]) {
            self.full.push((v, t, n));
        }
    }

    #[test]
    fn parses_the_three_face_forms() {
        let doc = "\
o demo
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0.5 0.5
f 1 2 3
f 1/1 2/1 3/1
f 1/1/1 2/1/1 3/1/1
";
        let mut sink = Recorder::default();
        let stats = parse(doc, &mut sink);
        assert_eq!(stats.objects, 1);
        assert_eq!(stats.vertices, 3);
        assert_eq!(stats.normals, 1);
        assert_eq!(stats.textures, 1);
        assert_eq!(stats.faces, 3);
        assert_eq!(stats.skipped, 0);
        assert_eq!(sink.faces, vec![[1, 2, 3]]);
        assert_eq!(sink.textured.len(), 1);
        assert_eq!(sink.full.len(), 1);
    }

    #[test]
    fn comments_and_unknown_keywords_are_ignored() {
        let doc = "\
# a comment
mtllib scene.mtl
usemtl shiny
v 1 2 3
";
        let mut sink = Recorder::default();
        let stats = parse(doc, &mut sink);
        assert_eq!(stats.vertices, 1);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let doc = "\
v 1 2
v one two three
f 1 2
f 1/2/3 4/5 6
v 4 5 6
";
        let mut sink = Recorder::default();
        let stats = parse(doc, &mut sink);
        assert_eq!(stats.vertices, 1);
        assert_eq!(stats.skipped, 4);
        assert_eq!(sink.vertices, vec![(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn indices_are_delivered_one_based() {
        let doc = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3 2 1\n";
        let mut sink = Recorder::default();
        parse(doc, &mut sink);
        assert_eq!(sink.faces, vec![[3, 2, 1]]);
    }

    #[test]
    fn negative_and_fractional_floats() {
        let doc = "v -1.5 0.25 -0.125\n";
        let mut sink = Recorder::default();
        parse(doc, &mut sink);
        assert_eq!(sink.vertices, vec![(-1.5, 0.25, -0.125)]);
    }
}
