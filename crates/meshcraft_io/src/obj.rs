//! # OBJ / MTL Reader
//!
//! Line-oriented Wavefront OBJ parsing into a [`TriangleSet`].
//!
//! ## Supported Statements
//!
//! ```text
//! v x y z            vertex (exactly three coordinates)
//! vt u v [w]         texture coordinate
//! f a b c [d]        face; a quad becomes (a,b,c) + (b,c,d)
//! usemtl name        select a material from a loaded library
//! mtllib file        load materials, relative to this file
//! vn / g / o / s     ignored
//! ```
//!
//! Face vertices are `v`, `v/vt`, `v/vt/vn` or `v//vn`. Indices are
//! 1-based; negative ones count back from the latest entry. Anything else
//! is an error, as is an index of zero or past either end.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use meshcraft_core::{Point, ProgressObserver, Stage, Texture, Triangle, TriangleSet};
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::texture::load_texture;

/// Lines between loading progress reports.
const PROGRESS_LINES: usize = 4096;

/// Incremental OBJ reader.
///
/// Feed it text with [`ObjReader::read_str`] (or let [`load_obj`] do it),
/// then take the faces with [`ObjReader::into_triangles`].
#[derive(Debug)]
pub struct ObjReader {
    file: String,
    base_dir: PathBuf,
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
    us: Vec<f64>,
    vs: Vec<f64>,
    materials: HashMap<String, Option<Arc<dyn Texture>>>,
    texture_cache: HashMap<PathBuf, Arc<dyn Texture>>,
    current: Option<Arc<dyn Texture>>,
    faces: TriangleSet,
}

impl ObjReader {
    /// Creates a reader. `file` names the source in error messages;
    /// `base_dir` resolves `mtllib` paths.
    pub fn new(file: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            base_dir: base_dir.into(),
            xs: Vec::new(),
            ys: Vec::new(),
            zs: Vec::new(),
            us: Vec::new(),
            vs: Vec::new(),
            materials: HashMap::new(),
            texture_cache: HashMap::new(),
            current: None,
            faces: TriangleSet::new(),
        }
    }

    /// Registers a material directly, as if a library had defined it.
    pub fn add_material(&mut self, name: impl Into<String>, texture: Option<Arc<dyn Texture>>) {
        self.materials.insert(name.into(), texture);
    }

    /// Parses a whole OBJ document.
    ///
    /// # Errors
    ///
    /// Stops at the first bad line; see [`ObjReader::read_line`].
    pub fn read_str(&mut self, src: &str) -> MeshResult<()> {
        for (i, line) in src.lines().enumerate() {
            self.read_line(i + 1, line)?;
        }
        Ok(())
    }

    /// Parses one OBJ line. `line_no` is 1-based and only used in errors.
    ///
    /// # Errors
    ///
    /// [`MeshError::Syntax`] for malformed arguments,
    /// [`MeshError::Unsupported`] for unknown commands,
    /// [`MeshError::UnknownMaterial`], [`MeshError::IndexOutOfBounds`], or
    /// any error from loading a referenced material library.
    pub fn read_line(&mut self, line_no: usize, line: &str) -> MeshResult<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        match command {
            "v" => {
                let [x, y, z] = args[..] else {
                    return Err(self.syntax(line_no, command, line));
                };
                let (x, y, z) = (number(x), number(y), number(z));
                let (Some(x), Some(y), Some(z)) = (x, y, z) else {
                    return Err(self.syntax(line_no, command, line));
                };
                self.xs.push(x);
                self.ys.push(y);
                self.zs.push(z);
            }
            "vt" => {
                let (Some(u), Some(v)) = (
                    args.first().and_then(|s| number(s)),
                    args.get(1).and_then(|s| number(s)),
                ) else {
                    return Err(self.syntax(line_no, command, line));
                };
                self.us.push(u);
                self.vs.push(v);
            }
            "f" => {
                let mut corners = Vec::with_capacity(args.len());
                for arg in &args {
                    match self.face_point(line_no, arg) {
                        Some(point) => corners.push(point?),
                        None => return Err(self.syntax(line_no, command, line)),
                    }
                }
                match corners[..] {
                    [a, b, c] => self.push_face(a, b, c),
                    [a, b, c, d] => {
                        self.push_face(a, b, c);
                        self.push_face(b, c, d);
                    }
                    _ => return Err(self.syntax(line_no, command, line)),
                }
            }
            "usemtl" => {
                let [name] = args[..] else {
                    return Err(self.syntax(line_no, command, line));
                };
                match self.materials.get(name) {
                    Some(texture) => self.current = texture.clone(),
                    None => {
                        return Err(MeshError::UnknownMaterial {
                            file: self.file.clone(),
                            line: line_no,
                            name: name.to_string(),
                        })
                    }
                }
            }
            "mtllib" => {
                if args.is_empty() {
                    return Err(self.syntax(line_no, command, line));
                }
                for lib in args {
                    let path = self.base_dir.join(lib);
                    self.load_mtl(&path)?;
                }
            }
            "vn" | "g" | "o" | "s" => {}
            _ => {
                return Err(MeshError::Unsupported {
                    file: self.file.clone(),
                    line: line_no,
                    text: line.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Loads every material in an MTL file. Textures named by `map_Kd` are
    /// resolved relative to the MTL file and decoded once per path.
    ///
    /// # Errors
    ///
    /// Fails if the library or one of its textures cannot be read.
    pub fn load_mtl(&mut self, path: &Path) -> MeshResult<()> {
        let src = fs::read_to_string(path).map_err(|source| MeshError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        for (name, map) in parse_mtl(&src) {
            let texture = match map {
                Some(file) => Some(self.texture(&dir.join(file))?),
                None => None,
            };
            debug!(material = %name, textured = texture.is_some(), "loaded material");
            self.materials.insert(name, texture);
        }
        Ok(())
    }

    /// Number of vertices read so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.xs.len()
    }

    /// Finishes reading and returns the faces.
    #[must_use]
    pub fn into_triangles(self) -> TriangleSet {
        self.faces
    }

    fn texture(&mut self, path: &Path) -> MeshResult<Arc<dyn Texture>> {
        if let Some(texture) = self.texture_cache.get(path) {
            return Ok(Arc::clone(texture));
        }
        let texture: Arc<dyn Texture> = Arc::new(load_texture(path)?);
        self.texture_cache
            .insert(path.to_path_buf(), Arc::clone(&texture));
        Ok(texture)
    }

    fn syntax(&self, line_no: usize, command: &str, line: &str) -> MeshError {
        MeshError::Syntax {
            file: self.file.clone(),
            line: line_no,
            command: command.to_string(),
            text: line.to_string(),
        }
    }

    fn push_face(&mut self, a: Point, b: Point, c: Point) {
        let tri = Triangle::new(a, b, c);
        let tri = match &self.current {
            Some(texture) => tri.with_texture(Arc::clone(texture)),
            None => tri,
        };
        self.faces.append(&tri);
    }

    /// Resolves one face corner. `None` means the corner text is malformed.
    fn face_point(&self, line_no: usize, corner: &str) -> Option<MeshResult<Point>> {
        let mut parts = corner.split('/');
        let v: i64 = parts.next()?.parse().ok()?;
        let vt: Option<i64> = match parts.next() {
            None | Some("") => None,
            Some(s) => Some(s.parse().ok()?),
        };

        Some(self.resolve_point(line_no, v, vt))
    }

    fn resolve_point(&self, line_no: usize, v: i64, vt: Option<i64>) -> MeshResult<Point> {
        let vi = self.resolve(line_no, "vertex", v, self.xs.len())?;
        let (u, tv) = match vt {
            Some(t) => {
                let ti = self.resolve(line_no, "texture", t, self.us.len())?;
                (self.us[ti], self.vs[ti])
            }
            None => (0.0, 0.0),
        };
        Ok(Point::with_uv(self.xs[vi], self.ys[vi], self.zs[vi], u, tv))
    }

    fn resolve(&self, line_no: usize, kind: &'static str, index: i64, len: usize) -> MeshResult<usize> {
        let resolved = if index < 0 {
            len as i64 + index
        } else {
            index - 1
        };
        if index == 0 || resolved < 0 || resolved >= len as i64 {
            return Err(MeshError::IndexOutOfBounds {
                file: self.file.clone(),
                line: line_no,
                kind,
                index,
                len,
            });
        }
        Ok(resolved as usize)
    }
}

/// A finite coordinate; `inf` and `nan` are rejected like any other bad token.
fn number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Material names and their diffuse map paths, in file order.
///
/// Statements other than `newmtl` and `map_Kd` are ignored. A `map_Kd`
/// before any `newmtl` belongs to the unnamed material.
#[must_use]
pub fn parse_mtl(src: &str) -> Vec<(String, Option<String>)> {
    let mut materials: Vec<(String, Option<String>)> = Vec::new();

    for line in src.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.last()) {
            (Some("newmtl"), Some(name)) => materials.push((name.to_string(), None)),
            (Some("map_Kd"), Some(file)) => match materials.last_mut() {
                Some((_, map)) => *map = Some(file.to_string()),
                None => materials.push((String::new(), Some(file.to_string()))),
            },
            _ => {}
        }
    }
    materials
}

/// Reads an OBJ file and every material library it references.
///
/// Reports [`Stage::Loading`] progress in lines.
///
/// # Errors
///
/// See [`ObjReader::read_line`]; also [`MeshError::Open`] if the file
/// cannot be read.
pub fn load_obj(path: &Path, observer: &mut dyn ProgressObserver) -> MeshResult<TriangleSet> {
    let src = fs::read_to_string(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut reader = ObjReader::new(path.display().to_string(), base_dir);

    let total = src.lines().count();
    observer.on_progress(Stage::Loading, 0, total);
    for (i, line) in src.lines().enumerate() {
        reader.read_line(i + 1, line)?;
        if (i + 1) % PROGRESS_LINES == 0 {
            observer.on_progress(Stage::Loading, i + 1, total);
        }
    }
    observer.on_progress(Stage::Loading, total, total);

    let faces = reader.into_triangles();
    info!(path = %path.display(), triangles = faces.len(), "loaded mesh");
    Ok(faces)
}
