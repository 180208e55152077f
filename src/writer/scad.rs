//! Emit OpenSCAD (BOSL2) source for resolved path documents.
//!
//! OpenSCAD has no mutable variables, so the cursor walk the resolver did
//! is replayed as a chain of nested `let` scopes: `pts0` holds the start
//! point and each `ptsK` appends the flattened curve of segment K, whose
//! first control point is always the last point of `ptsK-1`.

use log::debug;

use super::code::CodeWriter;
use super::runtime::{RUNTIME, RUNTIME_VERSION};
use crate::error::EmitError;
use crate::processor::ast::Coord;
use crate::processor::names::NameAllocator;
use crate::processor::resolve::{ResolvedDocument, ResolvedSubpath, Segment};

pub const DEFAULT_IMPORTS: &[&str] = &["include <BOSL2/std.scad>"];
pub const DEFAULT_DETAIL: u32 = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    /// Points generated per curve segment.
    pub detail: u32,
    /// Instantiate every wrapper module at the end of the file.
    pub footer: bool,
    pub imports: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            detail: DEFAULT_DETAIL,
            footer: true,
            imports: DEFAULT_IMPORTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Finished output: the file text and the wrapper names in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    pub text: String,
    pub names: Vec<String>,
}

/// The three control points of a cubic whose start is the cursor.
type Curve = [Coord; 3];

pub struct Emitter<'o> {
    options: &'o EmitOptions,
    out: CodeWriter,
    names: NameAllocator,
    wrappers: Vec<String>,
}

impl<'o> Emitter<'o> {
    /// Writes the imports and the runtime block.
    pub fn new(options: &'o EmitOptions, names: NameAllocator) -> Result<Self, EmitError> {
        if options.detail == 0 {
            return Err(EmitError::InvalidDetail(options.detail));
        }

        let mut out = CodeWriter::new();
        let mut imports: Vec<&str> = options.imports.iter().map(String::as_str).collect();
        imports.sort_unstable();
        imports.dedup();
        out.lines(imports);
        if !options.imports.is_empty() {
            out.blank();
        }
        out.raw(RUNTIME);
        out.blank();
        debug!("runtime v{RUNTIME_VERSION}, detail {}", options.detail);

        Ok(Self {
            options,
            out,
            names,
            wrappers: Vec::new(),
        })
    }

    /// Emit one function/module pair per subpath. Nothing is written
    /// unless every subpath of the document can be lowered.
    pub fn emit_document(&mut self, doc: &ResolvedDocument) -> Result<Vec<String>, EmitError> {
        let lowered = doc
            .subpaths
            .iter()
            .map(|sub| lower(sub).map(|curves| (sub.start, curves)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut names = Vec::with_capacity(lowered.len());
        for (start, curves) in lowered {
            let name = self.names.allocate(&doc.id);
            debug!("emitting `{name}` with {} segments", curves.len());

            self.points_function(&name, start, &curves);
            self.out.blank();
            self.wrapper_module(&name);
            self.out.blank();

            names.push(name);
        }

        self.wrappers.extend(names.iter().cloned());
        Ok(names)
    }

    pub fn finish(mut self) -> Emitted {
        if self.options.footer {
            for name in &self.wrappers {
                self.out.line(format!("{name}();"));
            }
        }
        Emitted {
            text: self.out.finish(),
            names: self.wrappers,
        }
    }

    fn points_function(&mut self, name: &str, start: Coord, curves: &[Curve]) {
        let cw = &mut self.out;
        let base = cw.depth();

        cw.line(format!(
            "function {name}_points(origin = [0, 0], detail = {}) =",
            self.options.detail
        ));
        cw.indent();
        cw.line(format!("let (pts0 = [origin + {start}])"));
        cw.indent();
        for (k, [c1, c2, c3]) in curves.iter().enumerate() {
            let prev = k;
            let next = k + 1;
            cw.line(format!(
                "let (pts{next} = concat(pts{prev}, svg2scad_bezier([svg2scad_last(pts{prev}), \
                 origin + {c1}, origin + {c2}, origin + {c3}], detail)))"
            ));
            cw.indent();
        }
        cw.line(format!("pts{};", curves.len()));

        while cw.depth() > base {
            cw.dedent();
        }
    }

    fn wrapper_module(&mut self, name: &str) {
        let cw = &mut self.out;
        cw.open(format!(
            "module {name}(height = 0, anchor = CENTER, spin = 0, orient = UP)"
        ));
        cw.line(format!("points = svg2scad_centered({name}_points());"));
        cw.line("bounds = svg2scad_extents(points);");
        cw.line("size = bounds[0] - bounds[1];");

        cw.open("if (height == 0)");
        cw.open("attachable(anchor, spin, two_d = true, size = size)");
        cw.line("polygon(points);");
        cw.line("children();");
        cw.close();
        cw.dedent();
        cw.open("} else");
        cw.open("attachable(anchor, spin, orient, size = [size[0], size[1], height])");
        cw.line("linear_extrude(height = height, center = true) polygon(points);");
        cw.line("children();");
        cw.close();
        cw.close();

        cw.close();
    }
}

/// Emit a complete file for `docs` with a fresh name allocator.
pub fn emit(docs: &[ResolvedDocument], options: &EmitOptions) -> Result<Emitted, EmitError> {
    let mut emitter = Emitter::new(options, NameAllocator::new())?;
    for doc in docs {
        emitter.emit_document(doc)?;
    }
    Ok(emitter.finish())
}

/// Lower every segment to the control points of a cubic starting at the
/// cursor. Lines and closes become degenerate cubics; quadratics are
/// degree-elevated, which is exact.
fn lower(sub: &ResolvedSubpath) -> Result<Vec<Curve>, EmitError> {
    let (_, curves) = sub.segments.iter().try_fold(
        (sub.start, Vec::with_capacity(sub.segments.len())),
        |(cursor, mut curves), segment| {
            let curve = match *segment {
                Segment::Line { to } | Segment::Close { to } => [to, to, to],
                Segment::Cubic { p1, p2, p3 } => [p1, p2, p3],
                Segment::Quadratic { p1, p2 } => elevate(cursor, p1, p2),
                Segment::Arc { .. } => {
                    return Err(EmitError::UnsupportedNode {
                        kind: segment.kind(),
                    });
                }
            };
            curves.push(curve);
            Ok((segment.end(), curves))
        },
    )?;
    Ok(curves)
}

fn elevate(p0: Coord, q: Coord, p2: Coord) -> Curve {
    let toward_q = |from: Coord| {
        let d = (q - from) * 2.0;
        from + Coord::new(d.x / 3.0, d.y / 3.0)
    };
    [toward_q(p0), toward_q(p2), p2]
}
