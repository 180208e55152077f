//! Cursor pass: turns every relative coordinate into an absolute one.
//!
//! `resolve` consumes the parsed document and hands back a different
//! type, so a document can only ever be resolved once:
//!
//! ```compile_fail
//! use svg2scad::processor::{path_parser::parse, resolve::resolve};
//!
//! let doc = parse("p", "m1,1 l1,1").unwrap();
//! let once = resolve(doc).unwrap();
//! let twice = resolve(doc); // `doc` was moved by the first call
//! ```

use serde::Serialize;

use super::ast::{Command, Coord, PathDocument, Subpath};
use crate::error::ResolveError;

/// A drawing step with absolute coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Segment {
    Line {
        to: Coord,
    },
    Cubic {
        p1: Coord,
        p2: Coord,
        p3: Coord,
    },
    Quadratic {
        p1: Coord,
        p2: Coord,
    },
    Arc {
        radii: Coord,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Coord,
    },
    /// `to` is always the subpath start.
    Close {
        to: Coord,
    },
}

impl Segment {
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Line { .. } => "Line",
            Segment::Cubic { .. } => "CubicBezier",
            Segment::Quadratic { .. } => "QuadraticBezier",
            Segment::Arc { .. } => "EllipticalArc",
            Segment::Close { .. } => "ClosePath",
        }
    }

    pub fn end(&self) -> Coord {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } | Segment::Close { to } => to,
            Segment::Cubic { p3, .. } => p3,
            Segment::Quadratic { p2, .. } => p2,
        }
    }

    /// Control points followed by the end point.
    pub fn points(&self) -> Vec<Coord> {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } | Segment::Close { to } => vec![to],
            Segment::Cubic { p1, p2, p3 } => vec![p1, p2, p3],
            Segment::Quadratic { p1, p2 } => vec![p1, p2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSubpath {
    pub start: Coord,
    pub segments: Vec<Segment>,
}

impl ResolvedSubpath {
    /// The absolute point stream: start, then every segment's points.
    pub fn points(&self) -> Vec<Coord> {
        std::iter::once(self.start)
            .chain(self.segments.iter().flat_map(Segment::points))
            .collect()
    }

    pub fn end(&self) -> Coord {
        self.segments.last().map_or(self.start, Segment::end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDocument {
    pub id: String,
    pub subpaths: Vec<ResolvedSubpath>,
}

/// Last control point, kept for the smooth-curve reflections.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Control {
    None,
    Cubic(Coord),
    Quadratic(Coord),
}

/// Fold accumulator threaded through one subpath.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    start: Coord,
    current: Coord,
    control: Control,
}

impl Cursor {
    fn at(start: Coord) -> Self {
        Self {
            start,
            current: start,
            control: Control::None,
        }
    }

    fn abs(&self, c: Coord, relative: bool) -> Coord {
        if relative { self.current + c } else { c }
    }

    /// Resolve one body command; returns the segment and the next cursor.
    fn step(self, command: Command) -> Result<(Segment, Cursor), Command> {
        let (segment, control) = match command {
            Command::LineTo { to, relative } => (
                Segment::Line {
                    to: self.abs(to, relative),
                },
                Control::None,
            ),
            Command::HorizontalLineTo { x, relative } => {
                let x = if relative { self.current.x + x } else { x };
                (
                    Segment::Line {
                        to: Coord::new(x, self.current.y),
                    },
                    Control::None,
                )
            }
            Command::VerticalLineTo { y, relative } => {
                let y = if relative { self.current.y + y } else { y };
                (
                    Segment::Line {
                        to: Coord::new(self.current.x, y),
                    },
                    Control::None,
                )
            }
            Command::CubicBezier {
                p1,
                p2,
                p3,
                relative,
            } => {
                let p2 = self.abs(p2, relative);
                (
                    Segment::Cubic {
                        p1: self.abs(p1, relative),
                        p2,
                        p3: self.abs(p3, relative),
                    },
                    Control::Cubic(p2),
                )
            }
            Command::SmoothCubicBezier { p2, p3, relative } => {
                let p1 = match self.control {
                    Control::Cubic(prev) => prev.reflect_about(self.current),
                    _ => self.current,
                };
                let p2 = self.abs(p2, relative);
                (
                    Segment::Cubic {
                        p1,
                        p2,
                        p3: self.abs(p3, relative),
                    },
                    Control::Cubic(p2),
                )
            }
            Command::QuadraticBezier { p1, p2, relative } => {
                let p1 = self.abs(p1, relative);
                (
                    Segment::Quadratic {
                        p1,
                        p2: self.abs(p2, relative),
                    },
                    Control::Quadratic(p1),
                )
            }
            Command::SmoothQuadraticBezier { p2, relative } => {
                let p1 = match self.control {
                    Control::Quadratic(prev) => prev.reflect_about(self.current),
                    _ => self.current,
                };
                (
                    Segment::Quadratic {
                        p1,
                        p2: self.abs(p2, relative),
                    },
                    Control::Quadratic(p1),
                )
            }
            Command::EllipticalArc {
                radii,
                rotation,
                large_arc,
                sweep,
                to,
                relative,
            } => (
                Segment::Arc {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    to: self.abs(to, relative),
                },
                Control::None,
            ),
            Command::ClosePath => (Segment::Close { to: self.start }, Control::None),
            Command::MoveTo { .. } => return Err(command),
        };

        let next = Cursor {
            start: self.start,
            current: segment.end(),
            control,
        };
        Ok((segment, next))
    }
}

/// Resolve a whole document. Each subpath's `MoveTo` is taken relative
/// to where the previous subpath ended (the origin for the first one).
pub fn resolve(doc: PathDocument) -> Result<ResolvedDocument, ResolveError> {
    let (_, subpaths) = doc.subpaths.into_iter().enumerate().try_fold(
        (Coord::ORIGIN, Vec::new()),
        |(origin, mut resolved), (index, subpath)| {
            let subpath = resolve_subpath(index, subpath, origin)?;
            let end = subpath.end();
            resolved.push(subpath);
            Ok::<_, ResolveError>((end, resolved))
        },
    )?;

    Ok(ResolvedDocument {
        id: doc.id,
        subpaths,
    })
}

fn resolve_subpath(
    index: usize,
    subpath: Subpath,
    origin: Coord,
) -> Result<ResolvedSubpath, ResolveError> {
    let mut commands = subpath.commands.into_iter();

    let start = match commands.next() {
        Some(Command::MoveTo { to, relative }) => {
            if relative {
                origin + to
            } else {
                to
            }
        }
        Some(other) => {
            return Err(ResolveError::MissingMoveTo {
                subpath: index,
                found: other.kind(),
            });
        }
        None => return Err(ResolveError::EmptySubpath { subpath: index }),
    };

    let (_, segments) = commands.enumerate().try_fold(
        (Cursor::at(start), Vec::new()),
        |(cursor, mut segments), (i, command)| {
            let (segment, cursor) =
                cursor
                    .step(command)
                    .map_err(|_| ResolveError::UnexpectedMoveTo {
                        subpath: index,
                        index: i + 1,
                    })?;
            segments.push(segment);
            Ok::<_, ResolveError>((cursor, segments))
        },
    )?;

    Ok(ResolvedSubpath { start, segments })
}
