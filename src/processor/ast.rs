//! Path AST for one `d` attribute *before* coordinates are resolved.

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An (x, y) point. Displays as an OpenSCAD vector literal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point reflection of `self` about `center`.
    pub fn reflect_about(self, center: Coord) -> Coord {
        center * 2.0 - self
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coord {
    type Output = Coord;

    fn mul(self, rhs: f64) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `-0` is legal OpenSCAD but noisy in diffs
        let clean = |v: f64| if v == 0.0 { 0.0 } else { v };
        write!(f, "[{}, {}]", clean(self.x), clean(self.y))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Command {
    /// `M x,y` / `m dx,dy` – start a new subpath.
    MoveTo { to: Coord, relative: bool },

    /// `L x,y` / `l dx,dy`
    LineTo { to: Coord, relative: bool },

    /// `H x` / `h dx`
    HorizontalLineTo { x: f64, relative: bool },

    /// `V y` / `v dy`
    VerticalLineTo { y: f64, relative: bool },

    /// `C x1,y1 x2,y2 x,y` – two control points then the end point.
    CubicBezier {
        p1: Coord,
        p2: Coord,
        p3: Coord,
        relative: bool,
    },

    /// `S x2,y2 x,y` – first control point is the reflection of the
    /// previous cubic's second one.
    SmoothCubicBezier { p2: Coord, p3: Coord, relative: bool },

    /// `Q x1,y1 x,y`
    QuadraticBezier { p1: Coord, p2: Coord, relative: bool },

    /// `T x,y` – control point reflected from the previous quadratic.
    SmoothQuadraticBezier { p2: Coord, relative: bool },

    /// `A rx,ry rotation large-arc sweep x,y`
    EllipticalArc {
        radii: Coord,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Coord,
        relative: bool,
    },

    /// `Z` / `z` – always back to the subpath start.
    ClosePath,
}

impl Command {
    /// Variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::MoveTo { .. } => "MoveTo",
            Command::LineTo { .. } => "LineTo",
            Command::HorizontalLineTo { .. } => "HorizontalLineTo",
            Command::VerticalLineTo { .. } => "VerticalLineTo",
            Command::CubicBezier { .. } => "CubicBezier",
            Command::SmoothCubicBezier { .. } => "SmoothCubicBezier",
            Command::QuadraticBezier { .. } => "QuadraticBezier",
            Command::SmoothQuadraticBezier { .. } => "SmoothQuadraticBezier",
            Command::EllipticalArc { .. } => "EllipticalArc",
            Command::ClosePath => "ClosePath",
        }
    }

    pub fn is_relative(&self) -> bool {
        match self {
            Command::MoveTo { relative, .. }
            | Command::LineTo { relative, .. }
            | Command::HorizontalLineTo { relative, .. }
            | Command::VerticalLineTo { relative, .. }
            | Command::CubicBezier { relative, .. }
            | Command::SmoothCubicBezier { relative, .. }
            | Command::QuadraticBezier { relative, .. }
            | Command::SmoothQuadraticBezier { relative, .. }
            | Command::EllipticalArc { relative, .. } => *relative,
            Command::ClosePath => false,
        }
    }
}

/// A run of commands starting with exactly one `MoveTo`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Subpath {
    pub commands: Vec<Command>,
}

/// One parsed `d` attribute.
///
/// `id` is whatever the source element carried; it may be empty and
/// is not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathDocument {
    pub id: String,
    pub subpaths: Vec<Subpath>,
}

impl PathDocument {
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.subpaths.iter().flat_map(|s| s.commands.iter())
    }
}
