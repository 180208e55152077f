//! Everything downstream of the resolver: OpenSCAD generation and the
//! output files it ends up in.
pub mod code;
pub mod file;
pub mod runtime;
pub mod scad;
