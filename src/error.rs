//! Error types for the conversion pipeline.
//!
//! Every stage reports through its own enum so callers can tell a bad
//! `d` attribute apart from an emitter limitation; `ConvertError` ties
//! them to the path element that triggered them.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed path command grammar. Positions are byte offsets into the
/// raw `d` string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown command `{letter}` at position {position}")]
    UnknownCommand { letter: char, position: usize },

    #[error(
        "command `{command}` expects {expected} numbers per group, found {found} before `{token}` at position {position}"
    )]
    ArgumentCount {
        command: char,
        expected: usize,
        found: usize,
        token: String,
        position: usize,
    },

    #[error("malformed number `{token}` at position {position}")]
    MalformedNumber { token: String, position: usize },

    #[error("input ended in the middle of command `{command}` at position {position}")]
    UnexpectedEnd { command: char, position: usize },

    #[error("path data must start with `M` or `m`, found `{token}` at position {position}")]
    ExpectedMoveTo { token: String, position: usize },

    #[error("expected a command letter before `{token}` at position {position}")]
    ExpectedCommand { token: String, position: usize },
}

/// Structural defects in a hand-built `PathDocument`. The parser never
/// produces these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("subpath {subpath} starts with {found} instead of MoveTo")]
    MissingMoveTo { subpath: usize, found: &'static str },

    #[error("subpath {subpath} has no commands")]
    EmptySubpath { subpath: usize },

    #[error("subpath {subpath} has a MoveTo at command {index}")]
    UnexpectedMoveTo { subpath: usize, index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmitError {
    #[error("no OpenSCAD lowering for {kind} segments")]
    UnsupportedNode { kind: &'static str },

    #[error("curve detail must be at least 1, got {0}")]
    InvalidDetail(u32),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed SVG: {0}")]
    Malformed(String),

    #[error(
        "unsupported feature: {0}; flatten transforms when exporting the SVG"
    )]
    UnsupportedFeature(String),
}

/// A pipeline failure tied to the path element that caused it.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid output options: {0}")]
    Options(#[source] EmitError),

    #[error("path {id:?}: {source}")]
    Parse {
        id: String,
        #[source]
        source: ParseError,
    },

    #[error("path {id:?}: {source}")]
    Resolve {
        id: String,
        #[source]
        source: ResolveError,
    },

    #[error("path {id:?}: {source}")]
    Emit {
        id: String,
        #[source]
        source: EmitError,
    },
}
