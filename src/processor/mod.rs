//! The compiler core: path data in, OpenSCAD text out.
//!
//! Every pass is a pure function over data owned by one conversion, so
//! independent files can be converted on separate threads.
pub mod ast;
pub mod lexer;
pub mod names;
pub mod path_parser;
pub mod resolve;

use log::{debug, warn};

use crate::error::ConvertError;
use crate::model::{PathEntry, SvgDocument};
use crate::writer::scad::{EmitOptions, Emitted, Emitter};
use names::NameAllocator;
use resolve::ResolvedDocument;

/// Parse and resolve one path element.
pub fn resolve_entry(entry: &PathEntry) -> Result<ResolvedDocument, ConvertError> {
    let doc = path_parser::parse(&entry.id, &entry.data).map_err(|source| ConvertError::Parse {
        id: entry.id.clone(),
        source,
    })?;
    let relative = doc.commands().filter(|c| c.is_relative()).count();
    debug!("path {:?}: {relative} relative commands", entry.id);
    resolve::resolve(doc).map_err(|source| ConvertError::Resolve {
        id: entry.id.clone(),
        source,
    })
}

/// Parse and resolve every path of a document, stopping at the first failure.
pub fn resolve_all(svg: &SvgDocument) -> Result<Vec<ResolvedDocument>, ConvertError> {
    svg.paths.iter().map(resolve_entry).collect()
}

/// Runs every pass over one input file and returns the finished text.
///
/// Any failing path fails the whole file; nothing partial is returned.
pub fn convert(svg: &SvgDocument, options: &EmitOptions) -> Result<Emitted, ConvertError> {
    let mut emitter = Emitter::new(options, NameAllocator::new()).map_err(ConvertError::Options)?;

    for entry in &svg.paths {
        let doc = resolve_entry(entry)?;
        if doc.subpaths.is_empty() {
            warn!("{}: path {:?} has no drawing commands", svg.name, entry.id);
            continue;
        }
        let names = emitter
            .emit_document(&doc)
            .map_err(|source| ConvertError::Emit {
                id: entry.id.clone(),
                source,
            })?;
        debug!("{}: path {:?} -> {}", svg.name, entry.id, names.join(", "));
    }

    Ok(emitter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmitError, ParseError};

    fn document(paths: &[(&str, &str)]) -> SvgDocument {
        SvgDocument {
            name: "test".into(),
            paths: paths
                .iter()
                .map(|(id, data)| PathEntry {
                    id: id.to_string(),
                    data: data.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_convert_names_every_subpath() {
        let svg = document(&[
            ("a", "M0,0 L1,0 L1,1 z"),
            ("a", "M0,0 L2,0 L2,2 z"),
            ("", "M0,0 L1,1 m1,1 l1,0"),
        ]);
        let out = convert(&svg, &EmitOptions::default()).unwrap();
        assert_eq!(out.names, vec!["a", "a_1", "path_0", "path_1"]);
    }

    #[test]
    fn test_parse_error_names_path() {
        let svg = document(&[("good", "M0,0 L1,1"), ("broken", "X1,2")]);
        let err = convert(&svg, &EmitOptions::default()).unwrap_err();
        match &err {
            ConvertError::Parse { id, source } => {
                assert_eq!(id, "broken");
                assert_eq!(
                    *source,
                    ParseError::UnknownCommand {
                        letter: 'X',
                        position: 0
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("\"broken\""));
    }

    #[test]
    fn test_unsupported_segment_fails_file() {
        let svg = document(&[("arc", "M0,0 a1,1 0 0 0 2,0")]);
        let err = convert(&svg, &EmitOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Emit {
                source: EmitError::UnsupportedNode { kind: "EllipticalArc" },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_path_skipped() {
        let svg = document(&[("blank", ""), ("p", "M0,0 L1,1")]);
        let out = convert(&svg, &EmitOptions::default()).unwrap();
        assert_eq!(out.names, vec!["p"]);
    }

    #[test]
    fn test_conversion_types_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SvgDocument>();
        assert_send::<ResolvedDocument>();
        assert_send::<NameAllocator>();
        assert_send::<Emitted>();
    }
}
