use log::{debug, info};
use std::fs;
use std::path::Path;
use svg::node::element::tag::Type;
use svg::parser::Event;

use crate::error::LoadError;
use crate::model::{PathEntry, SvgDocument};

/// Read and scan an SVG file from disk.
pub fn load_file(path: &Path) -> Result<SvgDocument, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("File loaded, size: {} bytes", text.len());

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_svg(&name, &text)
}

/// Collect every `<path>` element of an SVG document in order.
///
/// Paths nested inside groups are collected too. Coordinate transforms
/// are not applied, so any `transform` on a group or a path rejects the
/// whole document instead of producing silently misplaced geometry.
pub fn load_svg(name: &str, text: &str) -> Result<SvgDocument, LoadError> {
    let parser = svg::read(text).map_err(|e| LoadError::Malformed(e.to_string()))?;

    let mut paths = Vec::new();
    for event in parser {
        match event {
            Event::Error(e) => return Err(LoadError::Malformed(e.to_string())),
            Event::Tag(tag, Type::Start | Type::Empty, attributes) => {
                if !matches!(tag, "g" | "path") {
                    continue;
                }
                if let Some(transform) = attributes.get("transform") {
                    return Err(LoadError::UnsupportedFeature(format!(
                        "transform=\"{transform}\" on <{tag}>"
                    )));
                }
                if tag == "path" {
                    let attr = |key: &str| attributes.get(key).map(|v| v.to_string());
                    paths.push(PathEntry {
                        id: attr("id").unwrap_or_default(),
                        data: attr("d").unwrap_or_default(),
                    });
                }
            }
            _ => {}
        }
    }

    debug!("Found {} paths in {name}", paths.len());
    Ok(SvgDocument {
        name: name.to_string(),
        paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_paths_in_order() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <path id="first" d="M0,0 L1,1"/>
            <g id="layer">
                <path d="M2,2 L3,3"></path>
            </g>
            <rect width="1" height="1"/>
        </svg>"#;

        let doc = load_svg("demo", text).unwrap();
        assert_eq!(doc.name, "demo");
        assert_eq!(
            doc.paths,
            vec![
                PathEntry {
                    id: "first".into(),
                    data: "M0,0 L1,1".into(),
                },
                PathEntry {
                    id: "".into(),
                    data: "M2,2 L3,3".into(),
                },
            ]
        );
    }

    #[test]
    fn test_group_transform_rejected() {
        let text = r#"<svg><g transform="translate(5,5)"><path d="M0,0 L1,1"/></g></svg>"#;
        let err = load_svg("t", text).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFeature(_)), "got: {err}");
        assert!(err.to_string().contains("<g>"));
    }

    #[test]
    fn test_path_transform_rejected() {
        let text = r#"<svg><path transform="scale(2)" d="M0,0 L1,1"/></svg>"#;
        assert!(matches!(
            load_svg("t", text),
            Err(LoadError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("does/not/exist.svg")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
