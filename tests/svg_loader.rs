use std::path::Path;

use svg2scad::error::LoadError;
use svg2scad::loader::load_file;

#[test]
fn loads_paths_from_file() {
    let doc = load_file(Path::new("tests/fixtures/shapes.svg")).expect("valid svg");

    assert_eq!(doc.name, "shapes");
    // sample file has three path elements, one inside a group
    assert_eq!(doc.paths.len(), 3);

    assert_eq!(doc.paths[0].id, "triangle");
    assert_eq!(doc.paths[0].data, "M0,0 L10,0 L10,10 Z");
    assert_eq!(doc.paths[1].id, "");
    assert_eq!(doc.paths[2].id, "triangle");
}

#[test]
fn rejects_group_transform() {
    let err = load_file(Path::new("tests/fixtures/transformed.svg")).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFeature(_)), "got: {err}");
}
