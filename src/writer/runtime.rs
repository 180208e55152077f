//! OpenSCAD helpers every generated file depends on.
//!
//! The block is pasted verbatim once per output so each `.scad` file
//! stands alone. Bump `RUNTIME_VERSION` whenever the text changes.

pub const RUNTIME_VERSION: u32 = 1;

pub const RUNTIME: &str = r#"// svg2scad geometry runtime v1
function svg2scad_last(points) = points[len(points) - 1];

// [max corner, min corner] of a 2D point list
function svg2scad_extents(points) = [
    [max([for (p = points) p[0]]), max([for (p = points) p[1]])],
    [min([for (p = points) p[0]]), min([for (p = points) p[1]])]
];

function svg2scad_bezier_point(curve, t) =
    pow(1 - t, 3) * curve[0]
    + 3 * pow(1 - t, 2) * t * curve[1]
    + 3 * (1 - t) * pow(t, 2) * curve[2]
    + pow(t, 3) * curve[3];

// Flattens a 4-point cubic into `detail` points; the start point is
// left out because the caller already holds it.
function svg2scad_bezier(curve, detail) =
    [for (i = [1 : detail]) svg2scad_bezier_point(curve, i / detail)];

function svg2scad_centered(points) =
    let (bounds = svg2scad_extents(points))
    [for (p = points) p - (bounds[0] + bounds[1]) / 2];
// end svg2scad geometry runtime
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_banner() {
        let banner = format!("// svg2scad geometry runtime v{RUNTIME_VERSION}\n");
        assert!(RUNTIME.starts_with(&banner));
    }

    #[test]
    fn test_every_helper_is_prefixed() {
        for line in RUNTIME.lines().filter(|l| l.starts_with("function ")) {
            assert!(line["function ".len()..].starts_with("svg2scad_"), "line: {line}");
        }
    }
}
