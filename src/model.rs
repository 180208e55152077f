use serde::Serialize;

/// One `<path>` element as it comes out of the SVG loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry {
    /// The `id` attribute; empty when the element has none.
    pub id: String,
    /// The raw `d` attribute.
    pub data: String,
}

/// Everything the core needs from one input file.
///
/// `paths` keeps document order, which is also the order the generated
/// functions and modules appear in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgDocument {
    /// File stem of the source, used in diagnostics.
    pub name: String,
    pub paths: Vec<PathEntry>,
}
