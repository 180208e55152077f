//! Unique OpenSCAD identifiers for generated functions and modules.

use std::collections::{HashMap, HashSet};

/// Names a generated module must not take: OpenSCAD keywords, and the
/// modules the emitted wrapper calls itself.
const RESERVED: &[&str] = &[
    "module", "function", "if", "else", "let", "for", "each", "include", "use", "true", "false",
    "undef", "assert", "echo", "intersection_for", "polygon", "linear_extrude", "attachable",
    "children",
];

/// Hands out identifiers for one conversion run.
///
/// * empty ids become `path_0`, `path_1`, …
/// * a first-seen id is returned as-is (after sanitising)
/// * repeats get `_1`, `_2`, … counted per base name
///
/// Every returned name is checked against all names issued so far, so
/// a source id that happens to look like a generated one cannot clash.
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
    repeats: HashMap<String, usize>,
    anonymous: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, source_id: &str) -> String {
        let base = sanitize(source_id);

        let name = if base.is_empty() {
            self.next_anonymous()
        } else if !self.used.contains(&base) {
            base
        } else {
            self.next_repeat(&base)
        };

        self.used.insert(name.clone());
        name
    }

    fn next_anonymous(&mut self) -> String {
        loop {
            let candidate = format!("path_{}", self.anonymous);
            self.anonymous += 1;
            if !self.used.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn next_repeat(&mut self, base: &str) -> String {
        let counter = self.repeats.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{base}_{counter}");
            if !self.used.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Map an arbitrary SVG id onto `[A-Za-z_][A-Za-z0-9_]*`.
pub fn sanitize(id: &str) -> String {
    let mut out: String = id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if RESERVED.contains(&out.as_str()) {
        out.push('_');
    }
    out
}
