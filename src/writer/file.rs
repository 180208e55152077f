//! Output file placement and writing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub const EXTENSION: &str = "scad";

/// Where the `.scad` for `input` goes.
///
/// Without `out_name` the input's stem is reused; a given name gets the
/// extension appended if it lacks one. `out_dir` defaults to the input's
/// own directory.
pub fn output_path(input: &Path, out_dir: Option<&Path>, out_name: Option<&str>) -> PathBuf {
    let file_name = match out_name {
        Some(name) if name.ends_with(".scad") => PathBuf::from(name),
        Some(name) => PathBuf::from(format!("{name}.{EXTENSION}")),
        None => {
            let stem = input.file_stem().unwrap_or(input.as_os_str());
            Path::new(stem).with_extension(EXTENSION)
        }
    };

    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(file_name)
}

/// Write `contents` to `path`, creating parent directories.
///
/// The data goes to a synced temp file in the target's directory, which is
/// then renamed over the target. On any failure the temp file is removed
/// and the target is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    // dropping `tmp` on an early return deletes it
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
