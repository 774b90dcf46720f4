use eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;

/// File names in `dir`, sorted. Subdirectories and names that are not valid
/// UTF-8 are left out.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).wrap_err_with(|| format!("reading {}", dir.display()))? {
        let e = entry?;
        if !e.file_type()?.is_file() {
            continue;
        }
        match e.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::warn!(name = ?name, "skipping non UTF-8 file name"),
        }
    }
    names.sort();
    tracing::debug!(dir = %dir.display(), files = names.len(), "listed directory");
    Ok(names)
}
