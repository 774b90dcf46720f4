use std::path::{Component, Path, PathBuf};

/// Resolve `raw` against `cwd`, collapsing `.` and `..` lexically.
/// Absolute inputs ignore `cwd`; an empty input resolves to `cwd` itself.
pub fn absolutize(raw: &str, cwd: &Path) -> PathBuf {
    let joined = if Path::new(raw).is_absolute() {
        PathBuf::from(raw)
    } else {
        cwd.join(raw)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Split `raw` at its last path separator into `(dirname, filename)`.
/// `dirname` is empty when there is no separator.
pub fn split_name(raw: &str) -> (&str, &str) {
    match raw.rfind(std::path::is_separator) {
        Some(idx) => {
            let dir = &raw[..idx];
            let trimmed = dir.trim_end_matches(std::path::is_separator);
            // keep the root itself, e.g. "/file" -> ("/", "file")
            let dir = if trimmed.is_empty() { &raw[..=idx] } else { trimmed };
            (dir, &raw[idx + 1..])
        }
        None => ("", raw),
    }
}
