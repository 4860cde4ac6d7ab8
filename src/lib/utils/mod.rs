use std::path::Path;

/// Collapse runs of whitespace (including NBSP) into single spaces and trim.
pub fn normalize_text(s: &str) -> String {
    s.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lexically resolve `.` and `..` segments of a slash-separated path.
///
/// `..` above the root is dropped, so the result never escapes it.
pub fn normalize_segments(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split(['/', '\\']) {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}

/// Strip the extension from the last segment of a slash-separated path.
pub fn strip_extension(path: &str) -> &str {
    let last_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[last_start..].rfind('.') {
        // Dotfiles keep their name.
        Some(0) | None => path,
        Some(dot) => &path[..last_start + dot],
    }
}

/// Whether `path` has one of the given extensions.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Relative path rendered with forward slashes.
pub fn path_to_slashes(p: &Path) -> String {
    p.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests;
