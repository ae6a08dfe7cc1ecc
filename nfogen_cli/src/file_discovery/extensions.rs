//! Container extensions and file name splitting

/// Video containers that get a descriptor unless configured otherwise
pub const DEFAULT_CONTAINER_EXTENSIONS: &[&str] = &[
    "avchd", "avi", "flv", "swf", "f4v", "mkv", "mov", "qt", "mp4", "m4p", "m4v", "mpg", "mp2",
    "mpeg", "mpe", "mpv", "ogg", "webm", "wmv",
];

/// Normalize a configured extension: no leading dots, lowercase
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Split a file name into base name and extension (without the dot)
///
/// Leading dots belong to the base name, so `.hidden.mkv` splits into
/// `.hidden` and `mkv` while a bare `.hidden` has no extension. Returns
/// `None` when no non-empty extension follows the leading dots.
pub fn split_extension(name: &str) -> Option<(&str, &str)> {
    let leading = name.len() - name.trim_start_matches('.').len();
    let dot = name[leading..].rfind('.')? + leading;

    let extension = &name[dot + 1..];
    if extension.is_empty() {
        return None;
    }
    Some((&name[..dot], extension))
}
