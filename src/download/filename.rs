//! Target path resolution for downloaded assets.

use std::path::{Component, Path, PathBuf};

use super::DownloadError;

/// Joins `file_name` onto `destination`, rejecting names that would escape it.
///
/// Nested relative names such as `icons/logo.svg` are allowed. Absolute paths,
/// `..` segments and empty names are rejected.
pub(crate) fn resolve_target_path(
    destination: &Path,
    file_name: &str,
) -> Result<PathBuf, DownloadError> {
    if file_name.trim().is_empty() || !is_safe_relative_path(file_name) {
        return Err(DownloadError::invalid_file_name(file_name));
    }
    Ok(destination.join(file_name))
}

fn is_safe_relative_path(name: &str) -> bool {
    Path::new(name).components().all(|component| {
        matches!(component, Component::Normal(_) | Component::CurDir)
    }) && Path::new(name)
        .components()
        .any(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_path_plain_name() {
        let path = resolve_target_path(Path::new("/out"), "a.png").unwrap();
        assert_eq!(path, PathBuf::from("/out/a.png"));
    }

    #[test]
    fn test_resolve_target_path_allows_nested_relative_name() {
        let path = resolve_target_path(Path::new("/out"), "icons/logo.svg").unwrap();
        assert_eq!(path, PathBuf::from("/out/icons/logo.svg"));
    }

    #[test]
    fn test_resolve_target_path_rejects_parent_segments() {
        let result = resolve_target_path(Path::new("/out"), "../secret.png");
        assert!(matches!(result, Err(DownloadError::InvalidFileName { .. })));

        let result = resolve_target_path(Path::new("/out"), "icons/../../x.png");
        assert!(matches!(result, Err(DownloadError::InvalidFileName { .. })));
    }

    #[test]
    fn test_resolve_target_path_rejects_absolute_name() {
        let result = resolve_target_path(Path::new("/out"), "/etc/passwd");
        assert!(matches!(result, Err(DownloadError::InvalidFileName { .. })));
    }

    #[test]
    fn test_resolve_target_path_rejects_empty_name() {
        assert!(resolve_target_path(Path::new("/out"), "").is_err());
        assert!(resolve_target_path(Path::new("/out"), "   ").is_err());
        assert!(resolve_target_path(Path::new("/out"), ".").is_err());
    }
}
