//! Path normalization utilities
//!
//! All paths shown in file headers use '/' as separator and are relative
//! to the session root where possible.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(|p| normalize_path(p))
}

/// Root-relative display form, falling back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    make_relative(path, root)
        .filter(|rel| !rel.is_empty())
        .unwrap_or_else(|| normalize_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("src/main.rs");
        assert_eq!(normalize_path(path), "src/main.rs");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/project");
        let path = Path::new("/project/src/main.rs");
        assert_eq!(make_relative(path, root), Some("src/main.rs".to_string()));
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/project");
        let path = Path::new("/other/file.rs");
        assert_eq!(make_relative(path, root), None);
    }

    #[test]
    fn test_display_relative_falls_back_to_full_path() {
        let root = PathBuf::from("/project");
        assert_eq!(
            display_relative(Path::new("/elsewhere/x.rs"), &root),
            "/elsewhere/x.rs"
        );
        assert_eq!(display_relative(Path::new("/project"), &root), "/project");
        assert_eq!(
            display_relative(Path::new("/project/a/b.rs"), &root),
            "a/b.rs"
        );
    }
}
