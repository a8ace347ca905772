use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turn a command line argument into a path.
///
/// Accepts a plain path or a `file://` URI (`file:///abs/path`,
/// `file://localhost/abs/path`).
pub fn resolve_input(arg: &str) -> PathBuf {
    match arg.strip_prefix("file://") {
        Some(rest) => {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            PathBuf::from(rest)
        }
        None => PathBuf::from(arg),
    }
}

/// Read a markdown file and return its content
pub fn read_input(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write rendered HTML followed by a line separator.
///
/// Returns the number of bytes written.
pub fn write_output(path: &Path, html: &str) -> Result<usize, IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let content = format!("{html}\n");
    fs::write(path, &content).map_err(IoError::Io)?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("notes/today.md", "notes/today.md")]
    #[case("/tmp/in.md", "/tmp/in.md")]
    #[case("file:///tmp/in.md", "/tmp/in.md")]
    #[case("file://localhost/tmp/in.md", "/tmp/in.md")]
    fn test_resolve_input(#[case] arg: &str, #[case] expected: &str) {
        assert_eq!(resolve_input(arg), PathBuf::from(expected));
    }

    #[test]
    fn test_read_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.md");
        fs::write(&path, "# Title\n").unwrap();

        assert_eq!(read_input(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_missing_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(&path).unwrap_err();
        assert!(matches!(err, IoError::NotFound(ref p) if *p == path));
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().unwrap();

        let err = read_input(dir.path()).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_write_output_appends_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.html");

        let written = write_output(&path, "<p>x </p>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>x </p>\n");
        assert_eq!(written, 10);
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site").join("pages").join("out.html");

        write_output(&path, "html").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_output_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.html");
        fs::write(&path, "old content that is longer").unwrap();

        write_output(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }
}
