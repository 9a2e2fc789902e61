//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use crate::parser;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Marker path meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read file contents with standardized error handling.
///
/// A missing file maps to `input.not_found`; other failures to `internal.io_error`.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::input_not_found(path.display().to_string())
        } else {
            Error::internal_io(e.to_string(), Some(operation.to_string()))
        }
    })
}

/// Read a file as raw bytes, mapping a missing file to `input.not_found`.
pub fn read_bytes(path: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::input_not_found(path)
        } else {
            Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        }
    })
}

/// Read all of stdin into a string.
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
    Ok(buf)
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == STDIN_PATH {
        return read_stdin();
    }
    read_file(Path::new(path), &format!("read {}", path))
}

/// Read lines from each input in order; an empty input list reads stdin.
pub fn read_lines(inputs: &[String]) -> Result<Vec<String>> {
    if inputs.is_empty() {
        return Ok(parser::lines_to_vec(&read_stdin()?));
    }

    let mut lines = Vec::new();
    for input in inputs {
        lines.extend(parser::lines_to_vec(&read_input(input)?));
    }
    Ok(lines)
}

/// Write content to file atomically (write to .tmp, then rename).
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation))))?;

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation))))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_reports_missing_input() {
        let err = read_file(Path::new("/nonexistent/path.txt"), "test read").unwrap_err();
        assert_eq!(err.code.as_str(), "input.not_found");
        assert_eq!(err.details["path"], "/nonexistent/path.txt");
    }

    #[test]
    fn read_bytes_keeps_exact_content() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"a\r\nb").unwrap();

        let path = temp.path().display().to_string();
        assert_eq!(read_bytes(&path).unwrap(), b"a\r\nb".to_vec());
        assert_eq!(
            read_bytes("/nonexistent/path.bin").unwrap_err().code.as_str(),
            "input.not_found"
        );
    }

    #[test]
    fn read_lines_concatenates_inputs_in_order() {
        let mut first = NamedTempFile::new().unwrap();
        write!(first, "a\r\nb\n").unwrap();
        let mut second = NamedTempFile::new().unwrap();
        write!(second, "c").unwrap();

        let inputs = vec![
            first.path().display().to_string(),
            second.path().display().to_string(),
        ];
        assert_eq!(read_lines(&inputs).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn write_file_atomic_reports_missing_directory() {
        let err = write_file_atomic(
            Path::new("/nonexistent/dir/file.txt"),
            "content",
            "test write",
        )
        .unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn write_file_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old").unwrap();

        write_file_atomic(&path, "new", "test write").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("out.json.tmp").exists());
    }
}
