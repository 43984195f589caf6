//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

pub mod count;
pub mod estimate;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
///
/// Every error names the path and says the file could not be read or found.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path())
        .with_context(|| format!("the file could not be read or found: {path}"))?;
    if !metadata.is_file() {
        anyhow::bail!("the file could not be read or found: {path} is not a regular file");
    }
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("the file could not be read or found: {path}"))?;
    tracing::debug!(file = %path, bytes = content.len(), "read input file");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_file(contents: &[u8]) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("post.html")).unwrap();
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_file_within_limit() {
        let (_dir, path) = temp_file(b"<p>hello</p>");
        let content = read_input_file(&path, Some(1024)).unwrap();
        assert_eq!(content, "<p>hello</p>");
    }

    #[test]
    fn rejects_file_over_limit() {
        let (_dir, path) = temp_file(b"0123456789");
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn no_limit_reads_everything() {
        let (_dir, path) = temp_file(&[b'a'; 4096]);
        assert_eq!(read_input_file(&path, None).unwrap().len(), 4096);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_input_file(Utf8Path::new("/nonexistent/post.html"), None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("could not be read or found"));
        assert!(message.contains("/nonexistent/post.html"));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert!(read_input_file(&path, None).is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let (_dir, path) = temp_file(&[0xff, 0xfe, 0x00]);
        let err = read_input_file(&path, None).unwrap_err();
        assert!(err.to_string().contains("could not be read or found"));
    }
}
