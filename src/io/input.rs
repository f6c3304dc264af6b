use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read one transcript page file into its raw lines
pub fn read_page_file(path: &Path) -> Result<Vec<String>> {
    info!("processing {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page file: {:?}", path))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Read a set of page files in transcript order
pub fn read_page_files(paths: &[impl AsRef<Path>]) -> Result<Vec<Vec<String>>> {
    info!("processing {} files", paths.len());
    paths.iter().map(|p| read_page_file(p.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_page_file_splits_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "HEADER\nPage 1\n1 THE COURT: Yes.\nfooter\n").unwrap();

        let lines = read_page_file(file.path()).unwrap();
        assert_eq!(
            lines,
            vec!["HEADER", "Page 1", "1 THE COURT: Yes.", "footer"]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_page_file(Path::new("/no/such/page.txt")).is_err());
    }
}
