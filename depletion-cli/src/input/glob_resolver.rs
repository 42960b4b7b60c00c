//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Resolve one file pattern to the files it matches
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.to_string()))?;

    let mut files = Vec::new();
    for path_result in paths {
        let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFound(pattern.to_string()).into());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_matches_sorted_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "10 3\n").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "100 10\n").unwrap();
        fs::create_dir(temp_dir.path().join("dir.txt")).unwrap();

        let pattern = format!("{}/*.txt", temp_dir.path().display());
        let files = resolve_pattern(&pattern).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[test]
    fn test_no_match() {
        let err = resolve_pattern("/nonexistent/*.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoInputFound(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_pattern("[invalid").unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern"));
    }
}
