//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::resolve_pattern;

use anyhow::Result;
use depletion_core::Input;
use std::fmt;
use std::path::PathBuf;

/// Name that selects standard input
pub const STDIN_ARG: &str = "-";

/// A resolved input, in processing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Open for processing
    pub fn to_input(&self) -> Input {
        match self {
            InputSource::Stdin => Input::Stdin,
            InputSource::File(path) => Input::from_file(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve command-line input arguments
///
/// No arguments means standard input. `-` selects standard input at that
/// position; anything else is a glob pattern. Duplicates are dropped,
/// keeping the first occurrence.
pub fn resolve_inputs(args: &[String]) -> Result<Vec<InputSource>> {
    if args.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }

    let mut sources: Vec<InputSource> = Vec::new();
    for arg in args {
        let resolved = if arg == STDIN_ARG {
            vec![InputSource::Stdin]
        } else {
            resolve_pattern(arg)?
                .into_iter()
                .map(InputSource::File)
                .collect()
        };

        for source in resolved {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
    }

    log::debug!("Resolved {} input(s)", sources.len());
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_args_means_stdin() {
        assert_eq!(resolve_inputs(&[]).unwrap(), vec![InputSource::Stdin]);
    }

    #[test]
    fn test_dash_and_files_keep_order() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("scenarios.txt");
        fs::write(&file, "100 10\n").unwrap();
        let path = file.display().to_string();

        let sources =
            resolve_inputs(&[path.clone(), STDIN_ARG.to_string(), path.clone()]).unwrap();
        assert_eq!(
            sources,
            vec![InputSource::File(file.clone()), InputSource::Stdin]
        );
        assert_eq!(sources[0].to_string(), path);
        assert_eq!(sources[1].to_string(), "<stdin>");
    }

    #[test]
    fn test_unmatched_pattern_fails() {
        assert!(resolve_inputs(&["/nonexistent/*.txt".to_string()]).is_err());
    }
}
