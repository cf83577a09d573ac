use crate::CoreError;
use crate::dispatcher::FormatOptions;
use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "commentpurger",
    version = "0.1.0",
    about = "Removes comments from HTML, CSS, JavaScript, TypeScript and Vue files",
    long_about = "Removes comments from HTML, CSS, JavaScript, TypeScript and Vue files in place.\nPass one or more files or directories; directories are searched recursively and\nfiles with other extensions are left untouched."
)]
pub struct CliArgs {
    #[clap(
        value_name = "PATH",
        required = true,
        help = "Files or directories to process [multiple allowed]"
    )]
    pub paths: Vec<PathBuf>,

    #[clap(long, help = "Also strip // and /* */ comments from Rust sources (.rs)")]
    pub rust: bool,

    #[clap(long, help = "Also strip # comments from YAML files (.yml, .yaml)")]
    pub yaml: bool,

    #[clap(
        short,
        long,
        value_name = "N",
        help = "Number of files processed in parallel [default: one per CPU]"
    )]
    pub jobs: Option<usize>,

    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more detail to stderr (-v debug, -vv trace)")]
    pub verbose: u8,
}

impl CliArgs {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            rust_sources: self.rust,
            yaml: self.yaml,
        }
    }
}

/// Regular files found under one root, plus the entries that could not be read.
#[derive(Debug, Default)]
pub struct FoundFiles {
    pub files: Vec<PathBuf>,
    pub errors: Vec<CoreError>,
}

/// Lists every regular file under `root`, recursing into directories.
///
/// Symlinks below the root are not followed. An unreadable root is an error;
/// an unreadable entry below it is recorded in [`FoundFiles::errors`] and
/// the walk goes on without it.
pub fn find_files(root: &Path) -> Result<FoundFiles, CoreError> {
    let mut found = FoundFiles::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(e) => {
                if e.file_type().is_file() {
                    found.files.push(e.into_path());
                }
            }
            Err(err) if err.depth() == 0 => {
                return Err(CoreError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                tracing::debug!("skipping {}: {}", path.display(), err);
                found.errors.push(CoreError::Walk { path, source: err });
            }
        }
    }
    tracing::debug!(root = %root.display(), files = found.files.len(), "walk finished");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_required() {
        assert!(CliArgs::try_parse_from(["commentpurger"]).is_err());
    }

    #[test]
    fn parses_paths_and_flags() {
        let args =
            CliArgs::try_parse_from(["commentpurger", "src", "index.html", "--yaml", "-vv", "-j", "2"])
                .unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("index.html")]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.jobs, Some(2));
        assert_eq!(
            args.format_options(),
            FormatOptions {
                rust_sources: false,
                yaml: true
            }
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = find_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, CoreError::Walk { .. }));
    }
}
