use crate::stripper::{self, StripError};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markup,
    Stylesheet,
    Script,
    Composite,
    Yaml,
    Unrecognized,
}

impl Format {
    pub fn is_recognized(self) -> bool {
        self != Format::Unrecognized
    }

    /// Runs the stripper for this format. Only markup can fail.
    pub fn strip(self, content: &[u8]) -> Result<Vec<u8>, StripError> {
        match self {
            Format::Markup => stripper::strip_markup(content),
            Format::Stylesheet => Ok(stripper::strip_block_comments(content)),
            Format::Script => Ok(stripper::strip_script_comments(content)),
            Format::Composite => Ok(stripper::strip_composite(content)),
            Format::Yaml => Ok(stripper::strip_hash_comments(content)),
            Format::Unrecognized => Ok(content.to_vec()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Markup => "markup",
            Format::Stylesheet => "stylesheet",
            Format::Script => "script",
            Format::Composite => "composite",
            Format::Yaml => "yaml",
            Format::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

const MARKUP_SUFFIXES: &[&str] = &[".html"];
const STYLESHEET_SUFFIXES: &[&str] = &[".css"];
const SCRIPT_SUFFIXES: &[&str] = &[".js", ".ts"];
const COMPOSITE_SUFFIXES: &[&str] = &[".vue"];
const RUST_SUFFIXES: &[&str] = &[".rs"];
const YAML_SUFFIXES: &[&str] = &[".yml", ".yaml"];

/// Opt-in additions to the default suffix table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Treat `.rs` files as script sources (self-processing).
    pub rust_sources: bool,
    /// Strip `#` comments from `.yml` and `.yaml` files.
    pub yaml: bool,
}

/// Immutable suffix to format mapping, built once per run.
#[derive(Debug, Clone)]
pub struct FormatTable {
    by_suffix: HashMap<&'static str, Format>,
}

impl FormatTable {
    pub fn new(options: FormatOptions) -> Self {
        let mut groups = vec![
            (MARKUP_SUFFIXES, Format::Markup),
            (STYLESHEET_SUFFIXES, Format::Stylesheet),
            (SCRIPT_SUFFIXES, Format::Script),
            (COMPOSITE_SUFFIXES, Format::Composite),
        ];
        if options.rust_sources {
            groups.push((RUST_SUFFIXES, Format::Script));
        }
        if options.yaml {
            groups.push((YAML_SUFFIXES, Format::Yaml));
        }

        let by_suffix = groups
            .into_iter()
            .flat_map(|(suffixes, format)| suffixes.iter().map(move |&s| (s, format)))
            .collect();
        FormatTable { by_suffix }
    }

    pub fn suffixes(&self) -> Vec<&'static str> {
        let mut all: Vec<_> = self.by_suffix.keys().copied().collect();
        all.sort_unstable();
        all
    }

    pub fn format_for(&self, path: &Path) -> Format {
        file_suffix(path)
            .and_then(|suffix| self.by_suffix.get(suffix))
            .copied()
            .unwrap_or(Format::Unrecognized)
    }

    pub fn dispatch(&self, path: &Path, content: &[u8]) -> Result<Vec<u8>, StripError> {
        self.format_for(path).strip(content)
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        FormatTable::new(FormatOptions::default())
    }
}

/// The file name from its last `.` onwards, e.g. `.ts` for `a.d.ts`.
/// Matching against the table is case-sensitive.
pub fn file_suffix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}

/// File contents tagged with the format they will be stripped as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub format: Format,
    pub content: Vec<u8>,
}

impl SourceDocument {
    pub fn new(format: Format, content: Vec<u8>) -> Self {
        SourceDocument { format, content }
    }

    pub fn strip(&self) -> Result<Vec<u8>, StripError> {
        self.format.strip(&self.content)
    }

    pub fn is_changed_by(&self, stripped: &[u8]) -> bool {
        self.content != stripped
    }
}
