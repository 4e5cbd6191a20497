use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::{ParamOverrides, ParamsError};

/// How deep `@file` references may nest inside argument files.
pub const MAX_NESTING: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamFileContents {
    /// Command-line tokens, one per line of an argument file.
    Args(Vec<String>),
    /// A YAML or JSON mapping of parameter names to values.
    Overrides(ParamOverrides),
}

/// One override layer read from a parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamFile {
    pub path: PathBuf,
    pub contents: ParamFileContents,
}

/// Separates `@file` references from the rest of the command line.
///
/// Returns the parameter file layers in the order they are referenced, followed by the remaining
/// command-line tokens. A reference inside an argument file splits that file into the tokens
/// before it, the referenced file, and the tokens after it, so textual order is kept.
pub fn split_param_files<S: AsRef<str>>(
    args: &[S],
) -> Result<(Vec<ParamFile>, Vec<String>), ParamsError> {
    let mut files = Vec::new();
    let mut rest = Vec::new();
    let mut stack = IndexSet::new();

    for arg in args {
        let arg = arg.as_ref();
        match arg.strip_prefix('@') {
            Some("") => return Err(ParamsError::EmptyReference),
            Some(path) => load(Path::new(path), &mut stack, &mut files)?,
            None => rest.push(arg.to_string()),
        }
    }

    Ok((files, rest))
}

fn load(
    path: &Path,
    stack: &mut IndexSet<PathBuf>,
    out: &mut Vec<ParamFile>,
) -> Result<(), ParamsError> {
    if stack.len() >= MAX_NESTING {
        return Err(ParamsError::NestingTooDeep {
            path: path.to_path_buf(),
            limit: MAX_NESTING,
        });
    }

    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if stack.contains(&key) {
        let cycle = stack
            .iter()
            .chain(std::iter::once(&key))
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(ParamsError::Cycle { cycle });
    }

    let text = std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading parameter file");

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml" | "yml") => {
            let overrides = serde_yaml::from_str(&text).map_err(|source| ParamsError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
            out.push(ParamFile {
                path: path.to_path_buf(),
                contents: ParamFileContents::Overrides(overrides),
            });
        }
        Some("json") => {
            let overrides = serde_json::from_str(&text).map_err(|source| ParamsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
            out.push(ParamFile {
                path: path.to_path_buf(),
                contents: ParamFileContents::Overrides(overrides),
            });
        }
        _ => {
            stack.insert(key.clone());
            let mut chunk = Vec::new();
            for line in text.lines() {
                let token = line.trim();
                if token.is_empty() || token.starts_with('#') {
                    continue;
                }
                match token.strip_prefix('@') {
                    Some("") => return Err(ParamsError::EmptyReference),
                    Some(nested) => {
                        flush(path, &mut chunk, out);
                        load(Path::new(nested), stack, out)?;
                    }
                    None => chunk.push(token.to_string()),
                }
            }
            flush(path, &mut chunk, out);
            stack.shift_remove(&key);
        }
    }

    Ok(())
}

fn flush(path: &Path, chunk: &mut Vec<String>, out: &mut Vec<ParamFile>) {
    if chunk.is_empty() {
        return;
    }
    out.push(ParamFile {
        path: path.to_path_buf(),
        contents: ParamFileContents::Args(std::mem::take(chunk)),
    });
}
