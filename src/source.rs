//! Configuration sources and ordered layer loading.
//!
//! A [`SourceReader`] turns a logical path into file content, or reports the
//! file absent. Absent files are the expected common case (most variants
//! override only a few base files), so "not found" is never an error here;
//! any other failure aborts loading immediately.

use crate::error::ConfigError;
use crate::path::LogicalPath;
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Resolves logical paths to file content.
///
/// Implement this to read configuration from somewhere other than a plain
/// directory tree (an embedded bundle, an object store, a test fixture).
/// Return `Ok(None)` for "not found"; reserve `Err` for failures that should
/// abort resolution, such as permission errors.
pub trait SourceReader {
    /// Read the content behind `path`, or `None` if it does not exist.
    fn read(&self, path: &LogicalPath) -> Result<Option<String>>;
}

/// Filesystem source rooted at a directory.
///
/// Dotted location segments map to subdirectories: `configs.nested.app.yml`
/// is read from `<root>/configs/nested/app.yml`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source rooted at the user's `~/.{app}` directory.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn user(app: &str) -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(format!(".{app}"))))
    }

    /// The root directory this source reads from.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn file_path(&self, path: &LogicalPath) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.location().split('.').filter(|s| !s.is_empty()) {
            full.push(segment);
        }
        full.push(path.file_name());
        full
    }
}

impl SourceReader for DirSource {
    fn read(&self, path: &LogicalPath) -> Result<Option<String>> {
        let file_path = self.file_path(path);
        match std::fs::read_to_string(&file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory source keyed by dotted logical path.
///
/// Intended for tests and examples; content is served verbatim.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under the dotted form of `path`.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.files
            .insert(LogicalPath::parse(path).to_string(), content.into());
        self
    }
}

impl SourceReader for MemorySource {
    fn read(&self, path: &LogicalPath) -> Result<Option<String>> {
        Ok(self.files.get(&path.to_string()).cloned())
    }
}

/// One loaded configuration layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Dotted logical path this layer was loaded from.
    pub path: String,
    /// Whether the source had content for the path.
    pub found: bool,
    /// Parsed mapping; empty when the file was absent or empty.
    pub value: Value,
}

/// Load every path into a layer, in order.
///
/// Produces one layer per input path, absent files included: an absent file
/// yields the empty mapping, as does a present file whose document is empty
/// or `null`. A document whose top level is not a mapping, a parse error, or
/// any read failure other than "not found" aborts with
/// [`ConfigError::SourceLoad`]; no partial result is returned.
pub fn load_all(
    reader: &impl SourceReader,
    paths: &[LogicalPath],
) -> Result<Vec<Layer>, ConfigError> {
    let mut layers = Vec::with_capacity(paths.len());

    for path in paths {
        let display_path = path.to_string();
        let content = reader
            .read(path)
            .map_err(|source| ConfigError::SourceLoad {
                path: display_path.clone(),
                source,
            })?;

        let layer = match content {
            Some(text) => {
                debug!(path = %display_path, "loading config source");
                Layer {
                    value: parse_mapping(&display_path, &text)?,
                    path: display_path,
                    found: true,
                }
            }
            None => {
                debug!(path = %display_path, "config source not found, using empty mapping");
                Layer {
                    value: empty_mapping(),
                    path: display_path,
                    found: false,
                }
            }
        };
        layers.push(layer);
    }

    Ok(layers)
}

fn empty_mapping() -> Value {
    Value::Object(Map::new())
}

/// Parse one document into a mapping.
///
/// Empty documents and `null` documents load as the empty mapping; any other
/// non-mapping top level is malformed content.
fn parse_mapping(path: &str, text: &str) -> Result<Value, ConfigError> {
    if text.trim().is_empty() {
        return Ok(empty_mapping());
    }

    let value: Value =
        serde_yaml::from_str(text).map_err(|err| ConfigError::SourceLoad {
            path: path.to_string(),
            source: err.into(),
        })?;

    match value {
        Value::Null => Ok(empty_mapping()),
        Value::Object(_) => Ok(value),
        other => Err(ConfigError::SourceLoad {
            path: path.to_string(),
            source: anyhow::anyhow!(
                "expected a mapping at the top level, found {}",
                value_kind(&other)
            ),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
