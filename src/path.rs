//! Logical configuration paths and variant overlay derivation.
//!
//! A logical path names a configuration file independently of any concrete
//! filesystem layout: `configs/base.yml` at declaration time, re-expressed
//! as `configs.base.yml` canonically. This module is pure string
//! manipulation; nothing here touches the filesystem or knows whether a
//! derived path exists.

use std::fmt;

/// A logical file path split into its location and file-name portions.
///
/// The location is a dot-delimited segment chain (`configs.nested`), the
/// file name carries the extension (`base.yml`). Overlay derivation inserts
/// the variant between the file stem and the extension, so the overlay of
/// `configs.base.yml` for variant `prod` is `configs.base.prod.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalPath {
    location: String,
    file_name: String,
}

impl LogicalPath {
    /// Parse a dot-or-slash-delimited logical path.
    ///
    /// Slashes are normalized to dots first. The last two dot-segments form
    /// the file name (`name.extension`); everything before them is the
    /// location. Paths with fewer than three segments have an empty location.
    pub fn parse(raw: &str) -> Self {
        let dotted = raw.replace('/', ".");
        let segments: Vec<&str> = dotted.split('.').collect();

        if segments.len() <= 2 {
            Self {
                location: String::new(),
                file_name: dotted,
            }
        } else {
            let split_at = segments.len() - 2;
            Self {
                location: segments[..split_at].join("."),
                file_name: segments[split_at..].join("."),
            }
        }
    }

    /// The dot-delimited location portion, empty for top-level files.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The file-name portion, extension included.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Derive the overlay path for `variant`.
    ///
    /// The variant is inserted as a new segment immediately before the
    /// extension. An empty variant still inserts an empty segment; the
    /// resulting path simply names a file that will not exist.
    pub fn with_variant(&self, variant: &str) -> Self {
        let mut segments: Vec<&str> = self.file_name.split('.').collect();
        segments.insert(segments.len() - 1, variant);
        Self {
            location: self.location.clone(),
            file_name: segments.join("."),
        }
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.file_name)
        } else {
            write!(f, "{}.{}", self.location, self.file_name)
        }
    }
}

/// Derive the overlay path string for a logical path and variant.
///
/// # Example
/// ```
/// use confstack::overlay_path;
///
/// assert_eq!(overlay_path("a/b.yml", "prod"), "a.b.prod.yml");
/// ```
pub fn overlay_path(path: &str, variant: &str) -> String {
    LogicalPath::parse(path).with_variant(variant).to_string()
}

/// Compute the full ordered load list for a set of base paths.
///
/// Base paths come first, verbatim and in declaration order, followed by one
/// overlay per base path in the same order. Overlays therefore always load
/// after every base file and override them on conflict.
///
/// # Example
/// ```
/// use confstack::full_load_order;
///
/// assert_eq!(
///     full_load_order(&["a.yml", "b.yml"], "dev"),
///     vec!["a.yml", "b.yml", "a.dev.yml", "b.dev.yml"],
/// );
/// ```
pub fn full_load_order(paths: &[&str], variant: &str) -> Vec<String> {
    let mut ordered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    ordered.extend(paths.iter().map(|p| overlay_path(p, variant)));
    ordered
}
