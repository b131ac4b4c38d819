//! Declaration contract for layered configuration types.

use crate::error::DeclarationError;
use crate::path::LogicalPath;
use serde::de::DeserializeOwned;

/// A configuration type assembled from layered files.
///
/// Implementors declare their base files once; resolution layers the active
/// variant's overlay files on top and constructs the type from the merged
/// result. Field and type checking happen during construction through serde;
/// add `#[serde(deny_unknown_fields)]` to reject keys the type does not
/// declare.
///
/// # Example
/// ```
/// use confstack::{LayeredConfig, MemorySource, Resolver};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// #[serde(deny_unknown_fields)]
/// struct AppConfig {
///     timeout: u64,
/// }
///
/// impl LayeredConfig for AppConfig {
///     fn config_files() -> &'static [&'static str] {
///         &["configs/app.yml"]
///     }
/// }
///
/// let source = MemorySource::new().with_file("configs/app.yml", "timeout: 10");
/// let config: AppConfig = Resolver::new(source)
///     .load_with(Some("prod"), None)
///     .unwrap();
/// assert_eq!(config.timeout, 10);
/// ```
pub trait LayeredConfig: DeserializeOwned {
    /// The ordered base file list for this type.
    ///
    /// Must be non-empty, and every entry must carry an extension; both are
    /// checked when the declaration is first used.
    fn config_files() -> &'static [&'static str];
}

/// Fetch and validate a type's declared base files.
///
/// Returns the parsed paths in declaration order, or the first validation
/// failure: an empty list, or an entry with no extension segment.
pub fn declared_files<T: LayeredConfig>() -> Result<Vec<LogicalPath>, DeclarationError> {
    let files = T::config_files();

    if files.is_empty() {
        return Err(DeclarationError::Empty);
    }

    files
        .iter()
        .map(|entry| match entry.rsplit_once('.') {
            Some((stem, extension))
                if !stem.is_empty() && !extension.is_empty() && !extension.contains('/') =>
            {
                Ok(LogicalPath::parse(entry))
            }
            _ => Err(DeclarationError::MissingExtension {
                entry: entry.to_string(),
            }),
        })
        .collect()
}
