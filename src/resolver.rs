//! Resolution of layered configuration types.
//!
//! Ties the pieces together: pick the variant, compute the ordered file
//! list (base files first, then their variant overlays), load every layer,
//! fold them left-to-right, and construct the target type from the merged
//! mapping.

use crate::declare::{LayeredConfig, declared_files};
use crate::error::ConfigError;
use crate::merge::deep_merge_all;
use crate::path::LogicalPath;
use crate::source::{SourceReader, load_all};
use crate::variant;
use serde_json::Value;
use tracing::{debug, info};

/// Resolves configuration types against a source.
///
/// Every call is computed independently from the current registry state and
/// the current source contents; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
}

impl<S: SourceReader> Resolver<S> {
    /// Create a resolver reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve `T` using its declared files and the active variant.
    pub fn load<T: LayeredConfig>(&self) -> Result<T, ConfigError> {
        self.load_with(None, None)
    }

    /// Resolve `T`, optionally overriding the variant and the base files.
    ///
    /// An explicit `variant` takes precedence over the process-wide active
    /// variant, which is read exactly once, here. When `override_paths` is
    /// given the type's declaration is never consulted, so a type with an
    /// unusable declaration still resolves. Without an override, declaration
    /// failures surface as [`ConfigError::ConfigFilesRequired`].
    pub fn load_with<T: LayeredConfig>(
        &self,
        variant: Option<&str>,
        override_paths: Option<&[&str]>,
    ) -> Result<T, ConfigError> {
        let type_name = std::any::type_name::<T>();
        info!(type_name, "resolving layered config");

        let variant = match variant {
            Some(explicit) => explicit.to_string(),
            None => {
                let active = variant::active();
                debug!(variant = %active, "using active variant from registry");
                active.as_str().to_string()
            }
        };

        let base_paths: Vec<LogicalPath> = match override_paths {
            Some(paths) => {
                debug!(?paths, "using override config files");
                paths.iter().map(|p| LogicalPath::parse(p)).collect()
            }
            None => declared_files::<T>().map_err(|reason| {
                ConfigError::ConfigFilesRequired { type_name, reason }
            })?,
        };

        let mut all_paths = base_paths.clone();
        all_paths.extend(base_paths.iter().map(|p| p.with_variant(&variant)));
        debug!(
            files = ?all_paths.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            "computed load order"
        );

        let layers = load_all(&self.source, &all_paths)?;
        let merged = deep_merge_all(layers.into_iter().map(|layer| layer.value));

        construct::<T>(merged)
    }
}

/// Construct `T` from the merged mapping.
///
/// Field presence, value types, and unknown-key rejection are all serde's
/// concern; failures are surfaced unchanged.
fn construct<T: LayeredConfig>(merged: Value) -> Result<T, ConfigError> {
    serde_json::from_value(merged).map_err(|source| ConfigError::Validation {
        type_name: std::any::type_name::<T>(),
        source,
    })
}
