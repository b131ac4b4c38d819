//! Error types for configuration resolution.

use thiserror::Error;

/// A configuration type's declared file list failed validation.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// The declared list has zero entries.
    #[error("declared config file list is empty")]
    Empty,

    /// A declared entry carries no extension segment.
    #[error("declared config file `{entry}` has no extension")]
    MissingExtension { entry: String },
}

/// A resolution call failed.
///
/// "Not found" for an individual file is never an error; a missing overlay
/// simply contributes an empty mapping. Every variant here aborts the whole
/// call, and no partial configuration is ever returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable base file list is available for this call.
    ///
    /// Raised when the type's declaration fails validation and the caller
    /// supplied no override list.
    #[error("config files are required for `{type_name}`: declare a valid file list or pass an override list")]
    ConfigFilesRequired {
        type_name: &'static str,
        #[source]
        reason: DeclarationError,
    },

    /// Reading or parsing a source failed with something other than
    /// "not found".
    #[error("failed to load config source `{path}`")]
    SourceLoad {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The merged mapping was rejected while constructing the target type.
    #[error("merged config rejected while constructing `{type_name}`")]
    Validation {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
