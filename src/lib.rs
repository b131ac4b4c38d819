//! Layered configuration resolution.
//!
//! Configuration types declare their base files; resolution layers the
//! active variant's overlay files on top (`configs/app.yml` plus
//! `configs.app.prod.yml`), deep-merges every layer left-to-right, and
//! constructs the type from the merged mapping through serde.
//!
//! ```
//! use confstack::{LayeredConfig, MemorySource, Resolver};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     timeout: u64,
//!     endpoint: String,
//! }
//!
//! impl LayeredConfig for AppConfig {
//!     fn config_files() -> &'static [&'static str] {
//!         &["configs/app.yml"]
//!     }
//! }
//!
//! let source = MemorySource::new()
//!     .with_file("configs/app.yml", "timeout: 10\nendpoint: http://localhost\n")
//!     .with_file("configs/app.prod.yml", "endpoint: https://api.example.com\n");
//!
//! let config: AppConfig = Resolver::new(source)
//!     .load_with(Some("prod"), None)
//!     .unwrap();
//! assert_eq!(config.timeout, 10);
//! assert_eq!(config.endpoint, "https://api.example.com");
//! ```

pub mod declare;
pub mod error;
pub mod merge;
pub mod path;
pub mod resolver;
pub mod source;
pub mod variant;

pub use declare::{LayeredConfig, declared_files};
pub use error::{ConfigError, DeclarationError};
pub use merge::{backfill_profiles, deep_merge, deep_merge_all};
pub use path::{LogicalPath, full_load_order, overlay_path};
pub use resolver::Resolver;
pub use source::{DirSource, Layer, MemorySource, SourceReader, load_all};
pub use variant::{DEFAULT_VARIANT, active, set_active};
