//! Process-wide active variant selection.
//!
//! The active variant decides which overlay files (`dev`, `prod`, `local`)
//! are layered on top of base configuration files when a resolution call
//! does not name a variant itself. It is a plain last-write-wins global:
//! resolution reads it exactly once per call, and concurrent calls observe
//! whatever value is current at that moment. Callers that need isolation
//! pass an explicit variant instead of relying on the registry.

use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};
use tracing::info;

/// Variant assumed when none has been set.
pub const DEFAULT_VARIANT: &str = "local";

static ACTIVE: LazyLock<ArcSwap<String>> =
    LazyLock::new(|| ArcSwap::from_pointee(DEFAULT_VARIANT.to_string()));

/// Set the active variant for every subsequent no-variant resolution call.
///
/// Unconditionally overwrites the previous value; calls already in flight
/// keep the value they captured.
pub fn set_active(variant: impl Into<String>) {
    let variant = variant.into();
    info!(variant = %variant, "setting active config variant");
    ACTIVE.store(Arc::new(variant));
}

/// Snapshot the currently active variant.
pub fn active() -> Arc<String> {
    ACTIVE.load_full()
}
