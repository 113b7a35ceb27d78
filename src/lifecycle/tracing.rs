//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` fmt subscriber for the
//! whole process.
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from
//! [`EditorConfig::log_filter`] (itself overridable with `PAGE_EDITOR_LOG`).
//! Output uses the compact format without module paths; the store logs the
//! entity type as a field instead.
//!
//! ```bash
//! # Store lifecycle and handled requests
//! RUST_LOG=info cargo run
//!
//! # Full payloads, logged once at each client entry point
//! RUST_LOG=debug cargo run
//!
//! # Only the editor core
//! RUST_LOG=page_editor::editor=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a save over the loopback transport reads:
//!
//! ```text
//! INFO Actor started entity_type="Page"
//! INFO save:create:handle: Created entity_type="Page" id=1 size=1
//! INFO save:create:handle: Handled method=POST path=/pages status=201
//! INFO save: Page saved id=1
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::EditorConfig;

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing(config: &EditorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
