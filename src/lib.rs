//! Studyhall realtime - workspace root library.
//!
//! Re-exports the workspace libraries and the shared plumbing used by
//! the diagnostic binaries.
//!
//! - **resockets**: reconnecting WebSocket client (the transport core)
//! - **chatwire**: community chat wire protocol
//! - **bin_common**: config/logging helpers for binaries

// Re-export workspace libraries for convenience
pub use chatwire;
pub use resockets;

pub mod config;

pub mod bin_common {
    //! Shared plumbing for binary executables.

    pub mod cli;

    pub use cli::{config_path_from_env, init_logging, TAP_CONFIG_DEFAULT, TAP_CONFIG_ENV};
}
