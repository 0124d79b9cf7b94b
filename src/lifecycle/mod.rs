//! Lifecycle management.
//!
//! ```text
//! SIGTERM/SIGINT → Shutdown::trigger
//!     → HTTP server stops accepting, drains
//!     → config watcher task exits
//!     → FaucetRegistry::close_all
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
