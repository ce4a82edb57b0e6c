//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Apply overrides → Validate → Load mapping table
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C received → Broadcast → Stop accepting → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: a missing or malformed mapping never reaches serving
//! - Listener binds last (traffic only when ready)

pub mod shutdown;
pub mod startup;
