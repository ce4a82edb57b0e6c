//! Mapping table subsystem.
//!
//! # Data Flow
//! ```text
//! needed_keys.txt ("<sourceKey> <HeaderName>" per line)
//!     → loader.rs (read & parse, fatal on malformed lines)
//!     → table.rs (ordered, key-unique MappingTable)
//!     → shared via Arc, read-only, for the process lifetime
//! ```
//!
//! # Design Decisions
//! - Built once at startup; never mutated while serving
//! - File order is iteration order
//! - Duplicate source keys: the last line wins

pub mod loader;
pub mod table;

pub use loader::{load_mapping, parse_mapping, MappingError};
pub use table::{MappingEntry, MappingTable};
