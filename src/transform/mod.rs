//! Query-string-to-header promotion.
//!
//! # Data Flow
//! ```text
//! CfRequest.querystring
//!     → query.rs (decode to ordered name → first value)
//!     → promoter.rs (consume mapped keys, write headers)
//!     → query.rs (re-encode what is left)
//!     → CfRequest.querystring
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no shared mutable state
//! - The mapping table is iterated while the separate parameter map shrinks
//! - Malformed fragments are dropped by the decoder, never rejected

pub mod promoter;
pub mod query;

pub use promoter::{promote_query_params, Promotion};
pub use query::QueryParams;
