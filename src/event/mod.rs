//! Edge event model.
//!
//! # Data Flow
//! ```text
//! edge runtime JSON payload
//!     → types.rs (ViewerRequestEvent → Records[0].cf.request)
//!     → transform (promote query parameters into headers)
//!     → CfRequest serialized back to the runtime
//! ```
//!
//! # Design Decisions
//! - Field names follow the edge protocol (camelCase, `Records`)
//! - Fields the promoter never touches are carried through verbatim
//! - Header maps are indexed by lower-cased name

pub mod types;

pub use types::{CfConfig, CfPayload, CfRequest, EventRecord, HeaderRecord, Headers, ViewerRequestEvent};
